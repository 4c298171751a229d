pub mod explain;
pub mod pool;
pub mod question;
pub mod stage;
pub mod validate;
