pub mod cache;
pub mod pool;
