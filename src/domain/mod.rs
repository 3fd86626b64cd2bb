pub mod assignment;
pub mod types;
