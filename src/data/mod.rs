pub mod loader;
pub mod scenario;
