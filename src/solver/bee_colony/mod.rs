pub mod neighborhood;
pub mod search;
pub mod seed;

pub use neighborhood::*;
pub use search::*;
pub use seed::*;
