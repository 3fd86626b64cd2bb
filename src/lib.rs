pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod solver;
pub mod utils;
