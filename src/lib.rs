pub mod config;
pub mod errors;
pub mod render;
pub mod runner;
pub mod scenarios;
