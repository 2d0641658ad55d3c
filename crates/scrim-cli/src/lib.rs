pub mod config;
pub mod logging;
pub mod report;
pub mod roster;
pub mod runner;
