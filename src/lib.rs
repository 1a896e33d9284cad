pub mod analysis;
pub mod config;
pub mod plot;
pub mod process;
pub mod report;
