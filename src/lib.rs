pub mod client;
pub mod config;
pub mod harness;
pub mod logging;
pub mod outcome;
pub mod report;
pub mod session;
pub mod steps;
pub mod utils;
pub mod validation;
