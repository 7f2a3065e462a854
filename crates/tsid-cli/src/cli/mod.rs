pub mod config;
pub mod output;
pub mod run;
pub mod telemetry;
