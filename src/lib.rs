pub mod config;
pub mod distance;
pub mod error;
pub mod estimate;
pub mod logging;
pub mod output;
pub mod project;
pub mod rates;
pub mod server;
