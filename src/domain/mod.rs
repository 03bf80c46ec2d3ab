pub mod config;
pub mod params;
pub mod ports;
pub mod results;
