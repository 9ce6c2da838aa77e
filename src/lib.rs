pub mod configuration;
pub mod db;
pub mod seed;
pub mod server;
pub mod telemetry;
