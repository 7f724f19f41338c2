/// Database configuration and connection management
pub mod database;

/// Default logbook section configuration from config.toml
pub mod sections;
