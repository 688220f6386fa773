pub mod config;
pub mod hive;
pub mod hive_section;
