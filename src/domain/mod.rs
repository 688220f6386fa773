pub mod hive;
pub mod hive_section;
pub mod types;
pub mod user;
