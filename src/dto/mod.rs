pub mod hive_sections;
pub mod hives;
