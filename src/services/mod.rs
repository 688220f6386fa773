pub use errors::{HiveConflict, ServiceError, ServiceResult};

pub mod errors;
pub mod hive_sections;
pub mod hives;
