//! Database layer - connection pool, schema and repositories
//!
//! Every backend sits behind `repos::MedicationRepo`; nothing above this
//! module knows which store is in use.

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
