//! Command implementations for the medstock CLI

pub mod migrate;
pub mod serve;
pub mod total;

pub use migrate::run_migrate;
pub use serve::run_serve;
pub use total::run_total;
