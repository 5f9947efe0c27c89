pub mod affinity;
pub mod core;
pub mod error;
