//! Destinations for computed metrics.
//!
//! The engine writes every computed or restored metric set to an ordered list of sinks. Hosts
//! implement [`MetricsSink`] for each metrics object they need kept in sync (per-surface
//! metrics, application metrics, vendor duplicates) without the engine knowing about them.

/// Sink trait and the plain in-memory display metrics sink.
pub mod display;
