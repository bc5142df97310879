//! Theme - Static Colors and Metrics

pub mod colors;
pub mod metrics;

pub use colors::RosterColors;
pub use metrics::Metrics;
