//! Shared test helpers for eftrace crates.
//!
//! - [`builders`]: terse construction of events and parsed results
//! - [`fixtures`]: sample log folders written to temporary directories

pub mod builders;
pub mod fixtures;

pub use builders::{EventBuilder, ResultBuilder, base_time, event};
pub use fixtures::{SAMPLE_SESSION, SampleFiles};
