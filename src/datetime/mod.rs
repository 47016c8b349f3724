//! Packed temporal value and calendar math

pub mod calendar;
pub mod packed;

pub use packed::{DateTimeParts, DateTimeValue, TimeKind};
