//! Utility helpers shared across crates

pub mod duration;
