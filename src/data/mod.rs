//! Built-in data: the demo sales series.

pub mod sample;

pub use sample::*;
