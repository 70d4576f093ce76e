//! Adapter implementations of the progress repository port.

pub mod memory;
pub mod postgres;
