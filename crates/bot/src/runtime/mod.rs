//! Runtime — boot sequence and gateway wiring.

pub mod boot;
pub mod gateway;
