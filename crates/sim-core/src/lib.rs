//! Core traits and types for cycle-stepped bus co-simulation.
//!
//! Everything advances one bus clock at a time, driven by the caller. There
//! is no scheduler and no background activity: a component only moves when
//! somebody hands it the next bus sample.

mod cycle;
mod memory;
mod observable;
mod serial;

pub use cycle::BusCycle;
pub use memory::WordMemory;
pub use observable::{Observable, Value};
pub use serial::BitSerial;
