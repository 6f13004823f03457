//! Core trait shared by LC-3 CPU implementations and their backing store.

mod bus;

pub use bus::Bus;
