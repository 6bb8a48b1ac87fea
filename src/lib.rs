//! NRF24L01 packet monitor.
//!
//! Builds a validated radio session from operator configuration, opens the
//! transceiver in receive mode and polls it forever, hex-dumping every
//! received payload to the diagnostic log.

pub mod config;
pub mod hexdump;
pub mod poller;
pub mod radio;
pub mod session;
