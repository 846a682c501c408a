#![cfg_attr(not(test), no_std)]
//! Driver for SIMCom SIM7600 family cellular modules over a non-blocking UART.
//!
//! [`Client`] runs one AT transaction at a time against any
//! `embedded-hal-nb` serial port, and [`Runner`] uses it to bring the module
//! up: reset, SIM unlock, network registration, signal quality check, PDP
//! context activation, HTTP service setup and GPS start.

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod classifier;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
mod module_timing;
pub mod reader;
pub mod runner;
pub mod status;
pub mod transmit;
pub mod transport;

mod network;
mod registration;
mod services;

#[cfg(test)]
mod test_helpers;

pub use classifier::{Classifier, Pattern, DEFAULT_PATTERNS};
pub use client::{AtClient, Client};
pub use config::{DefaultConfig, ModemConfig};
pub use error::{Error, Reason, Stage};
pub use reader::Framing;
pub use runner::Runner;
pub use status::{Status, Urc};
pub use transport::{Clock, Transport};
