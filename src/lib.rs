#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod actuator;
pub mod app;
pub mod config;
pub mod connection;
pub mod heartbeat;
pub mod http;
pub mod network;
pub mod router;
pub mod server;
pub mod template;

#[cfg(feature = "rp2350")]
pub mod board;
