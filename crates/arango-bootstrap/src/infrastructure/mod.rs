//! Infrastructure implementations.
//!
//! Contains the driver port and its implementations.

pub mod config;
pub mod http;
#[cfg(any(test, feature = "testing"))]
pub mod in_memory;
pub mod ports;
