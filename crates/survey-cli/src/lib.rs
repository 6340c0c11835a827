//! Survey batch pipeline and its command-line support.

pub mod aggregate;
pub mod config;
pub mod logging;
pub mod pipeline;
