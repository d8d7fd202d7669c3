//! pagediff CLI
//!
//! Command-line interface for capturing page screenshots and reporting
//! where a reproduction differs from its reference.

pub mod commands;
pub mod config;
pub mod output;
