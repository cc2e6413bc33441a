//! label-station: print numbered Data Matrix labels from the command line.
//!
//! Collects field values, resolves the printer address from configuration and
//! hands the batch to `zpl-printer`.

pub mod alert;
pub mod app;
pub mod cli;
pub mod config;
pub mod fields;
pub mod logger;
