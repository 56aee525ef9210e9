//! Check TLS certificate expiration for a list of domains and report the
//! results as a table, JSON or delimited text.

pub mod commands;
pub mod models;
pub mod output;
pub mod services;
