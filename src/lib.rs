//! Achilles - Vulnerable-by-Design Web Lab
//!
//! Paired vulnerable/hardened demo web apps plus small network helpers
//! (HTTP fetch with and without a timeout, TCP reachability probing) for
//! security training and scanner target practice.

pub mod apps;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod probe;
