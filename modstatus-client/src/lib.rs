//! Modstatus Client - fetching for Apache mod_status machine-readable reports

pub mod fetch;

pub use fetch::*;
