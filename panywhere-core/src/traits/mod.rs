//! Seam between the commands and the provider's HTTP API.

pub mod transport;
