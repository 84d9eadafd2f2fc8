//! Network transport: the provider's REST API over `reqwest`.

pub mod http;

pub use http::HttpTransport;
