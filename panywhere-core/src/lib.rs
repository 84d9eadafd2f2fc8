//! Platform-independent pieces of the PythonAnywhere client: session
//! configuration, remote path construction, the transport seam and the
//! decoding of provider responses.
//!
//! Nothing here performs network or file I/O, so the CLI and its tests can
//! share identical request and response handling.

pub mod error;
pub mod config;
pub mod remote_path;
pub mod traits;
pub mod reply;
pub mod hook;
