//! Resilient loading of third-party checkout scripts
//!
//! The retry, backoff and dedup logic lives in [`loader`]; how a script is
//! actually injected is delegated to a [`ScriptHost`] implementation.

pub mod host;
#[cfg(feature = "http-host")]
pub mod http_host;
pub mod loader;
pub mod transport;

pub use host::{ScriptHost, ScriptTag};
#[cfg(feature = "http-host")]
pub use http_host::HttpScriptHost;
pub use loader::{LoadOptions, LoadState, ScriptLoader};
pub use transport::check_transport;
