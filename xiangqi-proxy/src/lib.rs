//! Development proxy of the xiangqi board UI.
//!
//! Serves the board UI on port 7070 and forwards every request under
//! `/api` to the backend at `http://127.0.0.1:8080`, so that the browser
//! only ever talks to a single origin. Also contains a small client for the
//! suggestion routes of the backend.
//!
//! # Example
//!
//! ```no_run
//! use xiangqi_proxy::{server, ProxyConfig};
//!
//! # async fn run() -> Result<(), xiangqi_proxy::ProxyError> {
//! let (addr, serving) = server::bind(ProxyConfig::default(), std::future::pending())?;
//! println!("listening on {addr}");
//! serving.await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod client;
mod config;
mod errors;

pub mod proxy;
pub mod server;

pub use crate::{
    client::{SuggestionClient, DEFAULT_BASE},
    config::{ProxyConfig, ProxyRule, DEFAULT_PORT, DEFAULT_PREFIX, DEFAULT_TARGET},
    errors::{ClientError, ForwardError, ProxyError},
};
