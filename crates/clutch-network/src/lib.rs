//! Clutch Network - request client for Clutch APIs
//!
//! Every API call made through [`ClutchClient`] settles either with the
//! original response or with a [`ClutchError`]. Transport failures, HTTP
//! error statuses and proxied "success" responses that embed an upstream
//! failure are all normalized into that one shape, so calling code handles
//! errors uniformly.
//!
//! A 401 additionally sends the user to the login page through an injected
//! [`Navigator`], carrying the current location as the return target.
//!
//! # Example
//!
//! ```no_run
//! use clutch_network::{ClientConfig, ClutchClient};
//!
//! async fn example() -> clutch_network::Result<()> {
//!     let client = ClutchClient::new(ClientConfig::default().with_base_url("https://clutch.example.com"))?;
//!
//!     match client.get("/v1/healthcheck").await {
//!         Ok(response) => println!("{}", response.data),
//!         Err(err) => eprintln!("{} ({})", err.message, err.status),
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

pub use error::{Error, Result};
pub use http::{
    ApiRequest, ApiResponse, ClientConfig, ClutchClient, ClutchError, ErrorStatus,
    LocationProvider, Navigator, TransportFailure,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
