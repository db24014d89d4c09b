//! Client library for the Sift Science fraud-detection service.
//!
//! The crate wraps two generations of the Sift REST API:
//!
//! * the **v20x API** (`https://api.siftscience.com/{version}/`) for events,
//!   labels and scores, authenticated with the API key in the body or query;
//! * the **v3 API** (`https://api3.siftscience.com/v3/`) for decisions,
//!   workflows, device fingerprinting and partner accounts, authenticated
//!   with a basic-auth header.
//!
//! Every operation is a single HTTP round trip. Operations validate their
//! arguments synchronously and return a [`client::PendingRequest`], which
//! the caller then awaits, hands a callback, or dispatches through the
//! configured global callback.
//!
//! ```ignore
//! use siftscience_sdk::{ClientConfig, SiftClient};
//! use siftscience_sdk::constants::AbuseType;
//!
//! let config = ClientConfig::builder("my-api-key").build()?;
//! let client = SiftClient::new(config);
//!
//! let response = client
//!     .events()
//!     .login(&serde_json::json!({ "$user_id": "u1", "$login_status": "$success" }))?
//!     .await?;
//! println!("{}", response.status_message().unwrap_or("unknown status"));
//!
//! let score = client.score("u1", &[AbuseType::PaymentAbuse])?.await?;
//!
//! // Or let a callback receive the raw response on a background task.
//! client.score("u2", &[])?.call(|result| {
//!     if let Err(err) = result {
//!         tracing::warn!(%err, "score lookup failed");
//!     }
//! });
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod constants;
pub mod objects;
pub mod signature;
pub mod webhook;

pub use client::{ClientError, Dispatch, PendingRequest, SiftClient};
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
pub use objects::{RawResponse, SiftResponse};
