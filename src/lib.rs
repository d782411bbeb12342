//! Typed client for the Feedly Cloud API.
//!
//! ```no_run
//! use feedly::{Config, FeedlyClient, Session};
//!
//! # async fn run() -> Result<(), feedly::FeedlyError> {
//! let session = Session::with_credential("access-token", "user-id");
//! let client = FeedlyClient::new(&Config::default(), session)?;
//! for subscription in client.subscriptions().await? {
//!     println!("{}", subscription.title.unwrap_or(subscription.id));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The API's loose JSON (0/1 booleans, epoch-millisecond dates with `0` as
//! "unset", scheme-less URLs, `null` counts, collections that are sometimes
//! objects) is normalized by the codecs in [`wire`], so the types in
//! [`models`] are plain Rust values.

pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod models;
pub mod opml;
pub mod wire;

pub use auth::{parse_authentication_response, Session};
pub use client::{ApiRequest, FeedlyClient, FeedlyError};
pub use config::Config;
