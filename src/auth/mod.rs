//! Credential state and the OAuth2 flow.

mod oauth;
mod session;

pub use oauth::parse_authentication_response;
pub use session::{AccessCredential, Session};
