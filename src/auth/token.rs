//! Temporary and long-lived OAuth 1.0a tokens.

// self
use crate::{_prelude::*, auth::KeyPair};

/// Temporary credentials returned by the request-token step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToken {
	/// `oauth_token` + `oauth_token_secret`.
	pub token: KeyPair,
	/// Whether the server echoed `oauth_callback_confirmed=true`.
	pub callback_confirmed: bool,
}

/// Access credentials issued once the user approved the application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	/// `oauth_token` + `oauth_token_secret`.
	pub token: KeyPair,
	/// Numeric user identifier, when the server reports one.
	pub user_id: Option<String>,
	/// User handle, when the server reports one.
	pub screen_name: Option<String>,
}
impl AccessToken {
	/// Wraps a pre-existing token pair without user metadata.
	pub fn from_pair(token: KeyPair) -> Self {
		Self { token, user_id: None, screen_name: None }
	}
}
