//! Immutable endpoint configuration injected into every client.
//!
//! [`ApiEndpoints`] carries the REST base URL that resource templates are joined onto plus the
//! three OAuth 1.0a endpoints the login flow talks to. Values are validated once by
//! [`ApiEndpointsBuilder::build`], so nothing downstream has to re-check them.

/// Builder API for assembling endpoint sets.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

const TWITTER_API_BASE: &str = "https://api.twitter.com/1.1/";
const TWITTER_OAUTH_HOST: &str = "https://api.twitter.com/";

/// REST base URL plus the OAuth 1.0a endpoint set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoints {
	/// Base every resource template is joined onto; always ends with `/`.
	pub api_base: Url,
	/// Endpoint issuing temporary request tokens.
	pub request_token: Url,
	/// Page the user visits to approve the application and read the PIN.
	pub authorize: Url,
	/// Endpoint exchanging an approved request token for an access token.
	pub access_token: Url,
}
impl ApiEndpoints {
	/// Creates a new builder.
	pub fn builder() -> ApiEndpointsBuilder {
		ApiEndpointsBuilder::default()
	}

	/// Twitter's v1.1 REST base and `/oauth/*` endpoints.
	pub fn twitter() -> Result<Self, EndpointsError> {
		Self::builder().api_base_str(TWITTER_API_BASE)?.oauth_host_str(TWITTER_OAUTH_HOST)?.build()
	}

	/// Builds the user-facing authorization URL for a request token.
	pub fn authorize_url(&self, request_token: &str) -> Url {
		let mut url = self.authorize.clone();

		url.query_pairs_mut().append_pair("oauth_token", request_token);

		url
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn twitter_defaults_point_at_v1_1() {
		let endpoints = ApiEndpoints::twitter().expect("Default endpoints should build.");

		assert_eq!(endpoints.api_base.as_str(), "https://api.twitter.com/1.1/");
		assert_eq!(endpoints.request_token.as_str(), "https://api.twitter.com/oauth/request_token");
		assert_eq!(
			endpoints.authorize_url("req-token").as_str(),
			"https://api.twitter.com/oauth/authorize?oauth_token=req-token"
		);
		assert_eq!(endpoints.access_token.path(), "/oauth/access_token");
	}
}
