//! Client credentials as produced by a key-loading helper.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AuthState, KeyPair},
	dispatch::{ArgumentValue, CallArguments, validate},
	error::ValidationError,
	resource::ArgumentRules,
};

const CREDENTIALS_LABEL: &str = "credentials";
const TOKEN_FIELDS: [&str; 2] = ["oauth_token", "oauth_token_secret"];

/// Consumer credentials plus an optional pre-authorized access token.
///
/// The consumer pair never changes for the lifetime of a client; only the authorization state
/// derived from [`Credentials::access`] moves, and only through the login flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Application key + secret.
	pub consumer: KeyPair,
	/// Access token + secret obtained from an earlier login, if any.
	pub access: Option<KeyPair>,
}
impl Credentials {
	/// Creates consumer-only credentials; the client starts unauthenticated.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
		Self { consumer: KeyPair::new(consumer_key, consumer_secret), access: None }
	}

	/// Attaches an access token so the client starts authenticated.
	pub fn with_access_token(
		mut self,
		token: impl Into<String>,
		secret: impl Into<String>,
	) -> Self {
		self.access = Some(KeyPair::new(token, secret));

		self
	}

	/// Builds credentials from a `{consumer_key, consumer_secret, oauth_token?,
	/// oauth_token_secret?}` map.
	///
	/// The map goes through the same validator as resource arguments, so a missing consumer
	/// field fails with [`ValidationError::MissingRequiredArgument`]. A token without its secret
	/// (or the reverse) fails the same way.
	pub fn from_map(value: &Value) -> Result<Self> {
		let rules = ArgumentRules::new([
			("consumer_key", true),
			("consumer_secret", true),
			(TOKEN_FIELDS[0], false),
			(TOKEN_FIELDS[1], false),
		]);
		let args =
			validate(CallArguments::Raw(value.clone()), Some(&rules), CREDENTIALS_LABEL)?;
		let field = |name: &str| args.get(name).map(ArgumentValue::to_param);
		let consumer = KeyPair::new(
			field("consumer_key").unwrap_or_default(),
			field("consumer_secret").unwrap_or_default(),
		);
		let access = match (field(TOKEN_FIELDS[0]), field(TOKEN_FIELDS[1])) {
			(Some(token), Some(secret)) => Some(KeyPair::new(token, secret)),
			(None, None) => None,
			(token, _) => {
				let missing = if token.is_some() { TOKEN_FIELDS[1] } else { TOKEN_FIELDS[0] };

				return Err(ValidationError::MissingRequiredArgument {
					resource: CREDENTIALS_LABEL.into(),
					missing: vec![missing.into()],
					required: TOKEN_FIELDS.iter().map(|name| (*name).to_owned()).collect(),
				}
				.into());
			},
		};

		Ok(Self { consumer, access })
	}

	pub(crate) fn initial_state(&self) -> AuthState {
		match &self.access {
			Some(pair) => AuthState::Authenticated(AccessToken::from_pair(pair.clone())),
			None => AuthState::Unauthenticated,
		}
	}
}
