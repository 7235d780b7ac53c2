//! Secure token secret wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping consumer and token secrets out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Public key plus secret, used for consumer, request-token, and access-token credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
	/// Public half sent as `oauth_consumer_key` or `oauth_token`.
	pub key: String,
	/// Private half that only ever enters the signing key.
	pub secret: TokenSecret,
}
impl KeyPair {
	/// Creates a pair from its two halves.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: key.into(), secret: TokenSecret::new(secret) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let pair = KeyPair::new("consumer-key", "super-secret");

		assert_eq!(format!("{:?}", pair.secret), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{}", pair.secret), "<redacted>");
		assert!(!format!("{pair:?}").contains("super-secret"));
		assert_eq!(pair.secret.expose(), "super-secret");
	}
}
