//! Typed parsers for the form-encoded objects the OAuth endpoints return.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, KeyPair, RequestToken},
};

/// Kinds of object the crate knows how to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
	/// Request-token response.
	RequestToken,
	/// Access-token response.
	AccessToken,
}
impl ObjectKind {
	/// Returns a stable label for messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			ObjectKind::RequestToken => "request_token",
			ObjectKind::AccessToken => "access_token",
		}
	}
}
impl Display for ObjectKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Errors raised while parsing an object.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ObjectError {
	/// A required field is absent or empty.
	#[error("The {kind} response is missing `{field}`.")]
	MissingField {
		/// Object being parsed.
		kind: ObjectKind,
		/// Missing field name.
		field: &'static str,
	},
	/// A different kind of object was parsed than requested.
	#[error("Expected a {expected} object, found a {found} object.")]
	UnexpectedKind {
		/// Kind the caller asked for.
		expected: ObjectKind,
		/// Kind actually held.
		found: ObjectKind,
	},
}

/// Parsed object, one variant per [`ObjectKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiObject {
	/// See [`ObjectKind::RequestToken`].
	RequestToken(RequestToken),
	/// See [`ObjectKind::AccessToken`].
	AccessToken(AccessToken),
}
impl ApiObject {
	/// Parses `fields` as an object of `kind`.
	pub fn parse(kind: ObjectKind, fields: &BTreeMap<String, String>) -> Result<Self, ObjectError> {
		let required = |field: &'static str| {
			fields
				.get(field)
				.filter(|value| !value.is_empty())
				.cloned()
				.ok_or(ObjectError::MissingField { kind, field })
		};
		let token = KeyPair::new(required("oauth_token")?, required("oauth_token_secret")?);

		Ok(match kind {
			ObjectKind::RequestToken => Self::RequestToken(RequestToken {
				token,
				callback_confirmed: fields
					.get("oauth_callback_confirmed")
					.is_some_and(|value| value.eq_ignore_ascii_case("true")),
			}),
			ObjectKind::AccessToken => Self::AccessToken(AccessToken {
				token,
				user_id: fields.get("user_id").cloned(),
				screen_name: fields.get("screen_name").cloned(),
			}),
		})
	}

	/// Parses a JSON object whose values are strings, ignoring anything else.
	pub fn from_json(kind: ObjectKind, value: &Value) -> Result<Self, ObjectError> {
		let fields: BTreeMap<String, String> = value
			.as_object()
			.map(|map| {
				map.iter()
					.filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_owned())))
					.collect()
			})
			.unwrap_or_default();

		Self::parse(kind, &fields)
	}

	/// Kind of the parsed object.
	pub fn kind(&self) -> ObjectKind {
		match self {
			Self::RequestToken(_) => ObjectKind::RequestToken,
			Self::AccessToken(_) => ObjectKind::AccessToken,
		}
	}

	/// Unwraps a request token.
	pub fn into_request_token(self) -> Result<RequestToken, ObjectError> {
		match self {
			Self::RequestToken(token) => Ok(token),
			other => Err(ObjectError::UnexpectedKind {
				expected: ObjectKind::RequestToken,
				found: other.kind(),
			}),
		}
	}

	/// Unwraps an access token.
	pub fn into_access_token(self) -> Result<AccessToken, ObjectError> {
		match self {
			Self::AccessToken(token) => Ok(token),
			other => Err(ObjectError::UnexpectedKind {
				expected: ObjectKind::AccessToken,
				found: other.kind(),
			}),
		}
	}
}
