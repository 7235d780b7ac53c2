//! Crate-level error types shared by the dispatcher, the login flow, and table loading.

// self
use crate::{
	_prelude::*, endpoints::EndpointsError, http::ResponseMeta, object::ObjectError,
	resource::ResourceTableError,
};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller arguments or a declaration failed validation before any network I/O.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, unexpected upstream status).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Response body was text but not valid JSON.
	#[error("Response body with status {} is not valid JSON.", .meta.status)]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// Status line, headers, and retry hint of the undecodable response.
		meta: Box<ResponseMeta>,
	},
	/// Authorization server rejected a login step (bad PIN, revoked or expired token).
	#[error("Authorization was denied with status {status}: {reason}.")]
	AuthorizationDenied {
		/// Preview of the server-supplied body.
		reason: String,
		/// HTTP status code returned by the authorization server.
		status: u16,
	},
	/// Resource name is absent from the declaration table.
	#[error("Resource `{name}` is not declared.")]
	UnknownResource {
		/// Name that failed to resolve.
		name: String,
	},
	/// `confirm_login` was called without a pending request token.
	#[error("No request token is pending; call start_login first.")]
	LoginNotStarted,
}

/// Argument and declaration checks, all raised before a request leaves the process.
///
/// Each variant carries the resource name used for diagnostics and the raw name sets; the
/// [`Display`] output renders them as comma-separated lists.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Arguments were not a map.
	#[error("Arguments for `{resource}` must be a map of scalar values.")]
	InvalidArgumentShape {
		/// Resource being called.
		resource: String,
	},
	/// Argument is not declared by the resource's rules.
	#[error(
		"Unknown argument `{argument}` for `{resource}`; allowed arguments: {}.",
		name_list(.allowed)
	)]
	UnknownArgument {
		/// Resource being called.
		resource: String,
		/// Offending argument name.
		argument: String,
		/// Every argument name the resource accepts.
		allowed: Vec<String>,
	},
	/// Argument value is not a string, number, or boolean.
	#[error("Argument `{argument}` for `{resource}` must be a string, number, or boolean.")]
	NonScalarArgument {
		/// Resource being called.
		resource: String,
		/// Offending argument name.
		argument: String,
	},
	/// One or more required arguments were not supplied.
	#[error(
		"Missing required argument(s) {} for `{resource}`; required arguments: {}.",
		name_list(.missing),
		name_list(.required)
	)]
	MissingRequiredArgument {
		/// Resource being called.
		resource: String,
		/// Required names absent from the call.
		missing: Vec<String>,
		/// Every required name of the resource.
		required: Vec<String>,
	},
	/// URL template placeholder has no matching argument.
	#[error("URL template for `{resource}` needs the `{argument}` argument.")]
	MissingPathArgument {
		/// Resource being called.
		resource: String,
		/// Placeholder name.
		argument: String,
	},
	/// Declaration is malformed.
	#[error("Declaration for `{resource}` is invalid: {reason}.")]
	InvalidDeclaration {
		/// Resource the declaration belongs to.
		resource: String,
		/// What is wrong with it.
		reason: String,
	},
}

/// Configuration failures raised while building clients or parsing OAuth responses.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Resolved request URL could not be parsed.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// URL text that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint configuration is invalid.
	#[error(transparent)]
	Endpoints(#[from] EndpointsError),
	/// Declaration table could not be loaded.
	#[error(transparent)]
	ResourceTable(#[from] ResourceTableError),
	/// OAuth endpoint answered with a body that lacks required fields.
	#[error(transparent)]
	TokenResponse(#[from] ObjectError),
	/// HMAC key could not be initialized.
	#[error("OAuth signing key is invalid.")]
	SigningKey,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, unexpected upstream status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
	/// OAuth endpoint answered with a status that is neither success nor a client error.
	#[error("OAuth endpoint returned `{status_line}`.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
		/// Raw status line.
		status_line: String,
		/// Preview of the response body.
		body_preview: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

fn name_list(names: &[String]) -> String {
	if names.is_empty() {
		return "(none)".into();
	}

	names.iter().map(|name| format!("`{name}`")).collect::<Vec<_>>().join(", ")
}
