// self
use crate::{_prelude::*, endpoints::ApiEndpoints};

/// Errors raised while constructing or validating endpoint sets.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointsError {
	/// A required endpoint was never set.
	#[error("Missing {endpoint} endpoint.")]
	MissingEndpoint {
		/// Which endpoint is missing.
		endpoint: &'static str,
	},
	/// Endpoints must use HTTP or HTTPS.
	#[error("The {endpoint} endpoint must use HTTP(S): {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoint cannot carry a path (e.g. `mailto:`).
	#[error("The {endpoint} endpoint cannot be used as a base URL: {url}.")]
	CannotBeBase {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// REST base must end with `/` so templates join below it.
	#[error("The API base URL must end with `/`: {url}.")]
	MissingTrailingSlash {
		/// Base URL that failed validation.
		url: String,
	},
	/// Endpoint text is not a URL.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidUrl {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Builder for [`ApiEndpoints`] values.
#[derive(Clone, Debug, Default)]
pub struct ApiEndpointsBuilder {
	/// REST base URL.
	pub api_base: Option<Url>,
	/// Request-token endpoint.
	pub request_token: Option<Url>,
	/// User authorization page.
	pub authorize: Option<Url>,
	/// Access-token endpoint.
	pub access_token: Option<Url>,
}
impl ApiEndpointsBuilder {
	/// Sets the REST base URL.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Parses and sets the REST base URL.
	pub fn api_base_str(self, url: &str) -> Result<Self, EndpointsError> {
		Ok(self.api_base(parse("api base", url)?))
	}

	/// Sets the request-token endpoint.
	pub fn request_token(mut self, url: Url) -> Self {
		self.request_token = Some(url);

		self
	}

	/// Sets the user authorization page.
	pub fn authorize(mut self, url: Url) -> Self {
		self.authorize = Some(url);

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token(mut self, url: Url) -> Self {
		self.access_token = Some(url);

		self
	}

	/// Derives the three OAuth endpoints from a host following the `/oauth/*` layout.
	pub fn oauth_host(self, host: &Url) -> Result<Self, EndpointsError> {
		let join = |endpoint: &'static str, path: &str| {
			host.join(path).map_err(|source| EndpointsError::InvalidUrl { endpoint, source })
		};

		Ok(self
			.request_token(join("request token", "oauth/request_token")?)
			.authorize(join("authorize", "oauth/authorize")?)
			.access_token(join("access token", "oauth/access_token")?))
	}

	/// Parses `host` and derives the three OAuth endpoints from it.
	pub fn oauth_host_str(self, host: &str) -> Result<Self, EndpointsError> {
		let host = parse("oauth host", host)?;

		self.oauth_host(&host)
	}

	/// Consumes the builder and validates the resulting endpoint set.
	pub fn build(self) -> Result<ApiEndpoints, EndpointsError> {
		let api_base =
			self.api_base.ok_or(EndpointsError::MissingEndpoint { endpoint: "api base" })?;
		let request_token = self
			.request_token
			.ok_or(EndpointsError::MissingEndpoint { endpoint: "request token" })?;
		let authorize =
			self.authorize.ok_or(EndpointsError::MissingEndpoint { endpoint: "authorize" })?;
		let access_token =
			self.access_token.ok_or(EndpointsError::MissingEndpoint { endpoint: "access token" })?;
		let endpoints = ApiEndpoints { api_base, request_token, authorize, access_token };

		endpoints.validate()?;

		Ok(endpoints)
	}
}

impl ApiEndpoints {
	fn validate(&self) -> Result<(), EndpointsError> {
		validate_endpoint("api base", &self.api_base)?;
		validate_endpoint("request token", &self.request_token)?;
		validate_endpoint("authorize", &self.authorize)?;
		validate_endpoint("access token", &self.access_token)?;

		if !self.api_base.path().ends_with('/') {
			return Err(EndpointsError::MissingTrailingSlash { url: self.api_base.to_string() });
		}

		Ok(())
	}
}

fn parse(endpoint: &'static str, url: &str) -> Result<Url, EndpointsError> {
	Url::parse(url).map_err(|source| EndpointsError::InvalidUrl { endpoint, source })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), EndpointsError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(EndpointsError::UnsupportedScheme { endpoint: name, url: url.to_string() });
	}
	if url.cannot_be_a_base() {
		return Err(EndpointsError::CannotBeBase { endpoint: name, url: url.to_string() });
	}

	Ok(())
}
