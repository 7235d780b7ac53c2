//! Transport primitives for signed REST calls.
//!
//! The module exposes [`HttpTransport`] alongside the crate-owned [`HttpRequest`],
//! [`HttpResponse`], and [`ResponseMeta`] types so downstream crates can plug in custom HTTP
//! clients. The dispatcher signs every request before handing it over, which keeps
//! implementations down to moving bytes: send the method, URL, headers, and optional form body,
//! then report the status line, headers, and raw body.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::HeaderMap;
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// HTTP verbs a resource declaration may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`, arguments travel in the query string.
	Get,
	/// `POST`, arguments travel in a form-encoded body.
	Post,
	/// `PUT`, arguments travel in a form-encoded body.
	Put,
	/// `DELETE`, arguments travel in the query string.
	Delete,
}
impl HttpMethod {
	/// Returns the canonical upper-case verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}

	/// Whether residual arguments are sent as a form body instead of a query string.
	pub const fn carries_body(self) -> bool {
		matches!(self, HttpMethod::Post | HttpMethod::Put)
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HttpMethod {
	type Err = UnsupportedMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(HttpMethod::Get),
			"POST" => Ok(HttpMethod::Post),
			"PUT" => Ok(HttpMethod::Put),
			"DELETE" => Ok(HttpMethod::Delete),
			_ => Err(UnsupportedMethod(s.to_owned())),
		}
	}
}

/// Error returned when a verb is not one of [`HttpMethod`]'s variants.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("HTTP method `{0}` is not supported.")]
pub struct UnsupportedMethod(pub String);

/// Fully signed request handed to an [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Target URL, query string included.
	pub url: Url,
	/// Header pairs, including the OAuth `Authorization` header.
	pub headers: Vec<(String, String)>,
	/// Form-encoded body, when the verb carries one.
	pub body: Option<String>,
}
impl HttpRequest {
	/// Looks up a header by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Raw response returned by an [`HttpTransport`].
#[derive(Clone, Debug, Default)]
pub struct HttpResponse {
	/// Numeric status code.
	pub status: u16,
	/// Status line such as `HTTP/1.1 200 OK`.
	pub status_line: String,
	/// Response headers keyed by lower-case name; repeated headers are joined with `, `.
	pub headers: BTreeMap<String, String>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Builds a response with a synthesized `HTTP/1.1` status line.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			status_line: format!("HTTP/1.1 {status}"),
			headers: BTreeMap::new(),
			body: body.into(),
		}
	}

	/// Adds a header, lower-casing the name.
	pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
		self.headers.insert(name.to_ascii_lowercase(), value.into());

		self
	}

	/// Whether the status code is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Lossy UTF-8 preview of the body, truncated for error messages.
	pub fn body_preview(&self) -> String {
		const BODY_PREVIEW_LIMIT: usize = 256;

		let text = String::from_utf8_lossy(&self.body);
		let trimmed = text.trim();

		match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
			Some((idx, _)) => format!("{}...", &trimmed[..idx]),
			None => trimmed.to_owned(),
		}
	}
}

/// Status and header metadata returned next to every decoded body.
///
/// Callers use it to tell API-level errors (valid JSON carrying an error payload) from
/// transport-level ones (non-2xx without a body); the crate never interprets the status itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMeta {
	/// HTTP status code.
	pub status: u16,
	/// Raw status line.
	pub status_line: String,
	/// Response headers keyed by lower-case name.
	pub headers: BTreeMap<String, String>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ResponseMeta {
	/// Captures the metadata of a raw response.
	pub fn from_response(response: &HttpResponse) -> Self {
		Self {
			status: response.status,
			status_line: response.status_line.clone(),
			headers: response.headers.clone(),
			retry_after: parse_retry_after(&response.headers),
		}
	}

	/// Looks up a header by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}
}

/// Abstraction over HTTP clients able to execute already-signed requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many clients, and
/// the returned future must be `Send` so callers can move dispatch futures across executors.
/// Retries, pooling, TLS, and timeouts are the implementation's business.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the raw response, whatever its status.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status();
			let status_line = format!("{:?} {status}", response.version());
			let headers = flatten_headers(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status: status.as_u16(), status_line, headers, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
	let mut flat = BTreeMap::<String, String>::new();

	for (name, value) in headers {
		let Ok(value) = value.to_str() else {
			continue;
		};

		flat.entry(name.as_str().to_owned())
			.and_modify(|existing| {
				existing.push_str(", ");
				existing.push_str(value);
			})
			.or_insert_with(|| value.to_owned());
	}

	flat
}

const RETRY_AFTER_HEADER: &str = "retry-after";

fn parse_retry_after(headers: &BTreeMap<String, String>) -> Option<Duration> {
	let raw = headers.get(RETRY_AFTER_HEADER)?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
