//! OAuth 1.0a request signing and the three login round-trips.
//!
//! [`OAuthSigner`] implements the HMAC-SHA1 scheme of RFC 5849: every protocol, query, and form
//! parameter is percent-encoded, sorted, and folded into the signature base string, and the
//! result travels in an `Authorization: OAuth ...` header. [`OAuth1Facade`] builds on it to talk
//! to the request-token and access-token endpoints.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, KeyPair, RequestToken},
	endpoints::ApiEndpoints,
	error::{ConfigError, TransportError},
	http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ResponseMeta},
	object::{ApiObject, ObjectKind},
};

/// Signature method advertised in every signed request.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Protocol version advertised in every signed request.
pub const OAUTH_VERSION: &str = "1.0";
/// Callback value selecting the PIN (out-of-band) flow.
pub const OUT_OF_BAND: &str = "oob";

const NONCE_LEN: usize = 32;
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// RFC 3986 unreserved characters stay as-is; everything else is encoded.
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

type HmacSha1 = Hmac<Sha1>;

/// Percent-encodes `value` the way OAuth 1.0a signatures require.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Protocol parameters that only some requests carry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuthExtras {
	/// `oauth_callback`, sent by the request-token step.
	pub callback: Option<String>,
	/// `oauth_verifier`, sent by the access-token step.
	pub verifier: Option<String>,
}

/// Per-request nonce and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningNonce {
	/// Random alphanumeric string.
	pub nonce: String,
	/// Seconds since the Unix epoch.
	pub timestamp: i64,
}
impl SigningNonce {
	/// Draws a fresh nonce stamped with the current time.
	pub fn fresh() -> Self {
		let nonce = rand::rng()
			.sample_iter(Alphanumeric)
			.take(NONCE_LEN)
			.map(char::from)
			.collect::<String>();

		Self { nonce, timestamp: OffsetDateTime::now_utc().unix_timestamp() }
	}
}

/// Signs requests with consumer credentials and, once available, a token.
#[derive(Clone, Debug)]
pub struct OAuthSigner {
	consumer: KeyPair,
	token: Option<KeyPair>,
}
impl OAuthSigner {
	/// Creates a signer; `token` is the request or access token, if any.
	pub fn new(consumer: KeyPair, token: Option<KeyPair>) -> Self {
		Self { consumer, token }
	}

	/// Computes the `Authorization` header with a fresh nonce.
	pub fn authorization_header(
		&self,
		method: HttpMethod,
		url: &Url,
		params: &BTreeMap<String, String>,
		extras: &OAuthExtras,
	) -> Result<String, ConfigError> {
		self.authorization_header_with(method, url, params, extras, &SigningNonce::fresh())
	}

	/// Computes the `Authorization` header for a caller-provided nonce.
	pub fn authorization_header_with(
		&self,
		method: HttpMethod,
		url: &Url,
		params: &BTreeMap<String, String>,
		extras: &OAuthExtras,
		nonce: &SigningNonce,
	) -> Result<String, ConfigError> {
		let mut protocol = self.protocol_params(extras, nonce);
		let signature = self.signature(method, url, params, &protocol)?;

		protocol.insert("oauth_signature".into(), signature);

		let fields = protocol
			.iter()
			.map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
			.collect::<Vec<_>>();

		Ok(format!("OAuth {}", fields.join(", ")))
	}

	/// Computes the base64 HMAC-SHA1 signature over the request.
	pub fn signature(
		&self,
		method: HttpMethod,
		url: &Url,
		params: &BTreeMap<String, String>,
		protocol: &BTreeMap<String, String>,
	) -> Result<String, ConfigError> {
		let base = signature_base_string(method, url, params, protocol);
		let key = format!(
			"{}&{}",
			percent_encode(self.consumer.secret.expose()),
			self.token
				.as_ref()
				.map(|token| percent_encode(token.secret.expose()))
				.unwrap_or_default()
		);
		let mut mac =
			HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| ConfigError::SigningKey)?;

		mac.update(base.as_bytes());

		Ok(STANDARD.encode(mac.finalize().into_bytes()))
	}

	/// Builds a ready-to-send request: residual arguments go to the query string for
	/// `GET`/`DELETE` and to a form body for `POST`/`PUT`.
	pub fn signed_request(
		&self,
		method: HttpMethod,
		mut url: Url,
		params: BTreeMap<String, String>,
		extras: &OAuthExtras,
	) -> Result<HttpRequest, ConfigError> {
		let authorization = self.authorization_header(method, &url, &params, extras)?;
		let mut headers = vec![("Authorization".to_owned(), authorization)];
		let encoded = encode_pairs(&params);
		let body = if params.is_empty() {
			None
		} else if method.carries_body() {
			headers.push(("Content-Type".to_owned(), FORM_CONTENT_TYPE.to_owned()));

			Some(encoded)
		} else {
			let query = match url.query() {
				Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
				_ => encoded,
			};

			url.set_query(Some(&query));

			None
		};

		Ok(HttpRequest { method, url, headers, body })
	}

	fn protocol_params(
		&self,
		extras: &OAuthExtras,
		nonce: &SigningNonce,
	) -> BTreeMap<String, String> {
		let mut protocol = BTreeMap::new();

		protocol.insert("oauth_consumer_key".into(), self.consumer.key.clone());
		protocol.insert("oauth_nonce".into(), nonce.nonce.clone());
		protocol.insert("oauth_signature_method".into(), SIGNATURE_METHOD.into());
		protocol.insert("oauth_timestamp".into(), nonce.timestamp.to_string());
		protocol.insert("oauth_version".into(), OAUTH_VERSION.into());

		if let Some(token) = &self.token {
			protocol.insert("oauth_token".into(), token.key.clone());
		}
		if let Some(callback) = &extras.callback {
			protocol.insert("oauth_callback".into(), callback.clone());
		}
		if let Some(verifier) = &extras.verifier {
			protocol.insert("oauth_verifier".into(), verifier.clone());
		}

		protocol
	}
}

/// Builds `METHOD&enc(base_url)&enc(sorted_params)`.
///
/// Query pairs already present on `url` are folded into the parameter list and stripped from the
/// base URL, as are fragments.
pub fn signature_base_string(
	method: HttpMethod,
	url: &Url,
	params: &BTreeMap<String, String>,
	protocol: &BTreeMap<String, String>,
) -> String {
	let mut base_url = url.clone();

	base_url.set_query(None);
	base_url.set_fragment(None);

	let mut pairs = url
		.query_pairs()
		.map(|(key, value)| (percent_encode(&key), percent_encode(&value)))
		.chain(
			params
				.iter()
				.chain(protocol.iter())
				.map(|(key, value)| (percent_encode(key), percent_encode(value))),
		)
		.collect::<Vec<_>>();

	pairs.sort();

	let normalized =
		pairs.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&");

	format!(
		"{}&{}&{}",
		method.as_str(),
		percent_encode(base_url.as_str()),
		percent_encode(&normalized)
	)
}

fn encode_pairs(params: &BTreeMap<String, String>) -> String {
	params
		.iter()
		.map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
		.collect::<Vec<_>>()
		.join("&")
}

/// Login round-trips against the configured OAuth endpoints.
pub struct OAuth1Facade<'a, C>
where
	C: ?Sized + HttpTransport,
{
	transport: &'a C,
	endpoints: &'a ApiEndpoints,
	consumer: &'a KeyPair,
}
impl<'a, C> OAuth1Facade<'a, C>
where
	C: ?Sized + HttpTransport,
{
	/// Borrows the pieces a login step needs.
	pub fn new(transport: &'a C, endpoints: &'a ApiEndpoints, consumer: &'a KeyPair) -> Self {
		Self { transport, endpoints, consumer }
	}

	/// Obtains a request token, announcing `callback` (use [`OUT_OF_BAND`] for the PIN flow).
	pub async fn request_token(&self, callback: &str) -> Result<(RequestToken, ResponseMeta)> {
		let signer = OAuthSigner::new(self.consumer.clone(), None);
		let extras = OAuthExtras { callback: Some(callback.to_owned()), verifier: None };
		let request = signer.signed_request(
			HttpMethod::Post,
			self.endpoints.request_token.clone(),
			BTreeMap::new(),
			&extras,
		)?;
		let (fields, meta) = self.exchange(request).await?;
		let token = ApiObject::parse(ObjectKind::RequestToken, &fields)
			.and_then(ApiObject::into_request_token)
			.map_err(ConfigError::from)?;

		Ok((token, meta))
	}

	/// User-facing page where the request token is approved.
	pub fn authorize_url(&self, request_token: &RequestToken) -> Url {
		self.endpoints.authorize_url(&request_token.token.key)
	}

	/// Exchanges an approved request token and the user's PIN for an access token.
	///
	/// The verifier travels only in the signed `Authorization` header.
	pub async fn access_token(
		&self,
		request_token: &RequestToken,
		verifier: &str,
	) -> Result<(AccessToken, ResponseMeta)> {
		let signer = OAuthSigner::new(self.consumer.clone(), Some(request_token.token.clone()));
		let extras = OAuthExtras { callback: None, verifier: Some(verifier.to_owned()) };
		let request = signer.signed_request(
			HttpMethod::Post,
			self.endpoints.access_token.clone(),
			BTreeMap::new(),
			&extras,
		)?;
		let (fields, meta) = self.exchange(request).await?;
		let token = ApiObject::parse(ObjectKind::AccessToken, &fields)
			.and_then(ApiObject::into_access_token)
			.map_err(ConfigError::from)?;

		Ok((token, meta))
	}

	async fn exchange(
		&self,
		request: HttpRequest,
	) -> Result<(BTreeMap<String, String>, ResponseMeta)> {
		let response = self.transport.execute(request).await?;
		let meta = ResponseMeta::from_response(&response);

		Ok((classify(response)?, meta))
	}
}
impl<C> Debug for OAuth1Facade<'_, C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth1Facade")
			.field("endpoints", self.endpoints)
			.field("consumer", self.consumer)
			.finish()
	}
}

/// Parses a 2xx form body; 4xx means the server refused the credentials.
fn classify(response: HttpResponse) -> Result<BTreeMap<String, String>> {
	match response.status {
		_ if response.is_success() =>
			Ok(url::form_urlencoded::parse(&response.body).into_owned().collect()),
		400..=499 => Err(Error::AuthorizationDenied {
			reason: response.body_preview(),
			status: response.status,
		}),
		_ => Err(TransportError::UnexpectedStatus {
			status: response.status,
			body_preview: response.body_preview(),
			status_line: response.status_line,
		}
		.into()),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn golden_signer() -> OAuthSigner {
		OAuthSigner::new(
			KeyPair::new("xvz1evFS4wEEPTGEFPHBog", "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"),
			Some(KeyPair::new(
				"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
				"LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
			)),
		)
	}

	fn golden_nonce() -> SigningNonce {
		SigningNonce {
			nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".into(),
			timestamp: 1_318_622_958,
		}
	}

	#[test]
	fn hmac_sha1_signature_matches_the_published_vector() {
		let url =
			Url::parse("https://api.twitter.com/1.1/statuses/update.json?include_entities=true")
				.expect("Golden URL should parse.");
		let params = BTreeMap::from([(
			"status".to_owned(),
			"Hello Ladies + Gentlemen, a signed OAuth request!".to_owned(),
		)]);
		let header = golden_signer()
			.authorization_header_with(
				HttpMethod::Post,
				&url,
				&params,
				&OAuthExtras::default(),
				&golden_nonce(),
			)
			.expect("Golden request should sign.");

		assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
		assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
	}

	#[test]
	fn base_string_sorts_encoded_pairs_and_strips_the_query() {
		let url = Url::parse("https://example.com/a b?z=1&a=%7E").expect("URL should parse.");
		let base = signature_base_string(
			HttpMethod::Get,
			&url,
			&BTreeMap::from([("m".to_owned(), "x y".to_owned())]),
			&BTreeMap::new(),
		);

		assert_eq!(base, "GET&https%3A%2F%2Fexample.com%2Fa%2520b&a%3D~%26m%3Dx%2520y%26z%3D1");
	}

	#[test]
	fn signed_requests_place_arguments_by_verb() {
		let signer = OAuthSigner::new(KeyPair::new("ck", "cs"), None);
		let url = Url::parse("https://api.example.com/1.1/search.json").expect("URL should parse.");
		let params = BTreeMap::from([("q".to_owned(), "a&b".to_owned())]);
		let get = signer
			.signed_request(HttpMethod::Get, url.clone(), params.clone(), &OAuthExtras::default())
			.expect("GET should sign.");

		assert_eq!(get.url.query(), Some("q=a%26b"));
		assert!(get.body.is_none());

		let post = signer
			.signed_request(HttpMethod::Post, url, params, &OAuthExtras::default())
			.expect("POST should sign.");

		assert_eq!(post.url.query(), None);
		assert_eq!(post.body.as_deref(), Some("q=a%26b"));
		assert_eq!(post.header("content-type"), Some(FORM_CONTENT_TYPE));
		assert!(post.header("authorization").is_some_and(|value| !value.contains("oauth_token=")));
	}

	#[test]
	fn fresh_nonces_are_alphanumeric() {
		let nonce = SigningNonce::fresh();

		assert_eq!(nonce.nonce.len(), NONCE_LEN);
		assert!(nonce.nonce.chars().all(|c| c.is_ascii_alphanumeric()));
		assert!(nonce.timestamp > 0);
	}

	#[test]
	fn login_responses_are_classified_by_status() {
		let ok = classify(HttpResponse::new(200, "oauth_token=t&oauth_token_secret=s"))
			.expect("2xx should parse.");

		assert_eq!(ok.get("oauth_token").map(String::as_str), Some("t"));
		assert!(matches!(
			classify(HttpResponse::new(401, "Invalid oauth_verifier")),
			Err(Error::AuthorizationDenied { status: 401, ref reason })
				if reason == "Invalid oauth_verifier"
		));
		assert!(matches!(
			classify(HttpResponse::new(503, "")),
			Err(Error::Transport(TransportError::UnexpectedStatus { status: 503, .. }))
		));
	}
}
