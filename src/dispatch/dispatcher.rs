//! Signed execution of one declared resource.

// self
use crate::{
	_prelude::*,
	auth::{AuthState, KeyPair},
	dispatch::{self, CallArguments},
	endpoints::ApiEndpoints,
	http::{HttpResponse, HttpTransport, ResponseMeta},
	oauth::{OAuthExtras, OAuthSigner},
	obs::{CallKind, CallSpan},
	resource::ResourceDeclaration,
};

/// Label used in diagnostics when a call has no resource name.
pub const DEFAULT_RESOURCE_LABEL: &str = "resource";

/// Decoded body plus response metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
	/// JSON body; `None` when the body was empty or not UTF-8.
	pub body: Option<Value>,
	/// Status, status line, and headers.
	pub meta: ResponseMeta,
}
impl ApiResponse {
	/// Decoded JSON body.
	pub fn body(&self) -> Option<&Value> {
		self.body.as_ref()
	}

	/// HTTP status code.
	pub fn status(&self) -> u16 {
		self.meta.status
	}

	/// Raw status line.
	pub fn status_line(&self) -> &str {
		&self.meta.status_line
	}

	/// Response headers keyed by lower-case name.
	pub fn headers(&self) -> &BTreeMap<String, String> {
		&self.meta.headers
	}

	/// Splits the response into body and metadata.
	pub fn into_parts(self) -> (Option<Value>, ResponseMeta) {
		(self.body, self.meta)
	}
}

/// Validates, templates, signs, executes, and decodes declared resources.
///
/// The dispatcher shares the client's authorization state, so calls made after a login are
/// signed with the new access token without rebuilding anything.
pub struct ResourceDispatcher<C>
where
	C: ?Sized + HttpTransport,
{
	pub(crate) transport: Arc<C>,
	pub(crate) endpoints: ApiEndpoints,
	pub(crate) consumer: KeyPair,
	pub(crate) auth: Arc<RwLock<AuthState>>,
}
impl<C> ResourceDispatcher<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a dispatcher over a shared transport and authorization state.
	pub fn new(
		transport: Arc<C>,
		endpoints: ApiEndpoints,
		consumer: KeyPair,
		auth: Arc<RwLock<AuthState>>,
	) -> Self {
		Self { transport, endpoints, consumer, auth }
	}

	/// Endpoint configuration used to resolve templates.
	pub fn endpoints(&self) -> &ApiEndpoints {
		&self.endpoints
	}

	/// Calls `declaration` with `args`; `name` labels diagnostics (defaults to `"resource"`).
	///
	/// Validation and templating failures return before any I/O. Status codes are not
	/// interpreted: a 4xx with a JSON error payload is a successful call.
	pub async fn call(
		&self,
		declaration: &ResourceDeclaration,
		args: CallArguments,
		name: Option<&str>,
	) -> Result<ApiResponse> {
		let name = name.unwrap_or(DEFAULT_RESOURCE_LABEL);
		let (phase, token) = {
			let auth = self.auth.read();

			(auth.phase(), auth.signing_token())
		};
		let span = CallSpan::new(CallKind::Resource, name, phase);

		span.attempt();

		let result = span
			.instrument(async {
				declaration.validate(name)?;

				let args = dispatch::validate(args, declaration.rules.as_ref(), name)?;
				let resolved = dispatch::resolve(
					&self.endpoints.api_base,
					&declaration.template,
					args.stringify(),
					name,
				)?;
				let request = OAuthSigner::new(self.consumer.clone(), token).signed_request(
					declaration.method,
					resolved.url,
					resolved.params,
					&OAuthExtras::default(),
				)?;
				let response = self.transport.execute(request).await?;

				span.record_status(response.status);

				#[cfg(feature = "tracing")]
				tracing::debug!(
					resource = name,
					status = response.status,
					"resource call completed"
				);

				decode(response)
			})
			.await;

		span.finish(&result);

		result
	}
}
impl<C> Debug for ResourceDispatcher<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResourceDispatcher")
			.field("endpoints", &self.endpoints)
			.field("consumer", &self.consumer)
			.field("auth_phase", &self.auth.read().phase())
			.finish()
	}
}

/// Decodes textual bodies as JSON; empty and binary bodies decode to `None`.
///
/// A decode failure keeps the response metadata so callers can still act on the status line
/// and headers (an HTML 503 with `Retry-After`, say).
pub(crate) fn decode(response: HttpResponse) -> Result<ApiResponse> {
	let meta = ResponseMeta::from_response(&response);
	let body = match std::str::from_utf8(&response.body) {
		Ok(text) if !text.trim().is_empty() => {
			let mut de = serde_json::Deserializer::from_str(text);

			match serde_path_to_error::deserialize::<_, Value>(&mut de) {
				Ok(value) => Some(value),
				Err(source) => return Err(Error::Decode { source, meta: Box::new(meta) }),
			}
		},
		_ => None,
	};

	Ok(ApiResponse { body, meta })
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn json_bodies_decode_with_their_metadata() {
		let response = decode(
			HttpResponse::new(404, r#"{"errors":[{"code":34}]}"#)
				.with_header("x-rate-limit-remaining", "14"),
		)
		.expect("JSON error payloads should decode.");

		assert_eq!(response.status(), 404);
		assert_eq!(response.body(), Some(&json!({ "errors": [{ "code": 34 }] })));
		assert_eq!(response.meta.header("X-Rate-Limit-Remaining"), Some("14"));
	}

	#[test]
	fn empty_and_binary_bodies_decode_to_none() {
		assert_eq!(decode(HttpResponse::new(204, "")).expect("Empty body should pass.").body, None);
		assert_eq!(
			decode(HttpResponse::new(200, vec![0xff, 0xfe, 0x00]))
				.expect("Binary body should pass.")
				.body,
			None
		);
	}

	#[test]
	fn non_json_text_fails_with_the_response_metadata() {
		let err = decode(
			HttpResponse::new(503, "<html>Over capacity</html>").with_header("Retry-After", "30"),
		)
		.expect_err("HTML should fail to decode.");
		let Error::Decode { meta, .. } = err else {
			panic!("Expected a decode error, got {err:?}.");
		};

		assert_eq!(meta.status, 503);
		assert_eq!(meta.status_line, "HTTP/1.1 503");
		assert_eq!(meta.header("retry-after"), Some("30"));
		assert_eq!(meta.retry_after, Some(Duration::seconds(30)));
	}
}
