//! Three-legged PIN login on top of [`ApiClient`].
//!
//! `start_login` obtains a request token with the out-of-band callback and returns the page the
//! user must visit; `confirm_login` exchanges the PIN shown there for an access token. Both steps
//! hold the client's login lock, so concurrent attempts on one client never interleave, and both
//! leave the authorization state untouched when they fail.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AuthState},
	client::ApiClient,
	http::{HttpTransport, ResponseMeta},
	oauth::{OAuth1Facade, OUT_OF_BAND},
	obs::{CallKind, CallSpan},
};

/// Result of [`ApiClient::start_login`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginStart {
	/// Page where the user approves the application and reads the PIN.
	pub authorize_url: Url,
	/// Metadata of the request-token response.
	pub meta: ResponseMeta,
}

impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Obtains a request token and returns the authorization URL.
	///
	/// On success the client moves to [`AuthState::RequestTokenObtained`]; until the PIN is
	/// confirmed, resource calls are signed with consumer credentials only.
	pub async fn start_login(&self) -> Result<LoginStart> {
		let span = CallSpan::new(CallKind::RequestToken, "start_login", self.auth_state());

		span.attempt();

		let result = span
			.instrument(async {
				let _login = self.login_guard.lock().await;
				let dispatcher = self.dispatcher();
				let facade = OAuth1Facade::new(
					dispatcher.transport.as_ref(),
					&dispatcher.endpoints,
					&dispatcher.consumer,
				);
				let (token, meta) = facade.request_token(OUT_OF_BAND).await?;

				span.record_status(meta.status);

				let authorize_url = facade.authorize_url(&token);

				*dispatcher.auth.write() = AuthState::RequestTokenObtained(token);

				Ok(LoginStart { authorize_url, meta })
			})
			.await;

		span.finish(&result);

		result
	}

	/// Exchanges the user's PIN for an access token.
	///
	/// Fails with [`Error::LoginNotStarted`] unless a request token is pending. A 4xx answer
	/// (wrong or expired PIN) fails with [`Error::AuthorizationDenied`] and keeps the request
	/// token, so the caller may retry with a corrected PIN.
	pub async fn confirm_login(&self, pin: &str) -> Result<(AccessToken, ResponseMeta)> {
		let span = CallSpan::new(CallKind::AccessToken, "confirm_login", self.auth_state());

		span.attempt();

		let result = span
			.instrument(async {
				let _login = self.login_guard.lock().await;
				let dispatcher = self.dispatcher();
				let request_token = match &*dispatcher.auth.read() {
					AuthState::RequestTokenObtained(token) => token.clone(),
					_ => return Err(Error::LoginNotStarted),
				};
				let facade = OAuth1Facade::new(
					dispatcher.transport.as_ref(),
					&dispatcher.endpoints,
					&dispatcher.consumer,
				);
				let (access, meta) = facade.access_token(&request_token, pin.trim()).await?;

				span.record_status(meta.status);


				*dispatcher.auth.write() = AuthState::Authenticated(access.clone());

				#[cfg(feature = "tracing")]
				tracing::debug!(screen_name = access.screen_name.as_deref(), "login confirmed");

				Ok((access, meta))
			})
			.await;

		span.finish(&result);

		result
	}
}
