#![cfg(feature = "reqwest")]

mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use oauth1_dispatch::{
	auth::AuthPhase,
	error::{Error, TransportError},
	http::HttpResponse,
};

const REQUEST_TOKEN_BODY: &str =
	"oauth_token=request-token&oauth_token_secret=request-secret&oauth_callback_confirmed=true";
const ACCESS_TOKEN_BODY: &str = concat!(
	"oauth_token=access-token&oauth_token_secret=access-secret",
	"&user_id=6253282&screen_name=twitterapi"
);

#[tokio::test]
async fn pin_login_completes_against_a_mock_server() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, consumer_credentials());
	let request_token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body(REQUEST_TOKEN_BODY);
		})
		.await;
	let access_token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body(ACCESS_TOKEN_BODY);
		})
		.await;
	let start = client.start_login().await.expect("Request token step should succeed.");

	request_token.assert_async().await;

	assert_eq!(start.meta.status, 200);
	assert_eq!(start.authorize_url.path(), "/oauth/authorize");
	assert_eq!(start.authorize_url.query(), Some("oauth_token=request-token"));
	assert_eq!(client.auth_state(), AuthPhase::RequestTokenObtained);

	let (token, meta) =
		client.confirm_login(" 1234567 \n").await.expect("PIN exchange should succeed.");

	access_token.assert_async().await;

	assert_eq!(meta.status, 200);
	assert_eq!(token.token.key, "access-token");
	assert_eq!(token.screen_name.as_deref(), Some("twitterapi"));
	assert_eq!(client.auth_state(), AuthPhase::Authenticated);
	assert_eq!(client.access_token(), Some(token));
}

#[tokio::test]
async fn rejected_pin_keeps_the_request_token_for_a_retry() {
	let transport = Arc::new(RecordingTransport::replying([
		HttpResponse::new(200, REQUEST_TOKEN_BODY),
		HttpResponse::new(401, "Invalid request token."),
		HttpResponse::new(200, ACCESS_TOKEN_BODY),
		HttpResponse::new(200, "{\"screen_name\":\"twitterapi\"}"),
	]));
	let client = recording_client(consumer_credentials(), transport.clone());

	client.start_login().await.expect("Request token step should succeed.");

	let err = client.confirm_login("000000").await.expect_err("Wrong PIN should be rejected.");

	assert!(matches!(
		err,
		Error::AuthorizationDenied { status: 401, ref reason } if reason == "Invalid request token."
	));
	assert_eq!(client.auth_state(), AuthPhase::RequestTokenObtained);
	assert!(client.access_token().is_none());

	let (token, _) = client.confirm_login("123456").await.expect("Correct PIN should succeed.");

	assert_eq!(token.token.key, "access-token");
	assert_eq!(client.auth_state(), AuthPhase::Authenticated);

	client.call("account_verify", ()).await.expect("Authenticated call should succeed.");

	let requests = transport.requests();
	let header = |idx: usize| {
		requests[idx].header("authorization").expect("Requests should be signed.").to_owned()
	};

	assert_eq!(requests.len(), 4);
	assert!(header(0).contains("oauth_callback=\"oob\""));
	assert!(!header(0).contains("oauth_token="));
	assert!(header(1).contains("oauth_token=\"request-token\""));
	assert!(header(1).contains("oauth_verifier=\"000000\""));
	assert!(header(2).contains("oauth_verifier=\"123456\""));
	assert!(requests[2].body.is_none());
	assert!(header(3).contains("oauth_token=\"access-token\""));
	assert!(!header(3).contains("oauth_verifier"));
}

#[tokio::test]
async fn confirm_without_start_is_rejected() {
	let transport = Arc::new(RecordingTransport::default());
	let client = recording_client(consumer_credentials(), transport.clone());
	let err = client.confirm_login("123456").await.expect_err("Nothing is pending yet.");

	assert!(matches!(err, Error::LoginNotStarted));
	assert!(transport.requests().is_empty());

	let authenticated = recording_client(
		consumer_credentials().with_access_token("at", "ats"),
		transport.clone(),
	);
	let err = authenticated.confirm_login("123456").await.expect_err("Already logged in.");

	assert!(matches!(err, Error::LoginNotStarted));
	assert_eq!(authenticated.auth_state(), AuthPhase::Authenticated);
}

#[tokio::test]
async fn failed_steps_leave_the_state_unchanged() {
	let transport = Arc::new(RecordingTransport::replying([
		HttpResponse::new(503, "Over capacity"),
		HttpResponse::new(200, "oauth_token=only-half"),
		HttpResponse::new(200, REQUEST_TOKEN_BODY),
		HttpResponse::new(500, "Internal error"),
	]));
	let client = recording_client(consumer_credentials(), transport.clone());
	let err = client.start_login().await.expect_err("5xx should fail the request token step.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::UnexpectedStatus { status: 503, .. })
	));
	assert_eq!(client.auth_state(), AuthPhase::Unauthenticated);

	let err = client.start_login().await.expect_err("Half a token pair should be rejected.");

	assert!(matches!(err, Error::Config(_)));
	assert_eq!(client.auth_state(), AuthPhase::Unauthenticated);

	client.start_login().await.expect("Request token step should succeed.");

	let err = client.confirm_login("123456").await.expect_err("5xx should fail the exchange.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::UnexpectedStatus { status: 500, .. })
	));
	assert_eq!(client.auth_state(), AuthPhase::RequestTokenObtained);
}
