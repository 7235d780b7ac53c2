#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use oauth1_dispatch::{dispatch::ArgumentSet, error::Error};

#[tokio::test]
async fn get_resource_substitutes_the_path_and_decodes_json() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, consumer_credentials());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.1/statuses/show/42.json").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/json")
				.header("x-rate-limit-remaining", "179")
				.body("{\"id\":42,\"text\":\"hello\"}");
		})
		.await;
	let response = client
		.call("statuses_show", ArgumentSet::new().with("id", 42))
		.await
		.expect("Declared GET resource should succeed.");

	mock.assert_async().await;

	assert_eq!(response.status(), 200);
	assert_eq!(response.body(), Some(&json!({ "id": 42, "text": "hello" })));
	assert_eq!(response.meta.header("x-rate-limit-remaining"), Some("179"));
}

#[tokio::test]
async fn get_resource_sends_residual_arguments_as_query() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, consumer_credentials());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/1.1/statuses/user_timeline.json")
				.query_param("screen_name", "rustlang")
				.query_param("count", "5");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let response = client
		.call("user_timeline", json!({ "screen_name": "rustlang", "count": 5 }))
		.await
		.expect("Timeline call should succeed.");

	mock.assert_async().await;

	assert_eq!(response.body(), Some(&json!([])));
}

#[tokio::test]
async fn post_resource_sends_a_form_body() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, consumer_credentials().with_access_token("at", "ats"));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/1.1/statuses/update.json")
				.header("content-type", "application/x-www-form-urlencoded")
				.body("status=hello%20world%21");
			then.status(200).header("content-type", "application/json").body("{\"id\":7}");
		})
		.await;
	let method = client.method("statuses_update").expect("Update should be declared.");
	let response = method
		.call(ArgumentSet::new().with("status", "hello world!"))
		.await
		.expect("Declared POST resource should succeed.");

	mock.assert_async().await;

	assert_eq!(response.body(), Some(&json!({ "id": 7 })));
}

#[tokio::test]
async fn api_error_payloads_are_returned_not_raised() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, consumer_credentials());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.1/statuses/show/1.json");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"errors\":[{\"code\":144,\"message\":\"No status found with that ID.\"}]}");
		})
		.await;
	let response = client
		.call("statuses_show", json!({ "id": "1" }))
		.await
		.expect("Status codes should not be interpreted.");

	mock.assert_async().await;

	assert_eq!(response.status(), 404);
	assert_eq!(response.body().and_then(|body| body["errors"][0]["code"].as_u64()), Some(144));
}

#[tokio::test]
async fn non_json_text_fails_to_decode() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, consumer_credentials());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.1/search/tweets.json");
			then.status(503).header("retry-after", "30").body("<html>Over capacity</html>");
		})
		.await;
	let err = client
		.call("search", json!({ "q": "rust" }))
		.await
		.expect_err("Plain-text bodies should fail to decode.");

	mock.assert_async().await;

	let Error::Decode { meta, .. } = err else {
		panic!("Expected a decode error, got {err:?}.");
	};

	assert_eq!(meta.status, 503);
	assert_eq!(meta.header("Retry-After"), Some("30"));
	assert!(meta.retry_after.is_some());
}
