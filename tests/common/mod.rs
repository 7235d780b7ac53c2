//! Helpers shared by the integration tests.

#![allow(dead_code)]

// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
#[cfg(feature = "reqwest")] use httpmock::MockServer;
use parking_lot::Mutex;
use url::Url;
// self
use oauth1_dispatch::{
	auth::Credentials,
	client::ApiClient,
	endpoints::ApiEndpoints,
	error::TransportError,
	http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	resource::ResourceTable,
};
#[cfg(feature = "reqwest")] use oauth1_dispatch::http::ReqwestHttpClient;

pub const CONSUMER_KEY: &str = "consumer-key";
pub const CONSUMER_SECRET: &str = "consumer-secret";

pub const SAMPLE_TABLE: &str = r#"{
	"statuses_show": ["GET", "statuses/show/:id", { "id": true, "trim_user": false }],
	"statuses_update": ["POST", "statuses/update", { "status": true }],
	"statuses_destroy": ["POST", "statuses/destroy/:id", { "id": true }],
	"user_timeline": ["GET", "statuses/user_timeline", { "screen_name": false, "count": false }],
	"account_verify": ["GET", "account/verify_credentials", {}],
	"search": ["GET", "search/tweets"]
}"#;

/// Transport that replays canned responses and records every request it receives.
#[derive(Debug, Default)]
pub struct RecordingTransport {
	responses: Mutex<VecDeque<HttpResponse>>,
	requests: Mutex<Vec<HttpRequest>>,
}
impl RecordingTransport {
	pub fn replying(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
		Self { responses: Mutex::new(responses.into_iter().collect()), ..Self::default() }
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().clone()
	}
}
impl HttpTransport for RecordingTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		self.requests.lock().push(request);

		let response = self.responses.lock().pop_front();

		Box::pin(async move {
			response.ok_or_else(|| {
				TransportError::Io(std::io::Error::other("no canned response left"))
			})
		})
	}
}

pub fn sample_table() -> Arc<ResourceTable> {
	Arc::new(ResourceTable::from_json_str(SAMPLE_TABLE).expect("Sample table should load."))
}

pub fn consumer_credentials() -> Credentials {
	Credentials::new(CONSUMER_KEY, CONSUMER_SECRET)
}

pub fn example_endpoints() -> ApiEndpoints {
	endpoints_for("https://api.example.com/")
}

pub fn endpoints_for(host: &str) -> ApiEndpoints {
	let host = Url::parse(host).expect("Host fixture should parse.");

	ApiEndpoints::builder()
		.api_base(host.join("1.1/").expect("API base should join."))
		.oauth_host(&host)
		.expect("OAuth endpoints should join.")
		.build()
		.expect("Endpoint fixture should build.")
}

pub fn recording_client(
	credentials: Credentials,
	transport: Arc<RecordingTransport>,
) -> ApiClient<RecordingTransport> {
	ApiClient::with_transport(credentials, sample_table(), example_endpoints(), transport)
}

#[cfg(feature = "reqwest")]
pub fn mock_client(server: &MockServer, credentials: Credentials) -> ApiClient<ReqwestHttpClient> {
	ApiClient::with_transport(
		credentials,
		sample_table(),
		endpoints_for(&server.base_url()),
		ReqwestHttpClient::default(),
	)
}
