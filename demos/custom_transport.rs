//! Plugs a custom [`HttpTransport`] into the client.
//!
//! 1. Implement [`HttpTransport::execute`]; the request arrives fully signed, so the transport
//!    only moves bytes.
//! 2. Wrap it in an `Arc` and pass it to [`ApiClient::with_transport`].
//! 3. Drive the PIN login and a resource call without touching the network.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use oauth1_dispatch::{
	auth::Credentials,
	client::ApiClient,
	endpoints::ApiEndpoints,
	http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	resource::ResourceTable,
};

/// Answers each endpoint with a canned body and logs what it was asked.
#[derive(Debug, Default)]
struct CannedTransport;
impl HttpTransport for CannedTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			println!("-> {} {}", request.method, request.url);

			let response = match request.url.path() {
				"/oauth/request_token" => HttpResponse::new(
					200,
					concat!(
						"oauth_token=demo-request&oauth_token_secret=demo-request-secret",
						"&oauth_callback_confirmed=true"
					),
				),
				"/oauth/access_token" => HttpResponse::new(
					200,
					concat!(
						"oauth_token=demo-access&oauth_token_secret=demo-access-secret",
						"&screen_name=demo"
					),
				),
				path => HttpResponse::new(200, json!({ "path": path }).to_string())
					.with_header("content-type", "application/json"),
			};

			Ok(response)
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let table = ResourceTable::from_json_str(
		r#"{ "statuses_show": ["GET", "statuses/show/:id", { "id": true }] }"#,
	)?;
	let client: ApiClient<CannedTransport> = ApiClient::with_transport(
		Credentials::new("demo-consumer", "demo-consumer-secret"),
		table,
		ApiEndpoints::twitter()?,
		Arc::new(CannedTransport),
	);
	let start = client.start_login().await?;

	println!("Authorize URL: {}", start.authorize_url);

	let (token, _) = client.confirm_login("0000000").await?;

	println!(
		"Logged in as {}; state is now {}.",
		token.screen_name.unwrap_or_default(),
		client.auth_state()
	);

	let response = client.call("statuses_show", json!({ "id": 20 })).await?;

	println!("statuses_show -> {:?}", response.body());

	Ok(())
}
