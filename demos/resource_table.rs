//! Loads a declaration table from JSON and calls a few resources by name.
//!
//! Credentials come from the environment (`CONSUMER_KEY`, `CONSUMER_SECRET`, `OAUTH_TOKEN`,
//! `OAUTH_TOKEN_SECRET`) in the same shape a key-loading helper would produce.

// std
use std::env;
// crates.io
use color_eyre::Result;
use serde_json::{Map, Value, json};
// self
use oauth1_dispatch::{auth::Credentials, client::ApiClient, resource::ResourceTable};

const TABLE: &str = r#"{
	"statuses_show": ["GET", "statuses/show/:id", { "id": true, "trim_user": false }],
	"statuses_update": ["POST", "statuses/update", { "status": true, "in_reply_to_status_id": false }],
	"user_timeline": ["GET", "statuses/user_timeline", { "screen_name": false, "count": false }],
	"search": ["GET", "search/tweets"]
}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let keys = ["CONSUMER_KEY", "CONSUMER_SECRET", "OAUTH_TOKEN", "OAUTH_TOKEN_SECRET"]
		.into_iter()
		.filter_map(|name| {
			env::var(name).ok().map(|value| (name.to_ascii_lowercase(), Value::String(value)))
		})
		.collect::<Map<_, _>>();
	let credentials = Credentials::from_map(&Value::Object(keys))?;
	let table = ResourceTable::from_json_str(TABLE)?;

	println!("Declared resources: {}.", table.names().join(", "));

	let client = ApiClient::new(credentials, table)?;

	if let Err(e) = client.call("user_timeline", json!({ "bogus": 1 })).await {
		println!("Rejected before any request: {e}");
	}

	let timeline =
		client.call("user_timeline", json!({ "screen_name": "rustlang", "count": 3 })).await?;

	println!("user_timeline -> {}", timeline.status_line());

	for status in timeline.body().and_then(Value::as_array).into_iter().flatten() {
		println!("- {}", status["text"].as_str().unwrap_or_default());
	}

	let found = client.call("search", json!({ "q": "#rustlang", "count": 5 })).await?;

	println!(
		"search -> {} ({} remaining in this window)",
		found.status_line(),
		found.meta.header("x-rate-limit-remaining").unwrap_or("?")
	);

	Ok(())
}
