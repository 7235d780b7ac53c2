//! Interactive PIN (out-of-band) login against Twitter's v1.1 API.
//!
//! The demo asks for the consumer key and secret, prints the authorize URL, waits for the PIN
//! shown after approval, and finally calls `account/verify_credentials` with the new access
//! token. A rejected PIN can be retried without restarting the login.

// std
use std::io::{self, Write};
// crates.io
use color_eyre::Result;
// self
use oauth1_dispatch::{
	auth::Credentials, client::ApiClient, error::Error, http::HttpMethod,
	resource::ResourceTable,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let consumer_key = prompt("Consumer key")?;
	let consumer_secret = prompt("Consumer secret")?;
	let table = ResourceTable::builder()
		.resource(
			"account_verify",
			HttpMethod::Get,
			"account/verify_credentials",
			Some(Default::default()),
		)
		.build()?;
	let client = ApiClient::new(Credentials::new(consumer_key, consumer_secret), table)?;
	let start = client.start_login().await?;

	println!("Open this page, approve the application, and copy the PIN:");
	println!("{}", start.authorize_url);

	let token = loop {
		let pin = prompt("PIN")?;

		match client.confirm_login(&pin).await {
			Ok((token, _)) => break token,
			Err(Error::AuthorizationDenied { reason, status }) => {
				println!("PIN rejected ({status}): {reason}. Try again.");
			},
			Err(e) => return Err(e.into()),
		}
	};

	println!(
		"Logged in as {} (user id {}).",
		token.screen_name.as_deref().unwrap_or("<unknown>"),
		token.user_id.as_deref().unwrap_or("<unknown>")
	);
	println!("Persist these to skip the login next time:");
	println!("  oauth_token        = {}", token.token.key);
	println!("  oauth_token_secret = {}", token.token.secret.expose());

	let response = client.call("account_verify", ()).await?;

	println!("verify_credentials returned `{}`.", response.status_line());

	if let Some(body) = response.body() {
		println!("{}", serde_json::to_string_pretty(body)?);
	}

	Ok(())
}

fn prompt(message: &str) -> Result<String> {
	loop {
		print!("{message}: ");

		io::stdout().flush()?;

		let mut input = String::new();

		io::stdin().read_line(&mut input)?;

		let trimmed = input.trim();

		if !trimmed.is_empty() {
			return Ok(trimmed.to_owned());
		}
	}
}
