//! `:placeholder` substitution for resource URL templates.

// self
use crate::{
	_prelude::*,
	error::{ConfigError, ValidationError},
};

const JSON_SUFFIX: &str = ".json";

/// Final request URL plus the arguments the template did not consume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedUrl {
	/// Absolute URL with the `.json` suffix.
	pub url: Url,
	/// Arguments left for the query string or form body.
	pub params: BTreeMap<String, String>,
}

/// Substitutes every `:name` token of `template` and joins the result onto `base`.
///
/// Each consumed argument is removed from `params`; a name repeated in the template reuses the
/// same value. Values are inserted verbatim, so URL parsing percent-encodes what it must.
pub fn resolve(
	base: &Url,
	template: &str,
	mut params: BTreeMap<String, String>,
	resource: &str,
) -> Result<ResolvedUrl> {
	let mut consumed = BTreeMap::<String, String>::new();
	let mut path = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(idx) = rest.find(':') {
		path.push_str(&rest[..idx]);

		let after = &rest[idx + 1..];
		let len = after
			.char_indices()
			.find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
			.map_or(after.len(), |(i, _)| i);

		if len == 0 {
			path.push(':');
			rest = after;

			continue;
		}

		let name = &after[..len];
		let value = match consumed.get(name) {
			Some(value) => value.clone(),
			None => {
				let value = params.remove(name).ok_or_else(|| {
					ValidationError::MissingPathArgument {
						resource: resource.to_owned(),
						argument: name.to_owned(),
					}
				})?;

				consumed.insert(name.to_owned(), value.clone());

				value
			},
		};

		path.push_str(&value);
		rest = &after[len..];
	}

	path.push_str(rest);

	let raw = format!("{base}{}{JSON_SUFFIX}", path.trim_start_matches('/'));
	let url = Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source })?;

	Ok(ResolvedUrl { url, params })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn base() -> Url {
		Url::parse("https://api.twitter.com/1.1/").expect("Base URL fixture should parse.")
	}

	fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
		pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
	}

	#[test]
	fn placeholders_are_consumed_from_the_arguments() {
		let resolved = resolve(&base(), "statuses/show/:id", params(&[("id", "42")]), "show")
			.expect("Template should resolve.");

		assert_eq!(resolved.url.as_str(), "https://api.twitter.com/1.1/statuses/show/42.json");
		assert!(resolved.params.is_empty());
	}

	#[test]
	fn residual_arguments_survive_and_repeats_reuse_the_value() {
		let resolved = resolve(
			&base(),
			"/lists/:slug/members/:slug",
			params(&[("slug", "team"), ("count", "5")]),
			"members",
		)
		.expect("Template should resolve.");

		assert_eq!(resolved.url.path(), "/1.1/lists/team/members/team.json");
		assert_eq!(resolved.params, params(&[("count", "5")]));
	}

	#[test]
	fn missing_placeholder_values_are_fatal() {
		let err = resolve(&base(), "users/:user_id/show", params(&[("id", "1")]), "users_show")
			.expect_err("Unresolved placeholder should be rejected.");

		assert!(matches!(
			err,
			Error::Validation(ValidationError::MissingPathArgument { ref argument, .. })
				if argument == "user_id"
		));
	}
}
