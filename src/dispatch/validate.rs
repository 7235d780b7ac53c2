//! Argument checks run before any request is built.

// self
use crate::{
	_prelude::*,
	dispatch::{ArgumentSet, ArgumentValue, CallArguments},
	error::ValidationError,
	resource::ArgumentRules,
};

enum Candidate {
	Scalar(ArgumentValue),
	Structured(Value),
}

/// Checks `args` against `rules` and returns the accepted scalar set.
///
/// Keys are visited in sorted order; each is checked for being declared, then for being a
/// scalar. Required names are only checked once every supplied key passed. Without rules the
/// endpoint is free-form: every key is accepted and structured values travel as compact JSON
/// text.
pub fn validate(
	args: CallArguments,
	rules: Option<&ArgumentRules>,
	resource: &str,
) -> Result<ArgumentSet, ValidationError> {
	let candidates = candidates(args, resource)?;
	let Some(rules) = rules else {
		return Ok(candidates
			.into_iter()
			.map(|(name, candidate)| match candidate {
				Candidate::Scalar(value) => (name, value),
				Candidate::Structured(value) => (name, ArgumentValue::Text(value.to_string())),
			})
			.collect());
	};
	let mut accepted = ArgumentSet::new();

	for (name, candidate) in candidates {
		if !rules.allows(&name) {
			return Err(ValidationError::UnknownArgument {
				resource: resource.to_owned(),
				argument: name,
				allowed: rules.allowed(),
			});
		}

		match candidate {
			Candidate::Scalar(value) => {
				accepted.insert(name, value);
			},
			Candidate::Structured(_) =>
				return Err(ValidationError::NonScalarArgument {
					resource: resource.to_owned(),
					argument: name,
				}),
		}
	}

	let required = rules.required();
	let missing = required
		.iter()
		.filter(|name| !accepted.contains(name))
		.cloned()
		.collect::<Vec<_>>();

	if !missing.is_empty() {
		return Err(ValidationError::MissingRequiredArgument {
			resource: resource.to_owned(),
			missing,
			required,
		});
	}

	Ok(accepted)
}

fn candidates(
	args: CallArguments,
	resource: &str,
) -> Result<Vec<(String, Candidate)>, ValidationError> {
	let mut candidates: Vec<(String, Candidate)> = match args {
		CallArguments::Typed(set) =>
			set.into_iter().map(|(name, value)| (name, Candidate::Scalar(value))).collect(),
		CallArguments::Raw(Value::Null) => Vec::new(),
		CallArguments::Raw(Value::Object(map)) => map
			.into_iter()
			.map(|(name, value)| {
				let candidate = match ArgumentValue::from_json(&value) {
					Some(scalar) => Candidate::Scalar(scalar),
					None => Candidate::Structured(value),
				};

				(name, candidate)
			})
			.collect(),
		CallArguments::Raw(_) =>
			return Err(ValidationError::InvalidArgumentShape { resource: resource.to_owned() }),
	};

	candidates.sort_by(|(a, _), (b, _)| a.cmp(b));

	Ok(candidates)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn rules() -> ArgumentRules {
		ArgumentRules::new([("screen_name", false), ("count", false)])
	}

	#[test]
	fn unknown_arguments_name_the_offender_and_the_allowed_set() {
		let err = validate(json!({ "bogus": 1 }).into(), Some(&rules()), "user_timeline")
			.expect_err("Undeclared argument should be rejected.");

		assert_eq!(
			err,
			ValidationError::UnknownArgument {
				resource: "user_timeline".into(),
				argument: "bogus".into(),
				allowed: vec!["count".into(), "screen_name".into()],
			}
		);
	}

	#[test]
	fn key_checks_run_before_required_checks() {
		let rules = ArgumentRules::new([("id", true), ("trim_user", false)]);
		let err = validate(json!({ "trim_user": [1] }).into(), Some(&rules), "statuses_show")
			.expect_err("Structured value should be rejected.");

		assert!(matches!(
			err,
			ValidationError::NonScalarArgument { ref argument, .. } if argument == "trim_user"
		));

		let err = validate(json!({ "trim_user": true }).into(), Some(&rules), "statuses_show")
			.expect_err("Missing id should be rejected.");

		assert_eq!(
			err,
			ValidationError::MissingRequiredArgument {
				resource: "statuses_show".into(),
				missing: vec!["id".into()],
				required: vec!["id".into()],
			}
		);
	}

	#[test]
	fn shape_is_checked_first_and_null_means_empty() {
		let err = validate(json!([1, 2]).into(), None, "search")
			.expect_err("Non-map arguments should be rejected.");

		assert_eq!(err, ValidationError::InvalidArgumentShape { resource: "search".into() });
		assert!(
			validate(Value::Null.into(), Some(&rules()), "search")
				.expect("Null arguments should count as empty.")
				.is_empty()
		);
	}

	#[test]
	fn free_form_endpoints_accept_everything() {
		let args = validate(json!({ "q": "rust", "geo": { "lat": 1 } }).into(), None, "search")
			.expect("Free-form endpoint should accept any argument.");

		assert_eq!(args.get("q"), Some(&ArgumentValue::Text("rust".into())));
		assert_eq!(args.get("geo"), Some(&ArgumentValue::Text(r#"{"lat":1}"#.into())));
	}

	#[test]
	fn empty_rules_reject_every_argument() {
		let err = validate(
			ArgumentSet::new().with("x", 1).into(),
			Some(&ArgumentRules::default()),
			"account_verify",
		)
		.expect_err("Empty rules should accept nothing.");

		assert!(matches!(
			err,
			ValidationError::UnknownArgument { ref allowed, .. } if allowed.is_empty()
		));
	}
}
