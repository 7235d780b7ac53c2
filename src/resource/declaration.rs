//! Endpoint declarations and the argument rules they carry.

// self
use crate::{_prelude::*, error::ValidationError, http::HttpMethod};

/// Per-endpoint rules mapping each accepted argument name to its "required" flag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentRules(BTreeMap<String, bool>);
impl ArgumentRules {
	/// Builds rules from `(name, required)` pairs.
	pub fn new<I, K>(rules: I) -> Self
	where
		I: IntoIterator<Item = (K, bool)>,
		K: Into<String>,
	{
		Self(rules.into_iter().map(|(name, required)| (name.into(), required)).collect())
	}

	/// Whether `name` is an accepted argument.
	pub fn allows(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Every accepted argument name, sorted.
	pub fn allowed(&self) -> Vec<String> {
		self.0.keys().cloned().collect()
	}

	/// Every required argument name, sorted.
	pub fn required(&self) -> Vec<String> {
		self.0.iter().filter(|(_, required)| **required).map(|(name, _)| name.clone()).collect()
	}

	/// Number of declared arguments.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether no argument is declared; such rules reject every argument.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Immutable description of one API endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDeclaration {
	/// HTTP verb used for the call.
	pub method: HttpMethod,
	/// Path relative to the API base, with `:name` placeholders and no `.json` suffix.
	pub template: String,
	/// Argument rules; `None` means the endpoint accepts free-form arguments.
	pub rules: Option<ArgumentRules>,
}
impl ResourceDeclaration {
	/// Creates a declaration that accepts free-form arguments.
	pub fn new(method: HttpMethod, template: impl Into<String>) -> Self {
		Self { method, template: template.into(), rules: None }
	}

	/// Attaches argument rules.
	pub fn with_rules(mut self, rules: ArgumentRules) -> Self {
		self.rules = Some(rules);

		self
	}

	/// Parses the positional `[method, template, rules?]` form used by JSON tables.
	pub fn from_fields(resource: &str, fields: &[Value]) -> Result<Self, ValidationError> {
		let invalid = |reason: String| ValidationError::InvalidDeclaration {
			resource: resource.to_owned(),
			reason,
		};

		if fields.len() < 2 {
			return Err(invalid(format!(
				"expected at least a method and a URL template, found {} field(s)",
				fields.len()
			)));
		}
		if fields.len() > 3 {
			return Err(invalid(format!("expected at most 3 fields, found {}", fields.len())));
		}

		let method = fields[0]
			.as_str()
			.ok_or_else(|| invalid("the method must be a string".into()))?
			.parse::<HttpMethod>()
			.map_err(|e| invalid(format!("unsupported HTTP method `{}`", e.0)))?;
		let template =
			fields[1].as_str().ok_or_else(|| invalid("the URL template must be a string".into()))?;
		let rules = match fields.get(2) {
			None | Some(Value::Null) => None,
			Some(Value::Object(map)) => {
				let mut rules = BTreeMap::new();

				for (name, flag) in map {
					let required = flag.as_bool().ok_or_else(|| {
						invalid(format!("the rule for `{name}` must be a boolean"))
					})?;

					rules.insert(name.clone(), required);
				}

				Some(ArgumentRules(rules))
			},
			Some(_) => return Err(invalid("the argument rules must be an object".into())),
		};
		let declaration = Self { method, template: template.to_owned(), rules };

		declaration.validate(resource)?;

		Ok(declaration)
	}

	/// Checks the invariants every callable declaration must satisfy.
	pub fn validate(&self, resource: &str) -> Result<(), ValidationError> {
		if self.template.trim().is_empty() {
			return Err(ValidationError::InvalidDeclaration {
				resource: resource.to_owned(),
				reason: "the URL template is empty".into(),
			});
		}

		Ok(())
	}
}
