//! Name-to-declaration table with load-time validation.

// self
use crate::{
	_prelude::*,
	error::ValidationError,
	http::HttpMethod,
	resource::{ArgumentRules, ResourceDeclaration},
};

/// Errors raised while building or loading a [`ResourceTable`].
#[derive(Debug, ThisError)]
pub enum ResourceTableError {
	/// Table document is not a JSON object of arrays.
	#[error("Resource table could not be parsed.")]
	Parse(#[from] serde_path_to_error::Error<serde_json::Error>),
	/// One entry is malformed.
	#[error(transparent)]
	Declaration(#[from] ValidationError),
	/// Same name was declared twice.
	#[error("Resource `{name}` is declared more than once.")]
	DuplicateResource {
		/// Repeated resource name.
		name: String,
	},
}

/// Immutable mapping from resource name to [`ResourceDeclaration`].
///
/// Tables are validated once when built, then shared behind an [`Arc`] by every client that
/// dispatches against them.
#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
	entries: HashMap<String, Arc<ResourceDeclaration>>,
}
impl ResourceTable {
	/// Starts an empty builder.
	pub fn builder() -> ResourceTableBuilder {
		ResourceTableBuilder::default()
	}

	/// Loads a table from a JSON object mapping each name to `[method, template, rules?]`.
	pub fn from_json_str(document: &str) -> Result<Self, ResourceTableError> {
		let mut de = serde_json::Deserializer::from_str(document);
		let raw: BTreeMap<String, Vec<Value>> = serde_path_to_error::deserialize(&mut de)?;
		let mut entries = HashMap::with_capacity(raw.len());

		for (name, fields) in raw {
			let declaration = ResourceDeclaration::from_fields(&name, &fields)?;

			entries.insert(name, Arc::new(declaration));
		}

		Ok(Self { entries })
	}

	/// Looks up a declaration by name.
	pub fn get(&self, name: &str) -> Option<Arc<ResourceDeclaration>> {
		self.entries.get(name).cloned()
	}

	/// Whether `name` is declared.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Every declared name, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names = self.entries.keys().map(String::as_str).collect::<Vec<_>>();

		names.sort_unstable();

		names
	}

	/// Number of declared resources.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table declares nothing.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Builder for [`ResourceTable`] values.
#[derive(Debug, Default)]
pub struct ResourceTableBuilder {
	entries: Vec<(String, ResourceDeclaration)>,
}
impl ResourceTableBuilder {
	/// Adds a declaration under `name`.
	pub fn declare(mut self, name: impl Into<String>, declaration: ResourceDeclaration) -> Self {
		self.entries.push((name.into(), declaration));

		self
	}

	/// Adds a declaration built from its parts.
	pub fn resource(
		self,
		name: impl Into<String>,
		method: HttpMethod,
		template: impl Into<String>,
		rules: Option<ArgumentRules>,
	) -> Self {
		let declaration = ResourceDeclaration { method, template: template.into(), rules };

		self.declare(name, declaration)
	}

	/// Consumes the builder and validates every declaration.
	pub fn build(self) -> Result<ResourceTable, ResourceTableError> {
		let mut entries = HashMap::with_capacity(self.entries.len());

		for (name, declaration) in self.entries {
			declaration.validate(&name)?;

			if entries.contains_key(&name) {
				return Err(ResourceTableError::DuplicateResource { name });
			}

			entries.insert(name, Arc::new(declaration));
		}

		Ok(ResourceTable { entries })
	}
}
