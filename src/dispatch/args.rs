//! Caller-supplied argument values.

// self
use crate::_prelude::*;

/// Scalar value accepted as a resource argument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
	/// Boolean, sent as `true`/`false`.
	Bool(bool),
	/// Integer, sent without a decimal point.
	Integer(i64),
	/// Float, sent in its shortest round-trip form.
	Float(f64),
	/// Text, sent verbatim.
	Text(String),
}
impl ArgumentValue {
	/// Converts a JSON scalar; arrays, objects, and `null` yield `None`.
	///
	/// Unsigned integers beyond `i64::MAX` keep their exact digits as text.
	pub fn from_json(value: &Value) -> Option<Self> {
		match value {
			Value::Bool(b) => Some(Self::Bool(*b)),
			Value::Number(n) =>
				if let Some(i) = n.as_i64() {
					Some(Self::Integer(i))
				} else if n.is_u64() {
					Some(Self::Text(n.to_string()))
				} else {
					n.as_f64().map(Self::Float)
				},
			Value::String(s) => Some(Self::Text(s.clone())),
			_ => None,
		}
	}

	/// Renders the value the way it travels on the wire.
	pub fn to_param(&self) -> String {
		match self {
			Self::Bool(b) => b.to_string(),
			Self::Integer(i) => i.to_string(),
			Self::Float(f) => f.to_string(),
			Self::Text(s) => s.clone(),
		}
	}
}
impl Display for ArgumentValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.to_param())
	}
}
impl From<&str> for ArgumentValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for ArgumentValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<bool> for ArgumentValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<i32> for ArgumentValue {
	fn from(value: i32) -> Self {
		Self::Integer(value.into())
	}
}
impl From<i64> for ArgumentValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}
impl From<u32> for ArgumentValue {
	fn from(value: u32) -> Self {
		Self::Integer(value.into())
	}
}
impl From<f64> for ArgumentValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

/// Validated arguments keyed by name, iterated in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentSet(BTreeMap<String, ArgumentValue>);
impl ArgumentSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an argument, builder style.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
		self.insert(name, value);

		self
	}

	/// Inserts or replaces an argument, returning the previous value.
	pub fn insert(
		&mut self,
		name: impl Into<String>,
		value: impl Into<ArgumentValue>,
	) -> Option<ArgumentValue> {
		self.0.insert(name.into(), value.into())
	}

	/// Looks up an argument.
	pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
		self.0.get(name)
	}

	/// Whether an argument is present.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Removes an argument.
	pub fn remove(&mut self, name: &str) -> Option<ArgumentValue> {
		self.0.remove(name)
	}

	/// Number of arguments.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the set is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Argument names, sorted.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Iterates over `(name, value)` pairs, sorted by name.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Stringifies every value into its wire form.
	pub fn stringify(&self) -> BTreeMap<String, String> {
		self.0.iter().map(|(name, value)| (name.clone(), value.to_param())).collect()
	}
}
impl<K, V> FromIterator<(K, V)> for ArgumentSet
where
	K: Into<String>,
	V: Into<ArgumentValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect())
	}
}
impl IntoIterator for ArgumentSet {
	type IntoIter = std::collections::btree_map::IntoIter<String, ArgumentValue>;
	type Item = (String, ArgumentValue);

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Arguments as handed to a call, either already typed or as raw JSON to be shape-checked.
#[derive(Clone, Debug, PartialEq)]
pub enum CallArguments {
	/// Typed scalar arguments.
	Typed(ArgumentSet),
	/// Raw JSON; must be an object (or `null`, meaning no arguments).
	Raw(Value),
}
impl Default for CallArguments {
	fn default() -> Self {
		Self::Typed(ArgumentSet::default())
	}
}
impl From<ArgumentSet> for CallArguments {
	fn from(value: ArgumentSet) -> Self {
		Self::Typed(value)
	}
}
impl From<Value> for CallArguments {
	fn from(value: Value) -> Self {
		Self::Raw(value)
	}
}
impl From<()> for CallArguments {
	fn from(_: ()) -> Self {
		Self::default()
	}
}
