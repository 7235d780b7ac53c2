// self
use crate::{
	_prelude::*,
	client::ApiClient,
	dispatch::{ApiResponse, CallArguments, ResourceDispatcher},
	http::HttpTransport,
	resource::ResourceDeclaration,
};

/// Resource resolved against the table and bound to a client.
pub struct BoundMethod<C>
where
	C: ?Sized + HttpTransport,
{
	name: Arc<str>,
	declaration: Arc<ResourceDeclaration>,
	dispatcher: Arc<ResourceDispatcher<C>>,
}
impl<C> BoundMethod<C>
where
	C: ?Sized + HttpTransport,
{
	/// Resource name the method was bound under.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declaration the method forwards to.
	pub fn declaration(&self) -> &ResourceDeclaration {
		&self.declaration
	}

	/// Dispatches the resource with `args`.
	pub async fn call(&self, args: impl Into<CallArguments>) -> Result<ApiResponse> {
		self.dispatcher.call(&self.declaration, args.into(), Some(&*self.name)).await
	}
}
impl<C> Clone for BoundMethod<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			declaration: self.declaration.clone(),
			dispatcher: self.dispatcher.clone(),
		}
	}
}
impl<C> Debug for BoundMethod<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BoundMethod")
			.field("name", &self.name)
			.field("declaration", &self.declaration)
			.finish()
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Resolves `name` to a bound method, caching it on first access.
	///
	/// Returns `None` when the table does not declare `name`; nothing is cached in that case.
	pub fn method(&self, name: &str) -> Option<BoundMethod<C>> {
		let mut methods = self.methods.lock();

		if let Some(method) = methods.get(name) {
			return Some(method.clone());
		}

		let method = BoundMethod {
			name: Arc::from(name),
			declaration: self.table.get(name)?,
			dispatcher: self.dispatcher.clone(),
		};

		methods.insert(name.to_owned(), method.clone());

		Some(method)
	}

	/// Calls the resource declared as `name`.
	pub async fn call(&self, name: &str, args: impl Into<CallArguments>) -> Result<ApiResponse> {
		let method =
			self.method(name).ok_or_else(|| Error::UnknownResource { name: name.to_owned() })?;

		method.call(args).await
	}

	/// Number of methods bound so far.
	pub fn cached_methods(&self) -> usize {
		self.methods.lock().len()
	}
}
