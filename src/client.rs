//! The API client: lazily bound resource methods plus the PIN login on one object.

mod binder;
mod login;

pub use binder::*;
pub use login::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AuthPhase, Credentials},
	dispatch::ResourceDispatcher,
	endpoints::ApiEndpoints,
	http::HttpTransport,
	resource::ResourceTable,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Calls any declared resource by name and drives the three-legged login.
///
/// The client owns the transport handle, the immutable consumer credentials, the shared
/// declaration table, and the authorization state. Cloning is cheap and every clone sees the
/// same state and the same method cache.
pub struct ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	dispatcher: Arc<ResourceDispatcher<C>>,
	table: Arc<ResourceTable>,
	methods: Arc<Mutex<HashMap<String, BoundMethod<C>>>>,
	login_guard: Arc<AsyncMutex<()>>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client over a caller-provided transport.
	///
	/// A client whose credentials include an access token starts authenticated.
	pub fn with_transport(
		credentials: Credentials,
		table: impl Into<Arc<ResourceTable>>,
		endpoints: ApiEndpoints,
		transport: impl Into<Arc<C>>,
	) -> Self {
		let auth = Arc::new(RwLock::new(credentials.initial_state()));
		let dispatcher =
			ResourceDispatcher::new(transport.into(), endpoints, credentials.consumer, auth);

		Self {
			dispatcher: Arc::new(dispatcher),
			table: table.into(),
			methods: Default::default(),
			login_guard: Default::default(),
		}
	}

	/// Current authorization phase.
	pub fn auth_state(&self) -> AuthPhase {
		self.dispatcher.auth.read().phase()
	}

	/// Active access token, once authenticated.
	pub fn access_token(&self) -> Option<AccessToken> {
		self.dispatcher.auth.read().access_token().cloned()
	}

	/// Endpoint configuration the client was built with.
	pub fn endpoints(&self) -> &ApiEndpoints {
		self.dispatcher.endpoints()
	}

	/// Declaration table shared by every bound method.
	pub fn table(&self) -> &ResourceTable {
		&self.table
	}

	/// Dispatcher backing every bound method.
	pub fn dispatcher(&self) -> &ResourceDispatcher<C> {
		&self.dispatcher
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client against Twitter's v1.1 endpoints with a default reqwest transport.
	pub fn new(credentials: Credentials, table: impl Into<Arc<ResourceTable>>) -> Result<Self> {
		let endpoints = ApiEndpoints::twitter().map_err(crate::error::ConfigError::from)?;

		Ok(Self::with_endpoints(credentials, table, endpoints))
	}

	/// Creates a client against custom endpoints with a default reqwest transport.
	pub fn with_endpoints(
		credentials: Credentials,
		table: impl Into<Arc<ResourceTable>>,
		endpoints: ApiEndpoints,
	) -> Self {
		Self::with_transport(credentials, table, endpoints, ReqwestHttpClient::default())
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			dispatcher: self.dispatcher.clone(),
			table: self.table.clone(),
			methods: self.methods.clone(),
			login_guard: self.login_guard.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("endpoints", self.endpoints())
			.field("auth_state", &self.auth_state())
			.field("resources", &self.table.len())
			.field("cached_methods", &self.cached_methods())
			.finish()
	}
}
