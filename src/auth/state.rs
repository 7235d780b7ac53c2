//! Authorization state machine shared by the dispatcher and the login flow.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, KeyPair, RequestToken},
};

/// Where a client stands in the three-legged handshake.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
	/// No token; resource calls are signed with consumer credentials only.
	#[default]
	Unauthenticated,
	/// Request token issued; waiting for the user's PIN.
	RequestTokenObtained(RequestToken),
	/// Access token available; resource calls are signed on behalf of the user.
	Authenticated(AccessToken),
}
impl AuthState {
	/// Returns the label of the current state.
	pub fn phase(&self) -> AuthPhase {
		match self {
			AuthState::Unauthenticated => AuthPhase::Unauthenticated,
			AuthState::RequestTokenObtained(_) => AuthPhase::RequestTokenObtained,
			AuthState::Authenticated(_) => AuthPhase::Authenticated,
		}
	}

	/// Returns the access token once authenticated.
	pub fn access_token(&self) -> Option<&AccessToken> {
		match self {
			AuthState::Authenticated(access) => Some(access),
			_ => None,
		}
	}

	/// Token pair resource calls should be signed with, if any.
	pub(crate) fn signing_token(&self) -> Option<KeyPair> {
		self.access_token().map(|access| access.token.clone())
	}
}

/// Data-free label of an [`AuthState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthPhase {
	/// See [`AuthState::Unauthenticated`].
	Unauthenticated,
	/// See [`AuthState::RequestTokenObtained`].
	RequestTokenObtained,
	/// See [`AuthState::Authenticated`].
	Authenticated,
}
impl AuthPhase {
	/// Returns a stable label suitable for span fields and logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthPhase::Unauthenticated => "unauthenticated",
			AuthPhase::RequestTokenObtained => "request_token_obtained",
			AuthPhase::Authenticated => "authenticated",
		}
	}
}
impl Display for AuthPhase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
