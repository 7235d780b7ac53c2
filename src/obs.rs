//! Optional observability helpers for dispatched calls and login steps.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `oauth1_dispatch.call` carrying `kind`, `resource`,
//!   and `auth_phase`, with `status` and `outcome` recorded when the call ends.
//! - Enable `metrics` to increment the `oauth1_dispatch_call_total` counter for every attempt
//!   and result, labeled by `kind`, `auth_phase`, and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call families observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Declared REST resource.
	Resource,
	/// Request-token step of the login.
	RequestToken,
	/// PIN exchange step of the login.
	AccessToken,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Resource => "resource",
			CallKind::RequestToken => "request_token",
			CallKind::AccessToken => "access_token",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a call.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Final outcome of a finished call.
	pub fn of<T, E>(result: &std::result::Result<T, E>) -> Self {
		if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure }
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
