// self
use crate::{
	_prelude::*,
	auth::AuthPhase,
	obs::{self, CallKind, CallOutcome},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Observation scope of one dispatched call or login step.
///
/// The span carries the call family, the resource (or login step) name, and the authorization
/// phase the request was signed under; `status` and `outcome` are filled in as the call ends.
/// Every outcome is also counted through [`obs::record_call_outcome`].
#[derive(Clone, Debug)]
pub struct CallSpan {
	kind: CallKind,
	phase: AuthPhase,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Opens the scope for `resource` signed under `phase`.
	pub fn new(kind: CallKind, resource: &str, phase: AuthPhase) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth1_dispatch.call",
				kind = kind.as_str(),
				resource,
				auth_phase = phase.as_str(),
				status = tracing::field::Empty,
				outcome = tracing::field::Empty,
			);

			Self { kind, phase, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = resource;

			Self { kind, phase }
		}
	}

	/// Authorization phase the call was signed under.
	pub fn phase(&self) -> AuthPhase {
		self.phase
	}

	/// Counts the attempt.
	pub fn attempt(&self) {
		obs::record_call_outcome(self.kind, self.phase, CallOutcome::Attempt);
	}

	/// Records the HTTP status once the transport answers.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		self.span.record("status", status);
		#[cfg(not(feature = "tracing"))]
		let _ = status;
	}

	/// Counts the final outcome of `result` and stamps it on the span.
	pub fn finish<T>(&self, result: &Result<T>) -> CallOutcome {
		let outcome = CallOutcome::of(result);

		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome.as_str());

		obs::record_call_outcome(self.kind, self.phase, outcome);

		outcome
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_passes_the_output_through() {
		let span = CallSpan::new(CallKind::Resource, "statuses_show", AuthPhase::Authenticated);

		span.attempt();

		let value = span.instrument(async { 42 }).await;

		span.record_status(200);

		assert_eq!(value, 42);
		assert_eq!(span.phase(), AuthPhase::Authenticated);
	}

	#[test]
	fn finish_reports_the_outcome_of_the_result() {
		let span = CallSpan::new(CallKind::AccessToken, "confirm_login", AuthPhase::Unauthenticated);

		assert_eq!(span.finish(&Ok(())), CallOutcome::Success);
		assert_eq!(span.finish::<()>(&Err(Error::LoginNotStarted)), CallOutcome::Failure);
	}
}
