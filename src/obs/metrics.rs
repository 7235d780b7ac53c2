// self
use crate::{
	auth::AuthPhase,
	obs::{CallKind, CallOutcome},
};

/// Increments `oauth1_dispatch_call_total` (when enabled), labeled by call family, the
/// authorization phase the call was signed under, and outcome.
pub fn record_call_outcome(kind: CallKind, phase: AuthPhase, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_dispatch_call_total",
			"kind" => kind.as_str(),
			"auth_phase" => phase.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, phase, outcome);
	}
}
