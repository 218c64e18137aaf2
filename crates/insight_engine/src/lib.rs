//! Pure local computations behind the dashboard: corpus projection, budget
//! reconciliation and the health fallback. No I/O, no clock, no globals.
//! The same inputs always produce the same outputs, which is what lets the
//! dashboard paint something sensible while the backend is slow or down.

pub mod budget;
pub mod health;
pub mod projection;

pub use budget::{reconcile, resolved_limit, would_exceed_limit};
pub use health::{derive_pulse, HealthInputs};
pub use projection::{project_corpus, project_with_default_return, sip_required};

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
