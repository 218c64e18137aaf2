use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;

use api_client::FinanceBackend;
use insight_engine::{project_with_default_return, sip_required};
use models::defaults::ASSUMED_ANNUAL_RETURN;
use models::{FinancialProfile, GoalPlan};

use crate::state::Provenance;

/// A goal plan plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub plan: GoalPlan,
    pub provenance: Provenance,
}

/// Offline stand-in for the backend planner, complete in shape so the view
/// never renders half a plan. The corpus target is 25x annual income (the 4%
/// withdrawal rule, with income standing in for retirement spending).
pub fn local_plan(profile: &FinancialProfile) -> GoalPlan {
    let needed_corpus = profile.monthly_income * 12.0 * 25.0;
    let years = profile.retirement_age.saturating_sub(profile.current_age);
    GoalPlan {
        needed_corpus,
        monthly_sip_required: sip_required(
            needed_corpus,
            profile.current_savings,
            years,
            ASSUMED_ANNUAL_RETURN,
        ),
        year_by_year_projection: project_with_default_return(profile),
    }
}

/// Fills the projection view: the local plan is written first for an instant
/// paint, then the backend's plan replaces it when (and only when) it
/// arrives while the consumer is still attached. A backend failure keeps
/// the local plan; both completions feed the same slot, last writer wins.
#[derive(Clone)]
pub struct GoalPlanner {
    backend: Arc<dyn FinanceBackend>,
    slot: Arc<RwLock<Option<PlanView>>>,
    live: Arc<AtomicBool>,
}

impl GoalPlanner {
    pub fn new(backend: Arc<dyn FinanceBackend>) -> Self {
        Self {
            backend,
            slot: Arc::new(RwLock::new(None)),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn detach(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    pub async fn current(&self) -> Option<PlanView> {
        self.slot.read().await.clone()
    }

    pub async fn plan(&self, profile: &FinancialProfile) -> PlanView {
        let local = PlanView {
            plan: local_plan(profile),
            provenance: Provenance::Derived,
        };
        {
            let mut slot = self.slot.write().await;
            *slot = Some(local.clone());
        }

        match self.backend.goals_plan(profile).await {
            Ok(plan) => {
                if self.live.load(Ordering::SeqCst) {
                    let view = PlanView {
                        plan,
                        provenance: Provenance::Backend,
                    };
                    let mut slot = self.slot.write().await;
                    *slot = Some(view.clone());
                    return view;
                }
            }
            Err(err) => {
                tracing::warn!(%err, "goal plan fetch failed, keeping the local projection");
            }
        }

        self.slot.read().await.clone().unwrap_or(local)
    }
}
