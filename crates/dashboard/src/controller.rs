use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use api_client::{ApiError, FinanceBackend};
use insight_engine::{HealthInputs, derive_pulse, would_exceed_limit};
use models::{
    CategoryLimits, CategorySummary, ExpenseRecord, Festival, IncomeRecord, NewExpense,
    PulseAnalysis,
};
use session_store::SessionStore;

use crate::state::{DashboardState, MoneyStats, NoticeLevel, Provenance, RECENT_EXPENSES};

/// How long `refresh` waits for the secondary batch before returning with
/// whatever has landed. The batch itself keeps running.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs the staged dashboard load and the user-initiated write actions.
///
/// The load sequence: paint the cached pulse, fetch expenses first and
/// derive stats from them, then settle the remaining sources as a batch
/// where each source applies only its own slice and a failure leaves the
/// previous value in place. Writes follow an invalidate-and-refetch policy:
/// after a successful write the whole load re-runs rather than patching
/// state from the write response.
pub struct DashboardController {
    shared: Shared,
    load_timeout: Duration,
}

/// The clonable half handed to the spawned batch task.
#[derive(Clone)]
struct Shared {
    backend: Arc<dyn FinanceBackend>,
    session: Arc<SessionStore>,
    state: Arc<RwLock<DashboardState>>,
    live: Arc<AtomicBool>,
}

impl DashboardController {
    pub fn new(backend: Arc<dyn FinanceBackend>, session: Arc<SessionStore>) -> Self {
        Self {
            shared: Shared {
                backend,
                session,
                state: Arc::new(RwLock::new(DashboardState::default())),
                live: Arc::new(AtomicBool::new(true)),
            },
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// The consumer has navigated away: in-flight fetches are not cancelled,
    /// but their results will no longer be applied.
    pub fn detach(&self) {
        self.shared.live.store(false, Ordering::SeqCst);
    }

    pub async fn state(&self) -> DashboardState {
        self.shared.state.read().await.clone()
    }

    /// Drain pending user notifications.
    pub async fn take_notices(&self) -> Vec<crate::state::Notice> {
        self.shared.state.write().await.take_notices()
    }

    /// Full dashboard load. Returns a snapshot once the batch has settled or
    /// the load timeout has elapsed, whichever comes first; `loading` is
    /// false in the returned state either way.
    pub async fn refresh(&self) -> DashboardState {
        {
            let mut state = self.shared.state.write().await;
            state.loading = true;
            // Instant paint from the previous session's analysis.
            if state.pulse.is_none() {
                if let Some(cached) = self.shared.session.cached_pulse() {
                    state.pulse = Some(cached);
                    state.pulse_provenance = Provenance::Cache;
                }
            }
        }

        // Primary source: the expense list. Applied before anything else so
        // the first paint does not wait on the slower analysis endpoints.
        match self.shared.backend.get_expenses().await {
            Ok(expenses) => self.shared.apply_expenses(expenses).await,
            Err(err) => self.shared.apply_expenses_fallback(&err).await,
        }

        let batch = tokio::spawn(self.shared.clone().run_secondary_batch());
        match tokio::time::timeout(self.load_timeout, batch).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!(%err, "secondary fetch batch panicked"),
            // The batch task keeps running; dropping its handle does not
            // cancel it, and late results still apply while attached.
            Err(_) => tracing::warn!(
                timeout_secs = self.load_timeout.as_secs_f64(),
                "dashboard load timed out, returning partial state"
            ),
        }

        {
            let mut state = self.shared.state.write().await;
            state.loading = false;
        }
        self.state().await
    }

    /// Record an expense. Validation failures are rejected locally; a
    /// successful write triggers the advisory over-limit warning and then a
    /// full refetch. The warning never blocks or reorders the write.
    pub async fn add_expense(&self, expense: NewExpense) {
        if let Err(reason) = api_client::validate::validate_new_expense(&expense) {
            let mut state = self.shared.state.write().await;
            state.push_notice(NoticeLevel::Error, reason);
            return;
        }

        match self.shared.backend.create_expense(expense.clone()).await {
            Ok(_) => {
                {
                    let mut state = self.shared.state.write().await;
                    state.push_notice(
                        NoticeLevel::Success,
                        format!("Added {} expense of {:.2}", expense.category, expense.amount),
                    );
                    let spent = state.spent_in(&expense.category);
                    if would_exceed_limit(
                        &expense.category,
                        spent,
                        expense.amount,
                        &state.limits,
                        state.stats.monthly_income,
                    ) {
                        state.push_notice(
                            NoticeLevel::Warning,
                            format!("{} is over its monthly limit", expense.category),
                        );
                    }
                }
                self.refresh().await;
            }
            Err(err) => {
                tracing::warn!(%err, "expense write failed");
                let mut state = self.shared.state.write().await;
                state.push_notice(NoticeLevel::Error, format!("Could not add expense: {err}"));
            }
        }
    }

    pub async fn delete_expense(&self, id: &str) {
        match self.shared.backend.delete_expense(id).await {
            Ok(()) => {
                {
                    let mut state = self.shared.state.write().await;
                    state.push_notice(NoticeLevel::Success, "Expense deleted");
                }
                self.refresh().await;
            }
            Err(err) => {
                tracing::warn!(%err, expense_id = id, "expense delete failed");
                let mut state = self.shared.state.write().await;
                state.push_notice(NoticeLevel::Error, format!("Could not delete expense: {err}"));
            }
        }
    }

    /// Persist new category limits and rebuild the budget lines. On failure
    /// the previous limits stay in effect.
    pub async fn set_limits(&self, limits: CategoryLimits) {
        match self.shared.backend.set_limits(&limits).await {
            Ok(()) => {
                let mut state = self.shared.state.write().await;
                state.limits = limits;
                state.rebuild_budget();
                state.push_notice(NoticeLevel::Success, "Limits saved");
            }
            Err(err) => {
                tracing::warn!(%err, "limits write failed");
                let mut state = self.shared.state.write().await;
                state.push_notice(NoticeLevel::Error, format!("Could not save limits: {err}"));
            }
        }
    }
}

impl Shared {
    fn live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn profile_income(&self) -> f64 {
        self.session.financial_profile().monthly_income
    }

    /// Settle the non-primary sources together. Each future resolves to its
    /// own `Result`; nothing short-circuits, so one failing source never
    /// suppresses the others (the allSettled shape).
    async fn run_secondary_batch(self) {
        let (limits, summary, income, festivals, pulse) = tokio::join!(
            self.backend.get_limits(),
            self.backend.get_expense_summary(),
            self.backend.get_income(),
            self.backend.get_festivals(),
            self.backend.pulse_analyze(),
        );

        self.apply_limits(limits).await;
        self.apply_summary(summary).await;
        self.apply_income(income).await;
        self.apply_festivals(festivals).await;
        // Pulse last: its local fallback reads the freshest stats.
        self.apply_pulse(pulse).await;

        if self.live() {
            let mut state = self.state.write().await;
            state.loading = false;
            state.last_refreshed = Some(Utc::now());
        }
    }

    async fn apply_expenses(&self, mut expenses: Vec<ExpenseRecord>) {
        if !self.live() {
            return;
        }
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        let total: f64 = expenses.iter().map(|e| e.amount).sum();

        let mut state = self.state.write().await;
        // Income set by the backend's income records outlives a refetch;
        // otherwise the session profile figure stands in.
        if state.stats_provenance != Provenance::Backend {
            state.stats.monthly_income = self.profile_income();
        }
        state.stats.total_expenses = total;
        state.stats_provenance = Provenance::Derived;
        state.recompute_savings();
        state.expense_count = expenses.len();
        expenses.truncate(RECENT_EXPENSES);
        state.recent_expenses = expenses;
        state.last_refreshed = Some(Utc::now());
    }

    async fn apply_expenses_fallback(&self, err: &ApiError) {
        tracing::warn!(%err, "expenses fetch failed, using fallback stats");
        if !self.live() {
            return;
        }
        let income = self.profile_income();
        let mut state = self.state.write().await;
        if state.stats_provenance == Provenance::Default {
            state.stats = MoneyStats {
                monthly_income: income,
                total_expenses: 0.0,
                savings: income,
            };
        }
    }

    async fn apply_limits(&self, limits: Result<CategoryLimits, ApiError>) {
        let limits = match limits {
            Ok(limits) => limits,
            Err(err) => {
                tracing::warn!(%err, "limits fetch failed, keeping previous limits");
                return;
            }
        };
        if !self.live() {
            return;
        }
        let mut state = self.state.write().await;
        state.limits = limits;
        state.rebuild_budget();
        state.last_refreshed = Some(Utc::now());
    }

    async fn apply_summary(&self, summary: Result<Vec<CategorySummary>, ApiError>) {
        let summary = match summary {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(%err, "summary fetch failed, keeping derived stats");
                return;
            }
        };
        if !self.live() {
            return;
        }
        let total: f64 = summary.iter().map(|row| row.total_amount).sum();
        let mut state = self.state.write().await;
        state.summary = summary;
        state.stats.total_expenses = total;
        state.stats_provenance = Provenance::Backend;
        state.recompute_savings();
        state.rebuild_budget();
        state.last_refreshed = Some(Utc::now());
    }

    async fn apply_income(&self, income: Result<Vec<IncomeRecord>, ApiError>) {
        let records = match income {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(%err, "income fetch failed, keeping profile income");
                return;
            }
        };
        if !self.live() {
            return;
        }
        let total: f64 = records.iter().map(|r| r.amount).sum();
        // An empty or zero period means the profile figure is still the best
        // estimate; only a real total overrides it.
        if total <= 0.0 {
            return;
        }
        let mut state = self.state.write().await;
        state.stats.monthly_income = total;
        state.stats_provenance = Provenance::Backend;
        state.recompute_savings();
        state.rebuild_budget();
        state.last_refreshed = Some(Utc::now());
    }

    async fn apply_festivals(&self, festivals: Result<Vec<Festival>, ApiError>) {
        let festivals = match festivals {
            Ok(festivals) => festivals,
            Err(err) => {
                tracing::warn!(%err, "festivals fetch failed, keeping previous list");
                return;
            }
        };
        if !self.live() {
            return;
        }
        let mut state = self.state.write().await;
        state.festivals = festivals;
        state.last_refreshed = Some(Utc::now());
    }

    async fn apply_pulse(&self, pulse: Result<PulseAnalysis, ApiError>) {
        match pulse {
            Ok(pulse) => {
                if !self.live() {
                    return;
                }
                if let Err(err) = self.session.cache_pulse(&pulse) {
                    tracing::warn!(%err, "could not cache pulse snapshot");
                }
                let mut state = self.state.write().await;
                state.pulse = Some(pulse);
                state.pulse_provenance = Provenance::Backend;
                state.last_refreshed = Some(Utc::now());
            }
            Err(err) => {
                tracing::warn!(%err, "pulse fetch failed, deriving locally");
                if !self.live() {
                    return;
                }
                let prior = self.session.cached_pulse();
                let mut state = self.state.write().await;
                // A cached backend analysis beats the local estimate; only
                // derive when the slice has nothing at all.
                if state.pulse.is_some() {
                    return;
                }
                let expenses_known = state.stats_provenance != Provenance::Default;
                let inputs = HealthInputs {
                    monthly_income: state.stats.monthly_income,
                    total_expenses: expenses_known.then_some(state.stats.total_expenses),
                    emi_total: state.emi_total(),
                };
                state.pulse = Some(derive_pulse(inputs, prior.as_ref()));
                state.pulse_provenance = Provenance::Derived;
            }
        }
    }
}
