use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use models::{
    BudgetLine, Category, CategoryLimits, CategorySummary, ExpenseRecord, Festival, PulseAnalysis,
};

/// How many expenses the dashboard shows in its recent-activity card.
pub const RECENT_EXPENSES: usize = 4;

/// Where a slice of state last came from. `Backend` beats everything;
/// `Derived` is a local computation over real data; `Cache` is a previous
/// session's backend result; `Default` means nothing real has arrived yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    #[default]
    Default,
    Cache,
    Derived,
    Backend,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MoneyStats {
    pub monthly_income: f64,
    pub total_expenses: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Non-blocking user notification. Consumers drain these with
/// [`DashboardState::take_notices`] and render them as toasts.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Everything a dashboard screen renders, assembled by the controller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub stats: MoneyStats,
    pub stats_provenance: Provenance,
    pub recent_expenses: Vec<ExpenseRecord>,
    pub expense_count: usize,
    pub summary: Vec<CategorySummary>,
    pub limits: CategoryLimits,
    pub budget: Vec<BudgetLine>,
    pub pulse: Option<PulseAnalysis>,
    pub pulse_provenance: Provenance,
    pub festivals: Vec<Festival>,
    pub loading: bool,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub notices: Vec<Notice>,
}

impl DashboardState {
    /// Savings always follows the current income and expense figures, so
    /// whichever source wrote stats last determines the displayed number.
    pub(crate) fn recompute_savings(&mut self) {
        self.stats.savings = self.stats.monthly_income - self.stats.total_expenses;
    }

    pub(crate) fn rebuild_budget(&mut self) {
        self.budget =
            insight_engine::reconcile(&self.summary, &self.limits, self.stats.monthly_income);
    }

    pub(crate) fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    /// Running total for a category in the last-applied summary.
    pub fn spent_in(&self, category: &Category) -> f64 {
        self.summary
            .iter()
            .filter(|row| &row.category == category)
            .map(|row| row.total_amount)
            .sum()
    }

    pub fn emi_total(&self) -> Option<f64> {
        let total: f64 = self
            .summary
            .iter()
            .filter(|row| row.category == Category::Emi)
            .map(|row| row.total_amount)
            .sum();
        if self.summary.is_empty() {
            None
        } else {
            Some(total)
        }
    }

    /// Drain the pending notifications for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

/// Days from `today` to the festival, negative once it has passed.
pub fn days_until(festival: &Festival, today: NaiveDate) -> i64 {
    (festival.date - today).num_days()
}
