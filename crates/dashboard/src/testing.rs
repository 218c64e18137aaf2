//! Programmable in-process `FinanceBackend` for orchestrator tests. Each
//! read endpoint is a slot that can fulfil with a value, reject, or sleep
//! first; unprogrammed slots reject, which is the degraded path the
//! controller has to survive anyway.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use api_client::{ApiError, AuthSession, FinanceBackend, Result};
use models::{
    Category, CategoryLimits, CategorySummary, ExpenseRecord, Festival, FestivalPlan,
    FestivalPlanRequest, FinancialProfile, GoalPlan, IncomeRecord, NewExpense, NewUser,
    ProfileUpdate, PulseAnalysis, PulseStatus, ScorePrediction, ScoreRequest, ShieldReport, Trend,
    User,
};

pub(crate) struct StubSlot<T> {
    value: Option<T>,
    delay: Duration,
}

impl<T> Default for StubSlot<T> {
    fn default() -> Self {
        Self {
            value: None,
            delay: Duration::ZERO,
        }
    }
}

impl<T: Clone> StubSlot<T> {
    async fn resolve(&self, endpoint: &'static str) -> Result<T> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.value {
            Some(value) => Ok(value.clone()),
            None => Err(ApiError::Status {
                status: 503,
                message: format!("{endpoint} unavailable"),
            }),
        }
    }
}

#[derive(Default)]
pub(crate) struct StubBackend {
    pub expenses: StubSlot<Vec<ExpenseRecord>>,
    pub summary: StubSlot<Vec<CategorySummary>>,
    pub limits: StubSlot<CategoryLimits>,
    pub pulse: StubSlot<PulseAnalysis>,
    pub festivals: StubSlot<Vec<Festival>>,
    pub income: StubSlot<Vec<IncomeRecord>>,
    pub plan: StubSlot<GoalPlan>,
    pub writes_fail: bool,
    pub created: Arc<Mutex<Vec<NewExpense>>>,
}

impl StubBackend {
    pub fn expenses_ok(mut self, expenses: Vec<ExpenseRecord>) -> Self {
        self.expenses.value = Some(expenses);
        self
    }

    pub fn summary_ok(mut self, summary: Vec<CategorySummary>) -> Self {
        self.summary.value = Some(summary);
        self
    }

    pub fn summary_delay(mut self, delay: Duration) -> Self {
        self.summary.delay = delay;
        self
    }

    pub fn limits_ok(mut self, limits: CategoryLimits) -> Self {
        self.limits.value = Some(limits);
        self
    }

    pub fn pulse_ok(mut self, pulse: PulseAnalysis) -> Self {
        self.pulse.value = Some(pulse);
        self
    }

    pub fn festivals_ok(mut self, festivals: Vec<Festival>) -> Self {
        self.festivals.value = Some(festivals);
        self
    }

    pub fn income_ok(mut self, income: Vec<IncomeRecord>) -> Self {
        self.income.value = Some(income);
        self
    }

    pub fn plan_ok(mut self, plan: GoalPlan) -> Self {
        self.plan.value = Some(plan);
        self
    }

    pub fn plan_delay(mut self, delay: Duration) -> Self {
        self.plan.delay = delay;
        self
    }

    pub fn fail_writes(mut self) -> Self {
        self.writes_fail = true;
        self
    }

    fn write_guard(&self, endpoint: &'static str) -> Result<()> {
        if self.writes_fail {
            Err(ApiError::Status {
                status: 500,
                message: format!("{endpoint} write failed"),
            })
        } else {
            Ok(())
        }
    }
}

fn unsupported(endpoint: &'static str) -> ApiError {
    ApiError::Status {
        status: 501,
        message: format!("{endpoint} not stubbed"),
    }
}

#[async_trait]
impl FinanceBackend for StubBackend {
    async fn get_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        self.expenses.resolve("expenses").await
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseRecord> {
        self.write_guard("create_expense")?;
        let mut created = self.created.lock().unwrap();
        created.push(expense.clone());
        Ok(ExpenseRecord {
            id: format!("stub_{}", created.len()),
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            date: Utc::now(),
        })
    }

    async fn delete_expense(&self, _id: &str) -> Result<()> {
        self.write_guard("delete_expense")
    }

    async fn get_expense_summary(&self) -> Result<Vec<CategorySummary>> {
        self.summary.resolve("summary").await
    }

    async fn get_income(&self) -> Result<Vec<IncomeRecord>> {
        self.income.resolve("income").await
    }

    async fn get_limits(&self) -> Result<CategoryLimits> {
        self.limits.resolve("limits").await
    }

    async fn set_limits(&self, _limits: &CategoryLimits) -> Result<()> {
        self.write_guard("set_limits")
    }

    async fn pulse_analyze(&self) -> Result<PulseAnalysis> {
        self.pulse.resolve("pulse").await
    }

    async fn goals_plan(&self, _profile: &FinancialProfile) -> Result<GoalPlan> {
        self.plan.resolve("goals_plan").await
    }

    async fn score_predict(&self, _request: &ScoreRequest) -> Result<ScorePrediction> {
        Err(unsupported("score_predict"))
    }

    async fn shield_analyze_text(&self, _text: &str) -> Result<ShieldReport> {
        Err(unsupported("shield_analyze_text"))
    }

    async fn shield_analyze_file(&self, _file_name: &str, _bytes: Vec<u8>) -> Result<ShieldReport> {
        Err(unsupported("shield_analyze_file"))
    }

    async fn get_festivals(&self) -> Result<Vec<Festival>> {
        self.festivals.resolve("festivals").await
    }

    async fn festival_plan(&self, _request: &FestivalPlanRequest) -> Result<FestivalPlan> {
        Err(unsupported("festival_plan"))
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<AuthSession> {
        Err(unsupported("login"))
    }

    async fn register(&self, _new_user: &NewUser) -> Result<AuthSession> {
        Err(unsupported("register"))
    }

    async fn me(&self) -> Result<User> {
        Err(unsupported("me"))
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> Result<User> {
        Err(unsupported("update_profile"))
    }
}

// Fixtures

pub(crate) fn expense(id: &str, amount: f64) -> ExpenseRecord {
    ExpenseRecord {
        id: id.to_string(),
        amount,
        category: Category::Other,
        description: format!("fixture {id}"),
        date: Utc.with_ymd_and_hms(2026, 8, 15, 10, 0, 0).unwrap(),
    }
}

pub(crate) fn summary_row(category: Category, total_amount: f64) -> CategorySummary {
    CategorySummary {
        category,
        total_amount,
    }
}

pub(crate) fn income_record(id: &str, amount: f64) -> IncomeRecord {
    IncomeRecord {
        id: id.to_string(),
        amount,
        source: "salary".to_string(),
        date: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
    }
}

pub(crate) fn pulse_fixture(health_score: i64) -> PulseAnalysis {
    PulseAnalysis {
        health_score,
        status: if health_score > 70 {
            PulseStatus::Safe
        } else if health_score > 40 {
            PulseStatus::Warning
        } else {
            PulseStatus::Danger
        },
        emi_to_income_ratio: 18.0,
        savings_rate: 24.0,
        trend: Trend::Stable,
        debt_trap_days: None,
        prescription: vec![],
        scenario_if_no_action: None,
    }
}
