use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use models::{
    CategoryLimits, CategorySummary, ExpenseRecord, Festival, FestivalPlan, FestivalPlanRequest,
    FinancialProfile, GoalPlan, IncomeRecord, NewExpense, NewUser, ProfileUpdate, PulseAnalysis,
    ScorePrediction, ScoreRequest, ShieldReport, User,
};

use crate::error::Result;

/// Token and user handed back by login/register. The caller decides whether
/// to persist it into the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// One method per backend endpoint. The dashboard holds this as
/// `Arc<dyn FinanceBackend>` so tests can swap in a stub.
#[async_trait]
pub trait FinanceBackend: Send + Sync {
    async fn get_expenses(&self) -> Result<Vec<ExpenseRecord>>;
    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseRecord>;
    async fn delete_expense(&self, id: &str) -> Result<()>;
    async fn get_expense_summary(&self) -> Result<Vec<CategorySummary>>;
    async fn get_income(&self) -> Result<Vec<IncomeRecord>>;
    async fn get_limits(&self) -> Result<CategoryLimits>;
    async fn set_limits(&self, limits: &CategoryLimits) -> Result<()>;
    async fn pulse_analyze(&self) -> Result<PulseAnalysis>;
    async fn goals_plan(&self, profile: &FinancialProfile) -> Result<GoalPlan>;
    async fn score_predict(&self, request: &ScoreRequest) -> Result<ScorePrediction>;
    async fn shield_analyze_text(&self, text: &str) -> Result<ShieldReport>;
    async fn shield_analyze_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<ShieldReport>;
    async fn get_festivals(&self) -> Result<Vec<Festival>>;
    async fn festival_plan(&self, request: &FestivalPlanRequest) -> Result<FestivalPlan>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession>;
    async fn register(&self, new_user: &NewUser) -> Result<AuthSession>;
    async fn me(&self) -> Result<User>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User>;
}
