use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod category;
pub mod defaults;

pub use category::Category;

/// Per-category spending limits. Partial by design: categories without an
/// entry fall back to a share of income (see `defaults`).
pub type CategoryLimits = HashMap<Category, f64>;

// Profile & projection

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskAppetite {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_contribution: f64,
    pub current_savings: f64,
    pub monthly_income: f64,
    pub risk_appetite: RiskAppetite,
}

/// One point of a corpus projection. `year` counts from now (0 = today).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub age: u32,
    pub corpus: f64,
}

// Expenses & budget

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub amount: f64,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: Category,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: Category,
    pub budget: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: String,
    pub amount: f64,
    #[serde(default)]
    pub source: String,
    pub date: DateTime<Utc>,
}

// Pulse analysis

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PulseStatus {
    Safe,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Deteriorating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionStep {
    pub action: String,
    pub priority: Priority,
    pub monthly_saving: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseAnalysis {
    pub health_score: i64,
    pub status: PulseStatus,
    pub emi_to_income_ratio: f64,
    pub savings_rate: f64,
    pub trend: Trend,
    #[serde(default)]
    pub debt_trap_days: Option<i64>,
    #[serde(default)]
    pub prescription: Vec<PrescriptionStep>,
    #[serde(default)]
    pub scenario_if_no_action: Option<String>,
}

// Auth

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub monthly_income: f64,
    pub age: u32,
}

// Planning & analysis responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPlan {
    pub needed_corpus: f64,
    pub monthly_sip_required: f64,
    #[serde(default)]
    pub year_by_year_projection: Vec<ProjectionPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub monthly_income: f64,
    pub existing_emi: f64,
    pub requested_amount: f64,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePrediction {
    pub approval_probability: f64,
    pub verdict: String,
    pub recommended_loan_amount: f64,
    #[serde(default)]
    pub improvement_tips: Vec<String>,
    #[serde(default)]
    pub suggested_banks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldFlag {
    pub issue: String,
    pub severity: String,
    #[serde(default)]
    pub clause_text: Option<String>,
    #[serde(default)]
    pub regulation_violated: Option<String>,
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldReport {
    pub risk_score: i64,
    pub risk_level: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub flags: Vec<ShieldFlag>,
    #[serde(default)]
    pub missing_clauses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Festival {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FestivalPlanRequest {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub daily_target: f64,
    pub days_remaining: i64,
    pub total_target: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FestivalPlan {
    pub detected_spike_pattern: String,
    pub estimated_extra_spending: f64,
    #[serde(default)]
    pub debt_warning: String,
    pub savings_plan: SavingsPlan,
    #[serde(default)]
    pub actionable_tips: Vec<String>,
}
