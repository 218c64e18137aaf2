use models::defaults::fallback_budget_share;
use models::{BudgetLine, Category, CategoryLimits, CategorySummary};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::round2;

/// Spending limit for a category: the explicit limit when one is set,
/// otherwise the category's fallback share of monthly income.
pub fn resolved_limit(category: &Category, limits: &CategoryLimits, monthly_income: f64) -> f64 {
    match limits.get(category) {
        Some(limit) => *limit,
        None => monthly_income * fallback_budget_share(category),
    }
}

/// Merge actual spending with limits into exactly one budget line per
/// category. Categories appearing only in the limits map get an actual of
/// zero; categories with spending but no limit get the fallback budget.
/// Lines come back highest spend first, ties broken by name.
pub fn reconcile(
    summaries: &[CategorySummary],
    limits: &CategoryLimits,
    monthly_income: f64,
) -> Vec<BudgetLine> {
    let mut actuals: HashMap<Category, f64> = HashMap::new();
    for summary in summaries {
        *actuals.entry(summary.category.clone()).or_insert(0.0) += summary.total_amount;
    }

    let mut categories: BTreeSet<Category> = actuals.keys().cloned().collect();
    categories.extend(limits.keys().cloned());

    let mut lines: Vec<BudgetLine> = categories
        .into_iter()
        .map(|category| {
            let actual = actuals.get(&category).copied().unwrap_or(0.0);
            BudgetLine {
                budget: round2(resolved_limit(&category, limits, monthly_income)),
                actual: round2(actual),
                category,
            }
        })
        .collect();

    lines.sort_by(|a, b| {
        b.actual
            .partial_cmp(&a.actual)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    lines
}

/// Advisory over-limit check run after an expense is accepted for submission:
/// would spending `amount` on top of what the category already carries cross
/// its resolved limit? Callers warn on `true`; they never block the expense.
pub fn would_exceed_limit(
    category: &Category,
    spent_so_far: f64,
    amount: f64,
    limits: &CategoryLimits,
    monthly_income: f64,
) -> bool {
    spent_so_far + amount > resolved_limit(category, limits, monthly_income)
}
