//! Shared dashboard configuration: fallback budget shares, health score
//! bands, the assumed market return and the stand-in profile. Every screen
//! and engine reads these from here so the numbers cannot drift apart.

use crate::category::Category;
use crate::{FinancialProfile, RiskAppetite};

/// Nominal annual return assumed by the local projection, compounded monthly.
pub const ASSUMED_ANNUAL_RETURN: f64 = 0.12;

/// Monthly income assumed while the profile is unknown.
pub const DEFAULT_MONTHLY_INCOME: f64 = 50_000.0;

/// Health score above this is SAFE.
pub const SAFE_SCORE_FLOOR: i64 = 70;

/// Health score at or below this is DANGER; in between is WARNING.
pub const DANGER_SCORE_CEILING: i64 = 40;

/// EMI share of income (percent) at which the EMI component of the health
/// score bottoms out.
pub const EMI_RATIO_CEILING: f64 = 40.0;

/// Savings rate (percent) at which the savings component of the health
/// score maxes out.
pub const SAVINGS_RATE_FULL_SCORE: f64 = 40.0;

/// Share of monthly income presented as the savings target.
pub const SAVINGS_TARGET_SHARE: f64 = 0.20;

/// Share of monthly income allotted to a category with no explicit limit.
pub fn fallback_budget_share(category: &Category) -> f64 {
    match category {
        Category::Emi => 0.35,
        Category::Food => 0.15,
        Category::Transport => 0.05,
        _ => 0.10,
    }
}

/// Chart color for a category.
pub fn category_color(category: &Category) -> &'static str {
    match category {
        Category::Food => "#3B82F6",
        Category::Transport => "#10B981",
        Category::Emi => "#F59E0B",
        Category::Health => "#EF4444",
        Category::Fun => "#8B5CF6",
        Category::Other | Category::Goal(_) => "#6B7280",
    }
}

/// Profile used before the user has saved one.
pub fn default_profile() -> FinancialProfile {
    FinancialProfile {
        current_age: 28,
        retirement_age: 55,
        monthly_contribution: 15_000.0,
        current_savings: 500_000.0,
        monthly_income: DEFAULT_MONTHLY_INCOME,
        risk_appetite: RiskAppetite::Moderate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shares() {
        assert_eq!(fallback_budget_share(&Category::Emi), 0.35);
        assert_eq!(fallback_budget_share(&Category::Food), 0.15);
        assert_eq!(fallback_budget_share(&Category::Transport), 0.05);
        assert_eq!(fallback_budget_share(&Category::Health), 0.10);
        assert_eq!(fallback_budget_share(&Category::Goal("Trip".into())), 0.10);
    }

    #[test]
    fn test_fixed_categories_have_distinct_colors() {
        let colors: std::collections::HashSet<_> =
            Category::fixed().iter().map(category_color).collect();
        assert_eq!(colors.len(), 6);
    }

    #[test]
    fn test_default_profile_is_plausible() {
        let profile = default_profile();
        assert!(profile.retirement_age > profile.current_age);
        assert_eq!(profile.monthly_income, DEFAULT_MONTHLY_INCOME);
    }
}
