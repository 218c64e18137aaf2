use models::defaults::{
    DANGER_SCORE_CEILING, EMI_RATIO_CEILING, SAFE_SCORE_FLOOR, SAVINGS_RATE_FULL_SCORE,
};
use models::{PulseAnalysis, PulseStatus, Trend};

use crate::round2;

/// Aggregates the health fallback can observe without the backend: income
/// from the profile, total spend and the EMI bucket from the summary. Any
/// of them may be missing; the derivation still returns a full analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthInputs {
    pub monthly_income: f64,
    pub total_expenses: Option<f64>,
    pub emi_total: Option<f64>,
}

const SAVINGS_WEIGHT: f64 = 0.7;
const EMI_WEIGHT: f64 = 0.3;
const TREND_DEAD_BAND: i64 = 2;

/// Reduced local stand-in for the backend's pulse analysis.
///
/// The savings rate is `(income - expenses) / income` as a rounded percent,
/// clamped to [0, 100]; with zero income or no expense data it is 0 rather
/// than an error. The score blends a savings component (full marks at a 40%
/// rate) with an EMI component (zero once EMI eats 40% of income), so it
/// rises with the savings rate and falls as the EMI ratio climbs. Fields
/// the backend computes from data we cannot see here — debt-trap days, the
/// prescription, the no-action scenario — are carried over from `prior`
/// when one is cached and left empty otherwise.
pub fn derive_pulse(inputs: HealthInputs, prior: Option<&PulseAnalysis>) -> PulseAnalysis {
    let savings_rate = match inputs.total_expenses {
        Some(expenses) if inputs.monthly_income > 0.0 => {
            let rate = (inputs.monthly_income - expenses) / inputs.monthly_income * 100.0;
            rate.clamp(0.0, 100.0).round()
        }
        _ => 0.0,
    };

    let emi_to_income_ratio = match inputs.emi_total {
        Some(emi) if inputs.monthly_income > 0.0 => {
            round2(emi / inputs.monthly_income * 100.0)
        }
        _ => prior.map(|p| p.emi_to_income_ratio).unwrap_or(0.0),
    };

    let savings_component =
        savings_rate.min(SAVINGS_RATE_FULL_SCORE) / SAVINGS_RATE_FULL_SCORE * 100.0;
    let emi_component =
        (100.0 - emi_to_income_ratio * (100.0 / EMI_RATIO_CEILING)).max(0.0);
    let health_score = (SAVINGS_WEIGHT * savings_component + EMI_WEIGHT * emi_component)
        .round() as i64;
    let health_score = health_score.clamp(0, 100);

    let status = if health_score > SAFE_SCORE_FLOOR {
        PulseStatus::Safe
    } else if health_score > DANGER_SCORE_CEILING {
        PulseStatus::Warning
    } else {
        PulseStatus::Danger
    };

    let trend = match prior {
        Some(p) if health_score > p.health_score + TREND_DEAD_BAND => Trend::Improving,
        Some(p) if health_score < p.health_score - TREND_DEAD_BAND => Trend::Deteriorating,
        Some(_) => Trend::Stable,
        None => Trend::Stable,
    };

    PulseAnalysis {
        health_score,
        status,
        emi_to_income_ratio,
        savings_rate,
        trend,
        debt_trap_days: prior.and_then(|p| p.debt_trap_days),
        prescription: prior.map(|p| p.prescription.clone()).unwrap_or_default(),
        scenario_if_no_action: prior.and_then(|p| p.scenario_if_no_action.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(income: f64, expenses: f64) -> HealthInputs {
        HealthInputs {
            monthly_income: income,
            total_expenses: Some(expenses),
            emi_total: None,
        }
    }

    #[test]
    fn test_healthy_saver_is_safe() {
        let pulse = derive_pulse(inputs(45_000.0, 28_400.0), None);

        assert_eq!(pulse.savings_rate, 37.0);
        assert_eq!(pulse.status, PulseStatus::Safe);
        assert!(pulse.health_score > SAFE_SCORE_FLOOR);
    }

    #[test]
    fn test_zero_income_is_danger_not_a_crash() {
        let pulse = derive_pulse(inputs(0.0, 12_000.0), None);

        assert_eq!(pulse.savings_rate, 0.0);
        assert_eq!(pulse.status, PulseStatus::Danger);
    }

    #[test]
    fn test_savings_rate_is_clamped() {
        // Spending beyond income floors at zero.
        let overspent = derive_pulse(inputs(30_000.0, 45_000.0), None);
        assert_eq!(overspent.savings_rate, 0.0);

        // A refund month cannot push the rate past 100.
        let refunded = derive_pulse(inputs(30_000.0, -5_000.0), None);
        assert_eq!(refunded.savings_rate, 100.0);
    }

    #[test]
    fn test_missing_expense_data_degrades_to_zero_rate() {
        let pulse = derive_pulse(
            HealthInputs {
                monthly_income: 45_000.0,
                total_expenses: None,
                emi_total: None,
            },
            None,
        );
        assert_eq!(pulse.savings_rate, 0.0);
        assert_eq!(pulse.status, PulseStatus::Danger);
    }

    #[test]
    fn test_score_rises_with_savings_rate() {
        let income = 10_000.0;
        let mut last = -1;
        for rate in 0..=100 {
            let expenses = income * (1.0 - f64::from(rate) / 100.0);
            let pulse = derive_pulse(inputs(income, expenses), None);
            assert!(pulse.health_score >= last);
            last = pulse.health_score;
        }
    }

    #[test]
    fn test_score_falls_as_emi_ratio_climbs() {
        let income = 10_000.0;
        let mut last = i64::MAX;
        for emi_pct in 0..=60 {
            let pulse = derive_pulse(
                HealthInputs {
                    monthly_income: income,
                    total_expenses: Some(5_000.0),
                    emi_total: Some(income * f64::from(emi_pct) / 100.0),
                },
                None,
            );
            assert!(pulse.health_score <= last);
            last = pulse.health_score;
        }
    }

    #[test]
    fn test_status_bands_cover_the_score_range() {
        // 25% savings with a 20% EMI load scores 59: middle band.
        let warning = derive_pulse(
            HealthInputs {
                monthly_income: 40_000.0,
                total_expenses: Some(30_000.0),
                emi_total: Some(8_000.0),
            },
            None,
        );
        assert_eq!(warning.status, PulseStatus::Warning);

        // Nothing left over and EMI past the ceiling scores near zero.
        let danger = derive_pulse(
            HealthInputs {
                monthly_income: 40_000.0,
                total_expenses: Some(39_500.0),
                emi_total: Some(18_000.0),
            },
            None,
        );
        assert_eq!(danger.status, PulseStatus::Danger);
    }

    #[test]
    fn test_prior_analysis_feeds_trend_and_degraded_fields() {
        let prior = PulseAnalysis {
            health_score: 50,
            status: PulseStatus::Warning,
            emi_to_income_ratio: 22.0,
            savings_rate: 15.0,
            trend: Trend::Stable,
            debt_trap_days: Some(120),
            prescription: vec![],
            scenario_if_no_action: Some("Debt compounds".to_string()),
        };

        let improved = derive_pulse(inputs(45_000.0, 28_400.0), Some(&prior));
        assert_eq!(improved.trend, Trend::Improving);
        assert_eq!(improved.debt_trap_days, Some(120));
        assert_eq!(improved.scenario_if_no_action.as_deref(), Some("Debt compounds"));
        // No local EMI observation, so the cached ratio carries over.
        assert_eq!(improved.emi_to_income_ratio, 22.0);

        let worse = derive_pulse(inputs(45_000.0, 44_000.0), Some(&prior));
        assert_eq!(worse.trend, Trend::Deteriorating);
    }
}
