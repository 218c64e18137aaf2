use models::defaults::ASSUMED_ANNUAL_RETURN;
use models::{FinancialProfile, ProjectionPoint};

use crate::round2;

/// Year-by-year corpus projection from today until retirement.
///
/// Compounds monthly at `annual_rate / 12` and adds the monthly contribution
/// after each month's growth. The first point is the starting state itself:
/// year 0, current age, current savings untouched. When the retirement age
/// is not in the future the sequence is that single point.
pub fn project_corpus(profile: &FinancialProfile, annual_rate: f64) -> Vec<ProjectionPoint> {
    let monthly_rate = annual_rate / 12.0;
    let mut corpus = profile.current_savings;

    let mut points = vec![ProjectionPoint {
        year: 0,
        age: profile.current_age,
        corpus,
    }];

    if profile.retirement_age <= profile.current_age {
        return points;
    }

    let horizon = profile.retirement_age - profile.current_age;
    for year in 1..=horizon {
        for _ in 0..12 {
            corpus = corpus * (1.0 + monthly_rate) + profile.monthly_contribution;
        }
        points.push(ProjectionPoint {
            year,
            age: profile.current_age + year,
            corpus: round2(corpus),
        });
    }

    points
}

/// Projection at the assumed market return.
pub fn project_with_default_return(profile: &FinancialProfile) -> Vec<ProjectionPoint> {
    project_corpus(profile, ASSUMED_ANNUAL_RETURN)
}

/// Monthly contribution needed to grow `current_savings` into
/// `target_corpus` over `years` at `annual_rate`.
///
/// Returns 0 when the savings alone already compound past the target. With
/// no horizon the full shortfall comes back (it would have to be put up
/// immediately). Near-zero rates fall back to straight division so the
/// annuity factor cannot blow up.
pub fn sip_required(target_corpus: f64, current_savings: f64, years: u32, annual_rate: f64) -> f64 {
    let months = f64::from(years * 12);
    let monthly_rate = annual_rate / 12.0;

    if months == 0.0 {
        return round2((target_corpus - current_savings).max(0.0));
    }

    let growth = (1.0 + monthly_rate).powf(months);
    let shortfall = target_corpus - current_savings * growth;
    if shortfall <= 0.0 {
        return 0.0;
    }

    let sip = if monthly_rate.abs() < 1e-9 {
        shortfall / months
    } else {
        shortfall / ((growth - 1.0) / monthly_rate)
    };
    round2(sip)
}
