use anyhow::Result;
use clap::Parser;

use dashboard::local_plan;
use models::defaults::default_profile;
use models::{FinancialProfile, RiskAppetite};

#[derive(Parser, Debug)]
#[command(
    name = "plan-retirement",
    about = "Offline retirement projection: year-by-year corpus growth and the SIP needed for the target."
)]
struct Args {
    #[arg(long, default_value_t = default_profile().current_age)]
    current_age: u32,

    #[arg(long, default_value_t = default_profile().retirement_age)]
    retirement_age: u32,

    #[arg(long, default_value_t = default_profile().monthly_contribution)]
    monthly_contribution: f64,

    #[arg(long, default_value_t = default_profile().current_savings)]
    current_savings: f64,

    #[arg(long, default_value_t = default_profile().monthly_income)]
    monthly_income: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let profile = FinancialProfile {
        current_age: args.current_age,
        retirement_age: args.retirement_age,
        monthly_contribution: args.monthly_contribution,
        current_savings: args.current_savings,
        monthly_income: args.monthly_income,
        risk_appetite: RiskAppetite::Moderate,
    };

    let plan = local_plan(&profile);

    println!("{:>6} {:>5} {:>18}", "year", "age", "corpus");
    for point in &plan.year_by_year_projection {
        println!("{:>6} {:>5} {:>18.2}", point.year, point.age, point.corpus);
    }

    println!();
    println!("target corpus:        {:>15.2}", plan.needed_corpus);
    println!("monthly SIP required: {:>15.2}", plan.monthly_sip_required);
    if plan.monthly_sip_required > args.monthly_contribution {
        println!(
            "shortfall: contributing {:.2}/month now, {:.2}/month more needed",
            args.monthly_contribution,
            plan.monthly_sip_required - args.monthly_contribution
        );
    } else {
        println!("current contribution is on track");
    }

    Ok(())
}
