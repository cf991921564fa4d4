// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;

use sg_study_cost::{
    format_cny, format_sgd, Accommodation, CostEstimator, EstimatorInput, Food,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "sample" {
        // One-shot sample calculation, no terminal UI
        run_sample()?;
    } else {
        // UI mode (default)
        run_ui_mode()?;
    }

    Ok(())
}

fn run_sample() -> Result<()> {
    println!("🇸🇬 Singapore Study-Cost Estimator - Sample Run");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // The form's default submission
    let input = EstimatorInput {
        tuition_annual_sgd: 30_000.0,
        accommodation: Accommodation::HdbRoom,
        food: Food::HawkerOnly,
        guardian_required: false,
        exchange_rate_sgd_to_cny: 5.4,
    };

    println!("\n📋 Input");
    println!("  Tuition budget:   {}/year", format_sgd(input.tuition_annual_sgd));
    println!("  Accommodation:    {}", input.accommodation.label());
    println!("  Food:             {}", input.food.label());
    println!("  Guardian needed:  {}", if input.guardian_required { "yes" } else { "no" });
    println!("  Exchange rate:    {} CNY per SGD", input.exchange_rate_sgd_to_cny);

    let estimator = CostEstimator::default();
    let result = estimator.estimate(&input)?;
    let b = &result.breakdown;

    println!("\n📊 Breakdown (SGD)");
    println!("  Tuition incl. GST:      {}", format_sgd(b.tuition_with_tax));
    println!("  Accommodation (year):   {}", format_sgd(b.accommodation_annual));
    println!("  Food (year):            {}", format_sgd(b.food_annual));
    println!("  Misc & transport:       {}", format_sgd(b.misc_transport_annual));
    println!("  Medical insurance:      {}", format_sgd(b.insurance_annual));
    println!("  Guardianship:           {}", format_sgd(b.guardian_annual));
    println!("  Monthly living cost:    {}", format_sgd(b.monthly_living_cost_sgd));
    println!("  Total first-year cost:  {}", format_sgd(b.total_annual_cost_sgd));

    println!("\n💰 Headline figures (CNY)");
    println!("  First-year funds:   {}", format_cny(result.first_year_funds_cny));
    println!("  Monthly remittance: {}", format_cny(result.monthly_remittance_cny));

    println!("\n🧐 Verdict: {}", result.tier.label());
    println!("  {}", result.tier.advice());

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Estimates only. Actual costs vary with spending habits,");
    println!("inflation, and policy changes.");

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🖥️  Loading Study-Cost Estimator UI...\n");

    let mut app = ui::App::new();
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin sg-study-server --features server");
    std::process::exit(1);
}
