// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context as AnyhowContext, Result};
use std::env;
use std::fs;
use std::path::Path;

use retirement_planner::{evaluate, init_tracing, CalculatorKind, PlannerConfig};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("list") => run_list(),
        Some("report") => {
            init_tracing("warn");
            let kind = calculator_arg(&args, "report <calculator> [input.json]")?;
            run_report(kind, args.get(3).map(Path::new))
        }
        Some("export") => {
            init_tracing("warn");
            let kind = calculator_arg(&args, "export <calculator> <out.csv> [input.json]")?;
            let out = match args.get(3) {
                Some(out) => Path::new(out),
                None => bail!("Usage: retirement-planner export <calculator> <out.csv> [input.json]"),
            };
            run_export(kind, out, args.get(4).map(Path::new))
        }
        Some(other) => {
            print_usage();
            bail!("Unknown command: {}", other)
        }
        // UI mode (default)
        None => run_ui_mode(),
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  retirement-planner                                      terminal UI");
    eprintln!("  retirement-planner list                                 list calculators");
    eprintln!("  retirement-planner report <calculator> [input.json]     JSON report");
    eprintln!("  retirement-planner export <calculator> <out.csv> [input.json]");
}

fn calculator_arg(args: &[String], usage: &str) -> Result<CalculatorKind> {
    match args.get(2) {
        Some(name) => name.parse(),
        None => bail!("Usage: retirement-planner {}", usage),
    }
}

fn read_input(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|p| {
        fs::read_to_string(p).with_context(|| format!("Failed to read input file: {:?}", p))
    })
    .transpose()
}

fn run_list() -> Result<()> {
    println!("📋 Calculators");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for kind in CalculatorKind::ALL {
        println!("  {:<16} {}", kind.as_str(), kind.title());
    }
    Ok(())
}

fn run_report(kind: CalculatorKind, input_path: Option<&Path>) -> Result<()> {
    let config = PlannerConfig::load()?;
    let input = read_input(input_path)?;

    let evaluation = evaluate(kind, input.as_deref(), &config)?;
    let json = serde_json::to_string_pretty(&evaluation.report)
        .context("Failed to serialize report")?;

    println!("{}", json);
    Ok(())
}

fn run_export(kind: CalculatorKind, out: &Path, input_path: Option<&Path>) -> Result<()> {
    let config = PlannerConfig::load()?;
    let input = read_input(input_path)?;

    let evaluation = evaluate(kind, input.as_deref(), &config)?;
    if evaluation.schedule_csv.is_empty() {
        bail!("{} has no yearly schedule to export", kind.title());
    }

    fs::write(out, &evaluation.schedule_csv)
        .with_context(|| format!("Failed to write CSV: {:?}", out))?;

    let rows = evaluation.schedule_csv.lines().count().saturating_sub(1);
    println!("✓ Exported {} rows to {:?}", rows, out);
    println!("  {}", evaluation.report.summary());
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let config = PlannerConfig::load()?;

    let mut app = ui::App::with_catalog(&config.defaults, config.fund_catalog()?);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin planner-server --features server");
    print_usage();
    std::process::exit(1);
}
