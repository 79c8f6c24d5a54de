// Retirement Planner - Core Library
// Exposes the calculators for the CLI, the terminal UI, the API server and tests

pub mod validation;
pub mod calculators;
pub mod scoring;
pub mod recommendations;
pub mod format;
pub mod config;
pub mod report;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use validation::{InputChecker, ValidationError, ValidationErrors, ValidationResult};
pub use calculators::{
    GrowthRow,
    calculate_sip, sip_future_value, SipInput, SipResult,
    calculate_lump_sum, lump_sum_future_value, LumpSumInput, LumpSumResult,
    calculate_ppf, PpfInput, PpfResult, PpfRow,
    calculate_epf, EpfInput, EpfResult, EpfRow,
    plan_retirement, required_monthly_investment, ProjectionPoint, RetirementInput, RetirementPlan,
    simulate_withdrawal, CorpusStatus, WithdrawalInput, WithdrawalResult, WithdrawalRow,
};
pub use scoring::{
    calculate_hlv, HlvInput, HlvRating, HlvResult, HlvScores,
    score_corpus, CorpusRating, CorpusScore, CorpusScoreInput, FactorKind, Impact, ScoreFactor,
};
pub use recommendations::{
    recommend, AssetClass, AssetMix, Fund, FundCatalog, FundType, InvestorProfile,
    Portfolio, Recommendation, RiskLevel, RiskProfile,
};
pub use format::{format_axis, format_compact, format_inr, format_percent};
pub use config::{CalculatorDefaults, PlannerConfig};
pub use report::{evaluate, schedule_to_csv, CalculatorInput, CalculatorKind, Evaluation, Report};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the fmt subscriber; RUST_LOG overrides `default_level`
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // A second call (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
