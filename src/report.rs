// 🧾 Reports - identity, time and fingerprint around every evaluation
//
// id:                fresh UUID per evaluation
// generated_at:      when it was computed
// input_fingerprint: SHA-256 of the input JSON, equal inputs → equal fingerprint

use crate::calculators::{
    calculate_epf, calculate_lump_sum, calculate_ppf, calculate_sip, plan_retirement,
    simulate_withdrawal, EpfInput, LumpSumInput, PpfInput, RetirementInput, SipInput,
    WithdrawalInput,
};
use crate::config::{CalculatorDefaults, PlannerConfig};
use crate::recommendations::{recommend, FundCatalog, InvestorProfile};
use crate::scoring::{calculate_hlv, score_corpus, CorpusScoreInput, HlvInput};
use anyhow::{anyhow, Context as AnyhowContext, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CALCULATOR KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Sip,
    #[serde(rename = "lumpsum")]
    LumpSum,
    Ppf,
    Epf,
    Retirement,
    Withdrawal,
    Hlv,
    CorpusScore,
    Recommendations,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 9] = [
        CalculatorKind::Sip,
        CalculatorKind::LumpSum,
        CalculatorKind::Ppf,
        CalculatorKind::Epf,
        CalculatorKind::Retirement,
        CalculatorKind::Withdrawal,
        CalculatorKind::Hlv,
        CalculatorKind::CorpusScore,
        CalculatorKind::Recommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorKind::Sip => "sip",
            CalculatorKind::LumpSum => "lumpsum",
            CalculatorKind::Ppf => "ppf",
            CalculatorKind::Epf => "epf",
            CalculatorKind::Retirement => "retirement",
            CalculatorKind::Withdrawal => "withdrawal",
            CalculatorKind::Hlv => "hlv",
            CalculatorKind::CorpusScore => "corpus-score",
            CalculatorKind::Recommendations => "recommendations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Sip => "SIP Calculator",
            CalculatorKind::LumpSum => "Lump Sum Calculator",
            CalculatorKind::Ppf => "PPF Calculator",
            CalculatorKind::Epf => "EPF Calculator",
            CalculatorKind::Retirement => "Retirement Planner",
            CalculatorKind::Withdrawal => "Safe Withdrawal Calculator",
            CalculatorKind::Hlv => "Human Life Value",
            CalculatorKind::CorpusScore => "Retirement Corpus Score",
            CalculatorKind::Recommendations => "Investment Recommendations",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        CalculatorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| anyhow!("Unknown calculator: {} (try `list`)", s))
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub calculator: CalculatorKind,
    pub generated_at: DateTime<Utc>,
    pub input_fingerprint: String,
    pub input: serde_json::Value,
    pub result: serde_json::Value,
}

impl Report {
    pub fn build<I: Serialize, R: Serialize>(
        calculator: CalculatorKind,
        input: &I,
        result: &R,
    ) -> Result<Self> {
        let input = serde_json::to_value(input).context("Failed to serialize calculator input")?;
        let result = serde_json::to_value(result).context("Failed to serialize calculator result")?;

        Ok(Report {
            id: uuid::Uuid::new_v4().to_string(),
            calculator,
            generated_at: Utc::now(),
            input_fingerprint: fingerprint(calculator, &input),
            input,
            result,
        })
    }

    /// First 12 hex digits of the fingerprint, or all of it when shorter
    pub fn short_fingerprint(&self) -> &str {
        self.input_fingerprint.get(..12).unwrap_or(&self.input_fingerprint)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} report {} at {} (input {})",
            self.calculator.title(),
            self.id,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.short_fingerprint()
        )
    }
}

/// Hash of calculator name + input JSON
///
/// serde_json maps keep keys sorted, so field order never changes the hash.
pub fn fingerprint(calculator: CalculatorKind, input: &serde_json::Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}{}", calculator.as_str(), input));
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// CSV EXPORT
// ============================================================================

/// Yearly rows as CSV, header from the row's field names
pub fn schedule_to_csv<R: Serialize>(rows: &[R]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("Failed to write schedule row")?;
    }

    let bytes = writer.into_inner().context("Failed to flush schedule CSV")?;
    String::from_utf8(bytes).context("Schedule CSV is not UTF-8")
}

// ============================================================================
// EVALUATION
// ============================================================================

/// A report plus its yearly schedule rendered as CSV (empty when there is none)
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: Report,
    pub schedule_csv: String,
}

/// Typed input for one calculator run
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorInput {
    Sip(SipInput),
    LumpSum(LumpSumInput),
    Ppf(PpfInput),
    Epf(EpfInput),
    Retirement(RetirementInput),
    Withdrawal(WithdrawalInput),
    Hlv(HlvInput),
    /// Scored from a retirement plan, so it takes the retirement input
    CorpusScore(RetirementInput),
    Recommendations(InvestorProfile),
}

fn input_or<T: DeserializeOwned + Clone>(input: Option<&str>, default: &T) -> Result<T> {
    match input {
        Some(json) => serde_json::from_str(json).context("Failed to parse calculator input JSON"),
        None => Ok(default.clone()),
    }
}

impl CalculatorInput {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculatorInput::Sip(_) => CalculatorKind::Sip,
            CalculatorInput::LumpSum(_) => CalculatorKind::LumpSum,
            CalculatorInput::Ppf(_) => CalculatorKind::Ppf,
            CalculatorInput::Epf(_) => CalculatorKind::Epf,
            CalculatorInput::Retirement(_) => CalculatorKind::Retirement,
            CalculatorInput::Withdrawal(_) => CalculatorKind::Withdrawal,
            CalculatorInput::Hlv(_) => CalculatorKind::Hlv,
            CalculatorInput::CorpusScore(_) => CalculatorKind::CorpusScore,
            CalculatorInput::Recommendations(_) => CalculatorKind::Recommendations,
        }
    }

    /// Parse JSON input for `kind`, or take the configured default when there is none
    pub fn from_json(kind: CalculatorKind, input: Option<&str>, defaults: &CalculatorDefaults) -> Result<Self> {
        Ok(match kind {
            CalculatorKind::Sip => CalculatorInput::Sip(input_or(input, &defaults.sip)?),
            CalculatorKind::LumpSum => CalculatorInput::LumpSum(input_or(input, &defaults.lump_sum)?),
            CalculatorKind::Ppf => CalculatorInput::Ppf(input_or(input, &defaults.ppf)?),
            CalculatorKind::Epf => CalculatorInput::Epf(input_or(input, &defaults.epf)?),
            CalculatorKind::Retirement => CalculatorInput::Retirement(input_or(input, &defaults.retirement)?),
            CalculatorKind::Withdrawal => CalculatorInput::Withdrawal(input_or(input, &defaults.withdrawal)?),
            CalculatorKind::Hlv => CalculatorInput::Hlv(input_or(input, &defaults.hlv)?),
            CalculatorKind::CorpusScore => CalculatorInput::CorpusScore(input_or(input, &defaults.retirement)?),
            CalculatorKind::Recommendations => {
                CalculatorInput::Recommendations(input_or(input, &defaults.investor)?)
            }
        })
    }

    /// Run the calculator and wrap the result in a report
    pub fn run(&self, catalog: &FundCatalog) -> Result<Evaluation> {
        let kind = self.kind();

        let (report, schedule_csv) = match self {
            CalculatorInput::Sip(input) => {
                let result = calculate_sip(input)?;
                (Report::build(kind, input, &result)?, schedule_to_csv(&result.yearly)?)
            }
            CalculatorInput::LumpSum(input) => {
                let result = calculate_lump_sum(input)?;
                (Report::build(kind, input, &result)?, schedule_to_csv(&result.yearly)?)
            }
            CalculatorInput::Ppf(input) => {
                let result = calculate_ppf(input)?;
                (Report::build(kind, input, &result)?, schedule_to_csv(&result.yearly)?)
            }
            CalculatorInput::Epf(input) => {
                let result = calculate_epf(input)?;
                (Report::build(kind, input, &result)?, schedule_to_csv(&result.yearly)?)
            }
            CalculatorInput::Retirement(input) => {
                let result = plan_retirement(input)?;
                (Report::build(kind, input, &result)?, schedule_to_csv(&result.projection)?)
            }
            CalculatorInput::Withdrawal(input) => {
                let result = simulate_withdrawal(input)?;
                (Report::build(kind, input, &result)?, schedule_to_csv(&result.yearly)?)
            }
            CalculatorInput::Hlv(input) => {
                let result = calculate_hlv(input)?;
                (Report::build(kind, input, &result)?, String::new())
            }
            CalculatorInput::CorpusScore(input) => {
                let plan = plan_retirement(input)?;
                let result = score_corpus(&CorpusScoreInput::from_plan(input, &plan));
                (Report::build(kind, input, &result)?, String::new())
            }
            CalculatorInput::Recommendations(input) => {
                let result = recommend(input, catalog)?;
                (Report::build(kind, input, &result)?, String::new())
            }
        };

        tracing::info!(calculator = %kind, fingerprint = %report.short_fingerprint(), "evaluated");

        Ok(Evaluation { report, schedule_csv })
    }
}

/// Run one calculator from optional JSON input, falling back to configured defaults
pub fn evaluate(kind: CalculatorKind, input: Option<&str>, config: &PlannerConfig) -> Result<Evaluation> {
    let input = CalculatorInput::from_json(kind, input, &config.defaults)?;

    // Only recommendations read the fund catalog file
    let catalog = match kind {
        CalculatorKind::Recommendations => config.fund_catalog()?,
        _ => FundCatalog::default(),
    };

    input.run(&catalog)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_names() {
        for kind in CalculatorKind::ALL {
            assert_eq!(kind.as_str().parse::<CalculatorKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.as_str().to_string())
            );
        }
        assert_eq!("  SIP ".parse::<CalculatorKind>().unwrap(), CalculatorKind::Sip);
        assert!("mortgage".parse::<CalculatorKind>().is_err());
    }

    #[test]
    fn test_fingerprint_stable_for_equal_input() {
        let config = PlannerConfig::default();
        let a = evaluate(CalculatorKind::Sip, None, &config).unwrap();
        let b = evaluate(
            CalculatorKind::Sip,
            Some(r#"{"years": 20, "annual_rate": 12.0, "monthly_investment": 10000.0}"#),
            &config,
        )
        .unwrap();

        assert_eq!(a.report.input_fingerprint, b.report.input_fingerprint);
        assert_ne!(a.report.id, b.report.id);
        assert_eq!(a.report.input_fingerprint.len(), 64);
    }

    #[test]
    fn test_fingerprint_differs_by_calculator() {
        let input = serde_json::json!({ "years": 10 });
        assert_ne!(
            fingerprint(CalculatorKind::Sip, &input),
            fingerprint(CalculatorKind::LumpSum, &input)
        );
    }

    #[test]
    fn test_schedule_csv() {
        let config = PlannerConfig::default();
        let evaluation = evaluate(CalculatorKind::Ppf, None, &config).unwrap();
        let lines: Vec<&str> = evaluation.schedule_csv.lines().collect();

        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "year,contribution,interest,total_investment,total_interest,balance");
        assert!(lines[1].starts_with("1,150000.0,"));
    }

    #[test]
    fn test_every_calculator_evaluates_with_defaults() {
        let config = PlannerConfig::default();

        for kind in CalculatorKind::ALL {
            let evaluation = evaluate(kind, None, &config).unwrap();
            assert_eq!(evaluation.report.calculator, kind);
            assert!(evaluation.report.result.is_object());
            println!("{}", evaluation.report.summary());
        }
    }

    #[test]
    fn test_summary_with_short_fingerprint() {
        let report: Report = serde_json::from_value(serde_json::json!({
            "id": "r-1",
            "calculator": "sip",
            "generated_at": "2024-01-01T00:00:00Z",
            "input_fingerprint": "abc",
            "input": {},
            "result": {}
        }))
        .unwrap();

        assert_eq!(report.short_fingerprint(), "abc");
        assert!(report.summary().ends_with("(input abc)"));
    }

    #[test]
    fn test_typed_input_matches_json_evaluation() {
        let config = PlannerConfig::default();
        let input = CalculatorInput::from_json(CalculatorKind::CorpusScore, None, &config.defaults).unwrap();
        assert_eq!(input, CalculatorInput::CorpusScore(RetirementInput::default()));
        assert_eq!(input.kind(), CalculatorKind::CorpusScore);

        let typed = input.run(&FundCatalog::default()).unwrap();
        let parsed = evaluate(CalculatorKind::CorpusScore, None, &config).unwrap();

        assert_eq!(typed.report.input_fingerprint, parsed.report.input_fingerprint);
        assert_eq!(typed.report.result, parsed.report.result);
        assert!(typed.schedule_csv.is_empty());
    }

    #[test]
    fn test_invalid_input_json() {
        let config = PlannerConfig::default();
        assert!(evaluate(CalculatorKind::Sip, Some("{not json"), &config).is_err());
        assert!(evaluate(CalculatorKind::Sip, Some(r#"{"monthly_investment": 1}"#), &config).is_err());
    }

    #[test]
    fn test_validation_error_survives_evaluate() {
        let config = PlannerConfig::default();
        let err = evaluate(
            CalculatorKind::Withdrawal,
            Some(r#"{"initial_corpus": -5, "withdrawal_rate": 4, "expected_return": 8, "inflation_rate": 5, "years": 30}"#),
            &config,
        )
        .unwrap_err();

        assert!(err.downcast_ref::<crate::validation::ValidationErrors>().is_some());
    }
}
