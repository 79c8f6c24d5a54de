// 🛡️ Human Life Value - income replacement estimate + 300-900 score
//
// HLV = income × working years − expenses + savings − liabilities

use super::clamp_score;
use crate::validation::InputChecker;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HlvInput {
    /// 18 to 80
    pub age: u32,
    pub annual_income: f64,
    /// 0 to 60
    pub working_years_left: u32,
    pub annual_expenses: f64,
    pub savings: f64,
    pub liabilities: f64,
}

impl Default for HlvInput {
    fn default() -> Self {
        HlvInput {
            age: 35,
            annual_income: 500_000.0,
            working_years_left: 25,
            annual_expenses: 300_000.0,
            savings: 100_000.0,
            liabilities: 200_000.0,
        }
    }
}

/// Per-parameter scores, each already in the 300-900 band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HlvScores {
    pub age: u32,
    pub income: u32,
    pub working_years: u32,
    pub savings: u32,
    pub liabilities: u32,
    pub overall: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HlvRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HlvRating {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 750 => HlvRating::Excellent,
            s if s >= 650 => HlvRating::Good,
            s if s >= 500 => HlvRating::Fair,
            _ => HlvRating::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HlvRating::Excellent => "Excellent",
            HlvRating::Good => "Good",
            HlvRating::Fair => "Fair",
            HlvRating::Poor => "Poor",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            HlvRating::Excellent => "green",
            HlvRating::Good => "yellow",
            HlvRating::Fair => "orange",
            HlvRating::Poor => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HlvResult {
    /// Can be negative when liabilities and expenses outweigh future income
    pub hlv: f64,
    pub scores: HlvScores,
    pub rating: HlvRating,
}

pub fn calculate_hlv(input: &HlvInput) -> Result<HlvResult> {
    InputChecker::new("HLV")
        .range("age", input.age as f64, 18.0, 80.0)
        .amount("annual_income", input.annual_income)
        .range("working_years_left", input.working_years_left as f64, 0.0, 60.0)
        .amount("annual_expenses", input.annual_expenses)
        .amount("savings", input.savings)
        .amount("liabilities", input.liabilities)
        .finish()?;

    let age = input.age as f64;
    let years = input.working_years_left as f64;

    let hlv = input.annual_income * years - input.annual_expenses + input.savings
        - input.liabilities;

    let age_score = clamp_score(900.0 - (age - 18.0) * 10.0);
    let income_score = clamp_score(300.0 + input.annual_income / 20_000.0);
    let working_years_score = clamp_score(300.0 + years * 15.0);
    let savings_score = clamp_score(300.0 + input.savings / 10_000.0);
    let liabilities_score = clamp_score(900.0 - input.liabilities / 10_000.0);

    // Mean of the unrounded sub-scores
    let overall = ((age_score + income_score + working_years_score + savings_score
        + liabilities_score)
        / 5.0)
        .round() as u32;

    let scores = HlvScores {
        age: age_score.round() as u32,
        income: income_score.round() as u32,
        working_years: working_years_score.round() as u32,
        savings: savings_score.round() as u32,
        liabilities: liabilities_score.round() as u32,
        overall,
    };

    tracing::debug!(hlv, overall, "calculated HLV");

    Ok(HlvResult {
        hlv,
        rating: HlvRating::from_score(overall),
        scores,
    })
}

// ============================================================================
// TESTS
// ============================================================================
