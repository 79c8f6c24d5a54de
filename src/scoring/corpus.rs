// 🧮 Retirement Corpus Score - readiness on a 300-900 scale
//
// Base 550 plus five factor adjustments, clamped to the band.

use super::clamp_score;
use crate::calculators::{RetirementInput, RetirementPlan};
use serde::{Deserialize, Serialize};

const BASE_SCORE: i64 = 550;

/// Monthly household expense used as the "typical" reference
const REFERENCE_MONTHLY_EXPENSE: f64 = 30_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusScoreInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_expense: f64,
    pub required_corpus: f64,
    pub monthly_investment: f64,
}

impl CorpusScoreInput {
    /// Score inputs taken from a retirement plan
    pub fn from_plan(input: &RetirementInput, plan: &RetirementPlan) -> Self {
        CorpusScoreInput {
            current_age: input.current_age,
            retirement_age: input.retirement_age,
            monthly_expense: input.monthly_expense,
            required_corpus: plan.required_corpus,
            monthly_investment: plan.monthly_investment,
        }
    }
}

// ============================================================================
// FACTORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

impl Impact {
    /// Positive above `positive`, neutral above `neutral`, otherwise negative
    fn grade(points: i64, positive: i64, neutral: i64) -> Self {
        if points > positive {
            Impact::Positive
        } else if points > neutral {
            Impact::Neutral
        } else {
            Impact::Negative
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactorKind {
    Age,
    TimeHorizon,
    SavingsRate,
    CorpusAdequacy,
    ExpenseManagement,
}

impl FactorKind {
    pub fn title(&self) -> &'static str {
        match self {
            FactorKind::Age => "Age Factor",
            FactorKind::TimeHorizon => "Time Horizon",
            FactorKind::SavingsRate => "Savings Rate",
            FactorKind::CorpusAdequacy => "Corpus Adequacy",
            FactorKind::ExpenseManagement => "Expense Management",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FactorKind::Age => "Starting retirement planning early significantly improves your score",
            FactorKind::TimeHorizon => "Longer time until retirement allows for more wealth accumulation",
            FactorKind::SavingsRate => "Higher monthly investments relative to income improve long-term security",
            FactorKind::CorpusAdequacy => "Target corpus should be at least 25x your annual expenses",
            FactorKind::ExpenseManagement => "Lower current expenses make it easier to maintain lifestyle in retirement",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            FactorKind::Age => "Consider increasing your monthly investment to compensate for a later start",
            FactorKind::TimeHorizon => "You may need to delay retirement or significantly increase savings rate",
            FactorKind::SavingsRate => "Try to increase your monthly investment to at least 15% of your income",
            FactorKind::CorpusAdequacy => "Aim for a retirement corpus of at least 25-30x your annual expenses",
            FactorKind::ExpenseManagement => "Consider ways to reduce your current expenses to improve retirement readiness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub kind: FactorKind,
    pub title: String,
    /// Points added to (or taken from) the base score
    pub points: i64,
    pub impact: Impact,
    pub description: String,
}

impl ScoreFactor {
    fn new(kind: FactorKind, points: i64, impact: Impact) -> Self {
        ScoreFactor {
            kind,
            title: kind.title().to_string(),
            points,
            impact,
            description: kind.description().to_string(),
        }
    }
}

// ============================================================================
// RATING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorpusRating {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl CorpusRating {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 750 => CorpusRating::Excellent,
            s if s >= 650 => CorpusRating::Good,
            s if s >= 550 => CorpusRating::Fair,
            s if s >= 450 => CorpusRating::Poor,
            _ => CorpusRating::VeryPoor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorpusRating::Excellent => "Excellent",
            CorpusRating::Good => "Good",
            CorpusRating::Fair => "Fair",
            CorpusRating::Poor => "Poor",
            CorpusRating::VeryPoor => "Very Poor",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CorpusRating::Excellent => "green",
            CorpusRating::Good => "blue",
            CorpusRating::Fair => "amber",
            CorpusRating::Poor => "orange",
            CorpusRating::VeryPoor => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusScore {
    pub score: u32,
    pub rating: CorpusRating,
    pub factors: Vec<ScoreFactor>,
    pub suggestions: Vec<String>,
}

impl CorpusScore {
    pub fn summary(&self) -> String {
        format!(
            "Corpus score {} ({}), {} factors, {} suggestions",
            self.score,
            self.rating.label(),
            self.factors.len(),
            self.suggestions.len()
        )
    }
}

// ============================================================================
// SCORING
// ============================================================================

fn corpus_points(expense_multiple: f64) -> i64 {
    match expense_multiple {
        m if m >= 30.0 => 100,
        m if m >= 25.0 => 80,
        m if m >= 20.0 => 60,
        m if m >= 15.0 => 40,
        m if m >= 10.0 => 20,
        _ => 0,
    }
}

pub fn score_corpus(input: &CorpusScoreInput) -> CorpusScore {
    let age = input.current_age as i64;
    let years_to_retirement = input.retirement_age as i64 - age;
    let mut factors = Vec::with_capacity(5);

    let age_points = (40 - ((age - 20) as f64 / 2.0).floor() as i64).max(0);
    factors.push(ScoreFactor::new(
        FactorKind::Age,
        age_points,
        Impact::grade(age_points, 20, 0),
    ));

    let time_points = (years_to_retirement * 3).min(60);
    factors.push(ScoreFactor::new(
        FactorKind::TimeHorizon,
        time_points,
        Impact::grade(time_points, 30, 15),
    ));

    if input.monthly_investment > 0.0 {
        // Income assumed to be twice the expenses; 15% of it is the target
        let yearly_income = input.monthly_expense * 12.0 * 2.0;
        let ideal_investment = yearly_income * 0.15;
        let ratio = (input.monthly_investment / ideal_investment).min(2.0);
        let savings_points = (ratio * 80.0).floor() as i64;
        factors.push(ScoreFactor::new(
            FactorKind::SavingsRate,
            savings_points,
            Impact::grade(savings_points, 40, 20),
        ));
    }

    if input.required_corpus > 0.0 {
        let multiple = input.required_corpus / (input.monthly_expense * 12.0);
        let points = corpus_points(multiple);
        factors.push(ScoreFactor::new(
            FactorKind::CorpusAdequacy,
            points,
            Impact::grade(points, 60, 30),
        ));
    }

    let expense_ratio = (input.monthly_expense / REFERENCE_MONTHLY_EXPENSE).min(3.0);
    let expense_points = (40 - (expense_ratio * 30.0).floor() as i64).max(-40);
    factors.push(ScoreFactor::new(
        FactorKind::ExpenseManagement,
        expense_points,
        Impact::grade(expense_points, 20, 0),
    ));

    let raw = BASE_SCORE + factors.iter().map(|f| f.points).sum::<i64>();
    let score = clamp_score(raw as f64) as u32;

    let suggestions = suggestions_for(&factors);

    tracing::debug!(score, factors = factors.len(), "scored retirement corpus");

    CorpusScore {
        score,
        rating: CorpusRating::from_score(score),
        factors,
        suggestions,
    }
}

/// Advice for the two weakest factors that are not already positive
fn suggestions_for(factors: &[ScoreFactor]) -> Vec<String> {
    let mut weakest: Vec<&ScoreFactor> = factors.iter().collect();
    weakest.sort_by_key(|f| f.points);

    weakest
        .into_iter()
        .take(2)
        .filter(|f| f.impact != Impact::Positive)
        .map(|f| f.kind.suggestion().to_string())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
