// 🏦 Safe-Withdrawal Simulator
//
// Year by year: withdraw, then grow what is left, then raise next year's
// withdrawal by inflation. Stops the instant the balance cannot cover the
// withdrawal; the schedule is truncated there, never clamped.

use crate::validation::InputChecker;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalInput {
    /// Corpus at the start of retirement (₹)
    pub initial_corpus: f64,

    /// First-year withdrawal, percent of the initial corpus
    pub withdrawal_rate: f64,

    /// Percent per annum on the remaining balance
    pub expected_return: f64,

    /// Percent per annum applied to the withdrawal
    pub inflation_rate: f64,

    /// Horizon in years
    pub years: u32,
}

impl Default for WithdrawalInput {
    fn default() -> Self {
        WithdrawalInput {
            initial_corpus: 10_000_000.0,
            withdrawal_rate: 4.0,
            expected_return: 8.0,
            inflation_rate: 5.0,
            years: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRow {
    pub year: u32,
    pub starting_balance: f64,
    pub withdrawal: f64,
    pub returns: f64,
    pub ending_balance: f64,
    /// Withdrawal in first-year money
    pub real_withdrawal: f64,
}

// ============================================================================
// CORPUS STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorpusStatus {
    /// Ends above the initial corpus
    Growing,
    /// Ends above half the initial corpus
    Stable,
    /// Survives the horizon but ends at half or less
    Depleting,
    /// Ran out before the horizon
    Depleted { years: u32 },
}

impl CorpusStatus {
    pub fn label(&self) -> String {
        match self {
            CorpusStatus::Growing => "Growing Corpus".to_string(),
            CorpusStatus::Stable => "Stable Corpus".to_string(),
            CorpusStatus::Depleting => "Depleting Corpus".to_string(),
            CorpusStatus::Depleted { years } => format!("Depleted after {} years", years),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CorpusStatus::Growing => "green",
            CorpusStatus::Stable => "blue",
            CorpusStatus::Depleting => "amber",
            CorpusStatus::Depleted { .. } => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalResult {
    pub initial_annual_withdrawal: f64,
    /// The withdrawal that would be due in the year after the last simulated one
    pub final_annual_withdrawal: f64,
    pub final_corpus: f64,
    pub will_outlast: bool,
    pub years_lasted: u32,
    pub status: CorpusStatus,
    pub yearly: Vec<WithdrawalRow>,
}

impl WithdrawalResult {
    /// First year the corpus could not fund, if any
    pub fn depleted_in_year(&self) -> Option<u32> {
        if self.will_outlast {
            None
        } else {
            Some(self.years_lasted + 1)
        }
    }
}

pub fn simulate_withdrawal(input: &WithdrawalInput) -> Result<WithdrawalResult> {
    InputChecker::new("Safe Withdrawal")
        .amount("initial_corpus", input.initial_corpus)
        .rate("withdrawal_rate", input.withdrawal_rate)
        .rate("expected_return", input.expected_return)
        .rate("inflation_rate", input.inflation_rate)
        .horizon("years", input.years)
        .finish()?;

    let inflation = 1.0 + input.inflation_rate / 100.0;
    let initial_annual_withdrawal = input.initial_corpus * input.withdrawal_rate / 100.0;

    let mut corpus = input.initial_corpus;
    let mut withdrawal = initial_annual_withdrawal;
    let mut years_lasted = input.years;
    let mut yearly = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        if corpus < withdrawal {
            years_lasted = year - 1;
            break;
        }

        let starting_balance = corpus;
        corpus -= withdrawal;
        let returns = corpus * input.expected_return / 100.0;
        corpus += returns;

        yearly.push(WithdrawalRow {
            year,
            starting_balance,
            withdrawal,
            returns,
            ending_balance: corpus,
            real_withdrawal: withdrawal / inflation.powi(year as i32 - 1),
        });

        withdrawal *= inflation;
    }

    let will_outlast = years_lasted == input.years;
    let status = if !will_outlast {
        CorpusStatus::Depleted { years: years_lasted }
    } else if corpus > input.initial_corpus {
        CorpusStatus::Growing
    } else if corpus > input.initial_corpus / 2.0 {
        CorpusStatus::Stable
    } else {
        CorpusStatus::Depleting
    };

    tracing::debug!(
        years = input.years,
        years_lasted,
        final_corpus = corpus,
        "simulated withdrawals"
    );

    Ok(WithdrawalResult {
        initial_annual_withdrawal,
        final_annual_withdrawal: withdrawal,
        final_corpus: corpus,
        will_outlast,
        years_lasted,
        status,
        yearly,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Straight replay of the rule, used to check the outcome independently
    fn survives(input: &WithdrawalInput) -> bool {
        let mut balance = input.initial_corpus;
        let mut w = input.initial_corpus * input.withdrawal_rate / 100.0;
        for _ in 0..input.years {
            if balance < w {
                return false;
            }
            balance = (balance - w) * (1.0 + input.expected_return / 100.0);
            w *= 1.0 + input.inflation_rate / 100.0;
        }
        true
    }

    #[test]
    fn test_one_crore_four_percent_thirty_years() {
        let input = WithdrawalInput::default();
        let result = simulate_withdrawal(&input).unwrap();

        assert_eq!(result.will_outlast, survives(&input));
        assert_eq!(result.initial_annual_withdrawal, 400_000.0);

        if result.will_outlast {
            assert_eq!(result.yearly.len(), 30);
            assert_ne!(result.status, CorpusStatus::Depleted { years: result.years_lasted });
        } else {
            assert!(result.yearly.len() < 30);
        }
    }

    #[test]
    fn test_depletion_truncates_at_first_shortfall() {
        let input = WithdrawalInput {
            initial_corpus: 1_000_000.0,
            withdrawal_rate: 20.0,
            expected_return: 2.0,
            inflation_rate: 6.0,
            years: 30,
        };
        let result = simulate_withdrawal(&input).unwrap();

        assert!(!result.will_outlast);
        assert!(result.yearly.len() < 30);
        assert_eq!(result.yearly.len() as u32, result.years_lasted);
        assert_eq!(result.status, CorpusStatus::Depleted { years: result.years_lasted });
        assert_eq!(result.status.label(), format!("Depleted after {} years", result.years_lasted));

        for row in &result.yearly {
            assert!(row.starting_balance >= row.withdrawal);
            assert!(row.ending_balance >= 0.0);
        }

        // The balance left after the last row cannot cover the next withdrawal
        let last = result.yearly.last().unwrap();
        assert!(last.ending_balance < result.final_annual_withdrawal);
        assert_eq!(result.depleted_in_year(), Some(result.years_lasted + 1));
    }

    #[test]
    fn test_withdraw_then_grow() {
        let input = WithdrawalInput {
            initial_corpus: 1_000.0,
            withdrawal_rate: 10.0,
            expected_return: 10.0,
            inflation_rate: 0.0,
            years: 1,
        };
        let result = simulate_withdrawal(&input).unwrap();
        let row = &result.yearly[0];

        assert_eq!(row.withdrawal, 100.0);
        assert!((row.returns - 90.0).abs() < 1e-9);
        assert!((row.ending_balance - 990.0).abs() < 1e-9);
        assert_eq!(result.status, CorpusStatus::Stable);
    }

    #[test]
    fn test_real_withdrawal_is_constant() {
        let result = simulate_withdrawal(&WithdrawalInput::default()).unwrap();

        for row in &result.yearly {
            assert!((row.real_withdrawal - 400_000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_growing_corpus_status() {
        let input = WithdrawalInput {
            withdrawal_rate: 2.0,
            expected_return: 10.0,
            inflation_rate: 3.0,
            ..WithdrawalInput::default()
        };
        let result = simulate_withdrawal(&input).unwrap();

        assert_eq!(result.status, CorpusStatus::Growing);
        assert_eq!(result.status.color(), "green");
        assert_eq!(result.depleted_in_year(), None);
    }

    #[test]
    fn test_empty_corpus_never_depletes() {
        let input = WithdrawalInput {
            initial_corpus: 0.0,
            withdrawal_rate: 4.0,
            ..WithdrawalInput::default()
        };
        // 0 < 0 is false, so an empty corpus with nothing to withdraw keeps going
        let result = simulate_withdrawal(&input).unwrap();
        assert!(result.will_outlast);
        assert_eq!(result.status, CorpusStatus::Depleting);
    }
}
