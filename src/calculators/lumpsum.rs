// 💰 Lump-Sum Compounding - FV = P × (1 + r)^n

use super::GrowthRow;
use crate::validation::InputChecker;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpSumInput {
    /// One-time investment (₹)
    pub principal: f64,

    /// Expected return, percent per annum
    pub annual_rate: f64,

    pub years: u32,
}

impl Default for LumpSumInput {
    fn default() -> Self {
        LumpSumInput {
            principal: 500_000.0,
            annual_rate: 10.0,
            years: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpSumResult {
    pub investment: f64,
    pub estimated_returns: f64,
    pub maturity_value: f64,
    pub yearly: Vec<GrowthRow>,
}

/// `principal` compounded annually at `annual_rate` percent for `years`
pub fn lump_sum_future_value(principal: f64, annual_rate: f64, years: u32) -> f64 {
    principal * (1.0 + annual_rate / 100.0).powi(years as i32)
}

pub fn calculate_lump_sum(input: &LumpSumInput) -> Result<LumpSumResult> {
    InputChecker::new("Lump Sum")
        .amount("principal", input.principal)
        .rate("annual_rate", input.annual_rate)
        .horizon("years", input.years)
        .finish()?;

    let maturity_value = lump_sum_future_value(input.principal, input.annual_rate, input.years);

    let yearly = (1..=input.years)
        .map(|year| {
            let value = lump_sum_future_value(input.principal, input.annual_rate, year);
            GrowthRow {
                year,
                investment: input.principal,
                growth: value - input.principal,
                total: value,
            }
        })
        .collect();

    tracing::debug!(years = input.years, maturity = maturity_value, "calculated lump sum");

    Ok(LumpSumResult {
        investment: input.principal,
        estimated_returns: maturity_value - input.principal,
        maturity_value,
        yearly,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_keeps_principal() {
        for years in [0, 1, 7, 30, 100] {
            assert_eq!(lump_sum_future_value(250_000.0, 0.0, years), 250_000.0);
        }
    }

    #[test]
    fn test_monotonic_in_rate_and_years() {
        let p = 100_000.0;

        let mut previous = lump_sum_future_value(p, 1.0, 10);
        for rate in [2.0, 5.0, 8.5, 12.0, 20.0] {
            let fv = lump_sum_future_value(p, rate, 10);
            assert!(fv > previous);
            previous = fv;
        }

        let mut previous = lump_sum_future_value(p, 8.0, 1);
        for years in 2..=30 {
            let fv = lump_sum_future_value(p, 8.0, years);
            assert!(fv > previous);
            previous = fv;
        }
    }

    #[test]
    fn test_default_scenario() {
        let result = calculate_lump_sum(&LumpSumInput::default()).unwrap();

        let expected = 500_000.0 * 1.1_f64.powi(15);
        assert!((result.maturity_value - expected).abs() < 1e-6);
        assert_eq!(result.yearly.len(), 15);
        assert!(result.yearly.iter().all(|row| row.investment == 500_000.0));
        assert_eq!(result.yearly.last().unwrap().total, result.maturity_value);
    }

    #[test]
    fn test_rate_above_hundred_rejected() {
        let input = LumpSumInput { principal: 1_000.0, annual_rate: 150.0, years: 3 };
        assert!(calculate_lump_sum(&input).is_err());
    }
}
