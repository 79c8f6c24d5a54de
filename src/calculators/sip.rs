// 📈 SIP Projector - monthly contributions compounded monthly
//
// FV = C × ((1+i)^m − 1)/i × (1+i), contributions at the start of each month

use super::GrowthRow;
use crate::validation::InputChecker;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipInput {
    /// Contribution per month (₹)
    pub monthly_investment: f64,

    /// Expected return, percent per annum
    pub annual_rate: f64,

    /// Tenure in years
    pub years: u32,
}

impl Default for SipInput {
    fn default() -> Self {
        SipInput {
            monthly_investment: 10_000.0,
            annual_rate: 12.0,
            years: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub total_investment: f64,
    pub estimated_returns: f64,
    pub maturity_value: f64,
    pub yearly: Vec<GrowthRow>,
}

/// Future value of `months` contributions of `monthly` at `monthly_rate` (a fraction).
///
/// A zero rate yields the plain sum of contributions.
pub fn sip_future_value(monthly: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return monthly * months as f64;
    }

    let growth = (1.0 + monthly_rate).powi(months as i32);
    monthly * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}

pub fn calculate_sip(input: &SipInput) -> Result<SipResult> {
    InputChecker::new("SIP")
        .amount("monthly_investment", input.monthly_investment)
        .rate("annual_rate", input.annual_rate)
        .horizon("years", input.years)
        .finish()?;

    let monthly_rate = input.annual_rate / 12.0 / 100.0;
    let months = input.years * 12;

    let maturity_value = sip_future_value(input.monthly_investment, monthly_rate, months);
    let total_investment = input.monthly_investment * months as f64;

    // Each row re-evaluates the closed form at the year boundary
    let yearly = (1..=input.years)
        .map(|year| {
            let invested = input.monthly_investment * 12.0 * year as f64;
            let value = sip_future_value(input.monthly_investment, monthly_rate, year * 12);
            GrowthRow {
                year,
                investment: invested,
                growth: value - invested,
                total: value,
            }
        })
        .collect();

    tracing::debug!(
        years = input.years,
        maturity = maturity_value,
        "calculated SIP"
    );

    Ok(SipResult {
        total_investment,
        estimated_returns: maturity_value - total_investment,
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

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn test_ten_thousand_a_month_for_twenty_years() {
        let result = calculate_sip(&SipInput::default()).unwrap();

        assert_eq!(result.total_investment, 2_400_000.0);

        let i: f64 = 0.01;
        let expected = 10_000.0 * ((1.0 + i).powi(240) - 1.0) / i * (1.0 + i);
        assert!(approx(result.maturity_value, expected));

        // Roughly ₹99.9 lakh with contributions at the start of each month
        assert!(result.maturity_value > 9_000_000.0 && result.maturity_value < 10_500_000.0);
    }

    #[test]
    fn test_maturity_is_investment_plus_returns() {
        let inputs = [
            SipInput { monthly_investment: 500.0, annual_rate: 4.0, years: 1 },
            SipInput { monthly_investment: 25_000.0, annual_rate: 18.0, years: 40 },
            SipInput { monthly_investment: 3_333.0, annual_rate: 7.5, years: 13 },
        ];

        for input in &inputs {
            let result = calculate_sip(input).unwrap();
            assert!(approx(
                result.maturity_value,
                result.total_investment + result.estimated_returns
            ));
        }
    }

    #[test]
    fn test_yearly_series_matches_closed_form() {
        let input = SipInput::default();
        let result = calculate_sip(&input).unwrap();

        assert_eq!(result.yearly.len(), 20);
        assert_eq!(result.yearly[0].year, 1);
        assert_eq!(result.yearly[0].investment, 120_000.0);

        let last = result.yearly.last().unwrap();
        assert_eq!(last.total, result.maturity_value);
        assert_eq!(last.investment, result.total_investment);

        for pair in result.yearly.windows(2) {
            assert!(pair[1].total > pair[0].total);
        }
    }

    #[test]
    fn test_zero_rate_returns_contributions() {
        let input = SipInput { monthly_investment: 1_000.0, annual_rate: 0.0, years: 5 };
        let result = calculate_sip(&input).unwrap();

        assert_eq!(result.maturity_value, 60_000.0);
        assert_eq!(result.estimated_returns, 0.0);
        assert!(result.yearly.iter().all(|row| row.growth == 0.0));
    }

    #[test]
    fn test_zero_years_is_empty() {
        let input = SipInput { monthly_investment: 1_000.0, annual_rate: 10.0, years: 0 };
        let result = calculate_sip(&input).unwrap();

        assert_eq!(result.maturity_value, 0.0);
        assert!(result.yearly.is_empty());
    }

    #[test]
    fn test_negative_contribution_rejected() {
        let input = SipInput { monthly_investment: -10.0, annual_rate: 10.0, years: 5 };
        assert!(calculate_sip(&input).is_err());
    }
}
