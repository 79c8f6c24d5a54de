// 🏖️ Retirement Corpus Sizing
//
// Inflate today's expenses to the retirement date, size the corpus from a
// withdrawal rate, then solve the monthly SIP that reaches it (PMT).

use crate::validation::InputChecker;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Floor for the withdrawal rate used to size the corpus
pub const MIN_WITHDRAWAL_RATE: f64 = 0.04;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,

    /// Today's monthly household expense (₹)
    pub monthly_expense: f64,

    /// Percent per annum
    pub inflation_rate: f64,

    /// Percent per annum, before and after retirement
    pub expected_return: f64,
}

impl Default for RetirementInput {
    fn default() -> Self {
        RetirementInput {
            current_age: 30,
            retirement_age: 60,
            life_expectancy: 85,
            monthly_expense: 50_000.0,
            inflation_rate: 6.0,
            expected_return: 12.0,
        }
    }
}

impl RetirementInput {
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    pub fn retirement_duration(&self) -> u32 {
        self.life_expectancy.saturating_sub(self.retirement_age)
    }
}

/// One chart point: cumulative investment against portfolio value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlan {
    pub years_to_retirement: u32,
    pub retirement_duration: u32,
    pub future_monthly_expense: f64,
    pub annual_expense_at_retirement: f64,
    /// Fraction, not percent
    pub withdrawal_rate: f64,
    pub required_corpus: f64,
    pub monthly_investment: f64,
    pub yearly_investment: f64,
    /// Years 0..=years_to_retirement
    pub projection: Vec<ProjectionPoint>,
}

/// Monthly payment that grows to `target` over `months` at `monthly_rate` (a fraction).
pub fn required_monthly_investment(target: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return target;
    }
    if monthly_rate == 0.0 {
        return target / months as f64;
    }

    target * monthly_rate / ((1.0 + monthly_rate).powi(months as i32) - 1.0)
}

pub fn plan_retirement(input: &RetirementInput) -> Result<RetirementPlan> {
    let mut checker = InputChecker::new("Retirement");
    checker
        .amount("monthly_expense", input.monthly_expense)
        .rate("inflation_rate", input.inflation_rate)
        .rate("expected_return", input.expected_return)
        .horizon("life_expectancy", input.life_expectancy.saturating_sub(input.current_age));
    if input.retirement_age <= input.current_age {
        checker.fail("retirement_age", "Retirement age must be greater than current age");
    }
    if input.life_expectancy <= input.retirement_age {
        checker.fail("life_expectancy", "Life expectancy must be greater than retirement age");
    }
    checker.finish()?;

    let years = input.years_to_retirement();

    let future_monthly_expense =
        input.monthly_expense * (1.0 + input.inflation_rate / 100.0).powi(years as i32);
    let annual_expense_at_retirement = future_monthly_expense * 12.0;

    let withdrawal_rate = MIN_WITHDRAWAL_RATE
        .max((input.inflation_rate - input.expected_return * 0.7) / 100.0);
    let required_corpus = annual_expense_at_retirement / withdrawal_rate;

    let monthly_rate = input.expected_return / 100.0 / 12.0;
    let monthly_investment = required_monthly_investment(required_corpus, monthly_rate, years * 12);
    let yearly_investment = monthly_investment * 12.0;

    let mut projection = Vec::with_capacity(years as usize + 1);
    projection.push(ProjectionPoint { year: 0, invested: 0.0, value: 0.0 });

    // Contributions for a year land together and grow for the full year
    let mut invested = 0.0;
    let mut value = 0.0;
    for year in 1..=years {
        invested += yearly_investment;
        value = (value + yearly_investment) * (1.0 + input.expected_return / 100.0);
        projection.push(ProjectionPoint { year, invested, value });
    }

    tracing::debug!(
        years_to_retirement = years,
        corpus = required_corpus,
        monthly = monthly_investment,
        "planned retirement"
    );

    Ok(RetirementPlan {
        years_to_retirement: years,
        retirement_duration: input.retirement_duration(),
        future_monthly_expense,
        annual_expense_at_retirement,
        withdrawal_rate,
        required_corpus,
        monthly_investment,
        yearly_investment,
        projection,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::sip_future_value;

    #[test]
    fn test_default_plan() {
        let input = RetirementInput::default();
        let plan = plan_retirement(&input).unwrap();

        assert_eq!(plan.years_to_retirement, 30);
        assert_eq!(plan.retirement_duration, 25);

        // 6 - 8.4 is negative, so the 4% floor applies
        assert_eq!(plan.withdrawal_rate, 0.04);

        let expected_expense = 50_000.0 * 1.06_f64.powi(30);
        assert!((plan.future_monthly_expense - expected_expense).abs() < 1e-6);
        assert!((plan.required_corpus - expected_expense * 12.0 / 0.04).abs() < 1e-3);
        assert_eq!(plan.projection.len(), 31);
    }

    #[test]
    fn test_withdrawal_rate_above_floor() {
        let input = RetirementInput {
            inflation_rate: 10.0,
            expected_return: 5.0,
            ..RetirementInput::default()
        };
        let plan = plan_retirement(&input).unwrap();

        assert!((plan.withdrawal_rate - 0.065).abs() < 1e-12);
    }

    #[test]
    fn test_pmt_reaches_target() {
        // Ordinary annuity: payments at month end reach the target exactly
        let target = 10_000_000.0;
        let rate = 0.01;
        let pmt = required_monthly_investment(target, rate, 240);

        let fv = pmt * ((1.0 + rate).powi(240) - 1.0) / rate;
        assert!((fv - target).abs() < 1e-3);

        // The annuity-due value overshoots by one month of growth
        assert!(sip_future_value(pmt, rate, 240) > target);
    }

    #[test]
    fn test_pmt_zero_rate() {
        assert_eq!(required_monthly_investment(1_200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn test_projection_starts_at_zero_and_grows() {
        let plan = plan_retirement(&RetirementInput::default()).unwrap();

        assert_eq!(plan.projection[0].invested, 0.0);
        assert_eq!(plan.projection[0].value, 0.0);

        for pair in plan.projection.windows(2) {
            assert!(pair[1].value > pair[0].value);
            assert!(pair[1].value >= pair[1].invested);
        }

        let last = plan.projection.last().unwrap();
        assert!((last.invested - plan.yearly_investment * 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_ages_rejected() {
        let input = RetirementInput {
            current_age: 60,
            retirement_age: 55,
            life_expectancy: 50,
            ..RetirementInput::default()
        };
        let err = plan_retirement(&input).unwrap_err();
        let errors = err.downcast_ref::<crate::validation::ValidationErrors>().unwrap();

        assert_eq!(errors.fields(), vec!["retirement_age", "life_expectancy"]);
    }
}
