// 🏢 EPF - employee + employer contributions on a growing salary
//
// Each year: contributions from the current salary, interest on
// (opening balance + contributions), then the salary increment.

use crate::validation::InputChecker;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpfInput {
    /// Monthly basic salary + DA (₹)
    pub basic_salary: f64,

    /// Employee share, percent of basic
    pub employee_rate: f64,

    /// Employer share, percent of basic
    pub employer_rate: f64,

    pub current_age: u32,
    pub retirement_age: u32,

    /// Expected salary increase, percent per annum
    pub annual_increment: f64,

    /// EPF interest, percent per annum
    pub interest_rate: f64,
}

impl Default for EpfInput {
    fn default() -> Self {
        EpfInput {
            basic_salary: 30_000.0,
            employee_rate: 12.0,
            employer_rate: 12.0,
            current_age: 30,
            retirement_age: 58,
            annual_increment: 5.0,
            interest_rate: 8.25,
        }
    }
}

impl EpfInput {
    pub fn years(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpfRow {
    /// 1-based year of service
    pub year: u32,
    /// Age at the start of this year
    pub age: u32,
    /// Monthly basic salary used for this year
    pub salary: f64,
    pub employee_contribution: f64,
    pub employer_contribution: f64,
    pub interest: f64,
    pub total_employee_contribution: f64,
    pub total_employer_contribution: f64,
    pub total_interest: f64,
    /// Closing balance
    pub balance: f64,
}

impl EpfRow {
    pub fn contribution(&self) -> f64 {
        self.employee_contribution + self.employer_contribution
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpfResult {
    pub maturity_amount: f64,
    pub total_employee_contribution: f64,
    pub total_employer_contribution: f64,
    pub total_interest: f64,
    pub yearly: Vec<EpfRow>,
}

pub fn calculate_epf(input: &EpfInput) -> Result<EpfResult> {
    let mut checker = InputChecker::new("EPF");
    checker
        .amount("basic_salary", input.basic_salary)
        .rate("employee_rate", input.employee_rate)
        .rate("employer_rate", input.employer_rate)
        .rate("annual_increment", input.annual_increment)
        .rate("interest_rate", input.interest_rate)
        .horizon("retirement_age", input.years());
    if input.retirement_age <= input.current_age {
        checker.fail("retirement_age", "Must be greater than current age");
    }
    checker.finish()?;

    let mut salary = input.basic_salary;
    let mut balance = 0.0;
    let mut total_employee = 0.0;
    let mut total_employer = 0.0;
    let mut total_interest = 0.0;
    let mut yearly = Vec::with_capacity(input.years() as usize);

    for year in 1..=input.years() {
        let employee = salary * input.employee_rate / 100.0 * 12.0;
        let employer = salary * input.employer_rate / 100.0 * 12.0;
        let interest = (balance + employee + employer) * input.interest_rate / 100.0;

        balance += employee + employer + interest;
        total_employee += employee;
        total_employer += employer;
        total_interest += interest;

        yearly.push(EpfRow {
            year,
            age: input.current_age + year - 1,
            salary,
            employee_contribution: employee,
            employer_contribution: employer,
            interest,
            total_employee_contribution: total_employee,
            total_employer_contribution: total_employer,
            total_interest,
            balance,
        });

        salary += salary * input.annual_increment / 100.0;
    }

    tracing::debug!(years = input.years(), maturity = balance, "calculated EPF");

    Ok(EpfResult {
        maturity_amount: balance,
        total_employee_contribution: total_employee,
        total_employer_contribution: total_employer,
        total_interest,
        yearly,
    })
}

// ============================================================================
// TESTS
// ============================================================================
