// Calculators - one pure function per instrument
//
// Every calculator takes an input record and returns a result record with
// its yearly schedule. Inputs are validated first; nothing here does I/O.

pub mod sip;
pub mod lumpsum;
pub mod ppf;
pub mod epf;
pub mod retirement;
pub mod withdrawal;

use serde::{Deserialize, Serialize};

pub use sip::{calculate_sip, sip_future_value, SipInput, SipResult};
pub use lumpsum::{calculate_lump_sum, lump_sum_future_value, LumpSumInput, LumpSumResult};
pub use ppf::{calculate_ppf, PpfInput, PpfResult, PpfRow};
pub use epf::{calculate_epf, EpfInput, EpfResult, EpfRow};
pub use retirement::{plan_retirement, required_monthly_investment, ProjectionPoint, RetirementInput, RetirementPlan};
pub use withdrawal::{simulate_withdrawal, CorpusStatus, WithdrawalInput, WithdrawalResult, WithdrawalRow};

/// One year of a growth chart (SIP and lump sum)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub year: u32,
    /// Amount invested up to the end of this year
    pub investment: f64,
    /// Value above the invested amount
    pub growth: f64,
    /// Portfolio value at the end of this year
    pub total: f64,
}
