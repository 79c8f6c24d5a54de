// 🧭 Portfolio Recommendations - funds as data
// Splits a monthly investment across equity, debt and hybrid funds from a catalog

use anyhow::{bail, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::validation::InputChecker;

// ============================================================================
// PROFILE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorProfile {
    pub age: u32,
    pub risk_profile: RiskProfile,
    /// HLV overall score (300-900)
    pub hlv_score: u32,
    /// Retirement corpus score (300-900)
    pub corpus_score: u32,
    /// Amount to invest every month (₹)
    pub monthly_investment: f64,
}

impl Default for InvestorProfile {
    fn default() -> Self {
        InvestorProfile {
            age: 35,
            risk_profile: RiskProfile::Moderate,
            hlv_score: 650,
            corpus_score: 700,
            monthly_investment: 25_000.0,
        }
    }
}

// ============================================================================
// FUNDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundType {
    #[serde(rename = "Mutual Fund")]
    MutualFund,
    #[serde(rename = "ETF")]
    Etf,
    #[serde(rename = "Index Fund")]
    IndexFund,
    Debt,
    Hybrid,
}

impl FundType {
    pub fn asset_class(&self) -> AssetClass {
        match self {
            FundType::MutualFund | FundType::Etf | FundType::IndexFund => AssetClass::Equity,
            FundType::Debt => AssetClass::Debt,
            FundType::Hybrid => AssetClass::Hybrid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Equity,
    Debt,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Trailing returns, percent per annum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailingReturns {
    pub one_year: f64,
    pub three_year: f64,
    pub five_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub name: String,
    pub fund_type: FundType,
    pub category: String,
    pub risk_level: RiskLevel,
    pub returns: TrailingReturns,
    pub min_investment: f64,
    /// Higher = preferred
    pub recommendation_score: u32,
}

impl Fund {
    fn new(
        name: &str,
        fund_type: FundType,
        category: &str,
        risk_level: RiskLevel,
        returns: (f64, f64, f64),
        min_investment: f64,
        recommendation_score: u32,
    ) -> Self {
        Fund {
            name: name.to_string(),
            fund_type,
            category: category.to_string(),
            risk_level,
            returns: TrailingReturns {
                one_year: returns.0,
                three_year: returns.1,
                five_year: returns.2,
            },
            min_investment,
            recommendation_score,
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundCatalog {
    funds: Vec<Fund>,
}

impl FundCatalog {
    /// Load funds from a JSON array
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read fund catalog: {:?}", path.as_ref()))?;

        let funds: Vec<Fund> = serde_json::from_str(&content)
            .context("Failed to parse fund catalog JSON")?;

        Ok(FundCatalog::from_funds(funds))
    }

    pub fn from_funds(mut funds: Vec<Fund>) -> Self {
        // Best first; ties keep catalog order
        funds.sort_by(|a, b| b.recommendation_score.cmp(&a.recommendation_score));
        FundCatalog { funds }
    }

    pub fn fund_count(&self) -> usize {
        self.funds.len()
    }

    /// Funds of one asset class, best first
    pub fn ranked(&self, class: AssetClass) -> Vec<&Fund> {
        self.funds
            .iter()
            .filter(|f| f.fund_type.asset_class() == class)
            .collect()
    }
}

impl Default for FundCatalog {
    fn default() -> Self {
        use FundType::*;
        use RiskLevel::*;

        FundCatalog::from_funds(vec![
            Fund::new("HDFC Index Fund-NIFTY 50 Plan", IndexFund, "Large Cap", Medium, (15.2, 12.8, 11.5), 100.0, 85),
            Fund::new("Axis Bluechip Fund", MutualFund, "Large Cap", Medium, (16.3, 13.2, 12.1), 500.0, 82),
            Fund::new("Mirae Asset Emerging Bluechip", MutualFund, "Large & Mid Cap", High, (18.7, 16.5, 15.3), 1000.0, 88),
            Fund::new("UTI Nifty Next 50 Index Fund", IndexFund, "Mid Cap", High, (19.5, 14.8, 13.2), 500.0, 80),
            Fund::new("HDFC Corporate Bond Fund", Debt, "Corporate Bond", Low, (7.5, 6.8, 7.2), 1000.0, 75),
            Fund::new("ICICI Prudential Short Term Fund", Debt, "Short Duration", Low, (6.8, 6.2, 6.5), 500.0, 70),
            Fund::new("Axis Banking & PSU Debt Fund", Debt, "Banking & PSU", Low, (7.2, 6.5, 6.8), 1000.0, 73),
            Fund::new("HDFC Balanced Advantage Fund", Hybrid, "Balanced Advantage", Medium, (12.4, 11.2, 10.5), 500.0, 78),
            Fund::new("ICICI Prudential Equity & Debt Fund", Hybrid, "Aggressive Hybrid", Medium, (14.2, 12.5, 11.8), 1000.0, 80),
        ])
    }
}

// ============================================================================
// ASSET MIX
// ============================================================================

/// Target split in percent; always sums to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMix {
    pub equity: i32,
    pub debt: i32,
    pub hybrid: i32,
}

impl AssetMix {
    pub fn for_profile(profile: &InvestorProfile) -> Self {
        let (mut equity, mut debt, hybrid) = match profile.risk_profile {
            RiskProfile::Conservative => (30, 60, 10),
            RiskProfile::Moderate => (50, 30, 20),
            RiskProfile::Aggressive => (70, 20, 10),
        };

        // Healthier finances tilt towards equity
        if profile.hlv_score > 700 {
            equity += 10;
            debt -= 10;
        } else if profile.hlv_score < 500 {
            equity -= 10;
            debt += 10;
        }

        if profile.corpus_score > 700 {
            equity += 5;
            debt -= 5;
        } else if profile.corpus_score < 500 {
            equity -= 5;
            debt += 5;
        }

        AssetMix { equity, debt, hybrid }
    }
}

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub fund: Fund,
    /// Monthly amount (₹)
    pub allocation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub mix: AssetMix,
    pub recommendations: Vec<Recommendation>,
}

impl Portfolio {
    pub fn total(&self) -> f64 {
        self.recommendations.iter().map(|r| r.allocation).sum()
    }

    /// Percent of the monthly investment going to one asset class
    pub fn share(&self, class: AssetClass) -> f64 {
        let total = self.total();
        if total == 0.0 {
            return 0.0;
        }

        let class_total: f64 = self
            .recommendations
            .iter()
            .filter(|r| r.fund.fund_type.asset_class() == class)
            .map(|r| r.allocation)
            .sum();
        class_total / total * 100.0
    }
}

fn pick<'a>(funds: &[&'a Fund], class: &str) -> Result<&'a Fund> {
    match funds.first() {
        Some(fund) => Ok(*fund),
        None => bail!("Fund catalog has no {} funds", class),
    }
}

pub fn recommend(profile: &InvestorProfile, catalog: &FundCatalog) -> Result<Portfolio> {
    InputChecker::new("Recommendations")
        .amount("monthly_investment", profile.monthly_investment)
        .finish()?;

    let mix = AssetMix::for_profile(profile);
    let total = profile.monthly_investment;

    let equity_allocation = (mix.equity as f64 / 100.0 * total).round();
    let equity_first = (equity_allocation / 2.0).floor();
    let equity_second = equity_allocation - equity_first;
    let debt_allocation = (mix.debt as f64 / 100.0 * total).round();
    let hybrid_allocation = total - equity_allocation - debt_allocation;

    let equity = catalog.ranked(AssetClass::Equity);
    let debt = catalog.ranked(AssetClass::Debt);
    let hybrid = catalog.ranked(AssetClass::Hybrid);

    let best_equity = pick(&equity, "equity")?;
    let best_debt = pick(&debt, "debt")?;
    let best_hybrid = pick(&hybrid, "hybrid")?;

    let mut recommendations = Vec::with_capacity(4);
    let mut push = |fund: &Fund, allocation: f64| {
        recommendations.push(Recommendation { fund: fund.clone(), allocation });
    };

    match profile.risk_profile {
        RiskProfile::Conservative => {
            let steady: Vec<&Fund> = equity
                .iter()
                .copied()
                .filter(|f| f.risk_level != RiskLevel::High)
                .collect();
            let first = steady.first().copied().unwrap_or(best_equity);

            if mix.equity > 20 {
                let second = steady.get(1).or(equity.get(1)).copied().unwrap_or(first);
                push(first, equity_first);
                push(second, equity_second);
            } else {
                // Single equity fund takes the whole equity share
                push(first, equity_allocation);
            }

            push(best_debt, debt_allocation);
            if mix.hybrid > 5 {
                push(best_hybrid, hybrid_allocation);
            }
        }
        RiskProfile::Moderate => {
            let second = equity.get(1).copied().unwrap_or(best_equity);
            push(best_equity, equity_first);
            push(second, equity_second);
            push(best_debt, debt_allocation);
            push(best_hybrid, hybrid_allocation);
        }
        RiskProfile::Aggressive => {
            let first = equity
                .iter()
                .copied()
                .find(|f| f.risk_level == RiskLevel::High)
                .unwrap_or(best_equity);
            let second = equity
                .iter()
                .copied()
                .find(|f| f.name != first.name)
                .unwrap_or(first);

            push(first, equity_first);
            push(second, equity_second);
            push(best_debt, debt_allocation);
            if hybrid_allocation > 0.0 {
                push(best_hybrid, hybrid_allocation);
            }
        }
    }

    tracing::debug!(
        risk = ?profile.risk_profile,
        equity = mix.equity,
        debt = mix.debt,
        funds = recommendations.len(),
        "built recommendations"
    );

    Ok(Portfolio { mix, recommendations })
}

// ============================================================================
// TESTS
// ============================================================================
