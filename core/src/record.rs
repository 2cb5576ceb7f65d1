use crate::types::{AgeBand, RiskProfile, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRecord {
    pub user_id:           UserId,
    pub age_band:          AgeBand,
    pub risk_profile:      RiskProfile,
    pub amount:            Option<f64>,
    pub instrument:        Option<String>,
    pub objective:         String,
    pub investment_reason: String,
    pub date:              NaiveDate,
}

impl InvestmentRecord {
    /// Active iff the amount is strictly positive AND an instrument is named.
    pub fn is_active(&self) -> bool {
        let funded = self.amount.is_some_and(|a| a > 0.0);
        let placed = self
            .instrument
            .as_deref()
            .is_some_and(|i| !i.trim().is_empty());
        funded && placed
    }

    /// The amount this record contributes to financial aggregates.
    pub fn active_amount(&self) -> Option<f64> {
        if self.is_active() { self.amount } else { None }
    }
}
