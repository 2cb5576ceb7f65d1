//! Active classification and filter predicates.
//!
//! RULE: every stage returns a new Vec. The loaded dataset is never
//! mutated or reassigned.

use crate::{
    record::InvestmentRecord,
    types::{AgeBand, DateRange, RiskProfile},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The full set alongside its active subset.
#[derive(Debug, Clone)]
pub struct ActivePartition<'a> {
    pub all:    &'a [InvestmentRecord],
    pub active: Vec<InvestmentRecord>,
}

pub fn classify_active(records: &[InvestmentRecord]) -> ActivePartition<'_> {
    let active: Vec<InvestmentRecord> = records
        .iter()
        .filter(|r| r.is_active())
        .cloned()
        .collect();
    log::debug!("classify_active: {} of {} records active", active.len(), records.len());
    ActivePartition { all: records, active }
}

/// Selection supplied by the presentation layer.
///
/// `None` and an empty set are equivalent: no restriction on that
/// dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub age_bands:     Option<BTreeSet<AgeBand>>,
    #[serde(default)]
    pub risk_profiles: Option<BTreeSet<RiskProfile>>,
    #[serde(default)]
    pub date_range:    Option<DateRange>,
}

impl FilterSet {
    pub fn new() -> Self { Self::default() }

    pub fn with_age_bands(mut self, bands: impl IntoIterator<Item = AgeBand>) -> Self {
        self.age_bands = Some(bands.into_iter().collect());
        self
    }

    pub fn with_risk_profiles(mut self, profiles: impl IntoIterator<Item = RiskProfile>) -> Self {
        self.risk_profiles = Some(profiles.into_iter().collect());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// True when no dimension restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        restricts(&self.age_bands).is_none()
            && restricts(&self.risk_profiles).is_none()
            && self.date_range.is_none()
    }

    pub fn matches(&self, record: &InvestmentRecord) -> bool {
        if let Some(bands) = restricts(&self.age_bands) {
            if !bands.contains(&record.age_band) {
                return false;
            }
        }
        if let Some(profiles) = restricts(&self.risk_profiles) {
            if !profiles.contains(&record.risk_profile) {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            if !range.contains(record.date) {
                return false;
            }
        }
        true
    }
}

/// The set only if it actually restricts.
fn restricts<T>(selection: &Option<BTreeSet<T>>) -> Option<&BTreeSet<T>> {
    selection.as_ref().filter(|s| !s.is_empty())
}

pub fn apply_filters(records: &[InvestmentRecord], filters: &FilterSet) -> Vec<InvestmentRecord> {
    if filters.is_unrestricted() {
        return records.to_vec();
    }
    let out: Vec<InvestmentRecord> = records
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect();
    log::debug!("apply_filters: {} -> {} records", records.len(), out.len());
    out
}
