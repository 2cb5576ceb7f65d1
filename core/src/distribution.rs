//! Category counts for bar charts.
//!
//! Canonical keys (age band, risk profile) always emit every bucket in
//! vocabulary order, zero counts included. Free-form keys are ordered by
//! descending count, ties broken by first appearance.

use crate::{
    record::InvestmentRecord,
    types::{AgeBand, RiskProfile},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Bucket label for records whose instrument is absent.
pub const NO_INSTRUMENT: &str = "(none)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    Instrument,
    Objective,
    Reason,
    RiskProfile,
    AgeBand,
}

impl CategoryKey {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Instrument  => "instrument",
            Self::Objective   => "objective",
            Self::Reason      => "reason",
            Self::RiskProfile => "risk_profile",
            Self::AgeBand     => "age_band",
        }
    }

    /// The fixed vocabulary for canonical keys, `None` for free-form ones.
    pub fn vocabulary(&self) -> Option<Vec<&'static str>> {
        match self {
            Self::AgeBand     => Some(AgeBand::ALL.iter().map(|b| b.label()).collect()),
            Self::RiskProfile => Some(RiskProfile::ALL.iter().map(|p| p.label()).collect()),
            _ => None,
        }
    }

    fn label_of<'r>(&self, record: &'r InvestmentRecord) -> &'r str {
        match self {
            Self::Instrument  => record
                .instrument
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(NO_INSTRUMENT),
            Self::Objective   => &record.objective,
            Self::Reason      => &record.investment_reason,
            Self::RiskProfile => record.risk_profile.label(),
            Self::AgeBand     => record.age_band.label(),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "instrument" | "instrumento"                   => Ok(Self::Instrument),
            "objective" | "objetivo"                       => Ok(Self::Objective),
            "reason" | "investment_reason" | "razon"       => Ok(Self::Reason),
            "risk_profile" | "profile" | "perfil"          => Ok(Self::RiskProfile),
            "age_band" | "age" | "edad"                    => Ok(Self::AgeBand),
            other => Err(format!("unknown category key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count:    usize,
}

/// Ordered category → count mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution(pub Vec<CategoryCount>);

impl Distribution {
    pub fn total(&self) -> usize {
        self.0.iter().map(|c| c.count).sum()
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.0.iter().find(|c| c.category == category).map(|c| c.count)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.category.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn group_distribution(records: &[InvestmentRecord], key: CategoryKey) -> Distribution {
    match key.vocabulary() {
        Some(vocabulary) => canonical_counts(records, key, &vocabulary),
        None             => ranked_counts(records, key),
    }
}

fn canonical_counts(
    records: &[InvestmentRecord],
    key: CategoryKey,
    vocabulary: &[&'static str],
) -> Distribution {
    let mut counts = vec![0usize; vocabulary.len()];
    for record in records {
        let label = key.label_of(record);
        if let Some(slot) = vocabulary.iter().position(|v| *v == label) {
            counts[slot] += 1;
        }
    }
    Distribution(
        vocabulary
            .iter()
            .zip(counts)
            .map(|(label, count)| CategoryCount { category: (*label).to_string(), count })
            .collect(),
    )
}

fn ranked_counts(records: &[InvestmentRecord], key: CategoryKey) -> Distribution {
    // (count, first-seen index) per label
    let mut seen: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        seen.entry(key.label_of(record)).or_insert((0, idx)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = seen
        .into_iter()
        .map(|(label, (count, first))| (label, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    Distribution(
        ranked
            .into_iter()
            .map(|(label, count, _)| CategoryCount { category: label.to_string(), count })
            .collect(),
    )
}
