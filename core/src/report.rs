//! Report bundle handed to the presentation layer.

use crate::{
    distribution::{CategoryKey, Distribution},
    filter::FilterSet,
    kpi::KpiSummary,
    series::{InstrumentMonthlyAmount, MonthlyAmount},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedDistribution {
    pub key:          CategoryKey,
    pub distribution: Distribution,
}

/// Everything a view asked for, computed over one record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Rows in the set this section was computed from.
    pub record_count:          usize,
    pub kpis:                  Option<KpiSummary>,
    pub distributions:         Vec<NamedDistribution>,
    pub monthly:               Option<Vec<MonthlyAmount>>,
    pub monthly_by_instrument: Option<Vec<InstrumentMonthlyAmount>>,
}

impl ReportSection {
    pub fn distribution(&self, key: CategoryKey) -> Option<&Distribution> {
        self.distributions
            .iter()
            .find(|d| d.key == key)
            .map(|d| &d.distribution)
    }
}

/// `total` is computed over the whole dataset, `filtered` over the
/// current selection. Both are always present so the consumer decides
/// which one each chart shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub view:     String,
    pub title:    String,
    pub filters:  FilterSet,
    pub total:    ReportSection,
    pub filtered: ReportSection,
}

impl DashboardReport {
    /// The selection matched nothing: show "no data", not an error.
    pub fn is_empty(&self) -> bool {
        self.filtered.record_count == 0
    }

    pub fn to_json(&self) -> crate::error::PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
