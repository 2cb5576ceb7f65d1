//! The aggregation pipeline, the only stateful piece of the crate.
//!
//! RULES:
//!   - The dataset is loaded once and is read-only afterwards.
//!   - Every query recomputes from the loaded records. Nothing is cached.
//!   - Filter/compute never fail: empty selections yield empty sections.
//!
//! Each report carries two sections computed the same way:
//!   total    : the whole dataset
//!   filtered : the caller's FilterSet applied first

use crate::{
    distribution::group_distribution,
    error::PipelineResult,
    filter::{self, ActivePartition, FilterSet},
    kpi::{compute_kpis, KpiSummary},
    loader,
    record::InvestmentRecord,
    report::{DashboardReport, NamedDistribution, ReportSection},
    series::{fill_month_gaps, monthly_amount_by_instrument, monthly_amount_series},
    view::{SeriesKind, ViewDescriptor},
};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct AggregationPipeline {
    records: Vec<InvestmentRecord>,
}

impl AggregationPipeline {
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        Ok(Self::from_records(loader::load_path(path)?))
    }

    pub fn from_reader<R: Read>(reader: R) -> PipelineResult<Self> {
        Ok(Self::from_records(loader::load_reader(reader)?))
    }

    pub fn from_records(records: Vec<InvestmentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[InvestmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn classify_active(&self) -> ActivePartition<'_> {
        filter::classify_active(&self.records)
    }

    pub fn apply_filters(&self, filters: &FilterSet) -> Vec<InvestmentRecord> {
        filter::apply_filters(&self.records, filters)
    }

    /// KPIs over the selection. Inactive rows still count as users.
    pub fn kpis(&self, filters: &FilterSet) -> KpiSummary {
        let selected = self.apply_filters(filters);
        let partition = filter::classify_active(&selected);
        compute_kpis(partition.all, &partition.active)
    }

    pub fn run(&self, view: &ViewDescriptor, filters: &FilterSet) -> DashboardReport {
        let total = build_section(&self.records, view);
        let selected = self.apply_filters(filters);
        let filtered = build_section(&selected, view);

        if selected.is_empty() {
            log::info!("view={} selection matched no records", view.name);
        }
        log::debug!(
            "view={} total={} filtered={}",
            view.name,
            total.record_count,
            filtered.record_count
        );

        DashboardReport {
            view:    view.name.clone(),
            title:   view.title.clone(),
            filters: filters.clone(),
            total,
            filtered,
        }
    }
}

/// Distributions are computed over active rows only, matching the
/// headline charts; KPIs see every row.
fn build_section(records: &[InvestmentRecord], view: &ViewDescriptor) -> ReportSection {
    let partition = filter::classify_active(records);

    let kpis = view
        .kpis
        .then(|| compute_kpis(partition.all, &partition.active));

    let distributions = view
        .distributions
        .iter()
        .map(|&key| NamedDistribution {
            key,
            distribution: group_distribution(&partition.active, key),
        })
        .collect();

    let monthly = view.wants_series(SeriesKind::Monthly).then(|| {
        let series = monthly_amount_series(&partition.active);
        if view.fill_gaps { fill_month_gaps(&series) } else { series }
    });

    let monthly_by_instrument = view
        .wants_series(SeriesKind::MonthlyByInstrument)
        .then(|| monthly_amount_by_instrument(&partition.active));

    ReportSection {
        record_count: records.len(),
        kpis,
        distributions,
        monthly,
        monthly_by_instrument,
    }
}
