//! Monthly amount time series over active records.
//!
//! Only observed months are emitted. `fill_month_gaps` synthesizes
//! zero-valued months between the first and last observation when a
//! view asks for it.

use crate::{record::InvestmentRecord, types::YearMonth};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub period:       YearMonth,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMonthlyAmount {
    pub period:       YearMonth,
    pub instrument:   String,
    pub total_amount: f64,
}

pub fn monthly_amount_series(records: &[InvestmentRecord]) -> Vec<MonthlyAmount> {
    let mut by_month: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for record in records {
        if let Some(amount) = record.active_amount() {
            *by_month.entry(YearMonth::of(record.date)).or_insert(0.0) += amount;
        }
    }
    by_month
        .into_iter()
        .map(|(period, total_amount)| MonthlyAmount { period, total_amount })
        .collect()
}

/// Ordered by period, then instrument name.
pub fn monthly_amount_by_instrument(records: &[InvestmentRecord]) -> Vec<InstrumentMonthlyAmount> {
    let mut by_key: BTreeMap<(YearMonth, &str), f64> = BTreeMap::new();
    for record in records {
        let (Some(amount), Some(instrument)) = (record.active_amount(), record.instrument.as_deref())
        else {
            continue;
        };
        *by_key
            .entry((YearMonth::of(record.date), instrument.trim()))
            .or_insert(0.0) += amount;
    }
    by_key
        .into_iter()
        .map(|((period, instrument), total_amount)| InstrumentMonthlyAmount {
            period,
            instrument: instrument.to_string(),
            total_amount,
        })
        .collect()
}

/// Insert a zero row for every month missing between the first and last
/// period of an ordered series.
pub fn fill_month_gaps(series: &[MonthlyAmount]) -> Vec<MonthlyAmount> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Vec::new();
    };

    let mut filled = Vec::with_capacity(series.len());
    let mut observed = series.iter().peekable();
    let mut period = first.period;
    while period <= last.period {
        match observed.peek() {
            Some(row) if row.period == period => {
                filled.push((*row).clone());
                observed.next();
            }
            _ => filled.push(MonthlyAmount { period, total_amount: 0.0 }),
        }
        period = period.next();
    }
    filled
}
