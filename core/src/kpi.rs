use crate::record::InvestmentRecord;
use serde::{Deserialize, Serialize};

/// The four headline scalars.
///
/// `average_amount_active` is `None` when there are no active users;
/// callers must render that as "no data" rather than dividing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_users:           usize,
    pub active_users:          usize,
    pub total_amount_active:   f64,
    pub average_amount_active: Option<f64>,
}

impl KpiSummary {
    pub fn has_active_users(&self) -> bool {
        self.active_users > 0
    }
}

pub fn compute_kpis(all: &[InvestmentRecord], active: &[InvestmentRecord]) -> KpiSummary {
    let active_users = active.len();
    let total_amount_active: f64 = active.iter().filter_map(|r| r.amount).sum();
    let average_amount_active = if active_users > 0 {
        Some(total_amount_active / active_users as f64)
    } else {
        None
    };

    KpiSummary {
        total_users: all.len(),
        active_users,
        total_amount_active,
        average_amount_active,
    }
}

/// `$1,234,567.89` style, two decimals, comma thousands.
///
/// Goes through the float formatter rather than an integer cent count,
/// so magnitudes past `u64` still render their real digits.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac}")
}

pub fn format_average(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "n/a".to_string())
}
