//! Monthly amount series over active records.

use chrono::NaiveDate;
use invest_dash_core::{
    series::{fill_month_gaps, monthly_amount_by_instrument, monthly_amount_series},
    types::{AgeBand, RiskProfile, YearMonth},
    InvestmentRecord,
};

fn record(amount: Option<f64>, instrument: Option<&str>, y: i32, m: u32, d: u32) -> InvestmentRecord {
    InvestmentRecord {
        user_id: 0,
        age_band: AgeBand::From36To45,
        risk_profile: RiskProfile::Moderate,
        amount,
        instrument: instrument.map(String::from),
        objective: "Ahorro".into(),
        investment_reason: "Curiosidad".into(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
    }
}

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth { year, month }
}

fn dataset() -> Vec<InvestmentRecord> {
    vec![
        record(Some(300.0), Some("Bonos"),   2024, 3, 2),
        record(Some(100.0), Some("CEDEARs"), 2023, 12, 31),
        record(Some(200.0), Some("Bonos"),   2024, 3, 28),
        record(Some(0.0),   Some("Bonos"),   2024, 2, 10),
        record(Some(999.0), None,            2024, 2, 11),
        record(Some(50.0),  Some("CEDEARs"), 2024, 3, 15),
    ]
}

#[test]
fn observed_months_only_in_chronological_order() {
    let series = monthly_amount_series(&dataset());
    let periods: Vec<YearMonth> = series.iter().map(|r| r.period).collect();
    // February only has inactive rows, so it is not emitted.
    assert_eq!(periods, vec![ym(2023, 12), ym(2024, 3)]);
    assert_eq!(series[0].total_amount, 100.0);
    assert_eq!(series[1].total_amount, 550.0);
}

#[test]
fn series_total_matches_active_amount() {
    let records = dataset();
    let total: f64 = monthly_amount_series(&records).iter().map(|r| r.total_amount).sum();
    let active: f64 = records.iter().filter_map(|r| r.active_amount()).sum();
    assert_eq!(total, active);
}

#[test]
fn by_instrument_splits_each_month() {
    let rows = monthly_amount_by_instrument(&dataset());
    let keys: Vec<(String, &str, f64)> = rows
        .iter()
        .map(|r| (r.period.to_string(), r.instrument.as_str(), r.total_amount))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("2023-12".to_string(), "CEDEARs", 100.0),
            ("2024-03".to_string(), "Bonos", 500.0),
            ("2024-03".to_string(), "CEDEARs", 50.0),
        ]
    );
}

#[test]
fn gap_filling_inserts_zero_months() {
    let filled = fill_month_gaps(&monthly_amount_series(&dataset()));
    let periods: Vec<String> = filled.iter().map(|r| r.period.to_string()).collect();
    assert_eq!(periods, vec!["2023-12", "2024-01", "2024-02", "2024-03"]);
    assert_eq!(filled[1].total_amount, 0.0);
    assert_eq!(filled[2].total_amount, 0.0);
    assert_eq!(filled[3].total_amount, 550.0);
}

#[test]
fn empty_input_yields_empty_series() {
    assert!(monthly_amount_series(&[]).is_empty());
    assert!(monthly_amount_by_instrument(&[]).is_empty());
    assert!(fill_month_gaps(&[]).is_empty());
}

#[test]
fn period_serializes_as_year_month() {
    let series = monthly_amount_series(&dataset());
    let json = serde_json::to_string(&series[0]).unwrap();
    assert_eq!(json, r#"{"period":"2023-12","total_amount":100.0}"#);
}
