//! Active classification and filter laws.

use chrono::NaiveDate;
use invest_dash_core::{
    filter::{apply_filters, classify_active},
    types::{AgeBand, DateRange, RiskProfile},
    FilterSet, InvestmentRecord,
};
use std::collections::BTreeSet;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(
    user_id: usize,
    age_band: AgeBand,
    risk_profile: RiskProfile,
    amount: Option<f64>,
    instrument: Option<&str>,
    date: NaiveDate,
) -> InvestmentRecord {
    InvestmentRecord {
        user_id,
        age_band,
        risk_profile,
        amount,
        instrument: instrument.map(String::from),
        objective: "Ahorro".into(),
        investment_reason: "Curiosidad".into(),
        date,
    }
}

fn dataset() -> Vec<InvestmentRecord> {
    vec![
        record(0, AgeBand::Under25,    RiskProfile::Aggressive,   Some(500.0),  Some("CEDEARs"), date(2024, 1, 1)),
        record(1, AgeBand::From26To35, RiskProfile::Moderate,     Some(1000.0), Some("Fund A"),  date(2024, 1, 15)),
        record(2, AgeBand::From26To35, RiskProfile::Moderate,     Some(0.0),    None,            date(2024, 1, 20)),
        record(3, AgeBand::From36To45, RiskProfile::Conservative, Some(750.0),  Some("Bonos"),   date(2024, 2, 29)),
        record(4, AgeBand::Over46,     RiskProfile::Conservative, None,         Some("Bonos"),   date(2024, 3, 31)),
    ]
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn classify_active_keeps_all_and_splits_active() {
    let records = dataset();
    let partition = classify_active(&records);
    assert_eq!(partition.all.len(), 5);
    assert_eq!(partition.active.len(), 3);
    assert!(partition.active.iter().all(|r| r.is_active()));
    assert!(partition.active.len() <= partition.all.len());
}

#[test]
fn empty_selection_equals_no_selection() {
    let records = dataset();
    let none = FilterSet::new();
    let empty = FilterSet {
        age_bands: Some(BTreeSet::new()),
        risk_profiles: Some(BTreeSet::new()),
        date_range: None,
    };
    assert_eq!(apply_filters(&records, &empty), apply_filters(&records, &none));
    assert_eq!(apply_filters(&records, &none), records);
    assert!(empty.is_unrestricted());
}

#[test]
fn age_and_profile_filters_combine() {
    let records = dataset();
    let filters = FilterSet::new()
        .with_age_bands([AgeBand::From26To35, AgeBand::From36To45])
        .with_risk_profiles([RiskProfile::Moderate]);
    let out = apply_filters(&records, &filters);
    let ids: Vec<usize> = out.iter().map(|r| r.user_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let records = dataset();
    let range = DateRange::new(date(2024, 1, 15), date(2024, 2, 29)).unwrap();
    let out = apply_filters(&records, &FilterSet::new().with_date_range(range));
    let ids: Vec<usize> = out.iter().map(|r| r.user_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn filtering_is_idempotent() {
    let records = dataset();
    let filters = FilterSet::new()
        .with_risk_profiles([RiskProfile::Conservative, RiskProfile::Moderate])
        .with_date_range(DateRange::new(date(2024, 1, 10), date(2024, 12, 31)).unwrap());
    let once = apply_filters(&records, &filters);
    let twice = apply_filters(&once, &filters);
    assert_eq!(once, twice);
}

#[test]
fn filtering_never_mutates_input() {
    let records = dataset();
    let snapshot = records.clone();
    let _ = apply_filters(&records, &FilterSet::new().with_age_bands([AgeBand::Over46]));
    assert_eq!(records, snapshot);
}

#[test]
fn no_match_yields_empty_vec() {
    let records = dataset();
    let out = apply_filters(
        &records,
        &FilterSet::new()
            .with_age_bands([AgeBand::Under25])
            .with_risk_profiles([RiskProfile::Conservative]),
    );
    assert!(out.is_empty());
}

#[test]
fn filter_set_round_trips_through_json() {
    let filters = FilterSet::new()
        .with_age_bands([AgeBand::Over46, AgeBand::Under25])
        .with_date_range(DateRange::new(date(2024, 1, 1), date(2024, 6, 30)).unwrap());
    let json = serde_json::to_string(&filters).unwrap();
    assert!(json.contains("\"46+\""));
    let back: FilterSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, filters);
}

#[test]
fn inverted_range_in_json_is_rejected() {
    let json = r#"{"date_range":{"start":"2024-06-01","end":"2024-01-01"}}"#;
    assert!(serde_json::from_str::<FilterSet>(json).is_err());
}
