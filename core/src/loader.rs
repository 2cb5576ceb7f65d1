//! CSV ingest.
//!
//! RULE: the load is all-or-nothing. The first malformed row aborts
//! with a line-numbered error; there is no row-skipping fallback.

use crate::{
    error::{PipelineError, PipelineResult},
    record::InvestmentRecord,
    schema::{Column, HeaderMap},
    types::{AgeBand, RiskProfile},
};
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The single accepted date format: day/month/year.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn load_path(path: impl AsRef<Path>) -> PipelineResult<Vec<InvestmentRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        PipelineError::Other(anyhow::anyhow!("Cannot read {}: {e}", path.display()))
    })?;
    let records = load_reader(file)?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_reader<R: Read>(reader: R) -> PipelineResult<Vec<InvestmentRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let header_map = HeaderMap::resolve(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        // Physical line where the record starts; quoted fields may span lines.
        let line = row.position().map(|p| p.line() as usize).unwrap_or(idx + 2);
        records.push(parse_row(&row, &header_map, idx, line)?);
    }
    log::debug!("Parsed {} rows", records.len());
    Ok(records)
}

fn parse_row(
    row: &StringRecord,
    header_map: &HeaderMap,
    user_id: usize,
    line: usize,
) -> PipelineResult<InvestmentRecord> {
    let age_raw = header_map.cell(row, Column::AgeBand);
    let age_band: AgeBand = age_raw
        .parse()
        .map_err(|_| unknown(line, Column::AgeBand, age_raw))?;

    let profile_raw = header_map.cell(row, Column::RiskProfile);
    let risk_profile: RiskProfile = profile_raw
        .parse()
        .map_err(|_| unknown(line, Column::RiskProfile, profile_raw))?;

    let amount = parse_amount(header_map.cell(row, Column::Amount), line)?;
    let date = parse_date(header_map.cell(row, Column::Date), line)?;

    let instrument = Some(header_map.cell(row, Column::Instrument))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(InvestmentRecord {
        user_id,
        age_band,
        risk_profile,
        amount,
        instrument,
        objective:         header_map.cell(row, Column::Objective).to_string(),
        investment_reason: header_map.cell(row, Column::Reason).to_string(),
        date,
    })
}

/// Empty cell means "no amount". Anything else must be a finite number.
pub(crate) fn parse_amount(raw: &str, line: usize) -> PipelineResult<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Err(parse_error(line, Column::Amount, raw, "amount is not finite")),
        Err(e) => Err(parse_error(line, Column::Amount, raw, &e.to_string())),
    }
}

/// Strict `dd/mm/yyyy`. chrono's `%Y` takes any digit count, so the
/// year field is checked to be exactly four digits first.
pub(crate) fn parse_date(raw: &str, line: usize) -> PipelineResult<NaiveDate> {
    let year = raw.rsplit('/').next().unwrap_or("");
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(parse_error(line, Column::Date, raw, "expected dd/mm/yyyy (four-digit year)"));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| parse_error(line, Column::Date, raw, &format!("expected dd/mm/yyyy ({e})")))
}

fn parse_error(line: usize, column: Column, value: &str, reason: &str) -> PipelineError {
    PipelineError::Parse {
        line,
        column: column.key().to_string(),
        value:  value.to_string(),
        reason: reason.to_string(),
    }
}

fn unknown(line: usize, column: Column, value: &str) -> PipelineError {
    PipelineError::UnknownCategory {
        line,
        column: column.key().to_string(),
        value:  value.to_string(),
    }
}
