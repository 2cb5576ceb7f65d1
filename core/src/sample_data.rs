//! Seeded sample dataset generation.
//!
//! Output uses the source header dialect (`Edad`, `perfil`, `monto ARS`,
//! ...) and Spanish labels so it exercises the same normalization path
//! as real exports.

use crate::{
    error::PipelineResult,
    loader::DATE_FORMAT,
    record::InvestmentRecord,
    rng::SampleRng,
    schema::Column,
    types::{AgeBand, RiskProfile},
};
use chrono::{Duration, NaiveDate};
use std::io::Write;

pub const INSTRUMENTS: [&str; 6] = [
    "Fondo Money Market",
    "Fondo Renta Fija",
    "Fondo Renta Variable",
    "CEDEARs",
    "Bonos",
    "Plazo Fijo",
];

pub const OBJECTIVES: [&str; 5] = [
    "Ahorro",
    "Retiro",
    "Comprar vivienda",
    "Viajar",
    "Educación",
];

pub const REASONS: [&str; 5] = [
    "Proteger de la inflación",
    "Generar ingresos pasivos",
    "Hacer crecer el capital",
    "Recomendación",
    "Curiosidad",
];

/// Share of generated users with no investment.
pub const INACTIVE_SHARE: f64 = 0.20;

const AGE_WEIGHTS:     [f64; 4] = [0.30, 0.35, 0.20, 0.15];
const PROFILE_WEIGHTS: [f64; 3] = [0.35, 0.45, 0.20];

/// Generate `n` records spread over `months` months starting at `start`.
pub fn generate(n: usize, seed: u64, start: NaiveDate, months: u32) -> Vec<InvestmentRecord> {
    let mut rng = SampleRng::new(seed);
    let span_days = (months.max(1) as u64) * 30;

    (0..n)
        .map(|user_id| {
            let age_band = AgeBand::ALL[rng.weighted_index(&AGE_WEIGHTS)];
            let risk_profile = RiskProfile::ALL[rng.weighted_index(&PROFILE_WEIGHTS)];
            let date = start + Duration::days(rng.next_u64_below(span_days) as i64);
            let objective = pick(&mut rng, &OBJECTIVES).to_string();
            let investment_reason = pick(&mut rng, &REASONS).to_string();

            let (amount, instrument) = if rng.chance(INACTIVE_SHARE) {
                // Registered but never invested: zero, blank, or instrument without funds.
                match rng.next_u64_below(3) {
                    0 => (Some(0.0), None),
                    1 => (None, None),
                    _ => (Some(0.0), Some(pick(&mut rng, &INSTRUMENTS).to_string())),
                }
            } else {
                let raw = rng.pareto(5_000.0, 1.6).min(5_000_000.0);
                let amount = (raw * 100.0).round() / 100.0;
                (Some(amount), Some(pick(&mut rng, &INSTRUMENTS).to_string()))
            };

            InvestmentRecord {
                user_id,
                age_band,
                risk_profile,
                amount,
                instrument,
                objective,
                investment_reason,
                date,
            }
        })
        .collect()
}

fn pick<'a>(rng: &mut SampleRng, options: &[&'a str]) -> &'a str {
    options[rng.next_u64_below(options.len() as u64) as usize]
}

/// Write records as CSV that `loader::load_reader` reads back unchanged.
pub fn write_csv<W: Write>(records: &[InvestmentRecord], writer: W) -> PipelineResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(Column::REQUIRED.iter().map(|c| c.source_header()))?;

    for r in records {
        let amount = r.amount.map(|a| format!("{a:.2}")).unwrap_or_default();
        let date = r.date.format(DATE_FORMAT).to_string();
        wtr.write_record([
            r.age_band.label(),
            spanish_profile_label(r.risk_profile),
            amount.as_str(),
            r.instrument.as_deref().unwrap_or(""),
            r.objective.as_str(),
            r.investment_reason.as_str(),
            date.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn spanish_profile_label(profile: RiskProfile) -> &'static str {
    match profile {
        RiskProfile::Conservative => "Conservador",
        RiskProfile::Moderate     => "Moderado",
        RiskProfile::Aggressive   => "Agresivo",
    }
}
