//! Header canonicalization at the load boundary.
//!
//! Source files disagree on header spelling (`Edad` vs `edad`,
//! `Fecha` vs `fecha`, `Razon Inversion` vs `razon_inversion`).
//! Every variant is mapped to one `Column` before any row is read.

use crate::{
    error::{PipelineError, PipelineResult},
    types::fold_label,
};
use csv::StringRecord;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    AgeBand,
    RiskProfile,
    Amount,
    Instrument,
    Objective,
    Reason,
    Date,
}

impl Column {
    pub const REQUIRED: [Column; 7] = [
        Column::AgeBand,
        Column::RiskProfile,
        Column::Amount,
        Column::Instrument,
        Column::Objective,
        Column::Reason,
        Column::Date,
    ];

    /// Canonical key, used in error messages.
    pub fn key(&self) -> &'static str {
        match self {
            Self::AgeBand     => "age_band",
            Self::RiskProfile => "risk_profile",
            Self::Amount      => "amount",
            Self::Instrument  => "instrument",
            Self::Objective   => "objective",
            Self::Reason      => "investment_reason",
            Self::Date        => "date",
        }
    }

    /// The header this column is written under by `sample_data::write_csv`.
    pub fn source_header(&self) -> &'static str {
        match self {
            Self::AgeBand     => "Edad",
            Self::RiskProfile => "perfil",
            Self::Amount      => "monto ARS",
            Self::Instrument  => "Instrumento",
            Self::Objective   => "objetivo",
            Self::Reason      => "razon_inversion",
            Self::Date        => "fecha",
        }
    }
}

/// Map a raw header to its canonical column, if it is one we know.
pub fn normalize_header(raw: &str) -> Option<Column> {
    let key: String = fold_label(raw.trim_start_matches('\u{feff}'))
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let column = match key.as_str() {
        "edad" | "age" | "age_band" | "rango_edad" | "rango_etario"   => Column::AgeBand,
        "perfil" | "perfil_inversion" | "perfil_de_inversion" | "perfil_riesgo"
        | "risk_profile" | "profile"                                   => Column::RiskProfile,
        "monto_ars" | "monto" | "amount" | "amount_ars"                => Column::Amount,
        "instrumento" | "instrument"                                   => Column::Instrument,
        "objetivo" | "objetivo_inversion" | "objective"                => Column::Objective,
        "razon_inversion" | "razon" | "razon_de_inversion"
        | "investment_reason" | "reason"                               => Column::Reason,
        "fecha" | "fecha_inversion" | "date"                           => Column::Date,
        _ => return None,
    };
    Some(column)
}

/// Resolved position of every required column within a header row.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    positions: HashMap<Column, usize>,
}

impl HeaderMap {
    pub fn resolve(headers: &StringRecord) -> PipelineResult<Self> {
        let mut positions = HashMap::new();
        for (idx, raw) in headers.iter().enumerate() {
            match normalize_header(raw) {
                Some(column) => {
                    if positions.contains_key(&column) {
                        log::warn!("Duplicate {} header '{raw}' ignored", column.key());
                    } else {
                        positions.insert(column, idx);
                    }
                }
                None => log::debug!("Ignoring unrecognized column '{raw}'"),
            }
        }

        for column in Column::REQUIRED {
            if !positions.contains_key(&column) {
                return Err(PipelineError::Schema { column: column.key().to_string() });
            }
        }
        Ok(Self { positions })
    }

    pub fn position(&self, column: Column) -> usize {
        self.positions[&column]
    }

    /// The trimmed cell for `column`, or "" when the row is short.
    pub fn cell<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        record.get(self.position(column)).map(str::trim).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_variants_map_to_one_column() {
        assert_eq!(normalize_header("Fecha"), Some(Column::Date));
        assert_eq!(normalize_header("fecha"), Some(Column::Date));
        assert_eq!(normalize_header("Edad"), Some(Column::AgeBand));
        assert_eq!(normalize_header("monto ARS"), Some(Column::Amount));
        assert_eq!(normalize_header("Razon Inversion"), Some(Column::Reason));
        assert_eq!(normalize_header("razon_inversion"), Some(Column::Reason));
        assert_eq!(normalize_header("Razón de inversión"), Some(Column::Reason));
        assert_eq!(normalize_header("\u{feff}Objetivo"), Some(Column::Objective));
        assert_eq!(normalize_header("comentarios"), None);
    }

    #[test]
    fn missing_column_is_schema_error() {
        let headers = StringRecord::from(vec!["Edad", "perfil", "monto ARS", "Instrumento"]);
        let err = HeaderMap::resolve(&headers).unwrap_err();
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("objective"));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let headers = StringRecord::from(vec![
            "id", "Edad", "perfil", "monto ARS", "Instrumento",
            "objetivo", "razon_inversion", "fecha", "notas",
        ]);
        let map = HeaderMap::resolve(&headers).unwrap();
        assert_eq!(map.position(Column::AgeBand), 1);
        assert_eq!(map.position(Column::Date), 7);
    }
}
