//! View descriptors: what each dashboard screen needs.
//!
//! A view is data, not code: the pipeline reads the descriptor and
//! computes only the sections it names.

use crate::distribution::CategoryKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Monthly,
    MonthlyByInstrument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub name:  String,
    pub title: String,
    #[serde(default = "default_true")]
    pub kpis: bool,
    #[serde(default)]
    pub distributions: Vec<CategoryKey>,
    #[serde(default)]
    pub series: Vec<SeriesKind>,
    /// Emit zero-valued months between observed ones in the monthly series.
    #[serde(default)]
    pub fill_gaps: bool,
}

fn default_true() -> bool { true }

impl ViewDescriptor {
    pub fn wants_series(&self, kind: SeriesKind) -> bool {
        self.series.contains(&kind)
    }

    /// KPIs plus risk profile and instrument breakdowns.
    pub fn overview() -> Self {
        Self {
            name:          "overview".into(),
            title:         "Dashboard Financiero".into(),
            kpis:          true,
            distributions: vec![CategoryKey::RiskProfile, CategoryKey::Instrument],
            series:        vec![],
            fill_gaps:     false,
        }
    }

    pub fn demographics() -> Self {
        Self {
            name:          "demographics".into(),
            title:         "Distribución por Edad y Perfil".into(),
            kpis:          true,
            distributions: vec![CategoryKey::AgeBand, CategoryKey::RiskProfile],
            series:        vec![],
            fill_gaps:     false,
        }
    }

    pub fn motivations() -> Self {
        Self {
            name:          "motivations".into(),
            title:         "Objetivos y Razones de Inversión".into(),
            kpis:          false,
            distributions: vec![
                CategoryKey::Objective,
                CategoryKey::Reason,
                CategoryKey::Instrument,
            ],
            series:        vec![],
            fill_gaps:     false,
        }
    }

    pub fn timeline() -> Self {
        Self {
            name:          "timeline".into(),
            title:         "Evolución Mensual".into(),
            kpis:          true,
            distributions: vec![],
            series:        vec![SeriesKind::Monthly, SeriesKind::MonthlyByInstrument],
            fill_gaps:     false,
        }
    }

    pub fn full() -> Self {
        Self {
            name:          "full".into(),
            title:         "Reporte Completo".into(),
            kpis:          true,
            distributions: vec![
                CategoryKey::AgeBand,
                CategoryKey::RiskProfile,
                CategoryKey::Instrument,
                CategoryKey::Objective,
                CategoryKey::Reason,
            ],
            series:        vec![SeriesKind::Monthly, SeriesKind::MonthlyByInstrument],
            fill_gaps:     false,
        }
    }
}
