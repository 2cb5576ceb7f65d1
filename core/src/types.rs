//! Shared vocabulary types used across the entire pipeline.
//!
//! Age bands and risk profiles are fixed vocabularies. Their `Ord`
//! follows the canonical display order, never label order.

use crate::error::{PipelineError, PipelineResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stable row identity: the 0-based position of the row in the source.
pub type UserId = usize;

// ── Age band ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "<25")]
    Under25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46+")]
    Over46,
}

impl AgeBand {
    /// Canonical order. Never reorder.
    pub const ALL: [AgeBand; 4] = [
        AgeBand::Under25,
        AgeBand::From26To35,
        AgeBand::From36To45,
        AgeBand::Over46,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Under25    => "<25",
            Self::From26To35 => "26-35",
            Self::From36To45 => "36-45",
            Self::Over46     => "46+",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeBand {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key: String = fold_label(raw)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let band = match key.as_str() {
            "<25" | "<=25" | "-25" | "25-" | "18-25" | "menosde25" | "under25" | "hasta25" => {
                Self::Under25
            }
            "26-35" | "26a35" | "26to35" => Self::From26To35,
            "36-45" | "36a45" | "36to45" => Self::From36To45,
            "46+" | "+46" | ">46" | ">=46" | "46omas" | "masde46" | "over46" | "46ormore" => {
                Self::Over46
            }
            _ => return Err(format!("'{raw}' is not an age band")),
        };
        Ok(band)
    }
}

// ── Risk profile ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// Canonical order. Never reorder.
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate     => "moderate",
            Self::Aggressive   => "aggressive",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match fold_label(raw).trim() {
            "conservative" | "conservador" | "conservadora" => Ok(Self::Conservative),
            "moderate" | "moderado" | "moderada"             => Ok(Self::Moderate),
            "aggressive" | "agresivo" | "agresiva"           => Ok(Self::Aggressive),
            _ => Err(format!("'{raw}' is not a risk profile")),
        }
    }
}

// ── Calendar period ──────────────────────────────────────────────────────────

/// Calendar month key. Orders chronologically, displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year:  i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// The following calendar month.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = String::deserialize(deserializer)?;
        let (year, month) = raw
            .split_once('-')
            .ok_or_else(|| D::Error::custom(format!("bad period '{raw}'")))?;
        let year: i32 = year.parse().map_err(D::Error::custom)?;
        let month: u32 = month.parse().map_err(D::Error::custom)?;
        if !(1..=12).contains(&month) {
            return Err(D::Error::custom(format!("bad month in '{raw}'")));
        }
        Ok(Self { year, month })
    }
}

// ── Date range ───────────────────────────────────────────────────────────────

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end:   NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> PipelineResult<Self> {
        if start > end {
            return Err(PipelineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate { self.start }
    pub fn end(&self)   -> NaiveDate { self.end }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end:   NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = PipelineError;

    fn try_from(raw: RawDateRange) -> PipelineResult<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

/// Lowercase and strip Spanish accents so `Moderado`, `MODERADO` and
/// `más de 46` compare equal to their plain spellings.
pub(crate) fn fold_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ'             => 'n',
            other           => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_band_variants_normalize() {
        assert_eq!("<25".parse::<AgeBand>(), Ok(AgeBand::Under25));
        assert_eq!("Menos de 25".parse::<AgeBand>(), Ok(AgeBand::Under25));
        assert_eq!(" 26 - 35 ".parse::<AgeBand>(), Ok(AgeBand::From26To35));
        assert_eq!("46 o más".parse::<AgeBand>(), Ok(AgeBand::Over46));
        assert_eq!("+46".parse::<AgeBand>(), Ok(AgeBand::Over46));
        assert!("99-120".parse::<AgeBand>().is_err());
    }

    #[test]
    fn age_band_order_is_canonical() {
        let mut shuffled = vec![AgeBand::Over46, AgeBand::Under25, AgeBand::From36To45];
        shuffled.sort();
        assert_eq!(shuffled, vec![AgeBand::Under25, AgeBand::From36To45, AgeBand::Over46]);
    }

    #[test]
    fn risk_profile_accepts_spanish_labels() {
        assert_eq!("Conservador".parse::<RiskProfile>(), Ok(RiskProfile::Conservative));
        assert_eq!("MODERADO".parse::<RiskProfile>(), Ok(RiskProfile::Moderate));
        assert_eq!("agresivo".parse::<RiskProfile>(), Ok(RiskProfile::Aggressive));
        assert_eq!("aggressive".parse::<RiskProfile>(), Ok(RiskProfile::Aggressive));
        assert!("yolo".parse::<RiskProfile>().is_err());
    }

    #[test]
    fn year_month_rolls_over_december() {
        let dec = YearMonth { year: 2023, month: 12 };
        assert_eq!(dec.next(), YearMonth { year: 2024, month: 1 });
        assert_eq!(dec.to_string(), "2023-12");
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(DateRange::new(a, b).is_err());
        let range = DateRange::new(b, a).unwrap();
        assert!(range.contains(a));
        assert!(range.contains(b));
    }
}
