//! Prediction result types.
//!
//! Represents the per-disease risk report returned by the prediction service.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Risk category attached to a disease probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Moderate risk, monitoring recommended
    Moderate,
    /// High risk, consultation recommended
    High,
}

impl RiskLevel {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "No significant indicators",
            Self::Moderate => "Follow-up recommended",
            Self::High => "Consultation with a clinician advised",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Moderate => write!(f, "Moderate"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Risk estimate for a single disease.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseRisk {
    /// Disease name as reported by the service (e.g. "Diabetes")
    pub name: String,

    /// Probability score, 0-100
    pub probability: f64,

    pub risk_level: RiskLevel,
}

/// Per-disease risk report.
///
/// Entries keep the order in which the service listed them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionResult {
    entries: Vec<DiseaseRisk>,
}

impl PredictionResult {
    #[must_use]
    pub fn from_entries(entries: Vec<DiseaseRisk>) -> Self {
        let mut result = Self::default();
        for entry in entries {
            result.insert(entry);
        }
        result
    }

    /// Iterate entries in service order.
    pub fn iter(&self) -> impl Iterator<Item = &DiseaseRisk> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DiseaseRisk> {
        self.entries.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A repeated name keeps its first position and takes the latest value.
    fn insert(&mut self, entry: DiseaseRisk) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}

#[derive(Deserialize)]
struct RiskRecord {
    probability: f64,
    risk_level: RiskLevel,
}

struct PredictionResultVisitor;

impl<'de> Visitor<'de> for PredictionResultVisitor {
    type Value = PredictionResult;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of disease name to {probability, risk_level}")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut result = PredictionResult {
            entries: Vec::with_capacity(map.size_hint().unwrap_or(0)),
        };
        while let Some((name, record)) = map.next_entry::<String, RiskRecord>()? {
            result.insert(DiseaseRisk {
                name,
                probability: record.probability,
                risk_level: record.risk_level,
            });
        }
        Ok(result)
    }
}

impl<'de> Deserialize<'de> for PredictionResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PredictionResultVisitor)
    }
}
