use serde::{Deserialize, Serialize};
use std::fmt;

/// What a vent does with the air that passes through it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VentFunction {
    /// Stale air extracted from a room.
    #[default]
    ExtractionInterne,
    /// Fresh air blown into a room.
    InsufflationInterne,
    /// Air rejected to the outside.
    ExtractionExterne,
    /// Fresh air taken from the outside.
    AdmissionExterne,
}

impl VentFunction {
    pub const ALL: [VentFunction; 4] = [
        VentFunction::ExtractionInterne,
        VentFunction::InsufflationInterne,
        VentFunction::ExtractionExterne,
        VentFunction::AdmissionExterne,
    ];

    /// Fixed display colour for this function.
    pub fn color(self) -> &'static str {
        match self {
            VentFunction::ExtractionInterne => "#ff0000",
            VentFunction::InsufflationInterne => "#ff9900",
            VentFunction::ExtractionExterne => "#003366",
            VentFunction::AdmissionExterne => "#66ccff",
        }
    }

    /// Menu label shown when picking the vent type.
    pub fn label(self) -> &'static str {
        match self {
            VentFunction::ExtractionInterne => "En rouge, extraction de l'air vicié",
            VentFunction::InsufflationInterne => "En orange, insufflation de l'air neuf",
            VentFunction::ExtractionExterne => "En bleu foncé, extraction à l'extérieur",
            VentFunction::AdmissionExterne => "En bleu clair, admission d'air neuf extérieur",
        }
    }

    /// Air entering the building.
    pub fn is_inflow(self) -> bool {
        matches!(
            self,
            VentFunction::InsufflationInterne | VentFunction::AdmissionExterne
        )
    }

    /// Air leaving the building.
    pub fn is_outflow(self) -> bool {
        !self.is_inflow()
    }
}

impl fmt::Display for VentFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VentFunction::ExtractionInterne => "extraction_interne",
            VentFunction::InsufflationInterne => "insufflation_interne",
            VentFunction::ExtractionExterne => "extraction_externe",
            VentFunction::AdmissionExterne => "admission_externe",
        };
        f.write_str(s)
    }
}

/// A vent attribute that may be stored either as a number or as free text.
///
/// Values entered through the placement flow are always integers; imported
/// projects may carry strings such as `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Int(u64),
    Float(f64),
    Text(String),
}

impl Quantity {
    /// Numeric value, or `None` when the quantity cannot be read as a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Quantity::Int(v) => Some(*v as f64),
            Quantity::Float(v) if v.is_finite() => Some(*v),
            Quantity::Float(_) => None,
            Quantity::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Numeric value with anything unreadable counted as zero.
    pub fn as_flow(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Text(String::new())
    }
}

impl From<u32> for Quantity {
    fn from(v: u32) -> Self {
        Quantity::Int(u64::from(v))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Int(v) => write!(f, "{v}"),
            Quantity::Float(v) => write!(f, "{v}"),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}
