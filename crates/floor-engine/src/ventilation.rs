//! Building-wide ventilation balance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use plan_types::{Plenum, Vent, VentFunction};

use crate::types::Building;

/// A vent together with the floor it sits on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentEntry {
    pub floor_index: usize,
    pub floor_name: String,
    pub vent: Vent,
}

/// The plenum together with its floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlenumEntry {
    pub floor_index: usize,
    pub floor_name: String,
    pub plenum: Plenum,
}

/// Sign of the air balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pressure {
    /// More air blown in than extracted.
    Surpressure,
    /// More air extracted than blown in.
    Depression,
    Balanced,
}

impl Pressure {
    pub fn from_balance(balance: f64) -> Self {
        if balance > 0.0 {
            Pressure::Surpressure
        } else if balance < 0.0 {
            Pressure::Depression
        } else {
            Pressure::Balanced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pressure::Surpressure => "surpression",
            Pressure::Depression => "dépression",
            Pressure::Balanced => "équilibré",
        }
    }
}

/// Flow totals for every vent in the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentilationSummary {
    pub vents: Vec<VentEntry>,
    pub plenums: Vec<PlenumEntry>,
    /// Number of vents per function; all four functions are always present.
    pub counts: BTreeMap<VentFunction, usize>,
    /// m³/h entering: interior insufflation + exterior admission.
    pub total_inflow: f64,
    /// m³/h leaving: interior + exterior extraction.
    pub total_outflow: f64,
    /// `total_inflow - total_outflow`.
    pub balance: f64,
    pub pressure: Pressure,
}

impl VentilationSummary {
    pub fn count(&self, function: VentFunction) -> usize {
        self.counts.get(&function).copied().unwrap_or(0)
    }
}

/// Walk every floor and total the vent flows by function.
///
/// Flow rates that cannot be read as numbers count as zero.
pub fn ventilation_summary(building: &Building) -> VentilationSummary {
    let mut counts: BTreeMap<VentFunction, usize> =
        VentFunction::ALL.iter().map(|&f| (f, 0)).collect();
    let mut vents = Vec::new();
    let mut plenums = Vec::new();
    let mut total_inflow = 0.0;
    let mut total_outflow = 0.0;

    for (floor_index, floor) in building.floors.iter().enumerate() {
        for vent in &floor.vents {
            *counts.entry(vent.function).or_insert(0) += 1;
            let flow = vent.flow_rate.as_flow();
            if vent.function.is_inflow() {
                total_inflow += flow;
            } else {
                total_outflow += flow;
            }
            vents.push(VentEntry {
                floor_index,
                floor_name: floor.name.clone(),
                vent: vent.clone(),
            });
        }
        if let Some(plenum) = &floor.plenum {
            plenums.push(PlenumEntry {
                floor_index,
                floor_name: floor.name.clone(),
                plenum: plenum.clone(),
            });
        }
    }

    let balance = total_inflow - total_outflow;
    VentilationSummary {
        vents,
        plenums,
        counts,
        total_inflow,
        total_outflow,
        balance,
        pressure: Pressure::from_balance(balance),
    }
}
