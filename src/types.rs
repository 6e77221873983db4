use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const NEUTRAL: f64 = 1.0;

// Fire / Water / Grass triangle, keyed by attacking type.
static CLASSIC_CHART: phf::Map<&'static str, &'static [(&'static str, f64)]> = phf_map! {
    "Fire" => &[("Grass", 2.0), ("Water", 0.5), ("Fire", 0.5)],
    "Water" => &[("Fire", 2.0), ("Grass", 0.5), ("Water", 0.5)],
    "Grass" => &[("Water", 2.0), ("Fire", 0.5), ("Grass", 0.5)],
};

/// Preset a league file can start its table from before its own entries apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPreset {
    #[default]
    None,
    Classic,
}

/// Directional `(attacker, defender)` damage multipliers.
///
/// Lookups that miss return [`NEUTRAL`]; `(Fire, Water)` and `(Water, Fire)`
/// are independent entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectivenessTable {
    // attacker -> defender -> factor, so lookups borrow both keys
    entries: HashMap<String, HashMap<String, f64>>,
}

impl EffectivenessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic chart keyed by type name.
    pub fn classic() -> Self {
        Self::from_preset(ChartPreset::Classic, |name| Some(name.to_string()))
    }

    /// Builds `preset` with every chart type name mapped through `type_id`.
    ///
    /// Pairs where either name does not resolve are left out.
    pub fn from_preset<F>(preset: ChartPreset, mut type_id: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut table = Self::new();
        if preset == ChartPreset::None {
            return table;
        }
        for (attacker, row) in CLASSIC_CHART.entries() {
            let Some(attacker_id) = type_id(*attacker) else {
                continue;
            };
            for (defender, factor) in row.iter() {
                if let Some(defender_id) = type_id(*defender) {
                    table.insert(attacker_id.clone(), defender_id, *factor);
                }
            }
        }
        table
    }

    /// Returns the previous factor when the pair was already present.
    pub fn insert(
        &mut self,
        attacker: impl Into<String>,
        defender: impl Into<String>,
        factor: f64,
    ) -> Option<f64> {
        self.entries
            .entry(attacker.into())
            .or_default()
            .insert(defender.into(), factor)
    }

    pub fn multiplier(&self, attacker: &str, defender: &str) -> f64 {
        self.entries
            .get(attacker)
            .and_then(|row| row.get(defender))
            .copied()
            .unwrap_or(NEUTRAL)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
