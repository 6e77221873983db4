use crate::types::ChartPreset;
use serde::{Deserialize, Serialize};

pub const MIN_STAT: u32 = 10;
pub const MAX_STAT: u32 = 100;

/// Immutable stat template for one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub power: u32,
    pub life: u32,
    #[serde(rename = "type")]
    pub type_id: String,
}

impl Combatant {
    pub fn initial_life(&self) -> f64 {
        self.life as f64
    }

    pub fn stats_in_range(&self) -> bool {
        (MIN_STAT..=MAX_STAT).contains(&self.power) && (MIN_STAT..=MAX_STAT).contains(&self.life)
    }
}

/// A team resolved for battle: members in fighting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub combatants: Vec<Combatant>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, combatants: Vec<Combatant>) -> Self {
        Team {
            id: id.into(),
            name: name.into(),
            combatants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTag {
    pub id: String,
    pub name: String,
}

/// Stored team row: member ids only, resolved by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub id: String,
    pub name: String,
    pub combatant_ids: Vec<String>,
}

/// Stored effectiveness entry: `type1` attacking `type2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weakness {
    pub type1: String,
    pub type2: String,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub combatant_ids: Vec<String>,
    pub total_power: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueFile {
    #[serde(default)]
    pub chart: ChartPreset,
    #[serde(default)]
    pub types: Vec<TypeTag>,
    #[serde(default)]
    pub combatants: Vec<Combatant>,
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
    #[serde(default)]
    pub weaknesses: Vec<Weakness>,
}
