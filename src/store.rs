use crate::error::{BattleError, Result};
use crate::model::{Combatant, LeagueFile, Team, TeamRecord, TeamSummary, TypeTag, MAX_STAT, MIN_STAT};
use crate::types::{ChartPreset, EffectivenessTable};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Members a team must have when it is registered in a league.
pub const TEAM_SIZE: usize = 6;

/// Source of rosters and type effectiveness for battles.
///
/// Implementations must be shareable across threads: the battle service loads
/// both rosters and the table concurrently.
pub trait RosterStore: Sync {
    /// Resolves `team_id` into its members, in fighting order.
    fn get_team(&self, team_id: &str) -> Result<Team>;

    fn get_effectiveness_table(&self) -> Result<EffectivenessTable>;
}

/// League data held in memory, usually read from a JSON league file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    types: Vec<TypeTag>,
    combatants: HashMap<String, Combatant>,
    teams: Vec<TeamRecord>,
    table: EffectivenessTable,
}

impl JsonStore {
    pub fn open(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BattleError::DataUnavailable(format!("failed to read {}: {e}", path.display()))
        })?;
        let league: LeagueFile = serde_json::from_str(&raw).map_err(|e| {
            BattleError::DataUnavailable(format!("failed to parse {}: {e}", path.display()))
        })?;
        Self::from_league(league)
    }

    pub fn from_league(league: LeagueFile) -> Result<Self> {
        let known_types: HashSet<&str> = league.types.iter().map(|t| t.id.as_str()).collect();

        let mut combatants = HashMap::new();
        for c in &league.combatants {
            validate_combatant(c)?;
            if !known_types.is_empty() && !known_types.contains(c.type_id.as_str()) {
                return Err(BattleError::InvalidRoster(format!(
                    "combatant {} has unknown type {}",
                    c.id, c.type_id
                )));
            }
            if combatants.insert(c.id.clone(), c.clone()).is_some() {
                log::warn!("combatant {} defined more than once, keeping the last entry", c.id);
            }
        }

        let mut table = preset_table(&league)?;
        for w in &league.weaknesses {
            if !known_types.is_empty() {
                for type_id in [&w.type1, &w.type2] {
                    if !known_types.contains(type_id.as_str()) {
                        return Err(BattleError::InvalidRoster(format!(
                            "effectiveness {} -> {} uses unknown type {}",
                            w.type1, w.type2, type_id
                        )));
                    }
                }
            }
            if !w.factor.is_finite() || w.factor <= 0.0 {
                return Err(BattleError::InvalidRoster(format!(
                    "effectiveness {} -> {} must be a positive number, got {}",
                    w.type1, w.type2, w.factor
                )));
            }
            if let Some(previous) = table.insert(w.type1.clone(), w.type2.clone(), w.factor) {
                log::warn!(
                    "effectiveness {} -> {} redefined ({} replaced by {})",
                    w.type1,
                    w.type2,
                    previous,
                    w.factor
                );
            }
        }

        Ok(JsonStore {
            types: league.types,
            combatants,
            teams: league.teams,
            table,
        })
    }

    /// Known types ordered by display name.
    pub fn list_types(&self) -> Vec<TypeTag> {
        let mut types = self.types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    /// Every combatant ordered by display name.
    pub fn list_combatants(&self) -> Vec<Combatant> {
        let mut combatants: Vec<Combatant> = self.combatants.values().cloned().collect();
        combatants.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        combatants
    }

    pub fn get_combatant(&self, combatant_id: &str) -> Result<Combatant> {
        self.combatants
            .get(combatant_id)
            .cloned()
            .ok_or_else(|| BattleError::combatant_not_found(combatant_id))
    }

    pub fn team_records(&self) -> &[TeamRecord] {
        &self.teams
    }

    pub fn team_ids(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.id.clone()).collect()
    }

    /// Every team with the summed power of its resolvable members.
    pub fn team_summaries(&self) -> Vec<TeamSummary> {
        self.teams
            .iter()
            .map(|record| TeamSummary {
                id: record.id.clone(),
                name: record.name.clone(),
                combatant_ids: record.combatant_ids.clone(),
                total_power: self.resolve_members(record).iter().map(|c| c.power).sum(),
            })
            .collect()
    }

    fn resolve_members(&self, record: &TeamRecord) -> Vec<Combatant> {
        record
            .combatant_ids
            .iter()
            .filter_map(|id| {
                let found = self.combatants.get(id).cloned();
                if found.is_none() {
                    log::warn!("team {} references unknown combatant {}", record.id, id);
                }
                found
            })
            .collect()
    }
}

impl RosterStore for JsonStore {
    fn get_team(&self, team_id: &str) -> Result<Team> {
        let record = self
            .teams
            .iter()
            .find(|t| t.id == team_id)
            .ok_or_else(|| BattleError::team_not_found(team_id))?;
        let combatants = self.resolve_members(record);
        if combatants.is_empty() {
            return Err(BattleError::InvalidRoster(format!(
                "team {team_id} has no combatants"
            )));
        }
        Ok(Team::new(&record.id, &record.name, combatants))
    }

    fn get_effectiveness_table(&self) -> Result<EffectivenessTable> {
        Ok(self.table.clone())
    }
}

// Chart presets name their types; leagues that list types key them by id.
fn preset_table(league: &LeagueFile) -> Result<EffectivenessTable> {
    if league.types.is_empty() {
        return Ok(EffectivenessTable::from_preset(league.chart, |name| {
            Some(name.to_string())
        }));
    }
    let table = EffectivenessTable::from_preset(league.chart, |name| {
        league
            .types
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.id.clone())
    });
    if league.chart != ChartPreset::None && table.is_empty() {
        return Err(BattleError::InvalidRoster(format!(
            "chart {:?} matches none of the league's type names",
            league.chart
        )));
    }
    Ok(table)
}

pub fn validate_combatant(c: &Combatant) -> Result<()> {
    if !c.stats_in_range() {
        return Err(BattleError::InvalidRoster(format!(
            "combatant {} needs power and life in {MIN_STAT}..={MAX_STAT} (power {}, life {})",
            c.id, c.power, c.life
        )));
    }
    Ok(())
}

pub fn validate_team_size(record: &TeamRecord) -> Result<()> {
    if record.combatant_ids.len() != TEAM_SIZE {
        return Err(BattleError::InvalidRoster(format!(
            "team {} must contain exactly {TEAM_SIZE} combatants, has {}",
            record.id,
            record.combatant_ids.len()
        )));
    }
    Ok(())
}
