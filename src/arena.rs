//! Request-level battle service: resolves team ids through a [`RosterStore`],
//! runs the simulator and shapes the response.

use crate::battle::{simulate, LogEntry};
use crate::error::Result;
use crate::model::{Combatant, Team};
use crate::store::RosterStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    pub team_a_id: String,
    pub team_b_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamView {
    pub name: String,
    pub combatants: Vec<Combatant>,
}

impl From<Team> for TeamView {
    fn from(team: Team) -> Self {
        TeamView {
            name: team.name,
            combatants: team.combatants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResponse {
    pub battle_log: Vec<LogEntry>,
    pub team_a: TeamView,
    pub team_b: TeamView,
    pub winner: Option<String>,
}

/// Loads both rosters and the effectiveness table, then simulates.
///
/// The three loads run concurrently and any failure aborts before a single
/// round is fought.
pub fn run_battle<S: RosterStore + ?Sized>(store: &S, request: &BattleRequest) -> Result<BattleResponse> {
    let ((team_a, team_b), table) = rayon::join(
        || {
            rayon::join(
                || store.get_team(&request.team_a_id),
                || store.get_team(&request.team_b_id),
            )
        },
        || store.get_effectiveness_table(),
    );
    let (team_a, team_b, table) = (team_a?, team_b?, table?);

    let log = simulate(&team_a, &team_b, &table);
    let winner = log.winner().map(str::to_string);
    log::info!(
        "battle {} vs {} finished, winner: {}",
        team_a.id,
        team_b.id,
        winner.as_deref().unwrap_or("none (tie)")
    );
    Ok(BattleResponse {
        battle_log: log.into_entries(),
        team_a: team_a.into(),
        team_b: team_b.into(),
        winner,
    })
}
