use crate::model::{Combatant, Team};
use crate::types::EffectivenessTable;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
    A,
    B,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BattleResult {
    AWins,
    BWins,
    Tie,
}

/// How a single 1-v-1 round ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundOutcome {
    MutualKnockout,
    ALoses,
    BLoses,
}

impl RoundOutcome {
    pub fn advances(self, side: Side) -> bool {
        match (self, side) {
            (RoundOutcome::MutualKnockout, _) => true,
            (RoundOutcome::ALoses, Side::A) | (RoundOutcome::BLoses, Side::B) => true,
            _ => false,
        }
    }
}

/// A combatant's battle instance. Life is never clamped at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fighter {
    #[serde(flatten)]
    pub combatant: Combatant,
    pub current_life: f64,
}

impl Fighter {
    pub fn new(combatant: &Combatant) -> Self {
        Fighter {
            current_life: combatant.initial_life(),
            combatant: combatant.clone(),
        }
    }

    pub fn is_knocked_out(&self) -> bool {
        self.current_life <= 0.0
    }

    fn life_entry(&self) -> LifeEntry {
        LifeEntry {
            id: self.combatant.id.clone(),
            current_life: self.current_life,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeEntry {
    pub id: String,
    pub current_life: f64,
}

/// One simultaneous exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub a_description: String,
    pub b_description: String,
    pub a_life_before: f64,
    pub b_life_before: f64,
    pub a_life_after: f64,
    pub b_life_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_number: u32,
    /// Active fighters as they entered the round.
    pub fighter_a: Fighter,
    pub fighter_b: Fighter,
    pub actions: Vec<ActionRecord>,
    pub outcome: String,
    pub result: RoundOutcome,
    pub team_a_state: Vec<LifeEntry>,
    pub team_b_state: Vec<LifeEntry>,
}

/// `isFinal` marker on the final entry: always written as `true`, and only
/// `true` is accepted when reading a log back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FinalMarker;

impl Serialize for FinalMarker {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for FinalMarker {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if bool::deserialize(deserializer)? {
            Ok(FinalMarker)
        } else {
            Err(serde::de::Error::custom("isFinal must be true on a final entry"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalOutcome {
    #[serde(default)]
    is_final: FinalMarker,
    pub winner: Option<String>,
    pub team_a_state: Vec<LifeEntry>,
    pub team_b_state: Vec<LifeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LogEntry {
    Round(RoundRecord),
    Final(FinalOutcome),
}

impl LogEntry {
    pub fn is_final(&self) -> bool {
        matches!(self, LogEntry::Final(_))
    }
}

/// Ordered rounds terminated by exactly one final outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleLog {
    entries: Vec<LogEntry>,
    result: BattleResult,
}

impl BattleLog {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }

    pub fn rounds(&self) -> impl Iterator<Item = &RoundRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            LogEntry::Round(round) => Some(round),
            LogEntry::Final(_) => None,
        })
    }

    pub fn final_outcome(&self) -> &FinalOutcome {
        match self.entries.last() {
            Some(LogEntry::Final(outcome)) => outcome,
            _ => unreachable!("battle log always ends with a final outcome"),
        }
    }

    pub fn winner(&self) -> Option<&str> {
        self.final_outcome().winner.as_deref()
    }

    pub fn result(&self) -> BattleResult {
        self.result
    }
}

/// Per-run mutable state. Owned by a single `simulate` call.
struct Battle<'t> {
    team_a: Vec<Fighter>,
    team_b: Vec<Fighter>,
    active_a: usize,
    active_b: usize,
    round: u32,
    table: &'t EffectivenessTable,
}

impl<'t> Battle<'t> {
    fn new(team_a: &[Combatant], team_b: &[Combatant], table: &'t EffectivenessTable) -> Self {
        Battle {
            team_a: team_a.iter().map(Fighter::new).collect(),
            team_b: team_b.iter().map(Fighter::new).collect(),
            active_a: 0,
            active_b: 0,
            round: 1,
            table,
        }
    }

    fn team(&self, side: Side) -> &Vec<Fighter> {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    fn active_index(&self, side: Side) -> usize {
        match side {
            Side::A => self.active_a,
            Side::B => self.active_b,
        }
    }

    fn exhausted(&self, side: Side) -> bool {
        self.active_index(side) >= self.team(side).len()
    }

    fn in_progress(&self) -> bool {
        !self.exhausted(Side::A) && !self.exhausted(Side::B)
    }

    fn snapshot(&self, side: Side) -> Vec<LifeEntry> {
        self.team(side).iter().map(Fighter::life_entry).collect()
    }

    fn run_round(&mut self) -> RoundRecord {
        let (ia, ib) = (self.active_a, self.active_b);
        let fighter_a = self.team_a[ia].clone();
        let fighter_b = self.team_b[ib].clone();

        let mut actions = Vec::new();
        while !self.team_a[ia].is_knocked_out() && !self.team_b[ib].is_knocked_out() {
            actions.push(exchange(&mut self.team_a[ia], &mut self.team_b[ib], self.table));
        }

        let fa = &self.team_a[ia];
        let fb = &self.team_b[ib];
        let (result, outcome) = match (fa.is_knocked_out(), fb.is_knocked_out()) {
            (true, true) => (
                RoundOutcome::MutualKnockout,
                format!(
                    "{} and {} knocked each other out!",
                    fa.combatant.name, fb.combatant.name
                ),
            ),
            (true, false) => (
                RoundOutcome::ALoses,
                format!("{} defeated {}!", fb.combatant.name, fa.combatant.name),
            ),
            _ => (
                RoundOutcome::BLoses,
                format!("{} defeated {}!", fa.combatant.name, fb.combatant.name),
            ),
        };
        if result.advances(Side::A) {
            self.active_a += 1;
        }
        if result.advances(Side::B) {
            self.active_b += 1;
        }

        let record = RoundRecord {
            round_number: self.round,
            fighter_a,
            fighter_b,
            actions,
            outcome,
            result,
            team_a_state: self.snapshot(Side::A),
            team_b_state: self.snapshot(Side::B),
        };
        log::trace!(
            "round {}: {} ({} exchanges)",
            record.round_number,
            record.outcome,
            record.actions.len()
        );
        self.round += 1;
        record
    }

    fn result(&self) -> BattleResult {
        let a_done = self.active_a == self.team_a.len();
        let b_done = self.active_b == self.team_b.len();
        match (a_done, b_done) {
            (true, false) => BattleResult::BWins,
            (false, true) => BattleResult::AWins,
            _ => BattleResult::Tie,
        }
    }
}

/// Damage `attacker` deals to `defender` in one exchange.
pub fn compute_damage(attacker: &Combatant, defender: &Combatant, table: &EffectivenessTable) -> f64 {
    attacker.power as f64 * table.multiplier(&attacker.type_id, &defender.type_id)
}

fn exchange(a: &mut Fighter, b: &mut Fighter, table: &EffectivenessTable) -> ActionRecord {
    // Both damages come from the pre-exchange state, so a fighter dropping
    // to zero here still lands its own hit.
    let a_life_before = a.current_life;
    let b_life_before = b.current_life;
    let damage_to_b = compute_damage(&a.combatant, &b.combatant, table);
    let damage_to_a = compute_damage(&b.combatant, &a.combatant, table);

    a.current_life -= damage_to_a;
    b.current_life -= damage_to_b;

    ActionRecord {
        a_description: attack_text(&a.combatant, &b.combatant, damage_to_b),
        b_description: attack_text(&b.combatant, &a.combatant, damage_to_a),
        a_life_before,
        b_life_before,
        a_life_after: a.current_life,
        b_life_after: b.current_life,
    }
}

fn attack_text(attacker: &Combatant, defender: &Combatant, damage: f64) -> String {
    format!(
        "{} attacks {}, dealing {:.1} damage.",
        attacker.name, defender.name, damage
    )
}

/// Runs `team_a` against `team_b` until one roster is exhausted.
///
/// Members fight front to back. An empty roster loses immediately with zero
/// rounds; two empty rosters tie.
pub fn simulate(team_a: &Team, team_b: &Team, table: &EffectivenessTable) -> BattleLog {
    let mut battle = Battle::new(&team_a.combatants, &team_b.combatants, table);
    let mut entries = Vec::new();
    while battle.in_progress() {
        entries.push(LogEntry::Round(battle.run_round()));
    }

    let result = battle.result();
    let winner = match result {
        BattleResult::AWins => Some(team_a.id.clone()),
        BattleResult::BWins => Some(team_b.id.clone()),
        BattleResult::Tie => None,
    };
    entries.push(LogEntry::Final(FinalOutcome {
        is_final: FinalMarker,
        winner,
        team_a_state: battle.snapshot(Side::A),
        team_b_state: battle.snapshot(Side::B),
    }));
    log::debug!(
        "{} vs {}: {:?} after {} rounds",
        team_a.id,
        team_b.id,
        result,
        entries.len() - 1
    );
    BattleLog { entries, result }
}
