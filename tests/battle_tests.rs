use team_battle_sim::battle::{compute_damage, simulate, BattleResult, LogEntry, RoundOutcome};
use team_battle_sim::model::{Combatant, Team};
use team_battle_sim::types::EffectivenessTable;

fn make_mon(id: &str, type_id: &str, power: u32, life: u32) -> Combatant {
    Combatant {
        id: id.to_string(),
        name: id.to_string(),
        image: String::new(),
        power,
        life,
        type_id: type_id.to_string(),
    }
}

fn make_team(id: &str, members: Vec<Combatant>) -> Team {
    Team::new(id, format!("Team {id}"), members)
}

fn fire_water_table() -> EffectivenessTable {
    let mut table = EffectivenessTable::new();
    table.insert("Fire", "Water", 0.5);
    table.insert("Water", "Fire", 2.0);
    table
}

#[test]
fn water_beats_fire_in_one_exchange() {
    let team_a = make_team("red", vec![make_mon("Charizard", "Fire", 50, 50)]);
    let team_b = make_team("blue", vec![make_mon("Blastoise", "Water", 50, 50)]);
    let log = simulate(&team_a, &team_b, &fire_water_table());

    assert_eq!(log.entries().len(), 2);
    let round = log.rounds().next().expect("one round");
    assert_eq!(round.round_number, 1);
    assert_eq!(round.actions.len(), 1);
    let action = &round.actions[0];
    assert_eq!(action.a_life_before, 50.0);
    assert_eq!(action.b_life_before, 50.0);
    assert_eq!(action.a_life_after, -50.0);
    assert_eq!(action.b_life_after, 25.0);
    assert_eq!(
        action.a_description,
        "Charizard attacks Blastoise, dealing 25.0 damage."
    );
    assert_eq!(
        action.b_description,
        "Blastoise attacks Charizard, dealing 100.0 damage."
    );
    assert_eq!(round.outcome, "Blastoise defeated Charizard!");
    assert_eq!(round.result, RoundOutcome::ALoses);

    assert_eq!(log.result(), BattleResult::BWins);
    assert_eq!(log.winner(), Some("blue"));
    let last = log.final_outcome();
    assert_eq!(last.team_a_state[0].current_life, -50.0);
    assert_eq!(last.team_b_state[0].current_life, 25.0);
}

#[test]
fn mutual_knockout_of_last_members_is_a_tie() {
    let team_a = make_team("a", vec![make_mon("Left", "Normal", 30, 30)]);
    let team_b = make_team("b", vec![make_mon("Right", "Normal", 30, 30)]);
    let log = simulate(&team_a, &team_b, &EffectivenessTable::new());

    let round = log.rounds().next().expect("one round");
    assert_eq!(round.result, RoundOutcome::MutualKnockout);
    assert_eq!(round.outcome, "Left and Right knocked each other out!");
    assert_eq!(round.actions[0].a_life_after, 0.0);
    assert_eq!(round.actions[0].b_life_after, 0.0);
    assert_eq!(log.result(), BattleResult::Tie);
    assert_eq!(log.winner(), None);
}

#[test]
fn survivor_carries_damage_into_next_round() {
    let team_a = make_team(
        "a",
        vec![make_mon("Scout", "Normal", 20, 50), make_mon("Tank", "Normal", 100, 100)],
    );
    let team_b = make_team("b", vec![make_mon("Brawler", "Normal", 30, 45)]);
    let log = simulate(&team_a, &team_b, &EffectivenessTable::new());

    let rounds: Vec<_> = log.rounds().collect();
    assert_eq!(rounds.len(), 2);

    assert_eq!(rounds[0].actions.len(), 2);
    assert_eq!(rounds[0].result, RoundOutcome::ALoses);
    assert_eq!(rounds[0].outcome, "Brawler defeated Scout!");
    assert_eq!(rounds[0].team_a_state[0].current_life, -10.0);
    assert_eq!(rounds[0].team_a_state[1].current_life, 100.0);
    assert_eq!(rounds[0].team_b_state[0].current_life, 5.0);

    assert_eq!(rounds[1].round_number, 2);
    assert_eq!(rounds[1].fighter_a.combatant.id, "Tank");
    assert_eq!(rounds[1].fighter_b.current_life, 5.0);
    assert_eq!(rounds[1].result, RoundOutcome::BLoses);
    assert_eq!(rounds[1].outcome, "Tank defeated Brawler!");
    assert_eq!(rounds[1].team_a_state[1].current_life, 70.0);
    assert_eq!(rounds[1].team_b_state[0].current_life, -95.0);

    assert_eq!(log.winner(), Some("a"));
}

#[test]
fn knocked_out_fighter_still_lands_its_hit() {
    let team_a = make_team("a", vec![make_mon("Glass", "Normal", 100, 10)]);
    let team_b = make_team("b", vec![make_mon("Wall", "Normal", 10, 100)]);
    let log = simulate(&team_a, &team_b, &EffectivenessTable::new());

    let round = log.rounds().next().expect("one round");
    assert_eq!(round.actions.len(), 1);
    assert_eq!(round.actions[0].a_life_after, 0.0);
    assert_eq!(round.actions[0].b_life_after, 0.0);
    assert_eq!(round.result, RoundOutcome::MutualKnockout);
}

#[test]
fn missing_type_pair_deals_base_power() {
    let table = fire_water_table();
    let grass = make_mon("Leafy", "Grass", 40, 40);
    let fire = make_mon("Blaze", "Fire", 40, 40);
    assert_eq!(compute_damage(&grass, &fire, &table), 40.0);
    assert_eq!(compute_damage(&fire, &grass, &table), 40.0);
}

#[test]
fn fractional_damage_is_not_rounded() {
    let mut table = EffectivenessTable::new();
    table.insert("Fire", "Water", 0.33);
    let team_a = make_team("a", vec![make_mon("Ember", "Fire", 10, 100)]);
    let team_b = make_team("b", vec![make_mon("Drop", "Water", 100, 10)]);
    let log = simulate(&team_a, &team_b, &table);

    let action = &log.rounds().next().expect("one round").actions[0];
    assert!((action.b_life_after - (10.0 - 3.3)).abs() < 1e-9);
    assert_eq!(action.a_description, "Ember attacks Drop, dealing 3.3 damage.");
}

#[test]
fn empty_roster_loses_without_rounds() {
    let team_a = make_team("a", vec![]);
    let team_b = make_team("b", vec![make_mon("Solo", "Normal", 50, 50)]);
    let log = simulate(&team_a, &team_b, &EffectivenessTable::new());

    assert_eq!(log.entries().len(), 1);
    assert_eq!(log.result(), BattleResult::BWins);
    assert_eq!(log.winner(), Some("b"));
    assert_eq!(log.final_outcome().team_b_state[0].current_life, 50.0);

    let log = simulate(&team_b, &team_a, &EffectivenessTable::new());
    assert_eq!(log.winner(), Some("b"));
}

#[test]
fn two_empty_rosters_tie() {
    let log = simulate(
        &make_team("a", vec![]),
        &make_team("b", vec![]),
        &EffectivenessTable::new(),
    );
    assert_eq!(log.entries().len(), 1);
    assert_eq!(log.result(), BattleResult::Tie);
}

#[test]
fn log_serializes_with_kind_tags() {
    let team_a = make_team("red", vec![make_mon("Charizard", "Fire", 50, 50)]);
    let team_b = make_team("blue", vec![make_mon("Blastoise", "Water", 50, 50)]);
    let log = simulate(&team_a, &team_b, &fire_water_table());
    let json = serde_json::to_value(log.entries()).expect("serialize log");

    let round = &json[0];
    assert_eq!(round["kind"], "round");
    assert_eq!(round["roundNumber"], 1);
    assert_eq!(round["fighterA"]["name"], "Charizard");
    assert_eq!(round["fighterA"]["type"], "Fire");
    assert_eq!(round["fighterA"]["currentLife"], 50.0);
    assert_eq!(round["actions"][0]["aLifeAfter"], -50.0);
    assert_eq!(round["result"], "aLoses");
    assert_eq!(round["teamBState"][0]["id"], "Blastoise");
    assert!(round.get("isFinal").is_none());

    let last = &json[1];
    assert_eq!(last["kind"], "final");
    assert_eq!(last["isFinal"], true);
    assert_eq!(last["winner"], "blue");
}

#[test]
fn final_entry_is_the_only_final() {
    let team_a = make_team(
        "a",
        vec![make_mon("One", "Normal", 10, 100), make_mon("Two", "Normal", 10, 100)],
    );
    let team_b = make_team("b", vec![make_mon("Three", "Normal", 10, 100)]);
    let log = simulate(&team_a, &team_b, &EffectivenessTable::new());
    let finals = log.entries().iter().filter(|e| e.is_final()).count();
    assert_eq!(finals, 1);
    assert!(matches!(log.entries().last(), Some(LogEntry::Final(_))));
}

#[test]
fn final_entry_cannot_read_back_as_not_final() {
    let final_json = |is_final: bool| {
        serde_json::json!({
            "kind": "final",
            "isFinal": is_final,
            "winner": null,
            "teamAState": [{ "id": "x", "currentLife": -5.0 }],
            "teamBState": []
        })
    };

    let entry: LogEntry = serde_json::from_value(final_json(true)).expect("final entry");
    assert!(entry.is_final());
    let written = serde_json::to_value(&entry).expect("serialize entry");
    assert_eq!(written["isFinal"], true);

    assert!(serde_json::from_value::<LogEntry>(final_json(false)).is_err());
}
