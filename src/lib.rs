pub mod arena;
pub mod battle;
pub mod error;
pub mod matrix;
pub mod model;
pub mod store;
pub mod types;

use crate::arena::{run_battle, BattleRequest};
use crate::matrix::compute_matrix;
use crate::store::{validate_team_size, JsonStore};
use anyhow::Context;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum Command {
    Battle {
        request: BattleRequest,
        output_path: Option<PathBuf>,
        pretty: bool,
    },
    Teams,
    Types,
    Combatants {
        id: Option<String>,
    },
    Matrix {
        team_ids: Vec<String>,
        output_path: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub data_path: PathBuf,
    pub command: Command,
}

pub fn load_league(path: &Path) -> anyhow::Result<JsonStore> {
    JsonStore::open(path).with_context(|| format!("Failed to load league from {}", path.display()))
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let store = load_league(&opts.data_path)?;
    match opts.command {
        Command::Battle {
            request,
            output_path,
            pretty,
        } => {
            let response = run_battle(&store, &request).with_context(|| {
                format!("Battle {} vs {} failed", request.team_a_id, request.team_b_id)
            })?;
            let json = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            match output_path {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!(
                        "Wrote battle log ({} entries) to {}",
                        response.battle_log.len(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }
        Command::Teams => {
            for record in store.team_records() {
                if let Err(e) = validate_team_size(record) {
                    log::warn!("{e}");
                }
            }
            for summary in store.team_summaries() {
                println!(
                    "{}\t{}\t{} members\ttotal power {}",
                    summary.id,
                    summary.name,
                    summary.combatant_ids.len(),
                    summary.total_power
                );
            }
        }
        Command::Types => {
            for t in store.list_types() {
                println!("{}\t{}", t.id, t.name);
            }
        }
        Command::Combatants { id } => match id {
            Some(id) => {
                let combatant = store.get_combatant(&id)?;
                println!("{}", serde_json::to_string_pretty(&combatant)?);
            }
            None => {
                for c in store.list_combatants() {
                    println!(
                        "{}\t{}\t{}\tpower {}\tlife {}",
                        c.id, c.name, c.type_id, c.power, c.life
                    );
                }
            }
        },
        Command::Matrix {
            team_ids,
            output_path,
        } => {
            let team_ids = if team_ids.is_empty() {
                store.team_ids()
            } else {
                team_ids
            };
            if team_ids.is_empty() {
                anyhow::bail!("League has no teams to compare");
            }
            let matrix = compute_matrix(&store, &team_ids)?;
            matrix::write_csv(&matrix, &output_path)?;
            println!(
                "Wrote {}x{} matrix to {}",
                matrix.scores.len(),
                matrix.scores.first().map(|r| r.len()).unwrap_or(0),
                output_path.display()
            );
        }
    }
    Ok(())
}
