use crate::battle::{simulate, BattleResult};
use crate::error::Result;
use crate::model::Team;
use crate::store::RosterStore;
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeMatrix {
    pub team_ids: Vec<String>,
    /// `scores[row][col]`: 1.0 when the row team beats the column team as
    /// team A, 0.5 for a tie, 0.0 for a loss.
    pub scores: Vec<Vec<f64>>,
}

fn score(result: BattleResult) -> f64 {
    match result {
        BattleResult::AWins => 1.0,
        BattleResult::Tie => 0.5,
        BattleResult::BWins => 0.0,
    }
}

/// Battles every ordered pair of `team_ids` (self-pairings included).
pub fn compute_matrix<S: RosterStore + ?Sized>(store: &S, team_ids: &[String]) -> Result<OutcomeMatrix> {
    let teams: Vec<Team> = team_ids
        .iter()
        .map(|id| store.get_team(id))
        .collect::<Result<_>>()?;
    let table = store.get_effectiveness_table()?;

    let tasks: Vec<(usize, usize)> = (0..teams.len())
        .flat_map(|a| (0..teams.len()).map(move |b| (a, b)))
        .collect();
    let cells: Vec<CellResult> = tasks
        .par_iter()
        .map(|&(a_idx, b_idx)| {
            let log = simulate(&teams[a_idx], &teams[b_idx], &table);
            CellResult {
                a_idx,
                b_idx,
                score: score(log.result()),
            }
        })
        .collect();

    let mut scores = vec![vec![0.0; teams.len()]; teams.len()];
    for cell in cells {
        scores[cell.a_idx][cell.b_idx] = cell.score;
    }
    Ok(OutcomeMatrix {
        team_ids: team_ids.to_vec(),
        scores,
    })
}

pub fn write_csv(matrix: &OutcomeMatrix, path: &std::path::Path) -> anyhow::Result<()> {
    std::fs::write(path, to_csv(matrix))?;
    Ok(())
}

pub fn to_csv(matrix: &OutcomeMatrix) -> String {
    let mut out = String::from("team");
    for id in &matrix.team_ids {
        out.push(',');
        out.push_str(id);
    }
    for (row_idx, row) in matrix.scores.iter().enumerate() {
        out.push('\n');
        out.push_str(&matrix.team_ids[row_idx]);
        for value in row {
            out.push_str(&format!(",{value:.4}"));
        }
    }
    out
}

struct CellResult {
    a_idx: usize,
    b_idx: usize,
    score: f64,
}
