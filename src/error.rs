use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BattleError {
    #[error("{kind} {id} not found")]
    InputNotFound { kind: &'static str, id: String },
    #[error("invalid roster: {0}")]
    InvalidRoster(String),
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
}

impl BattleError {
    pub fn team_not_found(id: &str) -> Self {
        BattleError::InputNotFound {
            kind: "team",
            id: id.to_string(),
        }
    }

    pub fn combatant_not_found(id: &str) -> Self {
        BattleError::InputNotFound {
            kind: "combatant",
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;
