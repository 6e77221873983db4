use clap::{Parser, Subcommand};
use std::path::PathBuf;
use team_battle_sim::arena::BattleRequest;
use team_battle_sim::{run, CliOptions, Command};

#[derive(Parser)]
#[command(name = "team-battle-sim")]
#[command(about = "Deterministic team-vs-team battle simulator")]
struct Cli {
    /// League file with types, combatants, teams and weaknesses
    #[arg(short, long, global = true, default_value = "league.json")]
    data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one battle and print its log as JSON
    Battle {
        #[arg(long = "team-a")]
        team_a: String,

        #[arg(long = "team-b")]
        team_b: String,

        /// Write the JSON response to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// List teams with their total power
    Teams,

    /// List known types
    Types,

    /// List combatants by name, or show one by id
    Combatants {
        #[arg(long)]
        id: Option<String>,
    },

    /// Battle every ordered pair of teams and write a CSV score matrix
    Matrix {
        /// Restrict to these teams (repeatable); defaults to every team
        #[arg(long = "team")]
        teams: Vec<String>,

        #[arg(short, long, default_value = "matrix.csv")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let command = match cli.command {
        Commands::Battle {
            team_a,
            team_b,
            output,
            pretty,
        } => Command::Battle {
            request: BattleRequest {
                team_a_id: team_a,
                team_b_id: team_b,
            },
            output_path: output,
            pretty,
        },
        Commands::Teams => Command::Teams,
        Commands::Types => Command::Types,
        Commands::Combatants { id } => Command::Combatants { id },
        Commands::Matrix { teams, output } => Command::Matrix {
            team_ids: teams,
            output_path: output,
        },
    };

    run(CliOptions {
        data_path: cli.data,
        command,
    })
}
