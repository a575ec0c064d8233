use std::{io, path::PathBuf};

use clap::{CommandFactory, Parser};

use crate::{
    app::{self, GameMeta},
    catalog,
    constants::{BOARD_SETTINGS, DEFAULT_DELIMITER, DEFAULT_QUALIFIER},
    domain::GameSession,
    parser, storage,
};

#[derive(Parser, Debug)]
#[command(name = "quizboard")]
#[command(about = "Trivia board game for the terminal", long_about = None)]
pub enum Cli {
    #[command(about = "Load a question set and play it")]
    Play {
        #[arg(help = "Question set file (header line, then category,points,answer,question)")]
        file: Option<PathBuf>,

        #[arg(long, default_value = DEFAULT_DELIMITER, help = "Field delimiter string")]
        delimiter: String,

        #[arg(long, default_value = DEFAULT_QUALIFIER, help = "Field qualifier string")]
        qualifier: String,

        #[arg(long = "team", help = "Team name (repeatable, up to 9)")]
        teams: Vec<String>,

        #[arg(long, help = "Resume the saved game")]
        resume: bool,
    },

    #[command(about = "Validate a question set and print a summary")]
    Check {
        #[arg(help = "Question set file")]
        file: PathBuf,

        #[arg(long, default_value = DEFAULT_DELIMITER, help = "Field delimiter string")]
        delimiter: String,

        #[arg(long, default_value = DEFAULT_QUALIFIER, help = "Field qualifier string")]
        qualifier: String,
    },

    #[command(about = "Write the bundled example question set")]
    Sample {
        #[arg(help = "Output path")]
        out: PathBuf,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

fn load_catalog(
    path: &PathBuf,
    delimiter: &str,
    qualifier: &str,
) -> Result<catalog::QuestionCatalog, String> {
    let text = storage::read_question_set(path)?;
    let records = parser::parse_delimited(&text, delimiter, qualifier);
    catalog::build_catalog(&records).map_err(|e| {
        format!(
            "{}. Run 'quizboard sample demo.csv' to see the expected format.",
            e
        )
    })
}

pub fn play(
    file: Option<PathBuf>,
    delimiter: String,
    qualifier: String,
    mut teams: Vec<String>,
    resume: bool,
) -> Result<(), String> {
    let snapshot = if resume {
        let loaded = storage::load_snapshot(&storage::get_snapshot_path());
        if loaded.is_none() {
            return Err("No saved game to resume".to_string());
        }
        loaded
    } else {
        None
    };

    let (set_path, delimiter, qualifier) = match &snapshot {
        Some(snapshot) => (
            snapshot.set_path.clone(),
            snapshot.delimiter.clone(),
            snapshot.qualifier.clone(),
        ),
        None => (
            file.ok_or_else(|| "A question set file is required (or pass --resume)".to_string())?,
            delimiter,
            qualifier,
        ),
    };

    let catalog = load_catalog(&set_path, &delimiter, &qualifier)?;

    teams.truncate(BOARD_SETTINGS.max_players);
    if teams.is_empty() {
        teams = (1..=3).map(|i| format!("Team {}", i)).collect();
    }

    let mut session = GameSession::new(catalog, &teams);
    session.assign_grid_ids();
    if let Some(snapshot) = &snapshot {
        storage::apply_snapshot(&mut session, snapshot);
    }

    app::run_ui(
        session,
        GameMeta {
            set_path,
            delimiter,
            qualifier,
        },
    )
    .map_err(|e| e.to_string())
}

pub fn check(file: PathBuf, delimiter: String, qualifier: String) -> Result<(), String> {
    let catalog = load_catalog(&file, &delimiter, &qualifier)?;

    println!("Question set: {}", file.display());
    println!("{}", "-".repeat(40));
    for bucket in &catalog.categories {
        println!("{:24} {:>3} questions", bucket.name, bucket.questions.len());
    }
    if !catalog.final_round.is_empty() {
        println!("{:24} {:>3} questions", "(final round)", catalog.final_round.len());
    }
    println!("{}", "-".repeat(40));
    println!(
        "Grid: {} columns x {} rows",
        catalog.categories.len(),
        catalog.max_in_category
    );

    Ok(())
}

pub fn sample(out: PathBuf) -> Result<(), String> {
    storage::write_sample_set(&out)?;
    println!("Wrote example question set to {}", out.display());
    Ok(())
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;
    match shell {
        "bash" => {
            clap_complete::generate(
                Shell::Bash,
                &mut Cli::command(),
                "quizboard",
                &mut io::stdout(),
            );
        }
        "zsh" => {
            clap_complete::generate(
                Shell::Zsh,
                &mut Cli::command(),
                "quizboard",
                &mut io::stdout(),
            );
        }
        "fish" => {
            clap_complete::generate(
                Shell::Fish,
                &mut Cli::command(),
                "quizboard",
                &mut io::stdout(),
            );
        }
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    }
    Ok(())
}

pub fn run_cli() {
    let cli = Cli::parse();
    match cli {
        Cli::Play {
            file,
            delimiter,
            qualifier,
            teams,
            resume,
        } => {
            if let Err(e) = play(file, delimiter, qualifier, teams, resume) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Check {
            file,
            delimiter,
            qualifier,
        } => {
            if let Err(e) = check(file, delimiter, qualifier) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Sample { out } => {
            if let Err(e) = sample(out) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Completions { shell } => {
            if let Err(e) = print_completions(&shell) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
