//! CLI frontend for the vitae dice-pool engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "vt",
    about = "vitae: dice pools for V20 characters",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log pipeline steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice-pool expression, e.g. "Dexterity+Melee[Swords]+WP"
    Roll {
        /// Pool expression
        expression: String,

        /// Character file (JSON)
        #[arg(short, long)]
        character: PathBuf,

        /// Difficulty, 2 to 10 (default: 6)
        #[arg(short, long)]
        difficulty: Option<u8>,

        /// RNG seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,

        /// Note printed with the result
        #[arg(long)]
        comment: Option<String>,

        /// Add the net successes to the character's blood pool
        #[arg(long)]
        feed: bool,
    },

    /// Show the pool an expression resolves to, without rolling
    Pool {
        /// Pool expression
        expression: String,

        /// Character file (JSON)
        #[arg(short, long)]
        character: PathBuf,
    },

    /// Manage the character's roll macros
    Macro {
        #[command(subcommand)]
        action: MacroAction,
    },

    /// Show a character summary
    Show {
        /// Character file (JSON)
        #[arg(short, long)]
        character: PathBuf,
    },
}

#[derive(Subcommand)]
enum MacroAction {
    /// Create a macro from NAME=EXPRESSION
    Add {
        /// Definition, e.g. "Atk=Dexterity+Melee"
        definition: String,

        /// Character file (JSON)
        #[arg(short, long)]
        character: PathBuf,
    },

    /// Replace a macro's expression with NAME=EXPRESSION
    Update {
        /// Definition, e.g. "Atk=Dexterity+Brawl"
        definition: String,

        /// Character file (JSON)
        #[arg(short, long)]
        character: PathBuf,
    },

    /// Delete a macro
    Delete {
        /// Macro name
        name: String,

        /// Character file (JSON)
        #[arg(short, long)]
        character: PathBuf,
    },

    /// List macros with their current pool sizes
    List {
        /// Character file (JSON)
        #[arg(short, long)]
        character: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            expression,
            character,
            difficulty,
            seed,
            comment,
            feed,
        } => commands::roll::run(
            &character,
            &expression,
            &commands::roll::RollOptions {
                difficulty,
                seed,
                comment,
                feed,
            },
        ),
        Commands::Pool {
            expression,
            character,
        } => commands::pool::run(&character, &expression),
        Commands::Macro { action } => match action {
            MacroAction::Add {
                definition,
                character,
            } => commands::macros::add(&character, &definition),
            MacroAction::Update {
                definition,
                character,
            } => commands::macros::update(&character, &definition),
            MacroAction::Delete { name, character } => commands::macros::delete(&character, &name),
            MacroAction::List { character } => commands::macros::list(&character),
        },
        Commands::Show { character } => commands::show::run(&character),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
