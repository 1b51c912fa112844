use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use draft_oracle::analysis::coach::{coach, replay};
use draft_oracle::analysis::pick::Pick;
use draft_oracle::analysis::policy::Backup;
use draft_oracle::config::Config;
use draft_oracle::data::loader::{load_records, random_store, DEFAULT_STD_DEV};
use draft_oracle::display::output::{
    display_coach_report, display_error, display_final_odds, display_info, display_rosters,
    display_success, display_suggestions,
};
use draft_oracle::draft::{DraftSession, Format, Hero};
use draft_oracle::logging::init_logging;
use draft_oracle::{Engine, ProbabilityStore};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "draft-oracle")]
#[command(about = "Pick and ban suggestions for a two-team hero draft", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Branching policy: decaying, greedy, exhaustive or fixed:WIDTH:DEPTH
    #[arg(long, global = true)]
    policy: Option<String>,

    /// How child values propagate: max or acting-side
    #[arg(long, global = true)]
    backup: Option<Backup>,

    /// Cap on search nodes per suggestion call
    #[arg(long, global = true)]
    node_limit: Option<usize>,

    /// Wall-clock budget per suggestion call, in milliseconds
    #[arg(long, global = true)]
    deadline_ms: Option<u64>,

    /// Search root subtrees in parallel
    #[arg(long, global = true)]
    parallel: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Draft format: single-ban or double-ban
    #[arg(short, long)]
    format: Option<String>,

    /// Match-record JSON file (default: ~/.draft_oracle/matrix.json)
    #[arg(long)]
    matrix: Option<PathBuf>,

    /// Use a simulated probability store instead of match records
    #[arg(long, conflicts_with = "matrix")]
    random: bool,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an interactive draft with suggestions at every phase
    Play {
        #[command(flatten)]
        store: StoreArgs,

        /// Number of suggestions to show per phase
        #[arg(short, long, default_value = "10")]
        top: usize,
    },
    /// Replay a partial draft and rank every remaining option 1-10
    Coach {
        #[command(flatten)]
        store: StoreArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Heroes selected so far, in phase order (`none` skips a ban)
        heroes: Vec<String>,
    },
    /// Replay a draft and print blue's odds
    Odds {
        #[command(flatten)]
        store: StoreArgs,

        /// Heroes selected so far, in phase order (`none` skips a ban)
        heroes: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env().context("reading configuration")?;
    if let Some(policy) = cli.policy {
        config.policy = policy;
    }
    if let Some(backup) = cli.backup {
        config.backup = backup;
    }
    if cli.node_limit.is_some() {
        config.node_limit = cli.node_limit;
    }
    if cli.deadline_ms.is_some() {
        config.deadline_ms = cli.deadline_ms;
    }
    let search = config.search_config(cli.parallel)?;

    match cli.command {
        Command::Play { store, top } => {
            let (engine, format) = prepare(&store, &mut config, search)?;
            play(&engine, Format::from_name(&format)?, top)
        }
        Command::Coach {
            store,
            json,
            heroes,
        } => {
            let (engine, format) = prepare(&store, &mut config, search)?;
            let report = coach(&engine, &format, &heroes)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report.to_map())?);
            } else {
                display_coach_report(&report);
            }
            Ok(())
        }
        Command::Odds { store, heroes } => {
            let (engine, format) = prepare(&store, &mut config, search)?;
            let session = replay(&engine, &format, &heroes)?;
            let odds = engine.current_odds_for_blue(&session)?;
            if session.is_full() {
                display_final_odds(&session, odds);
            } else {
                display_rosters(&session);
                display_info(&format!(
                    "Blue odds after {}'s best option: {:.1}%",
                    session
                        .acting_side()
                        .map(|s| if s.is_blue() { "blue" } else { "red" })
                        .unwrap_or("blue"),
                    odds * 100.0
                ));
            }
            Ok(())
        }
    }
}

fn prepare(
    args: &StoreArgs,
    config: &mut Config,
    search: draft_oracle::SearchConfig,
) -> Result<(Engine, String)> {
    if let Some(format) = &args.format {
        config.format = format.clone();
    }
    if let Some(path) = &args.matrix {
        config.matrix_path = path.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let store = if args.random {
        display_info(&format!("Using simulated match data (seed {})", config.seed));
        random_store(&Hero::ALL, config.seed, DEFAULT_STD_DEV)?
    } else {
        load_store(config)?
    };
    Ok((Engine::new(Arc::new(store), search), config.format.clone()))
}

fn load_store(config: &Config) -> Result<ProbabilityStore> {
    let store = load_records(&config.matrix_path).with_context(|| {
        format!(
            "loading match records from {} (use --random for simulated data)",
            config.matrix_path.display()
        )
    })?;
    display_success(&format!(
        "Loaded {} heroes from {}",
        store.heroes().len(),
        config.matrix_path.display()
    ));
    Ok(store)
}

fn ranked_with_progress(engine: &Engine, session: &DraftSession) -> Result<Vec<Pick>> {
    let pb = ProgressBar::new(session.current_pool().len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}") {
        pb.set_style(style);
    }
    pb.set_message("Searching");
    let picks = engine.suggestions_with_progress(session, |done| pb.set_position(done as u64))?;
    pb.finish_and_clear();
    Ok(picks)
}

fn play(engine: &Engine, format: Format, top: usize) -> Result<()> {
    let mut session = engine.new_session(format)?;
    display_info(&format!(
        "Draft format {} with {} heroes. Enter a hero, best, worst, none or quit.",
        session.format().name(),
        session.catalog().len()
    ));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !session.is_full() {
        let picks = ranked_with_progress(engine, &session)?;
        display_suggestions(&session, &picks, top);

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;

        let choice = match parse_choice(line.trim(), &picks) {
            Ok(Choice::Quit) => return Ok(()),
            Ok(Choice::Select(hero)) => hero,
            Err(e) => {
                display_error(&e.to_string());
                continue;
            }
        };
        match session.pick_or_ban(choice) {
            Ok(()) => {
                let label = choice.map_or("nobody".to_string(), |h| h.to_string());
                display_success(&format!("Selected {}", label));
                display_rosters(&session);
            }
            Err(e) => display_error(&e.to_string()),
        }
    }

    let odds = engine.current_odds_for_blue(&session)?;
    display_final_odds(&session, odds);
    Ok(())
}

enum Choice {
    Select(Option<Hero>),
    Quit,
}

fn parse_choice(input: &str, picks: &[Pick]) -> Result<Choice> {
    match input.to_ascii_lowercase().as_str() {
        "quit" | "q" | "exit" => Ok(Choice::Quit),
        "best" => picks
            .first()
            .map(|p| Choice::Select(Some(p.hero())))
            .ok_or_else(|| anyhow!("no suggestions to choose from")),
        "worst" => picks
            .last()
            .map(|p| Choice::Select(Some(p.hero())))
            .ok_or_else(|| anyhow!("no suggestions to choose from")),
        "none" | "skip" => Ok(Choice::Select(None)),
        _ => Ok(Choice::Select(Some(Hero::from_name(input)?))),
    }
}
