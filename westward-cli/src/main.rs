mod auto;
mod console;
mod policy;
mod reports;
mod seeds;
mod setup;

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdin, stdout};
use std::path::PathBuf;
use std::time::Instant;
use westward_game::journey::event::format_money;

use auto::{AutoPlan, aggregate_runs};
use console::ConsolePlayer;
use policy::Strategy;
use seeds::{DEFAULT_SEED, resolve_seed_inputs, split_csv};
use setup::{DEFAULT_COMPANIONS, DEFAULT_LEADER, PartySetup, load_config};

#[derive(Debug, Parser)]
#[command(name = "westward", version)]
#[command(about = "Guide a wagon party along the westward trail, by hand or by strategy")]
struct Cli {
    /// Path to a JSON trail configuration (defaults to the built-in route)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging unless RUST_LOG says otherwise)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play interactively on this terminal
    Play(PlayArgs),
    /// Run automated strategies across seeds and report the outcomes
    Auto(AutoArgs),
    /// List the automated strategies and exit
    ListStrategies {
        /// Optional path to write the listing instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, ClapArgs)]
struct PartyArgs {
    /// Wagon leader's name
    #[arg(long)]
    leader: Option<String>,

    /// Companions (comma-separated, at most four are taken)
    #[arg(long, default_value = DEFAULT_COMPANIONS)]
    companions: String,

    /// Profession: banker, carpenter, or farmer
    #[arg(long, default_value = "carpenter")]
    profession: String,

    /// Departure month, March through July
    #[arg(long, default_value = "march")]
    month: String,
}

#[derive(Debug, ClapArgs)]
struct PlayArgs {
    #[command(flatten)]
    party: PartyArgs,

    /// Seed for this journey (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, ClapArgs)]
struct AutoArgs {
    #[command(flatten)]
    party: PartyArgs,

    /// Strategies to run (comma-separated, or "all")
    #[arg(long, default_value = "steady")]
    strategies: String,

    /// Seeds to run (comma-separated; ranges like 10..20 or 10..=20)
    #[arg(long, default_value_t = DEFAULT_SEED.to_string())]
    seeds: String,

    /// Journeys per seed; iteration n plays seed + n
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Command::Play(args) => play(&cli, args),
        Command::Auto(args) => run_auto(&cli, args),
        Command::ListStrategies { output } => list_strategies(output.clone()),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn list_strategies(output: Option<PathBuf>) -> Result<()> {
    let mut output_target = OutputTarget::new(output)?;
    writeln!(output_target.writer(), "Available strategies:")?;
    for strategy in Strategy::ALL {
        writeln!(
            output_target.writer(),
            "  {:10} - {}",
            strategy.as_str(),
            strategy.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(())
}

fn party_setup(args: &PartyArgs, leader: &str) -> Result<PartySetup> {
    PartySetup::new(leader, &args.companions, &args.profession, &args.month)
}

fn play(cli: &Cli, args: &PlayArgs) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let stdin = stdin();
    let mut player = ConsolePlayer::new(stdin.lock(), stdout());

    println!("{}", "🐂 Westward".bright_cyan().bold());
    println!("{}", "===========".cyan());
    let leader = match &args.party.leader {
        Some(name) => name.clone(),
        None => player.ask_text("What is the name of the wagon leader?", DEFAULT_LEADER),
    };
    let setup = party_setup(&args.party, &leader)?;
    let seed = args.seed.unwrap_or_else(clock_seed);

    let (mut session, receipt) = setup.start(&config, seed)?;
    println!(
        "As a {}, you start with {}.",
        setup.profession,
        format_money(setup.profession.starting_cents())
    );
    for line in &receipt {
        println!(
            "  {:<9} {:>5} (of {:>5})  {}",
            line.item.as_str(),
            line.bought,
            line.requested,
            format_money(line.cost_cents)
        );
    }
    println!(
        "Leaving with {} on seed {seed}.\n",
        format_money(session.state().party.money_cents)
    );

    let summary = session
        .run(&mut player)
        .context("the journey stopped on an invalid choice")?;
    player.into_output().flush()?;
    log::info!("journey over: {} (score {})", summary.status, summary.score);
    Ok(())
}

fn run_auto(cli: &Cli, args: &AutoArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = load_config(cli.config.as_deref())?;
    let leader = args.party.leader.as_deref().unwrap_or(DEFAULT_LEADER);
    let plan = AutoPlan {
        strategies: expand_strategies(&args.strategies)?,
        seeds: resolve_seed_inputs(&split_csv(&args.seeds))?,
        iterations: args.iterations.max(1),
        setup: party_setup(&args.party, leader)?,
        config,
    };

    if args.report == "console" {
        announce_banner(&plan);
    }
    let records = plan.run(cli.verbose && args.report == "console")?;
    let aggregates = aggregate_runs(&records);

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, &records, &aggregates)?,
        "markdown" => {
            reports::generate_markdown_report(&mut output_target, &records, &aggregates)?;
        }
        _ => reports::generate_console_report(
            &mut output_target,
            &records,
            &aggregates,
            start_time.elapsed(),
        )?,
    }
    output_target.flush_inner()?;
    Ok(())
}

fn announce_banner(plan: &AutoPlan) {
    println!("{}", "🐂 Westward Automated Runs".bright_cyan().bold());
    println!("{}", "==========================".cyan());
    println!(
        "{} strategies × {} seeds × {} iterations",
        plan.strategies.len(),
        plan.seeds.len(),
        plan.iterations
    );
}

fn expand_strategies(raw: &str) -> Result<Vec<Strategy>> {
    let mut strategies = Vec::new();
    for token in split_csv(raw) {
        if token.eq_ignore_ascii_case("all") {
            for strategy in Strategy::ALL {
                if !strategies.contains(&strategy) {
                    strategies.push(strategy);
                }
            }
            continue;
        }
        let Ok(strategy) = token.parse::<Strategy>() else {
            bail!("Unknown strategy: {token} (try `westward list-strategies`)");
        };
        if !strategies.contains(&strategy) {
            strategies.push(strategy);
        }
    }
    if strategies.is_empty() {
        strategies.push(Strategy::Steady);
    }
    Ok(strategies)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(DEFAULT_SEED)
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use westward_game::{Collaborator, TrailConfig};

    #[test]
    fn expands_all_strategies_keyword_without_duplicates() {
        let expanded = expand_strategies("hustle,all").unwrap();
        assert_eq!(
            expanded,
            vec![
                Strategy::Hustle,
                Strategy::Steady,
                Strategy::Cautious,
                Strategy::Random
            ]
        );
    }

    #[test]
    fn empty_strategy_list_defaults_to_steady() {
        assert_eq!(expand_strategies(" , ").unwrap(), vec![Strategy::Steady]);
        assert!(expand_strategies("reckless").is_err());
    }

    #[test]
    fn cli_parses_auto_arguments() {
        let cli = Cli::parse_from([
            "westward",
            "auto",
            "--strategies",
            "steady,random",
            "--seeds",
            "1..4",
            "--report",
            "json",
            "--profession",
            "banker",
            "--verbose",
        ]);
        assert!(cli.verbose);
        let Command::Auto(args) = cli.command else {
            panic!("expected auto subcommand");
        };
        assert_eq!(args.strategies, "steady,random");
        assert_eq!(args.seeds, "1..4");
        assert_eq!(args.report, "json");
        assert_eq!(args.party.profession, "banker");
        assert_eq!(args.party.companions, DEFAULT_COMPANIONS);
    }

    #[test]
    fn default_config_path_loads_builtin_trail() {
        let config = load_config(None).unwrap();
        assert_eq!(config, TrailConfig::default_config());
    }

    #[test]
    fn console_player_is_a_collaborator() {
        fn assert_collaborator<C: Collaborator>(_: &C) {}
        let player = ConsolePlayer::new(std::io::Cursor::new(Vec::new()), Vec::new());
        assert_collaborator(&player);
    }
}
