use clap::{Parser, ValueEnum};
use holdem_arena::agents::make_bot;
use holdem_arena::config::{MatchConfig, OpponentKind};
use holdem_arena::runner::MatchRunner;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BotArg {
    CheckCall,
    AllIn,
    Random,
    Prob,
}

impl From<BotArg> for OpponentKind {
    fn from(b: BotArg) -> Self {
        match b {
            BotArg::CheckCall => OpponentKind::CheckCall,
            BotArg::AllIn => OpponentKind::AllIn,
            BotArg::Random => OpponentKind::Random,
            BotArg::Prob => OpponentKind::Prob,
        }
    }
}

/// Run a heads-up No-Limit Hold'em match between two bundled bots.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML match configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    rounds: Option<u32>,
    #[arg(long)]
    stack: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value = "prob")]
    bot0: BotArg,
    #[arg(long, value_enum, default_value = "check-call")]
    bot1: BotArg,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("arena: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    if let Some(r) = args.rounds {
        cfg.num_rounds = r;
    }
    if let Some(s) = args.stack {
        cfg.starting_stack = s;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    // Each seat gets its own bot seed.
    let seed = cfg.seed;
    let bot0 = make_bot(args.bot0.into(), seed.map(|s| s.wrapping_add(11)));
    let bot1 = make_bot(args.bot1.into(), seed.map(|s| s.wrapping_add(23)));
    let summary = MatchRunner::new(bot0, bot1).run(cfg)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("hands played: {} ({} showdowns)", summary.hands_played, summary.showdowns);
        for seat in 0..2 {
            println!(
                "seat {seat} {:<16} stack {:>6}  net {:>+6}  illegal {}",
                summary.bots[seat],
                summary.final_stacks[seat],
                summary.totals[seat],
                summary.illegal_actions[seat]
            );
        }
        match summary.winner() {
            Some(w) => println!("winner: seat {w} ({})", summary.bots[w]),
            None => println!("result: even"),
        }
    }
    Ok(())
}
