#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pagestack::core::logging::{LogFormat, init_logging};
use pagestack::{
    MobileTuning, StackController, StackPolicy, compute_stack_peek_offsets,
    compute_stack_positions, layout::mobile_positions,
};

use crate::determinism::{DeterminismFixture, deterministic_mode, frame_hash};
use crate::error::{HarnessError, Result};
use crate::input_storm::{StormConfig, StormPattern, generate_storm, run_storm};
use crate::replay::replay;
use crate::script::load_script;

#[derive(Debug, Parser)]
#[command(
    name = "pagestack-harness",
    about = "Replay scripts, run input storms and print layout fixtures for PageStack",
    version
)]
pub struct Cli {
    /// Emit tracing events as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSONL input script and print one frame per input.
    Replay(ReplayArgs),

    /// Run a seeded input storm and check invariants after every input.
    Storm(StormArgs),

    /// Print the reference position fixtures.
    Fixture(FixtureArgs),
}

/// Container and policy shared by replay and storm.
#[derive(Debug, Clone, Args)]
pub struct StackArgs {
    /// Container width in px. Widths below the breakpoint lay out vertically.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Container height in px.
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Cards present before the first input.
    #[arg(long, default_value_t = 3)]
    pub cards: usize,

    /// Policy file (`.toml` or `.json`).
    #[arg(long)]
    pub policy: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Script path (JSON Lines, one input per line).
    pub script: PathBuf,

    #[command(flatten)]
    pub stack: StackArgs,

    /// Print full frames as JSON lines instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct StormArgs {
    #[arg(long, value_enum, default_value_t = StormPattern::Mixed)]
    pub pattern: StormPattern,

    /// Number of inputs to generate.
    #[arg(long, default_value_t = 1000)]
    pub count: usize,

    /// Seed (defaults to `PAGESTACK_SEED`, then 42).
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub stack: StackArgs,

    /// Print the JSONL run log instead of the summary.
    #[arg(long)]
    pub jsonl: bool,
}

#[derive(Debug, Clone, Args)]
pub struct FixtureArgs {
    /// Main-axis extent in px.
    #[arg(long, default_value_t = 1000.0)]
    pub extent: f64,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(format, "pagestack=warn").map_err(|e| HarnessError::Logging {
        message: e.to_string(),
    })?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_writer(cli, &mut out)
}

pub fn run_with_writer(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => run_replay(&args, out),
        Commands::Storm(args) => run_storm_command(&args, out),
        Commands::Fixture(args) => run_fixture(&args, out),
    }
}

/// Build a controller from the shared stack arguments.
pub fn build_controller(args: &StackArgs) -> Result<StackController> {
    for (name, value) in [("width", args.width), ("height", args.height)] {
        if !value.is_finite() || value < 0.0 {
            return Err(HarnessError::invalid(format!(
                "{name} must be a finite, non-negative number, got {value}"
            )));
        }
    }
    let policy = match args.policy.as_deref() {
        Some(path) => pagestack::load_policy(path)?,
        None => StackPolicy::default(),
    };
    tracing::debug!(target: "pagestack.harness", policy = %policy.to_jsonl(), "policy loaded");
    Ok(StackController::new(policy)
        .with_card_count(args.cards)
        .with_container(args.width, args.height))
}

fn run_replay(args: &ReplayArgs, out: &mut dyn Write) -> Result<()> {
    let steps = load_script(&args.script)?;
    let mut stack = build_controller(&args.stack)?;
    tracing::info!(
        target: "pagestack.harness",
        script = %args.script.display(),
        steps = steps.len(),
        "replay start"
    );
    for record in replay(&steps, &mut stack) {
        let line = if args.json {
            record.to_json()?
        } else {
            record.to_text()
        };
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn run_storm_command(args: &StormArgs, out: &mut dyn Write) -> Result<()> {
    let fixture = match args.seed {
        Some(seed) => DeterminismFixture::new_with("storm", seed, deterministic_mode()),
        None => DeterminismFixture::new("storm", 42),
    };
    let seed = fixture.seed();
    let mut stack = build_controller(&args.stack)?;
    let storm = generate_storm(&StormConfig::new(args.pattern, args.count, seed));
    let (report, log) = run_storm(&storm, &mut stack, &fixture);

    if args.jsonl {
        for line in &log {
            writeln!(out, "{line}")?;
        }
    } else {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    }

    match report.violations.first() {
        None => Ok(()),
        Some((step, message)) => Err(HarnessError::InvariantViolated {
            count: report.violations.len(),
            first: format!("step {step}: {message}"),
        }),
    }
}

fn run_fixture(args: &FixtureArgs, out: &mut dyn Write) -> Result<()> {
    let extent = args.extent;
    if !(extent.is_finite() && extent > 0.0) {
        return Err(HarnessError::invalid(format!(
            "extent must be positive, got {extent}"
        )));
    }
    let rows: [(&str, Vec<f64>); 6] = [
        ("idle_three", compute_stack_positions(-1, 3, extent, 5, 2, None)),
        ("first_open", compute_stack_positions(0, 3, extent, 5, 2, None)),
        (
            "all_open_capped",
            compute_stack_positions(2, 3, extent, 5, 2, Some(&[500.0, 500.0, 400.0][..])),
        ),
        ("overflow_eight", compute_stack_positions(7, 8, extent, 5, 2, None)),
        ("peek_first_of_four", compute_stack_peek_offsets(Some(0), 2, 4)),
        (
            "mobile_idle_three",
            mobile_positions(None, 3, extent, &MobileTuning::default()),
        ),
    ];
    for (name, values) in rows {
        let shown: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
        writeln!(out, "{name:<20} [{}]", shown.join(", "))?;
    }
    let idle = StackController::default()
        .with_card_count(3)
        .with_container(extent, extent * 0.6);
    writeln!(out, "{:<20} {}", "idle_frame_hash", frame_hash(&idle.frame()))?;
    Ok(())
}
