use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use gridveil::{
    CellKey, EffectController, ImageIndex, MemoryPage, MemorySurface, Policy, Rect, RevealConfig,
};

#[derive(Parser, Debug)]
#[command(name = "gridveil", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the per-tile schedule of a reveal.
    Plan(PlanArgs),
    /// Run a reveal over one in-memory image and print each step as ASCII.
    Simulate(SimulateArgs),
    /// Validate a config file and print it with every default filled in.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Reveal config JSON. Defaults to the preset of `--policy`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disappearance policy; overrides the config file.
    #[arg(long, value_enum)]
    policy: Option<PolicyChoice>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Emit every timeline as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Milliseconds between printed frames.
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Image width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Image height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Reveal config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    SingleFade,
    DualPassBlink,
    EarliestWins,
}

impl From<PolicyChoice> for Policy {
    fn from(value: PolicyChoice) -> Self {
        match value {
            PolicyChoice::SingleFade => Policy::SingleFade,
            PolicyChoice::DualPassBlink => Policy::DualPassBlink,
            PolicyChoice::EarliestWins => Policy::EarliestWins,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<RevealConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    RevealConfig::from_json_str(&s).with_context(|| format!("parse config '{}'", path.display()))
}

fn resolve_config(args: &ConfigArgs) -> anyhow::Result<RevealConfig> {
    let mut cfg = match (&args.config, args.policy) {
        (Some(path), _) => read_config(path)?,
        (None, Some(policy)) => RevealConfig::preset(policy.into()),
        (None, None) => RevealConfig::default(),
    };
    if let (Some(_), Some(policy)) = (&args.config, args.policy) {
        cfg.policy = policy.into();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.config)?;
    let cells = gridveil::build_cells(cfg.grid);
    let plans = gridveil::plan_tiles(&cfg, &cells);

    if args.json {
        let out = serde_json::to_string_pretty(&plans).context("serialize plan")?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "policy {} | grid {}x{} | settled by {}ms",
        cfg.policy.name(),
        cfg.grid.rows,
        cfg.grid.cols,
        gridveil::settle_bound_ms(&cfg)
    );
    println!("first change / settled (ms) per tile:");
    for row in 0..cfg.grid.rows {
        let line: Vec<String> = (0..cfg.grid.cols)
            .map(|col| {
                let idx = (row * cfg.grid.cols + col) as usize;
                let tl = &plans[idx];
                format!(
                    "{:>5}/{:<5}",
                    tl.first_change_ms().unwrap_or(0),
                    tl.settled_ms()
                )
            })
            .collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.config)?;
    anyhow::ensure!(args.step_ms > 0, "--step-ms must be > 0");
    let dims = cfg.grid;

    let mut page = MemoryPage::new();
    let image = page.insert_image(Rect::new(0.0, 0.0, args.width, args.height), true);
    let mut controller = EffectController::new(cfg, page, MemorySurface::new())?;
    controller.start();

    loop {
        println!("t={}ms", controller.now_ms());
        print_frame(&controller, image, dims);
        if controller.pending_timers() == 0 {
            break;
        }
        controller.advance(args.step_ms);
    }
    controller.stop();
    Ok(())
}

fn print_frame(
    controller: &EffectController<MemoryPage, MemorySurface>,
    image: ImageIndex,
    dims: gridveil::GridDims,
) {
    for row in 0..dims.rows {
        let line: String = (0..dims.cols)
            .map(|col| {
                let visible = controller
                    .choreographer()
                    .tile(image, CellKey::new(row, col))
                    .and_then(|h| controller.surface().tile(h))
                    .is_some_and(|t| t.style.opacity > 0.0);
                if visible { '#' } else { '.' }
            })
            .collect();
        println!("  {line}");
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = read_config(&args.config)?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}
