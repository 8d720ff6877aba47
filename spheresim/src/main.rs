use spheresim::{Scenario, ScenarioConfig, World};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Run a rigid-sphere scenario and print the final snapshot")]
struct Args {
    /// Scenario YAML (defaults to scenarios/bounce.yaml in the crate)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Override the scenario's run duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Print the final snapshot as JSON instead of YAML
    #[arg(long)]
    json: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(path: &Path) -> Result<ScenarioConfig> {
    let file = File::open(path).with_context(|| format!("cannot open scenario {}", path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("cannot parse scenario {}", path.display()))?;
    Ok(scenario_cfg)
}

fn report(world: &World, elapsed: f64) {
    let p = world.total_momentum();
    info!(
        "t = {elapsed:.3} s: {} bodies, kinetic energy {:.6e} J, momentum [{:.4e}, {:.4e}, {:.4e}]",
        world.body_count(),
        world.total_kinetic_energy(),
        p.x,
        p.y,
        p.z
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let path = args
        .file
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join("bounce.yaml"));

    let scenario_cfg = load_scenario_from_yaml(&path)?;
    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    let duration = args.duration.unwrap_or(scenario.duration);
    ensure!(
        duration.is_finite() && duration >= 0.0,
        "duration must be finite and non-negative, got {duration}"
    );

    let world = scenario.run(duration, report)?;

    let snapshot = world.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", serde_yaml::to_string(&snapshot)?);
    }

    Ok(())
}
