use efsim::{ScenarioConfig, Scenario, PromptSource};
use efsim::run_2d;
use efsim::bench_field;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Plot the electric field direction around stationary point charges")]
struct Args {
    /// Scenario file; bare names are looked up under scenarios/
    #[arg(short, default_value = "dipole.yaml")]
    file_name: String,

    /// Enter particles at the prompt instead of reading them from the scenario
    #[arg(long)]
    interactive: bool,

    /// Compute the field and log a summary without opening a window
    #[arg(long)]
    headless: bool,

    /// Run the field benchmark and exit
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let given = PathBuf::from(file_name);
    if given.exists() {
        return given;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_field();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    let scenario = if args.interactive {
        let stdin = io::stdin();
        let mut source = PromptSource::new(stdin.lock(), io::stdout());
        Scenario::from_source(&mut source, &scenario_cfg)?
    } else {
        Scenario::from_config(&scenario_cfg)?
    };

    if args.headless {
        let b = scenario.field.grid.bounds;
        let lines = efsim::trace_streamlines(&scenario.field, &scenario.render);
        info!(
            "bounds x [{:.3}, {:.3}] y [{:.3}, {:.3}], {} degenerate cell(s), {} streamline(s)",
            b.xmin,
            b.xmax,
            b.ymin,
            b.ymax,
            scenario.field.degenerate_cells(),
            lines.len()
        );
    } else {
        run_2d(scenario);
    }

    Ok(())
}
