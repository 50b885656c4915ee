use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;
mod simulate;

use simulate::Step;

#[derive(Parser)]
#[command(name = "circuitbg", author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the zone geometry and placement plan as JSON
    Plan {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Paint one frame to a PNG file
    Render {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Run the clearance checker; exits non-zero on errors
    Check {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Replay timed resizes (WIDTHxHEIGHT@MS) through the debounced redraw loop
    Simulate {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        density: f64,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Wait out the real delays instead of stepping a virtual clock
        #[arg(long)]
        realtime: bool,
        #[arg(required = true)]
        steps: Vec<Step>,
    },
}

#[derive(Args)]
pub struct ViewArgs {
    #[arg(long)]
    pub width: f64,
    #[arg(long)]
    pub height: f64,
    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    pub density: f64,
    /// Background configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Command::Plan { view } => commands::plan(&view),
        Command::Render { view, out } => commands::render(&view, &out),
        Command::Check { view } => commands::check(&view),
        Command::Simulate {
            out,
            density,
            config,
            realtime,
            mut steps,
        } => {
            let config = commands::load_config(config.as_deref())?;
            steps.sort_by_key(|step| step.at);
            let surface = if realtime {
                simulate::replay_realtime(&config, density, &steps)?
            } else {
                simulate::replay(&config, density, &steps)?
            };
            circuitbg_io::write_png(&surface, &out)?;
            Ok(())
        }
    }
}
