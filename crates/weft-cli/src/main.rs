//! weft CLI — headless rendering, benchmarking and config validation.

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about = "weft — real-time 2D cloth effect, rendered headless")]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the effect on an offscreen canvas and save the last frame as PNG.
    Run {
        /// Path to effect config (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Surface width in pixels.
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Surface height in pixels.
        #[arg(long, default_value_t = 400)]
        height: u32,

        /// Frames to run.
        #[arg(short, long, default_value_t = 300)]
        frames: u64,

        /// Output PNG path.
        #[arg(short, long, default_value = "weft.png")]
        output: String,

        /// RNG seed (overrides the config).
        #[arg(long)]
        seed: Option<u64>,

        /// Pace frames at the configured frame rate and drive gusts from the
        /// wall-clock timer instead of the frame count.
        #[arg(long)]
        realtime: bool,

        /// Also write the final mesh as JSON.
        #[arg(long)]
        mesh_out: Option<String>,

        /// Forward frame telemetry to the log.
        #[arg(long)]
        telemetry: bool,
    },

    /// Time the frame loop across surface sizes.
    Bench {
        /// Path to effect config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Frames per size.
        #[arg(short, long, default_value_t = 600)]
        frames: u64,

        /// Surface sizes as WIDTHxHEIGHT, comma separated.
        #[arg(short, long, value_delimiter = ',', default_value = "640x360,1280x720,1920x1080")]
        sizes: Vec<String>,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a config (.toml) or a mesh dump (.json).
    Validate {
        /// Path to config or mesh file.
        path: String,
    },

    /// Print the default config as TOML.
    Config,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            width,
            height,
            frames,
            output,
            seed,
            realtime,
            mesh_out,
            telemetry,
        } => commands::run(commands::RunArgs {
            config: config.as_deref(),
            width,
            height,
            frames,
            output: &output,
            seed,
            realtime,
            mesh_out: mesh_out.as_deref(),
            telemetry,
        }),
        Commands::Bench {
            config,
            frames,
            sizes,
            output,
        } => commands::bench(config.as_deref(), frames, &sizes, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Config => commands::print_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
