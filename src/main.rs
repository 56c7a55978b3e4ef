use clap::{Parser, Subcommand};
use log::{debug, info};
use rayon::prelude::*;
use redscope::analyze::analyze_with_decoder;
use redscope::config::{self, AnalyzerConfig, OutputFormat};
use redscope::imaging::{ImageSource, RustDecoder};
use redscope::output::{self, Report};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redscope")]
#[command(about = "Tells you whether an image contains red")]
#[command(long_about = "\
Tells you whether an image contains red

Four independent methods look at every image:

  Simple RGB Check     share of pixels whose red channel clearly dominates
  HSL Analysis         share of pixels with a hue in the red band
  Dominant Color       how far the average color leans towards red
  Histogram Analysis   bright red intensities against bright green and blue

The final verdict is positive when at least two methods agree.

Sources may be file paths or http(s) URLs. URLs that cannot be fetched
directly are retried through the proxies listed in redscope.toml.

Run 'redscope gen-config' to generate a documented redscope.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./redscope.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Image paths or http(s) URLs
    #[arg(required = true)]
    sources: Vec<String>,

    /// Report format (overrides [output] format)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Run the detectors one after another instead of concurrently
    #[arg(long)]
    sequential: bool,

    /// Fetch URLs directly only, skipping the proxy chain
    #[arg(long)]
    no_proxy: bool,

    /// Maximum worker threads (clamped to the CPU core count)
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one or more images
    Analyze(AnalyzeArgs),
    /// Describe each detection method
    Methods,
    /// Print a stock redscope.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze(args) => {
            let cwd = std::env::current_dir()?;
            let mut config = config::load_config(cli.config.as_deref(), &cwd)?;
            apply_overrides(&mut config, &args)?;
            init_thread_pool(&config.analysis);

            let decoder = RustDecoder::new(&config.fetch);
            let reports: Vec<Report> = args
                .sources
                .par_iter()
                .map(|arg| {
                    let source = ImageSource::parse(arg);
                    if source.is_remote() {
                        info!("fetching and analyzing {}", source.label());
                    } else {
                        info!("analyzing {}", source.label());
                    }
                    Report {
                        source: source.label(),
                        results: analyze_with_decoder(&decoder, &source, &config.analysis),
                    }
                })
                .collect();

            match config.output.format {
                OutputFormat::Text => output::print_reports(&reports),
                OutputFormat::Json => output::print_json(&reports)?,
            }
        }
        Command::Methods => {
            output::print_methods();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Fold CLI flags over the loaded config, then re-check it.
fn apply_overrides(
    config: &mut AnalyzerConfig,
    args: &AnalyzeArgs,
) -> Result<(), config::ConfigError> {
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if args.sequential {
        config.analysis.parallel = false;
    }
    if args.no_proxy {
        config.fetch.proxies.clear();
    }
    if let Some(jobs) = args.jobs {
        config.analysis.max_processes = Some(jobs);
    }
    config.validate()
}

/// Initialize the rayon thread pool based on analysis config.
///
/// Caps at the number of available CPU cores: `--jobs` can constrain down, not up.
fn init_thread_pool(analysis: &config::AnalysisConfig) {
    let threads = config::effective_threads(analysis);
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        debug!("keeping existing rayon pool, {threads} threads not applied: {e}");
    }
}
