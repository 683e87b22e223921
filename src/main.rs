use clap::{Parser, Subcommand};
use letterbox::batch::{self, BatchLayout};
use letterbox::config::{self, LetterboxConfig};
use letterbox::output;
use std::path::{Path, PathBuf};

/// Which files to operate on.
#[derive(clap::Args, Clone, Default)]
struct InputArgs {
    /// Image file names, relative to the source directory (default: batch.images from config)
    images: Vec<String>,

    /// Use every supported image found directly in the source directory
    #[arg(long, conflicts_with = "images")]
    all: bool,
}

#[derive(clap::Args, Clone, Default)]
struct RunArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Write a JSON report of every outcome to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "letterbox")]
#[command(about = "Normalize screenshots onto a fixed letterboxed canvas")]
#[command(long_about = "\
Normalize screenshots onto a fixed letterboxed canvas

Every image is scaled to fit a 1280x720 white canvas without cropping,
centered, tagged with 72 dpi, and written as processed_<name>.

Default layout (relative to --root):

  letterbox.toml                 # Optional config (see 'letterbox gen-config')
  images/
  ├── sih.png
  ├── personal_capsule.png
  ├── dev_search.png
  ├── RestAPI.jpg
  └── processed/                 # Created if missing
      ├── processed_sih.png
      └── processed_RestAPI.jpg  # *.jpg sources are written as JPEG, others as PNG

Missing or unreadable files are reported and skipped; the run always completes.")]
#[command(version)]
struct Cli {
    /// Project root; config and configured directories resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/letterbox.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source image directory, relative to --root (overrides batch.source_dir)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory, relative to --root (overrides batch.output_dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Normalize images onto the canvas (default)
    Run(RunArgs),
    /// Show which inputs exist without processing them
    Check(InputArgs),
    /// Print a stock letterbox.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.clone().unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => {
            let (config, layout) = load_project(&cli)?;
            let names = resolve_names(&args.inputs, &layout, &config)?;
            let canvas = config.canvas_spec();

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for outcome in rx {
                    for line in output::format_outcome(&outcome) {
                        println!("{}", line);
                    }
                }
            });
            let report = batch::run_batch(&layout, &names, &canvas, Some(tx))?;
            printer.join().map_err(|_| "output thread panicked")?;
            output::print_batch_summary(&report);

            if let Some(report_path) = args.report {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(&report_path, json)?;
            }
        }
        Command::Check(inputs) => {
            let (config, layout) = load_project(&cli)?;
            let names = resolve_names(&inputs, &layout, &config)?;
            println!("==> Checking {}", layout.source_dir.display());
            let statuses = batch::check_inputs(&layout.source_dir, &names);
            output::print_check_output(&statuses);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config (explicit `--config` or `<root>/letterbox.toml`) and resolve directories.
fn load_project(cli: &Cli) -> Result<(LetterboxConfig, BatchLayout), config::ConfigError> {
    let config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&cli.root)?,
    };
    let layout = resolve_layout(&cli.root, cli.source.clone(), cli.output.clone(), &config);
    Ok((config, layout))
}

/// Directories from config with CLI overrides on top, all resolved against the root.
fn resolve_layout(
    root: &Path,
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    config: &LetterboxConfig,
) -> BatchLayout {
    let mut layout = BatchLayout::from_config(root, &config.batch);
    if let Some(source) = source {
        layout.source_dir = root.join(source);
    }
    if let Some(output) = output {
        layout.output_dir = root.join(output);
    }
    layout
}

/// Explicit names win, then `--all` discovery, then the configured list.
fn resolve_names(
    inputs: &InputArgs,
    layout: &BatchLayout,
    config: &LetterboxConfig,
) -> Result<Vec<String>, batch::BatchError> {
    if !inputs.images.is_empty() {
        Ok(inputs.images.clone())
    } else if inputs.all {
        batch::discover_images(&layout.source_dir)
    } else {
        Ok(config.batch.images.clone())
    }
}
