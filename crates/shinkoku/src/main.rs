use clap::Parser;
use shinkoku::{Command, ShinkokuConfig, emit, error_json, execute, init_logging};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "shinkoku")]
#[command(about = "Japanese income tax and consumption tax calculator")]
struct Args {
    /// Path to the data directory (default: ~/.shinkoku/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to the config file (default: {data_dir}/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Write the JSON result to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".shinkoku")
}

fn run(args: &Args, config_path: &Path) -> Result<(), shinkoku::CliError> {
    let config = ShinkokuConfig::load_or_default(config_path)?;
    let value = execute(&args.command, &config)?;
    emit(&value, args.output.as_deref(), &config)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| data_dir.join("config.yaml"));

    if let Err(err) = run(&args, &config_path) {
        tracing::error!("{err}");
        println!("{}", error_json(&err));
        std::process::exit(1);
    }

    Ok(())
}
