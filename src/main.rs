use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use llms_routing::config::{self, Config};
use llms_routing::plugin::{LlmsOptions, LlmsRouting};
use llms_routing::{build, logger, server};

/// Serve an llms.txt markdown tree during development and copy it into build output.
#[derive(Parser, Debug)]
#[command(name = "llms-routing")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = config::DEFAULT_CONFIG_FILE)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the dev server
    Serve {
        /// Directory holding llms.txt and markdown files
        #[arg(long, value_name = "DIR")]
        llms_dir: Option<String>,
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Copy llms.txt and markdown files into the build output
    Build {
        /// Directory holding llms.txt and markdown files
        #[arg(long, value_name = "DIR")]
        llms_dir: Option<String>,
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<String>,
    },
    /// Print the effective configuration as TOML
    ShowConfig,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut cfg = match Config::load_from(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Command::Serve {
            llms_dir,
            host,
            port,
        } => {
            if let Some(dir) = llms_dir {
                cfg.llms.dir = dir;
            }
            if let Some(host) = host {
                cfg.server.host = host;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            run(&cfg, run_serve)
        }
        Command::Build { llms_dir, out_dir } => {
            if let Some(dir) = llms_dir {
                cfg.llms.dir = dir;
            }
            if let Some(dir) = out_dir {
                cfg.build.out_dir = dir;
            }
            run(&cfg, run_build)
        }
        Command::ShowConfig => match cfg.to_toml() {
            Ok(rendered) => {
                print!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render configuration: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(
    cfg: &Config,
    command: fn(&Config) -> Result<(), Box<dyn std::error::Error>>,
) -> ExitCode {
    if let Err(e) = logger::init(cfg) {
        eprintln!("Failed to open log files: {e}");
        return ExitCode::FAILURE;
    }

    match command(cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run_serve(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Every connection runs on the LocalSet, so one thread is all it uses
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let plugin = LlmsRouting::new(LlmsOptions::from(&cfg.llms));
    let local = tokio::task::LocalSet::new();
    runtime.block_on(local.run_until(server::serve(cfg, plugin)))
}

fn run_build(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let plugin = LlmsRouting::new(LlmsOptions::from(&cfg.llms));
    build::run_build(&plugin, &PathBuf::from(&cfg.build.out_dir))?;
    Ok(())
}
