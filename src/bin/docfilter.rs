use clap::{Parser, Subcommand};
use docfilter::cli::{self as prog_cli, OutputMode};
use docfilter::config::ClientConfig;
use docfilter::utils::logger;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "docfilter", version, about = "Compile document-query filters", long_about = None)]
struct Cli {
    #[arg(long, help = "Path to a config file (TOML). If omitted, the default locations are searched.")]
    config: Option<PathBuf>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[arg(long, help = "Emit JSON instead of plain text")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Compile a filter (JSON) into the query-filter string")]
    Compile {
        #[arg(long, default_value = "-", help = "Filter JSON file, or '-' for stdin")]
        file: PathBuf,
    },
    #[command(about = "Build a sort clause, first field is the primary key")]
    Sort {
        #[arg(long = "field", help = "field[:asc|desc], repeatable")]
        fields: Vec<String>,
    },
    #[command(about = "Compile an update (JSON) into its target filter and update document")]
    Update {
        #[arg(long, default_value = "-", help = "Update JSON file, or '-' for stdin")]
        file: PathBuf,
    },
    #[command(name = "show-config", about = "Print the effective configuration")]
    ShowConfig,
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut s = String::new();
        std::io::stdin().read_to_string(&mut s)?;
        Ok(s)
    } else {
        std::fs::read_to_string(path)
    }
}

fn main() {
    let cli = Cli::parse();
    let cfg = match ClientConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let level = cli.log_level.as_deref().or(cfg.log_level.as_deref());
    let logging = if std::env::var_os("DOCFILTER_LOG_DIR").is_some() {
        logger::configure_from_env()
    } else if cfg.log_dir.is_some() || level.is_some() {
        logger::configure_logging(cfg.log_dir.as_deref(), level, None, false)
    } else {
        Ok(())
    };
    if let Err(e) = logging {
        eprintln!("warning: logging not configured: {e}");
    }
    let mode = if cli.json { OutputMode::Json } else { OutputMode::Plain };

    let cmd = match cli.command {
        Commands::Compile { file } => read_input(&file)
            .map(|filter_json| prog_cli::Command::Compile { filter_json }),
        Commands::Sort { fields } => Ok(prog_cli::Command::Sort { fields }),
        Commands::Update { file } => read_input(&file)
            .map(|update_json| prog_cli::Command::Update { update_json }),
        Commands::ShowConfig => Ok(prog_cli::Command::ShowConfig { config: cfg.clone() }),
    };
    let cmd = match cmd {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = prog_cli::run(cmd, mode, &mut stdout) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
