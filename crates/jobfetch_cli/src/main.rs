mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use engine_logging::{engine_debug, engine_warn};
use jobfetch_engine::Engine;

use settings::{read_settings, FileSettings, ResolvedSettings, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "jobfetch", version, about = "Save job postings as Markdown and CVs as JSON")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GlobalArgs {
    /// RON settings file; missing is fine
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory postings are written to
    #[arg(long, global = true)]
    pub postings_dir: Option<PathBuf>,

    /// Where the fetched cv.json is stored
    #[arg(long, global = true)]
    pub cv_path: Option<PathBuf>,

    /// Whole-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Also write the log to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Keep log output off the terminal; --log-file still receives it
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a job posting and save it as Markdown
    Fetch {
        url: String,

        /// File name to use instead of the generated one
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Fetch <domain>/cv.json and save it
    Cv {
        /// Domain or URL of the CV host
        target: String,
    },

    /// Fetch a posting or a CV, whichever the input points at
    Get {
        input: String,

        /// File name for postings
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print whether an input is a job posting or a CV
    Detect { input: String },

    /// Print a saved posting's header and the start of its body
    Show {
        path: PathBuf,

        /// Body bytes to print
        #[arg(long, default_value_t = 2000)]
        max_bytes: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (file_settings, settings_error) = match read_settings(&cli.global.config) {
        Ok(settings) => (settings, None),
        Err(err) => (FileSettings::default(), Some(err)),
    };
    let resolved = ResolvedSettings::resolve(&cli.global, file_settings);

    engine_logging::initialize(resolved.log_settings(&cli.global));
    if let Some(err) = settings_error {
        engine_warn!("Ignoring settings file: {:#}", err);
    }
    engine_debug!("Settings: {:?}", resolved);

    match cli.command {
        Commands::Fetch { url, name } => {
            let engine = Engine::new(resolved.engine_config());
            commands::fetch_posting(&engine, &url, name.as_deref()).await?;
        }
        Commands::Cv { target } => {
            let engine = Engine::new(resolved.engine_config());
            commands::fetch_cv(&engine, &target).await?;
        }
        Commands::Get { input, name } => {
            let engine = Engine::new(resolved.engine_config());
            commands::fetch_auto(&engine, &input, name.as_deref()).await?;
        }
        Commands::Detect { input } => commands::detect(&input),
        Commands::Show { path, max_bytes } => commands::show(&path, max_bytes)?,
    }

    Ok(())
}
