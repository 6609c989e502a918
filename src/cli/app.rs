use crate::cli::host::Host;
use crate::cli::output::{format_provider_heading, format_result, format_solution};
use crate::cli::DEFAULT_MAX_RESULTS;
use crate::core::{Config, Error, Result};
use crate::runtime::SearchProvider;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use tracing::info;

/// Search recent JetBrains Rider solutions and open them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default one
    #[arg(long, global = true, env = "RIDER_SEARCH_PROVIDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the discovery helper
    #[arg(long, global = true)]
    pub extension_dir: Option<PathBuf>,

    /// File name of the discovery helper
    #[arg(long, global = true)]
    pub helper: Option<String>,

    /// Desktop file id to look Rider up by (repeatable, first installed wins)
    #[arg(long = "app-id", global = true)]
    pub app_ids: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all recent solutions
    List,

    /// Search recent solutions by name or path
    Search(SearchCommand),

    /// Open the solution with the given id in Rider
    Activate {
        /// Result id as printed by `search` or `list`
        id: String,
    },

    /// Start Rider without opening a solution
    Launch,

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Terms that must all appear in a solution's name or path
    pub terms: Vec<String>,

    /// Maximum number of results to show
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max: usize,

    /// Only search among these result ids (repeatable)
    #[arg(long = "within")]
    pub within: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the path of the configuration file
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => Config::default_path()?,
        };

        match &self.command {
            Commands::Completion { shell } => {
                generate_completion(*shell);
                return Ok(());
            }
            Commands::Config {
                action: ConfigAction::Path,
            } => {
                println!("{}", config_path.display());
                return Ok(());
            }
            Commands::Config {
                action: ConfigAction::Init { force },
            } => return init_config(&config_path, *force),
            _ => {}
        }

        let config = Config::load_from_file(&config_path)?.merge_with_cli_args(&self);
        config.validate()?;

        match self.command {
            Commands::Config { .. } => {
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| Error::configuration(e.to_string()))?;
                print!("{}", rendered);
                Ok(())
            }
            Commands::List => list(&config).await,
            Commands::Search(cmd) => cmd.execute(&config).await,
            Commands::Activate { id } => activate(&config, &id).await,
            Commands::Launch => launch(&config).await,
            Commands::Completion { .. } => Ok(()),
        }
    }
}

impl SearchCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let host = Host::new(config);
        let provider = host.start().await?;

        if self.within.is_empty() {
            // Same path the desktop shell takes: every registered provider
            let results = host.registry().search(&self.terms, self.max);
            if results.is_empty() {
                println!("No matching solutions");
            }
            for (provider_id, ids) in results {
                if let Some(provider) = host.registry().get(&provider_id) {
                    print_results(&*provider, &ids);
                }
            }
        } else {
            let ids = provider.get_subsearch_result_set(&self.within, &self.terms);
            let total = ids.len();
            let ids = provider.filter_results(ids, self.max);
            info!("{} of {} matches shown", ids.len(), total);
            print_results(&*provider, &ids);
        }

        host.stop();
        Ok(())
    }
}

fn print_results(provider: &dyn SearchProvider, ids: &[String]) {
    println!(
        "{}",
        format_provider_heading(provider.id(), provider.app_info().name(), ids.len())
    );
    for meta in provider.get_result_metas(ids) {
        println!("{}", format_result(&meta));
    }
}

async fn list(config: &Config) -> Result<()> {
    let host = Host::new(config);
    let provider = host.start().await?;

    for solution in provider.solutions() {
        println!("{}", format_solution(solution));
    }

    host.stop();
    Ok(())
}

async fn activate(config: &Config, id: &str) -> Result<()> {
    let host = Host::new(config);
    let provider = host.start().await?;

    if !provider.solutions().contains(id) {
        eprintln!("No recent solution with id '{}'", id);
    }
    provider.activate_result(id);

    host.stop();
    Ok(())
}

async fn launch(config: &Config) -> Result<()> {
    let host = Host::new(config);
    let provider = host.start().await?;
    provider.launch_search();
    host.stop();
    Ok(())
}

fn init_config(path: &std::path::Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::configuration(format!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        )));
    }
    Config::default().save_to_file(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Generate shell completion script
fn generate_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
