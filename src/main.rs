use anyhow::Result;
use clap::{Parser, Subcommand};
use crew::commands::*;
use crew::{config::Config, constants, plugins};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crew")]
#[command(about = "A cli tool that analyzes code with a crew of AI agents")]
#[command(version)]
#[command(allow_external_subcommands = true)]
struct Cli {
    /// List all available external plugins
    #[arg(long)]
    list_plugins: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the architecture of a file or project directory
    Analyze {
        /// File or directory to analyze
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Skip the hosted model and run deterministic analysis only
        #[arg(long)]
        no_ai: bool,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,

        /// Write the design document to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print only the design document
        #[arg(long)]
        doc_only: bool,
    },

    /// Find issues in a source file
    Debug {
        /// Source file to debug
        path: PathBuf,

        /// File containing recorded runtime stderr to analyze
        #[arg(long)]
        error_file: Option<PathBuf>,

        /// Propose a patched version of the code
        #[arg(long)]
        auto_fix: bool,

        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Review a source file
    Review {
        /// Source file to review
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Skip the hosted model and use the built-in fallback review
        #[arg(long)]
        no_ai: bool,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Generate a test suite for a source file
    Test {
        /// Source file to generate tests for
        path: PathBuf,

        /// Write the generated suite to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Skip the hosted model
        #[arg(long)]
        no_ai: bool,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Generate documentation for a file or project directory
    Doc {
        /// File or directory to document
        path: PathBuf,

        /// Project name used in the generated document
        #[arg(long)]
        name: Option<String>,

        /// Write the documentation to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// List the registered agents and their status
    Agents {
        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Manage saved projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,

        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// External plugin command
    #[command(external_subcommand)]
    External(Vec<String>),
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List saved projects
    List,
    /// Save a source file as a named project
    Save {
        /// Name for the saved project
        name: String,
        /// Source file to save
        path: PathBuf,
    },
    /// Delete a saved project by id
    Delete {
        /// Project id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle list-plugins option first
    if cli.list_plugins {
        let found = plugins::list_external_plugins();
        if found.is_empty() {
            println!("No external plugins found.");
            println!(
                "To create a plugin, make an executable named 'crew-<name>' available in your PATH."
            );
        } else {
            println!("Available external plugins:");
            for plugin in found {
                println!("  {}", plugin);
            }
        }
        return Ok(());
    }

    match cli.command {
        Some(Commands::External(args)) => {
            if args.is_empty() {
                anyhow::bail!("External command provided but no arguments given");
            }

            let plugin_name = &args[0];

            // Parse common options from plugin args
            let mut config_path = constants::config::DEFAULT_CONFIG_FILE.to_string();
            let mut debug = false;
            let mut plugin_args = Vec::new();

            let mut i = 1;
            while i < args.len() {
                match args[i].as_str() {
                    "--config" | "-c" => {
                        if i + 1 < args.len() {
                            config_path = args[i + 1].clone();
                            i += 2;
                        } else {
                            anyhow::bail!("--config requires a path argument");
                        }
                    }
                    "--debug" | "-d" => {
                        debug = true;
                        i += 1;
                    }
                    _ => {
                        // Plugin-specific arg
                        plugin_args.push(args[i].clone());
                        i += 1;
                    }
                }
            }

            // Validate the config before handing its path to the plugin
            Config::load_or_default(&config_path)?;

            let context = plugins::PluginContext::new(config_path, plugin_args, debug);
            plugins::try_external_plugin(plugin_name, &context)?;
        }
        Some(command) => execute_builtin_command(command).await?,
        None => {
            anyhow::bail!("No command provided. Use --help for usage information.");
        }
    }

    Ok(())
}

async fn execute_builtin_command(command: Commands) -> Result<()> {
    match command {
        Commands::External(_) => {
            // Handled in main(), this should not be reached
            unreachable!("External commands should be handled in main()")
        }
        Commands::Analyze {
            path,
            config,
            no_ai,
            json,
            output,
            doc_only,
        } => {
            let context = CommandContext {
                config: Config::load_or_default(&config)?,
                json,
                no_ai,
            };
            AnalyzeCommand {
                path,
                output,
                doc_only,
            }
            .execute(&context)
            .await?;
        }
        Commands::Debug {
            path,
            error_file,
            auto_fix,
            config,
            json,
        } => {
            let context = CommandContext {
                config: Config::load_or_default(&config)?,
                json,
                no_ai: true,
            };
            DebugCommand {
                path,
                error_file,
                auto_fix,
            }
            .execute(&context)
            .await?;
        }
        Commands::Review {
            path,
            config,
            no_ai,
            json,
        } => {
            let context = CommandContext {
                config: Config::load_or_default(&config)?,
                json,
                no_ai,
            };
            ReviewCommand { path }.execute(&context).await?;
        }
        Commands::Test {
            path,
            output,
            config,
            no_ai,
            json,
        } => {
            let context = CommandContext {
                config: Config::load_or_default(&config)?,
                json,
                no_ai,
            };
            TestCommand { path, output }.execute(&context).await?;
        }
        Commands::Doc {
            path,
            name,
            output,
            config,
            json,
        } => {
            let context = CommandContext {
                config: Config::load_or_default(&config)?,
                json,
                no_ai: true,
            };
            DocCommand { path, name, output }.execute(&context).await?;
        }
        Commands::Agents { config, json } => {
            let context = CommandContext {
                config: Config::load_or_default(&config)?,
                json,
                // Status listing never needs a live model connection.
                no_ai: true,
            };
            AgentsCommand.execute(&context).await?;
        }
        Commands::Projects {
            action,
            config,
            json,
        } => {
            let context = CommandContext {
                config: Config::load_or_default(&config)?,
                json,
                no_ai: true,
            };
            match action {
                ProjectAction::List => ListProjectsCommand.execute(&context).await?,
                ProjectAction::Save { name, path } => {
                    SaveProjectCommand { name, path }.execute(&context).await?
                }
                ProjectAction::Delete { id } => {
                    DeleteProjectCommand { id }.execute(&context).await?
                }
            }
        }
    }

    Ok(())
}
