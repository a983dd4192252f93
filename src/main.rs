//! composio-sharepoint CLI - run a SharePoint node outside the workflow host

use clap::{Parser, Subcommand};
use colored::Colorize;

use composio_sharepoint::{
    actions, ActionMaps, ComposioConfig, FixSuggestion, NodeFile, SharePointComponent, SharePointError,
};

#[derive(Parser)]
#[command(name = "composio-sharepoint")]
#[command(about = "SharePoint workflow node backed by Composio")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the action selected in a node file
    Run {
        /// Path to the node state YAML file
        file: String,

        /// Override the Composio API key
        #[arg(long)]
        api_key: Option<String>,

        /// Override the Composio entity id
        #[arg(short, long)]
        entity_id: Option<String>,
    },

    /// Check that a node file parses and selects a known action
    Validate {
        /// Path to the node state YAML file
        file: String,
    },

    /// List available actions and their fields
    Actions,

    /// Print the node's field schema as JSON
    Schema,
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays parseable JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            file,
            api_key,
            entity_id,
        } => run_node(&file, api_key, entity_id).await,
        Commands::Validate { file } => validate_node(&file),
        Commands::Actions => {
            list_actions();
            Ok(())
        }
        Commands::Schema => print_schema(),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run_node(
    file: &str,
    api_key: Option<String>,
    entity_id: Option<String>,
) -> Result<(), SharePointError> {
    let node = NodeFile::load(file)?;
    let config = ComposioConfig::from_env()?;

    let mut component = SharePointComponent::new(config);
    node.apply(&mut component)?;
    if let Some(key) = api_key {
        component.api_key = key;
    }
    if let Some(entity_id) = entity_id {
        component.entity_id = entity_id;
    }

    eprintln!(
        "{} Running {} as entity {}",
        "→".cyan(),
        component.action.to_string().cyan().bold(),
        component.entity_id.cyan()
    );

    let result = component.execute_action().await?;
    if !result.is_success() {
        eprintln!("{} SharePoint reported a failure", "!".yellow().bold());
    }

    let output = serde_json::to_string_pretty(&result.into_value())
        .map_err(|e| SharePointError::InvalidResponse(e.to_string()))?;
    println!("{}", output);
    Ok(())
}

fn validate_node(file: &str) -> Result<(), SharePointError> {
    let node = NodeFile::load(file)?;

    let action = ActionMaps::from_table(actions::ACTIONS)
        .resolve(&node.action)
        .and_then(actions::find)
        .ok_or_else(|| SharePointError::InvalidAction {
            display_name: node.action.to_string(),
        })?;

    for name in node.fields.keys() {
        if !actions::all_fields().contains(name.as_str()) {
            return Err(SharePointError::UnknownField {
                field: name.clone(),
            });
        }
    }

    let set: Vec<&str> = node.set_fields().map(|(name, _)| name).collect();
    let missing: Vec<&str> = action
        .required_fields
        .iter()
        .copied()
        .filter(|field| !set.contains(field))
        .collect();

    println!("{} Node '{}' is valid", "✓".green(), file);
    println!("  Action: {} ({})", action.display_name, action.identifier);
    println!("  Fields set: {}", set.len());
    if !missing.is_empty() {
        println!("  {} not set: {}", "Note:".yellow(), missing.join(", "));
    }

    Ok(())
}

fn list_actions() {
    for action in actions::ACTIONS {
        let marker = if actions::DEFAULT_TOOLS.contains(&action.identifier) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {:<18} {}",
            marker,
            action.display_name.bold(),
            action.identifier.dimmed()
        );
        println!("    fields: {}", action.required_fields.join(", "));
    }
}

fn print_schema() -> Result<(), SharePointError> {
    let schema = serde_json::to_string_pretty(&SharePointComponent::schema())
        .map_err(|e| SharePointError::InvalidResponse(e.to_string()))?;
    println!("{}", schema);
    Ok(())
}
