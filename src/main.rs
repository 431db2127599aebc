use std::future::Future;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use logicapp_config::RecurrenceTriggerConfig;
use logicapp_resource::{RecurrenceTriggerResource, ResourceError, ResourceState, schema};
use logicapp_store::{SqliteWorkflowStore, WorkflowClient};

const DEFAULT_SUBSCRIPTION: &str = "00000000-0000-0000-0000-000000000000";

/// logicapp - manage Logic App recurrence triggers
#[derive(Parser)]
#[command(name = "logicapp")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.logicapp)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Subscription ID used when building workflow resource IDs
  #[arg(long, global = true, default_value = DEFAULT_SUBSCRIPTION)]
  subscription: String,

  /// Increase log verbosity (-v debug, -vv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Manage workflows
  Workflow {
    #[command(subcommand)]
    action: WorkflowAction,
  },

  /// Manage recurrence triggers
  Trigger {
    #[command(subcommand)]
    action: TriggerAction,
  },

  /// Print the recurrence trigger schema as JSON
  Schema,
}

#[derive(Subcommand)]
enum WorkflowAction {
  /// Create an empty workflow (no-op if it exists)
  Create {
    #[arg(long)]
    resource_group: String,
    #[arg(long)]
    name: String,
  },

  /// Print a workflow and its definition
  Show {
    #[arg(long)]
    resource_group: String,
    #[arg(long)]
    name: String,
  },
}

#[derive(Subcommand)]
enum TriggerAction {
  /// Create the trigger, or update it if the state file tracks it
  Apply {
    /// Path to the trigger configuration (JSON). Read from stdin if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the state file
    #[arg(long)]
    state: Option<PathBuf>,
  },

  /// Refresh a trigger from the workflow
  Read {
    /// Trigger resource ID
    id: String,

    #[arg(long)]
    state: Option<PathBuf>,
  },

  /// Start tracking an existing trigger
  Import {
    /// Trigger resource ID
    id: String,

    #[arg(long)]
    state: Option<PathBuf>,
  },

  /// Remove a trigger from its workflow
  Delete {
    /// Trigger resource ID
    id: String,

    #[arg(long)]
    state: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".logicapp"),
  };

  match cli.command {
    Some(Commands::Schema) => {
      println!("{}", serde_json::to_string_pretty(&schema())?);
    }
    Some(command) => {
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(async { run_async(command, data_dir, cli.subscription).await })?;
    }
    None => {
      println!("logicapp - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing(verbose: u8) {
  let default_level = match verbose {
    0 => "info",
    1 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(verbose >= 2)
    .init();
}

async fn run_async(command: Commands, data_dir: PathBuf, subscription: String) -> Result<()> {
  tokio::fs::create_dir_all(&data_dir)
    .await
    .with_context(|| format!("failed to create data directory: {}", data_dir.display()))?;

  let db_path = data_dir.join("logicapp.db");
  debug!(path = %db_path.display(), "opening workflow store");
  let store = SqliteWorkflowStore::open(&db_path, subscription)
    .await
    .with_context(|| format!("failed to open workflow store: {}", db_path.display()))?;

  match command {
    Commands::Workflow { action } => run_workflow(action, &store).await,
    Commands::Trigger { action } => run_trigger(action, RecurrenceTriggerResource::new(store)).await,
    Commands::Schema => unreachable!("schema is printed before the store is opened"),
  }
}

async fn run_workflow(action: WorkflowAction, store: &SqliteWorkflowStore) -> Result<()> {
  let workflow = match action {
    WorkflowAction::Create {
      resource_group,
      name,
    } => store
      .put_workflow(&resource_group, &name)
      .await
      .context("failed to create workflow")?,
    WorkflowAction::Show {
      resource_group,
      name,
    } => store
      .get_workflow(&resource_group, &name)
      .await
      .context("failed to read workflow")?
      .with_context(|| format!("workflow '{name}' not found in resource group '{resource_group}'"))?,
  };

  println!("{}", serde_json::to_string_pretty(&workflow)?);
  Ok(())
}

async fn run_trigger(
  action: TriggerAction,
  resource: RecurrenceTriggerResource<SqliteWorkflowStore>,
) -> Result<()> {
  let timeouts = resource.timeouts();

  match action {
    TriggerAction::Apply { config, state } => {
      let config = read_config(config.as_deref()).await?;
      let prior = match &state {
        Some(path) => read_state(path).await?,
        None => None,
      };

      let applied = match prior {
        Some(prior) => {
          eprintln!("Updating trigger: {}", prior.id);
          with_timeout(timeouts.update, "update", resource.update(&prior, &config)).await?
        }
        None => {
          eprintln!("Creating trigger: {}", config.name);
          with_timeout(timeouts.create, "create", resource.create(&config)).await?
        }
      };

      write_state(state.as_deref(), Some(&applied)).await
    }
    TriggerAction::Read { id, state } => {
      let prior = match &state {
        Some(path) => read_state(path).await?,
        None => None,
      };

      let refreshed = with_timeout(
        timeouts.read,
        "read",
        resource.read(&id, prior.as_ref().map(|s| &s.config)),
      )
      .await?;

      if refreshed.is_none() {
        eprintln!("Trigger no longer exists, removing from state: {id}");
      }
      write_state(state.as_deref(), refreshed.as_ref()).await
    }
    TriggerAction::Import { id, state } => {
      let imported = with_timeout(timeouts.read, "import", resource.import(&id)).await?;
      write_state(state.as_deref(), Some(&imported)).await
    }
    TriggerAction::Delete { id, state } => {
      with_timeout(timeouts.delete, "delete", resource.delete(&id)).await?;
      eprintln!("Deleted trigger: {id}");
      write_state(state.as_deref(), None).await
    }
  }
}

/// Run one resource operation under the host-side timeout.
async fn with_timeout<T>(
  limit: Duration,
  operation: &str,
  fut: impl Future<Output = Result<T, ResourceError>>,
) -> Result<T> {
  tokio::time::timeout(limit, fut)
    .await
    .map_err(|_| anyhow!("{operation} timed out after {}s", limit.as_secs()))?
    .with_context(|| format!("trigger {operation} failed"))
}

async fn read_config(path: Option<&Path>) -> Result<RecurrenceTriggerConfig> {
  let content = match path {
    Some(path) => tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("failed to read config file: {}", path.display()))?,
    None => {
      let mut input = String::new();
      io::stdin()
        .read_to_string(&mut input)
        .context("failed to read config from stdin")?;
      input
    }
  };

  serde_json::from_str(&content).context("failed to parse trigger configuration")
}

async fn read_state(path: &Path) -> Result<Option<ResourceState>> {
  if !tokio::fs::try_exists(path).await? {
    return Ok(None);
  }

  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read state file: {}", path.display()))?;

  if content.trim().is_empty() {
    return Ok(None);
  }

  let state = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse state file: {}", path.display()))?;
  Ok(Some(state))
}

/// Persist `state` to `path`, or print it when no path was given. `None`
/// clears the state file.
async fn write_state(path: Option<&Path>, state: Option<&ResourceState>) -> Result<()> {
  let content = match state {
    Some(state) => serde_json::to_string_pretty(state)?,
    None => String::new(),
  };

  match path {
    Some(path) => tokio::fs::write(path, content)
      .await
      .with_context(|| format!("failed to write state file: {}", path.display())),
    None => {
      if !content.is_empty() {
        println!("{content}");
      }
      Ok(())
    }
  }
}
