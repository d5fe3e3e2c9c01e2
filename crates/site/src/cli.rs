// crates/site/src/cli.rs

use crate::app::{self, RunCfg};
use crate::error::SiteError;
use crate::settings::Settings;
use crate::state::AppState;
use chrono::Utc;
use clap::{builder::ValueHint, Parser, Subcommand};
use render::template::TemplateRegistry;
use schema::catalog::default_registry;
use schema::registry::SchemaRegistry;
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use store::client::ContentClient;
use store::dataset::load_dataset;
use store::store::{ContentStore, MemoryStore};
use tracing::{error, info, warn};

pub type Result<T> = std::result::Result<T, SiteError>;

/// Vellum CLI
#[tokio::main(flavor = "multi_thread")]
#[tracing::instrument(skip_all)]
pub async fn start() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start(start) => do_start(start).await,
    };

    result.map_or_else(
        |e| {
            error!("Failed to start vellum: {}", e);
            ExitCode::FAILURE
        },
        |_| {
            info!("vellum stopped cleanly");
            ExitCode::SUCCESS
        },
    )
}

#[tracing::instrument(skip_all)]
async fn do_start(start: StartCmd) -> Result<()> {
    // parse settings file -> does the settings file exist?  If yes, parse it
    let then = Utc::now();
    let process = StartProcess::<CommandIssued>::parse_settings_file(start)?;
    info!(
        "Settings parsed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    // load the dataset -> per-file failures are logged, not fatal
    let then = Utc::now();
    let process = process.load_content()?;
    info!(
        "Content loaded in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    // build templates -> embedded defaults plus any theme overrides
    let then = Utc::now();
    let process = process.load_templates()?;
    info!(
        "Templates loaded in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    // serve until shutdown
    process.serve().await
}

#[derive(Parser, Debug)]
#[command(name = "vellum", version, about = "Vellum command-line tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the site from the specified directory
    Start(StartCmd),
}

#[derive(Parser, Debug)]
pub struct StartCmd {
    /// Site directory (or set VELLUM_DIR)
    ///
    /// Must exist, be a directory, and contain settings.toml.
    #[arg(
        value_name = "DIR",
        env = "VELLUM_DIR",
        required = true,
        value_hint = ValueHint::DirPath,
        value_parser = dir_must_exist
    )]
    pub dir: PathBuf,
}

fn dir_must_exist(s: &str) -> std::result::Result<PathBuf, String> {
    let p = PathBuf::from(s);
    if !p.exists() {
        return Err(format!("Not found: {}", p.display()));
    }
    if !p.is_dir() {
        return Err(format!("Not a directory: {}", p.display()));
    }
    Ok(p)
}

// ─────────────────────────────────────────────────────────────────────────────
// Start process state machine
// ─────────────────────────────────────────────────────────────────────────────

trait ProcessState {}

struct CommandIssued;

struct SettingsLoaded {
    command: StartCmd,
    settings: Settings,
}

struct ContentLoaded {
    command: StartCmd,
    settings: Settings,
    registry: SchemaRegistry,
    client: ContentClient,
}

struct TemplatesLoaded {
    settings: Settings,
    registry: SchemaRegistry,
    client: ContentClient,
    templates: TemplateRegistry,
    static_dir: Option<PathBuf>,
}

impl ProcessState for CommandIssued {}
impl ProcessState for SettingsLoaded {}
impl ProcessState for ContentLoaded {}
impl ProcessState for TemplatesLoaded {}

struct StartProcess<S: ProcessState> {
    state: S,
}

impl StartProcess<CommandIssued> {
    /// Load settings from `<dir>/settings.toml`.
    #[tracing::instrument(skip_all)]
    fn parse_settings_file(command: StartCmd) -> Result<StartProcess<SettingsLoaded>> {
        let mut path = command.dir.clone();
        path.push("settings.toml");

        if !path.exists() {
            return Err(SiteError::Config(format!(
                "settings.toml not found at {}",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(&path).map_err(|err| {
            SiteError::Config(format!("Failed reading {}: {}", path.display(), err))
        })?;

        let mut settings: Settings = toml::from_str(&text).map_err(|err| {
            SiteError::Config(format!(
                "Invalid settings.toml at {}: {}",
                path.display(),
                err
            ))
        })?;
        settings.apply_env_overrides();

        Ok(StartProcess {
            state: SettingsLoaded { command, settings },
        })
    }
}

impl StartProcess<SettingsLoaded> {
    #[tracing::instrument(skip_all)]
    fn load_content(self) -> Result<StartProcess<ContentLoaded>> {
        let settings = self.state.settings;
        let root = self.state.command.dir.join(&settings.cms.content_dir);

        let (store, errors) = load_dataset(&root)?;
        for (path, err) in &errors {
            warn!("skipped {}: {}", path.display(), err);
        }

        let registry = default_registry()?;
        report_unknown_types(&store, &registry);

        info!(
            documents = store.len(),
            skipped = errors.len(),
            "dataset loaded from {}",
            root.display()
        );

        let client = ContentClient::new(
            settings.cms.project_id.clone(),
            settings.cms.dataset.clone(),
            Arc::new(store),
        );

        Ok(StartProcess {
            state: ContentLoaded {
                command: self.state.command,
                settings,
                registry,
                client,
            },
        })
    }
}

/// Documents of an unregistered type still load; they are only unreachable
/// through the typed routes, so say so once at startup.
fn report_unknown_types(store: &MemoryStore, registry: &SchemaRegistry) {
    for id in store.ids() {
        if let Some(doc) = store.get(id) {
            if !registry.contains(&doc.type_name) {
                warn!("document {} has unregistered type {}", doc.id, doc.type_name);
            }
        }
    }
}

impl StartProcess<ContentLoaded> {
    #[tracing::instrument(skip_all)]
    fn load_templates(self) -> Result<StartProcess<TemplatesLoaded>> {
        let theme_dir = self
            .state
            .settings
            .theme
            .as_ref()
            .map(|t| self.state.command.dir.join(&t.dir));

        let templates = match &theme_dir {
            Some(dir) if dir.is_dir() => TemplateRegistry::with_theme_dir(dir)?,
            Some(dir) => {
                warn!("theme dir {} missing, using embedded templates", dir.display());
                TemplateRegistry::new()?
            }
            None => TemplateRegistry::new()?,
        };

        let static_dir = theme_dir
            .map(|d| d.join("static"))
            .filter(|d| d.is_dir());

        Ok(StartProcess {
            state: TemplatesLoaded {
                settings: self.state.settings,
                registry: self.state.registry,
                client: self.state.client,
                templates,
                static_dir,
            },
        })
    }
}

impl StartProcess<TemplatesLoaded> {
    #[tracing::instrument(skip_all)]
    async fn serve(self) -> Result<()> {
        let addr = self.state.settings.addr()?;
        let state = AppState::new(
            self.state.client,
            self.state.registry,
            self.state.templates,
            self.state.settings.site.clone(),
            self.state.static_dir,
        );

        app::run(RunCfg { addr, state }).await?;
        Ok(())
    }
}
