use std::{collections::VecDeque, future::Future, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::{
    config::{Config, ConfigManager, LayoutState},
    domain::{Donation, Event, MemberRecord, Message},
    errors::{CliError, Result},
    forms::{SubmitHandler, WizardController},
    storage::{open_store, RecordStore},
};

use super::commands::{all_definitions, CommandRegistry};
use super::core::{CommandError, CommandResult};
use super::forms::{DialoguerInteraction, ScriptInteraction, WizardRun, WizardRunner};
use super::navigation;
use super::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// One store per record type, all chosen by the same configuration.
#[derive(Clone)]
pub struct Stores {
    pub members: Arc<dyn RecordStore<MemberRecord>>,
    pub events: Arc<dyn RecordStore<Event>>,
    pub donations: Arc<dyn RecordStore<Donation>>,
    pub messages: Arc<dyn RecordStore<Message>>,
}

impl Stores {
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self {
            members: open_store(config)?,
            events: open_store(config)?,
            donations: open_store(config)?,
            messages: open_store(config)?,
        })
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub runtime: Runtime,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub output: Output,
    pub theme: ColorfulTheme,
    pub stores: Stores,
    /// Route of the page last shown.
    pub route: &'static str,
    /// Unread stdin lines in script mode; wizard answers are taken from here too.
    pub script: VecDeque<String>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> std::result::Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?.with_env_overrides();
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let stores = Stores::open(&config)?;
        debug!(storage = config.storage.as_str(), "shell context ready");

        Ok(Self {
            mode,
            registry: CommandRegistry::new(all_definitions()),
            runtime,
            output: Output::new(config.layout, mode == CliMode::Script),
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            stores,
            route: "/",
            script: VecDeque::new(),
            last_command: None,
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match navigation::for_route(self.route) {
            Some(item) if self.route != "/" => format!("community [{}]> ", item.title.to_lowercase()),
            _ => "community> ".to_string(),
        }
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn navigate(&mut self, route: &'static str) {
        self.route = route;
        if let Some(item) = navigation::for_route(route) {
            debug!(route, "navigated");
            self.output.info(format!("Now viewing {}.", item.title));
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Stores the new layout, re-targets output and persists it.
    pub(crate) fn apply_layout(&mut self, layout: LayoutState) -> CommandResult {
        self.config.layout = layout;
        self.output.set_layout(layout);
        self.persist_config()
    }

    pub(crate) fn reopen_stores(&mut self) -> CommandResult {
        self.stores = Stores::open(&self.config)?;
        Ok(())
    }

    pub(crate) fn run_wizard<H: SubmitHandler>(
        &mut self,
        wizard: &mut WizardController,
        handler: &H,
    ) -> std::result::Result<WizardRun<H::Output>, CommandError> {
        let runner = WizardRunner::new(self.output, &self.runtime);
        match self.mode {
            CliMode::Script => {
                let mut interaction = ScriptInteraction::new(&mut self.script, self.output);
                runner.run(wizard, handler, &mut interaction)
            }
            CliMode::Interactive => {
                let mut interaction = DialoguerInteraction::new(&self.theme);
                runner.run(wizard, handler, &mut interaction)
            }
        }
    }
}
