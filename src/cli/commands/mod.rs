use std::collections::HashMap;

pub mod config;
pub mod dashboard;
pub mod donations;
pub mod events;
pub mod members;
pub mod messages;
pub mod system;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::forms::WizardRun;
use crate::cli::shell_context::ShellContext;
use crate::domain::{Displayable, Identifiable};
use crate::forms::{FormRecord, RecordMapping, WizardController};
use crate::storage::RecordStore;
use crate::sync::{RecordSync, SyncMode};

/// Runs the wizard of `M` over `record` and saves it through `store`.
pub(crate) fn run_record_form<M>(
    context: &mut ShellContext,
    store: Arc<dyn RecordStore<M::Remote>>,
    mode: SyncMode,
    record: FormRecord,
) -> CommandResult
where
    M: RecordMapping,
    M::Remote: Displayable,
{
    let sync = RecordSync::<M>::new(store, mode);
    let mut wizard = WizardController::new(M::definition(), record);
    if let WizardRun::Completed { output, route } = context.run_wizard(&mut wizard, &sync)? {
        let id = output.id().unwrap_or("?").to_string();
        context
            .output
            .info(format!("Saved {} (#{id}).", output.display_label()));
        context.navigate(route);
    }
    Ok(())
}

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(dashboard::definitions());
    commands.extend(members::definitions());
    commands.extend(events::definitions());
    commands.extend(donations::definitions());
    commands.extend(messages::definitions());
    commands.extend(config::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Positional words and `--flag value` / `--flag=value` pairs.
#[derive(Debug, Default)]
pub(crate) struct Args<'a> {
    positionals: Vec<&'a str>,
    flags: IndexMap<&'a str, &'a str>,
}

impl<'a> Args<'a> {
    pub(crate) fn parse(raw: &[&'a str], allowed: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = Args::default();
        let mut iter = raw.iter().copied();
        while let Some(token) = iter.next() {
            let Some(flag) = token.strip_prefix("--") else {
                parsed.positionals.push(token);
                continue;
            };
            let (name, value) = match flag.split_once('=') {
                Some((name, value)) => (name, value),
                None => {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::InvalidArguments(format!("`--{flag}` expects a value"))
                    })?;
                    (flag, value)
                }
            };
            if !allowed.contains(&name) {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `--{name}`"
                )));
            }
            parsed.flags.insert(name, value);
        }
        Ok(parsed)
    }

    pub(crate) fn positional(&self, index: usize) -> Option<&'a str> {
        self.positionals.get(index).copied()
    }

    pub(crate) fn flag(&self, name: &str) -> Option<&'a str> {
        self.flags.get(name).copied()
    }

    pub(crate) fn number(&self, name: &str) -> Result<Option<u32>, CommandError> {
        self.flag(name)
            .map(|raw| {
                raw.parse().map_err(|_| {
                    CommandError::InvalidArguments(format!("`--{name}` expects a number, got `{raw}`"))
                })
            })
            .transpose()
    }

    /// Parses `--name` with `parse`, reporting `choices` when it fails.
    pub(crate) fn choice<T>(
        &self,
        name: &str,
        choices: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, CommandError> {
        self.flag(name)
            .map(|raw| {
                parse(raw).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "`--{name}` must be one of {choices}, got `{raw}`"
                    ))
                })
            })
            .transpose()
    }
}
