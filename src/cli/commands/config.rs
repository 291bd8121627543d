use crate::cli::core::{CommandError, CommandResult};
use crate::cli::shell_context::ShellContext;

use super::CommandDefinition;

const CONFIG_USAGE: &str = "config [show|set <key> <value>]";

/// Keys whose change means the stores have to be opened again.
const STORE_KEYS: &[&str] = &[
    "storage",
    "api_url",
    "base_url",
    "api_prefix",
    "timeout",
    "timeout_secs",
    "mock_latency",
    "mock_latency_ms",
];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and change preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["set", key, value @ ..] if !value.is_empty() => {
            set_config_value(context, key, value.join(" ").trim())
        }
        _ => Err(CommandError::usage(CONFIG_USAGE)),
    }
}

fn show_config(context: &mut ShellContext) -> CommandResult {
    let config = &context.config;
    let rows = [
        ("storage", config.storage.as_str().to_string()),
        ("api_url", config.api.base_url.clone()),
        ("api_prefix", config.api.path_prefix.clone()),
        ("timeout", format!("{}s", config.api.timeout_secs)),
        ("mock_latency", format!("{}ms", config.mock_latency_ms)),
        ("page_size", config.page_size.to_string()),
        ("theme", config.layout.theme.as_str().to_string()),
        (
            "sidebar",
            if config.layout.sidebar_collapsed { "collapsed" } else { "expanded" }.to_string(),
        ),
        ("display_name", config.display_name.clone()),
    ];
    context.output.section("Configuration");
    for (key, value) in rows {
        context.output.line(format!("  {key:<14} {value}"));
    }
    context
        .output
        .line(format!("  {:<14} {}", "members from", context.stores.members.describe()));
    context.output.info(format!(
        "Stored at {}",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;

    let normalized = key.to_ascii_lowercase().replace('-', "_");
    let previous = std::mem::replace(&mut context.config, updated);
    if STORE_KEYS.contains(&normalized.as_str()) {
        if let Err(err) = context.reopen_stores() {
            context.config = previous;
            return Err(err);
        }
    }
    if normalized == "theme" {
        context.output.set_layout(context.config.layout);
    }
    context.persist_config()?;
    context
        .output
        .success(format!("{normalized} set to {value}."));
    Ok(())
}
