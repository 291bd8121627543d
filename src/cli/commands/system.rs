use crate::cli::core::{CommandError, CommandResult};
use crate::cli::navigation::{self, NAV_ITEMS};
use crate::cli::shell_context::ShellContext;
use crate::config::Theme;
use crate::utils::build_info;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "nav",
            "Show the sidebar or open a page",
            "nav [dashboard|members|events|donations|messages|settings]",
            cmd_nav,
        ),
        CommandDefinition::new("theme", "Show or change the colour theme", "theme [light|dark|toggle]", cmd_theme),
        CommandDefinition::new(
            "sidebar",
            "Collapse or expand the sidebar",
            "sidebar [toggle|collapse|expand]",
            cmd_sidebar,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandDefinition::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let lowered = name.to_lowercase();
        match context.registry.get(&lowered) {
            Some(command) => {
                context.output.section(format!("Help: {}", command.name));
                context.output.info(format!("Description: {}", command.description));
                context.output.info(format!("Usage: {}", command.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    context.output.section("Available commands");
    for command in context.registry.iter() {
        context
            .output
            .line(format!("  {:<10} {}", command.name, command.description));
    }
    context.output.info("Use `help <command>` for details.");
    Ok(())
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    context.output.section(format!("Community Core {}", meta.version));
    for (label, value) in meta.lines() {
        context.output.line(format!("  {label:<12}: {value}"));
    }
    Ok(())
}

fn cmd_nav(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(target) = args.first() else {
        context.output.section("Navigation");
        for line in navigation::sidebar_lines(context.route, context.config.layout.sidebar_collapsed) {
            context.output.line(line);
        }
        return Ok(());
    };
    let item = navigation::find(target).ok_or_else(|| {
        let known: Vec<&str> = NAV_ITEMS.iter().map(|item| item.title).collect();
        CommandError::InvalidArguments(format!(
            "unknown page `{target}`; choose one of {}",
            known.join(", ")
        ))
    })?;
    context.navigate(item.route);
    context.output.info(format!("Run `{}` to show it.", item.command));
    Ok(())
}

fn cmd_theme(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut layout = context.config.layout;
    match args.first().copied() {
        None => {
            context
                .output
                .info(format!("Theme: {}", layout.theme.as_str()));
            return Ok(());
        }
        Some("toggle") => {
            layout.toggle_theme();
        }
        Some(raw) => {
            layout.theme = Theme::parse(raw)
                .ok_or_else(|| CommandError::usage("theme [light|dark|toggle]"))?;
        }
    }
    context.apply_layout(layout)?;
    context
        .output
        .success(format!("Theme set to {}.", layout.theme.as_str()));
    Ok(())
}

fn cmd_sidebar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut layout = context.config.layout;
    match args.first().copied() {
        None | Some("toggle") => {
            layout.toggle_sidebar();
        }
        Some("collapse") => layout.sidebar_collapsed = true,
        Some("expand") => layout.sidebar_collapsed = false,
        Some(_) => return Err(CommandError::usage("sidebar [toggle|collapse|expand]")),
    }
    context.apply_layout(layout)?;
    let state = if layout.sidebar_collapsed { "collapsed" } else { "expanded" };
    context.output.success(format!("Sidebar {state}."));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
