use crate::cli::core::{CommandError, CommandResult};
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn};
use crate::directory::DashboardSummary;
use crate::domain::{format_usd, PageRequest};

use super::CommandDefinition;

pub const DASHBOARD_ROUTE: &str = "/";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "dashboard",
        "Community overview",
        "dashboard",
        cmd_dashboard,
    )]
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::usage("dashboard"));
    }
    let request = PageRequest::first(context.config.page_size);
    let stores = context.stores.clone();
    let members = context.block_on(stores.members.list(request))?;
    let events = context.block_on(stores.events.list(request))?;
    let donations = context.block_on(stores.donations.list(request))?;
    let messages = context.block_on(stores.messages.list(request))?;
    context.route = DASHBOARD_ROUTE;

    let summary = DashboardSummary::build(&members, &events.items, &donations.items, &messages.items);

    context.output.section("Dashboard");
    context.output.info(format!(
        "Welcome back, {}! Here's what's happening with your community.",
        context.config.display_name
    ));
    let mut stats = Table::new(vec![TableColumn::left("Overview"), TableColumn::right("Value")]);
    stats.push(vec!["Total Members".into(), summary.total_members.to_string()]);
    stats.push(vec!["Upcoming Events".into(), summary.upcoming_events.to_string()]);
    stats.push(vec!["Donations".into(), format_usd(summary.donation_total)]);
    stats.push(vec!["Unread Messages".into(), summary.unread_messages.to_string()]);
    context.output.table(&stats);

    context.output.section("Recent Members");
    if summary.newest_members.is_empty() {
        context.output.info("No members yet.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Name").max(24),
            TableColumn::left("Email").max(28),
            TableColumn::left("Joined"),
        ]);
        for member in &summary.newest_members {
            table.push(vec![
                member.full_name(),
                member.email_address.clone(),
                member.joined_on().unwrap_or_default().to_string(),
            ]);
        }
        context.output.table(&table);
    }

    context.output.section("Upcoming Events");
    if summary.next_events.is_empty() {
        context.output.info("No upcoming events.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Name").max(24),
            TableColumn::left("Date"),
            TableColumn::left("Time"),
            TableColumn::left("Location").max(20),
        ]);
        for event in &summary.next_events {
            table.push(vec![
                event.name.clone(),
                event.date.format("%b %-d, %Y").to_string(),
                event.time_range(),
                event.location.clone(),
            ]);
        }
        context.output.table(&table);
    }
    Ok(())
}
