use crate::cli::core::{CommandError, CommandResult};
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn};
use crate::directory::{EventQuery, EventTab, ListingQuery};
use crate::domain::{PageRequest, WireEnum};
use crate::forms::{EventForm, RecordMapping};
use crate::sync::SyncMode;

use super::{run_record_form, Args, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "events",
            "List events",
            "events [--tab upcoming|past|canceled|all] [--search TEXT]",
            cmd_events,
        ),
        CommandDefinition::new("event", "Create an event", "event add", cmd_event),
    ]
}

fn cmd_events(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = Args::parse(args, &["tab", "search"])?;
    let tab = args
        .choice("tab", "upcoming, past, canceled, all", EventTab::parse)?
        .unwrap_or_default();
    let query = EventQuery::new(args.flag("search"), tab);

    let store = context.stores.events.clone();
    let listing = context.block_on(store.list(PageRequest::first(context.config.page_size)))?;
    context.route = EventForm::LISTING_ROUTE;

    context.output.section("Events");
    let rows = query.apply(&listing.items);
    if rows.is_empty() {
        context.output.info("No events found.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Name").max(24),
        TableColumn::left("Date"),
        TableColumn::left("Time"),
        TableColumn::left("Location").max(20),
        TableColumn::right("Attendees"),
        TableColumn::left("Status"),
    ]);
    for event in rows {
        table.push(vec![
            event.id.clone().unwrap_or_default(),
            event.name.clone(),
            event.date.format("%b %-d, %Y").to_string(),
            event.time_range(),
            event.location.clone(),
            event.attendance_label(),
            event.status.label().to_string(),
        ]);
    }
    context.output.table(&table);
    Ok(())
}

fn cmd_event(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["add"] => {
            let store = context.stores.events.clone();
            run_record_form::<EventForm>(context, store, SyncMode::Create, EventForm::defaults())
        }
        _ => Err(CommandError::usage("event add")),
    }
}
