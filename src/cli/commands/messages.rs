use crate::cli::core::{CommandError, CommandResult};
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn};
use crate::directory::{ListingQuery, MessageQuery, MessageTab};
use crate::domain::{PageRequest, WireEnum};
use crate::forms::{MessageForm, RecordMapping};
use crate::sync::SyncMode;

use super::{run_record_form, Args, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "messages",
            "List messages",
            "messages [--tab inbox|sent|prayer] [--search TEXT]",
            cmd_messages,
        ),
        CommandDefinition::new("message", "Compose a message", "message compose", cmd_message),
    ]
}

fn cmd_messages(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = Args::parse(args, &["tab", "search"])?;
    let tab = args
        .choice("tab", "inbox, sent, prayer", MessageTab::parse)?
        .unwrap_or_default();
    let query = MessageQuery::new(args.flag("search"), tab, context.config.display_name.as_str());

    let store = context.stores.messages.clone();
    let listing = context.block_on(store.list(PageRequest::first(context.config.page_size)))?;
    context.route = MessageForm::LISTING_ROUTE;

    context.output.section("Messages");
    let rows = query.apply(&listing.items);
    if rows.is_empty() {
        context.output.info("No messages found.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left(""),
        TableColumn::left("From").max(20),
        TableColumn::left("Subject").max(28),
        TableColumn::left("Preview").max(40),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
    ]);
    for message in rows {
        let mut marker = if message.read { " " } else { "*" }.to_string();
        if !message.attachments.is_empty() {
            marker.push('@');
        }
        table.push(vec![
            marker,
            message.sender.clone(),
            message.subject.clone(),
            message.preview.clone(),
            message.date.format("%b %-d, %Y").to_string(),
            message.message_type.label().to_string(),
        ]);
    }
    context.output.table(&table);
    Ok(())
}

fn cmd_message(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["compose"] => {
            let store = context.stores.messages.clone();
            let record = MessageForm::defaults_from(&context.config.display_name);
            run_record_form::<MessageForm>(context, store, SyncMode::Create, record)
        }
        _ => Err(CommandError::usage("message compose")),
    }
}
