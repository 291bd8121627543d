use crate::cli::core::{CommandError, CommandResult};
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn};
use crate::directory::{ListingQuery, MemberQuery, Paginator, StatusFilter};
use crate::domain::{MemberRecord, WireEnum};
use crate::forms::{MemberForm, RecordMapping};
use crate::sync::{load_failure_notice, RecordSync, SyncMode};

use super::{run_record_form, Args, CommandDefinition};

const MEMBER_USAGE: &str = "member show <id> | member add | member edit <id>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "members",
            "List members",
            "members [--page N] [--size N] [--search TEXT] [--status all|active|inactive|pending]",
            cmd_members,
        ),
        CommandDefinition::new("member", "Show, add or edit a member", MEMBER_USAGE, cmd_member),
    ]
}

fn cmd_members(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = Args::parse(args, &["page", "size", "search", "status"])?;
    let size = args.number("size")?.unwrap_or(context.config.page_size);
    let page = args.number("page")?.unwrap_or(1).max(1) - 1;
    let status = args
        .choice("status", "all, active, inactive, pending", StatusFilter::parse)?
        .unwrap_or_default();
    let query = MemberQuery::new(args.flag("search"), status);

    let mut pager = Paginator::at(page, size);
    let store = context.stores.members.clone();
    let listing = context.block_on(store.list(pager.request()))?;
    pager.observe(&listing);
    context.route = MemberForm::LISTING_ROUTE;

    context.output.section("Members");
    let rows = query.apply(&listing.items);
    if rows.is_empty() {
        context.output.info("No members found.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::right("ID"),
            TableColumn::left("Name").max(28),
            TableColumn::left("Email").max(30),
            TableColumn::left("Phone"),
            TableColumn::left("Status"),
            TableColumn::left("Joined"),
        ]);
        for member in rows {
            table.push(vec![
                member.id.clone().unwrap_or_default(),
                member.full_name(),
                member.email_address.clone(),
                member.primary_phone.clone(),
                member.status().label().to_string(),
                member.joined_on().unwrap_or("-").to_string(),
            ]);
        }
        context.output.table(&table);
    }
    context.output.info(format!(
        "{} ({} members)",
        pager.label(),
        listing.total_elements
    ));
    Ok(())
}

fn cmd_member(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["show", id] => show_member(context, id),
        ["add"] => {
            let store = context.stores.members.clone();
            run_record_form::<MemberForm>(context, store, SyncMode::Create, MemberForm::defaults())
        }
        ["edit", id] => edit_member(context, id),
        _ => Err(CommandError::usage(MEMBER_USAGE)),
    }
}

fn show_member(context: &mut ShellContext, id: &str) -> CommandResult {
    let store = context.stores.members.clone();
    let member = context.block_on(store.get(id))?;
    context.output.section(member.full_name());
    for (label, value) in detail_lines(&member) {
        context.output.line(format!("  {label:<20} {value}"));
    }
    Ok(())
}

fn detail_lines(member: &MemberRecord) -> Vec<(&'static str, String)> {
    let or_dash = |value: Option<&str>| {
        value
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("-")
            .to_string()
    };
    let list = |items: &Option<Vec<String>>| match items.as_deref() {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => "-".to_string(),
    };
    vec![
        ("Email", member.email_address.clone()),
        ("Phone", member.primary_phone.clone()),
        ("Address", or_dash(Some(member.residing_address.as_str()))),
        ("Gender", or_dash(member.gender.map(|g| g.label()))),
        ("Marital status", or_dash(member.marital_status.map(|m| m.label()))),
        ("Emergency contact", or_dash(Some(member.emergency_contact.as_str()))),
        ("Joined", or_dash(member.joined_on())),
        ("Last attendance", or_dash(member.last_attendance.as_deref())),
        ("Status", member.status().label().to_string()),
        ("Baptized", if member.is_baptized() { "yes" } else { "no" }.to_string()),
        ("Ministries", list(&member.ministries_of_interest)),
        ("Skills", list(&member.skills)),
        ("Notes", or_dash(member.notes.as_deref())),
    ]
}

fn edit_member(context: &mut ShellContext, id: &str) -> CommandResult {
    let store = context.stores.members.clone();
    let loader = RecordSync::<MemberForm>::for_update(store.clone(), id);
    let session = match context.block_on(loader.load(id)) {
        Ok(session) => session,
        Err(err) => {
            context.output.notice(&load_failure_notice(&err));
            context.navigate(MemberForm::LISTING_ROUTE);
            return Ok(());
        }
    };
    context.output.info(format!("Editing member #{}.", session.id));
    run_record_form::<MemberForm>(
        context,
        store,
        SyncMode::Update { id: session.id },
        session.record,
    )
}
