use crate::cli::core::{CommandError, CommandResult};
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn};
use crate::directory::{category_totals, DonationQuery, DonationTab};
use crate::domain::{format_usd, Displayable, PageRequest};
use crate::forms::{DonationForm, RecordMapping};
use crate::sync::SyncMode;

use super::{run_record_form, Args, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "donations",
            "List donations",
            "donations [--tab all|recent|categories] [--search TEXT]",
            cmd_donations,
        ),
        CommandDefinition::new("donation", "Record a donation", "donation add", cmd_donation),
    ]
}

fn cmd_donations(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = Args::parse(args, &["tab", "search"])?;
    let tab = args
        .choice("tab", "all, recent, categories", DonationTab::parse)?
        .unwrap_or_default();
    let query = DonationQuery::new(args.flag("search"), tab);

    let store = context.stores.donations.clone();
    let listing = context.block_on(store.list(PageRequest::first(context.config.page_size)))?;
    context.route = DonationForm::LISTING_ROUTE;

    context.output.section("Donations");
    let rows = query.rows(&listing.items);
    let total: f64 = rows.iter().map(|donation| donation.amount).sum();

    if tab == DonationTab::Categories {
        let mut table = Table::new(vec![TableColumn::left("Category"), TableColumn::right("Total")]);
        for (category, amount) in category_totals(rows.iter().copied()) {
            table.push(vec![category, format_usd(amount)]);
        }
        context.output.table(&table);
    } else if rows.is_empty() {
        context.output.info("No donations found.");
        return Ok(());
    } else {
        let mut table = Table::new(vec![
            TableColumn::right("ID"),
            TableColumn::left("Donor").max(24),
            TableColumn::right("Amount"),
            TableColumn::left("Date"),
            TableColumn::left("Method"),
            TableColumn::left("Category"),
        ]);
        for donation in &rows {
            table.push(vec![
                donation.id.clone().unwrap_or_default(),
                donation.donor.clone(),
                donation.formatted_amount(),
                donation.date.format("%b %-d, %Y").to_string(),
                donation.method.clone(),
                donation.category.clone(),
            ]);
        }
        context.output.table(&table);
        if let Some(largest) = rows
            .iter()
            .max_by(|a, b| a.amount.total_cmp(&b.amount))
        {
            context
                .output
                .info(format!("Largest: {}", largest.display_label()));
        }
    }
    context.output.info(format!("Total: {}", format_usd(total)));
    Ok(())
}

fn cmd_donation(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["add"] => {
            let store = context.stores.donations.clone();
            run_record_form::<DonationForm>(context, store, SyncMode::Create, DonationForm::defaults())
        }
        _ => Err(CommandError::usage("donation add")),
    }
}
