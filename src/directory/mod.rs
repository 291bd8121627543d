//! Search, tab and pagination state for the listing pages.

use indexmap::IndexMap;

use crate::domain::{Donation, Event, EventStatus, MemberRecord, MemberStatus, Message, MessageType, Page, PageRequest};

/// Filter applied client-side to a fetched page of records.
pub trait ListingQuery<T> {
    fn matches(&self, item: &T) -> bool;

    fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

fn needle(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(MemberStatus),
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Some(StatusFilter::All);
        }
        MemberStatus::parse(raw).map(StatusFilter::Only)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    search: Option<String>,
    pub status: StatusFilter,
}

impl MemberQuery {
    pub fn new(search: Option<&str>, status: StatusFilter) -> Self {
        Self {
            search: needle(search),
            status,
        }
    }
}

impl ListingQuery<MemberRecord> for MemberQuery {
    /// Name and email match case-insensitively; phone numbers match as typed.
    fn matches(&self, member: &MemberRecord) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => member.status() == status,
        };
        let search_ok = match &self.search {
            None => true,
            Some(term) => {
                contains_folded(&member.full_name(), term)
                    || contains_folded(&member.email_address, term)
                    || member.primary_phone.contains(term.as_str())
            }
        };
        status_ok && search_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTab {
    #[default]
    Upcoming,
    Past,
    Canceled,
    All,
}

impl EventTab {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Some(EventTab::Upcoming),
            "past" => Some(EventTab::Past),
            "canceled" | "cancelled" => Some(EventTab::Canceled),
            "all" => Some(EventTab::All),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    search: Option<String>,
    pub tab: EventTab,
}

impl EventQuery {
    pub fn new(search: Option<&str>, tab: EventTab) -> Self {
        Self {
            search: needle(search),
            tab,
        }
    }
}

impl ListingQuery<Event> for EventQuery {
    fn matches(&self, event: &Event) -> bool {
        let tab_ok = match self.tab {
            EventTab::All => true,
            EventTab::Upcoming => event.status == EventStatus::Upcoming,
            EventTab::Past => event.status == EventStatus::Past,
            EventTab::Canceled => event.status == EventStatus::Canceled,
        };
        tab_ok
            && self.search.as_deref().map_or(true, |term| {
                contains_folded(&event.name, term) || contains_folded(&event.location, term)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DonationTab {
    #[default]
    All,
    /// The first few donations of the filtered list.
    Recent,
    /// Totals per category instead of rows.
    Categories,
}

impl DonationTab {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Some(DonationTab::All),
            "recent" => Some(DonationTab::Recent),
            "categories" | "category" => Some(DonationTab::Categories),
            _ => None,
        }
    }
}

pub const RECENT_DONATIONS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct DonationQuery {
    search: Option<String>,
    pub tab: DonationTab,
}

impl DonationQuery {
    pub fn new(search: Option<&str>, tab: DonationTab) -> Self {
        Self {
            search: needle(search),
            tab,
        }
    }

    /// Rows for the `all` and `recent` tabs.
    pub fn rows<'a>(&self, donations: &'a [Donation]) -> Vec<&'a Donation> {
        let mut rows = self.apply(donations);
        if self.tab == DonationTab::Recent {
            rows.truncate(RECENT_DONATIONS);
        }
        rows
    }
}

impl ListingQuery<Donation> for DonationQuery {
    fn matches(&self, donation: &Donation) -> bool {
        self.search.as_deref().map_or(true, |term| {
            contains_folded(&donation.donor, term)
                || contains_folded(&donation.category, term)
                || contains_folded(&donation.method, term)
        })
    }
}

/// Sum of amounts per category, in first-seen order.
pub fn category_totals<'a>(donations: impl IntoIterator<Item = &'a Donation>) -> Vec<(String, f64)> {
    let mut totals: IndexMap<String, f64> = IndexMap::new();
    for donation in donations {
        *totals.entry(donation.category.clone()).or_default() += donation.amount;
    }
    totals.into_iter().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageTab {
    #[default]
    Inbox,
    Sent,
    Prayer,
}

impl MessageTab {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inbox" => Some(MessageTab::Inbox),
            "sent" => Some(MessageTab::Sent),
            "prayer" | "prayers" => Some(MessageTab::Prayer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageQuery {
    search: Option<String>,
    pub tab: MessageTab,
    /// Sender name that counts as "sent by me".
    pub display_name: String,
}

impl MessageQuery {
    pub fn new(search: Option<&str>, tab: MessageTab, display_name: impl Into<String>) -> Self {
        Self {
            search: needle(search),
            tab,
            display_name: display_name.into(),
        }
    }
}

impl ListingQuery<Message> for MessageQuery {
    fn matches(&self, message: &Message) -> bool {
        let tab_ok = match self.tab {
            MessageTab::Inbox => true,
            MessageTab::Sent => message.sender == self.display_name,
            MessageTab::Prayer => message.message_type == MessageType::Prayer,
        };
        tab_ok
            && self.search.as_deref().map_or(true, |term| {
                contains_folded(&message.sender, term)
                    || contains_folded(&message.subject, term)
                    || contains_folded(&message.preview, term)
            })
    }
}

/// Rows shown in each dashboard preview list.
pub const DASHBOARD_PREVIEW: usize = 3;

/// Overview figures across the four stores.
#[derive(Debug, Clone)]
pub struct DashboardSummary<'a> {
    pub total_members: u64,
    pub upcoming_events: usize,
    pub donation_total: f64,
    pub unread_messages: usize,
    /// Latest joiners first; members without a join date are left out.
    pub newest_members: Vec<&'a MemberRecord>,
    /// Soonest upcoming events first.
    pub next_events: Vec<&'a Event>,
}

impl<'a> DashboardSummary<'a> {
    pub fn build(
        members: &'a Page<MemberRecord>,
        events: &'a [Event],
        donations: &[Donation],
        messages: &[Message],
    ) -> Self {
        let mut newest_members: Vec<&MemberRecord> = members
            .items
            .iter()
            .filter(|member| member.joined_on().is_some())
            .collect();
        newest_members.sort_by(|a, b| b.joined_on().cmp(&a.joined_on()));
        newest_members.truncate(DASHBOARD_PREVIEW);

        let mut next_events = EventQuery::new(None, EventTab::Upcoming).apply(events);
        let upcoming_events = next_events.len();
        next_events.sort_by_key(|event| event.date);
        next_events.truncate(DASHBOARD_PREVIEW);

        Self {
            total_members: members.total_elements,
            upcoming_events,
            donation_total: category_totals(donations).iter().map(|(_, amount)| amount).sum(),
            unread_messages: messages.iter().filter(|message| !message.read).count(),
            newest_members,
            next_events,
        }
    }
}

/// Page cursor for a listing. Moves are clamped to the last known page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: u32,
    size: u32,
    total_pages: u32,
}

impl Paginator {
    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size: size.max(1),
            total_pages: 0,
        }
    }

    /// Cursor on a zero-based `page`; clamped once totals are observed.
    pub fn at(page: u32, size: u32) -> Self {
        Self {
            page,
            ..Self::new(size)
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    /// Records the totals reported with a fetched page.
    pub fn observe<T>(&mut self, page: &Page<T>) {
        self.total_pages = page.total_pages;
        self.page = page.number.min(self.last_page());
    }

    fn last_page(&self) -> u32 {
        self.total_pages.saturating_sub(1)
    }

    pub fn jump(&mut self, page: u32) {
        self.page = page.min(self.last_page());
    }

    /// Returns `false` when already on the last page.
    pub fn next(&mut self) -> bool {
        if self.page + 1 < self.total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// One-based "Page x of y" label.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Seeded;

    fn names<'a>(members: &[&'a MemberRecord]) -> Vec<&'a str> {
        members.iter().map(|m| m.first_name.as_str()).collect()
    }

    #[test]
    fn member_search_and_status() {
        let members = MemberRecord::seed();
        let query = MemberQuery::new(Some("  SMITH "), StatusFilter::All);
        assert_eq!(names(&query.apply(&members)), vec!["Bob"]);

        let query = MemberQuery::new(Some("(555) 345"), StatusFilter::All);
        assert_eq!(names(&query.apply(&members)), vec!["Carol"]);

        let pending = StatusFilter::parse("pending").unwrap();
        assert_eq!(names(&MemberQuery::new(None, pending).apply(&members)), vec!["Eva"]);
        assert!(StatusFilter::parse("archived").is_none());
    }

    #[test]
    fn event_tabs() {
        let events = Event::seed();
        assert_eq!(EventQuery::default().apply(&events).len(), 3);
        assert_eq!(EventQuery::new(None, EventTab::Past).apply(&events).len(), 2);
        assert!(EventQuery::new(None, EventTab::Canceled).apply(&events).is_empty());
        let hall = EventQuery::new(Some("hall"), EventTab::All).apply(&events);
        assert_eq!(hall.len(), 1);
        assert_eq!(hall[0].name, "Weekly Meeting");
    }

    #[test]
    fn donation_recent_and_totals() {
        let donations = Donation::seed();
        let recent = DonationQuery::new(None, DonationTab::Recent).rows(&donations);
        assert_eq!(recent.len(), RECENT_DONATIONS);

        let card = DonationQuery::new(Some("credit"), DonationTab::All).rows(&donations);
        assert_eq!(card.len(), 2);

        let totals = category_totals(&donations);
        assert_eq!(totals[0], ("General Fund".to_string(), 175.0));
        assert_eq!(totals.len(), 4);
    }

    #[test]
    fn message_tabs() {
        let messages = Message::seed();
        let prayer = MessageQuery::new(None, MessageTab::Prayer, "Admin").apply(&messages);
        assert_eq!(prayer.len(), 1);
        assert_eq!(prayer[0].sender, "Bob Smith");

        assert!(MessageQuery::new(None, MessageTab::Sent, "Admin").apply(&messages).is_empty());
        let sent = MessageQuery::new(None, MessageTab::Sent, "Eva Martinez").apply(&messages);
        assert_eq!(sent.len(), 1);

        let search = MessageQuery::new(Some("volunteer"), MessageTab::Inbox, "Admin").apply(&messages);
        assert_eq!(search.len(), 1);
    }

    #[test]
    fn dashboard_overview_from_seed() {
        let members = Page::slice(&MemberRecord::seed(), PageRequest::first(10));
        let events = Event::seed();
        let donations = Donation::seed();
        let messages = Message::seed();

        let summary = DashboardSummary::build(&members, &events, &donations, &messages);
        assert_eq!(summary.total_members, 5);
        assert_eq!(summary.upcoming_events, 3);
        assert_eq!(summary.donation_total, 975.0);
        assert_eq!(summary.unread_messages, 2);
        assert_eq!(names(&summary.newest_members), vec!["Eva", "David", "Bob"]);
        let next: Vec<&str> = summary.next_events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(next, vec!["Weekly Meeting", "Volunteer Day", "Fundraising Dinner"]);
    }

    #[test]
    fn paginator_clamps() {
        let mut pager = Paginator::new(2);
        assert!(!pager.next());
        let page = Page::slice(&MemberRecord::seed(), pager.request());
        pager.observe(&page);
        assert_eq!(pager.total_pages(), 3);
        assert!(pager.next());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.label(), "Page 3 of 3");
        pager.jump(10);
        assert_eq!(pager.page(), 2);
        assert!(pager.previous());
        assert_eq!(pager.request(), PageRequest::new(1, 2));
    }
}
