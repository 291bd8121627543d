/// Sidebar entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub route: &'static str,
    /// Shell command that opens the page.
    pub command: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { title: "Dashboard", route: "/", command: "dashboard" },
    NavItem { title: "Members", route: "/members", command: "members" },
    NavItem { title: "Events", route: "/events", command: "events" },
    NavItem { title: "Donations", route: "/donations", command: "donations" },
    NavItem { title: "Messages", route: "/messages", command: "messages" },
    NavItem { title: "Settings", route: "/settings", command: "config show" },
];

/// Looks up an entry by title or route, ignoring case and a leading `/`.
pub fn find(raw: &str) -> Option<&'static NavItem> {
    let needle = raw.trim().trim_start_matches('/');
    NAV_ITEMS.iter().find(|item| {
        item.title.eq_ignore_ascii_case(needle)
            || item.route.trim_start_matches('/').eq_ignore_ascii_case(needle)
    })
}

pub fn for_route(route: &str) -> Option<&'static NavItem> {
    NAV_ITEMS.iter().find(|item| item.route == route)
}

/// Sidebar text: full titles, or initials when collapsed. The active route is marked.
pub fn sidebar_lines(active: &str, collapsed: bool) -> Vec<String> {
    NAV_ITEMS
        .iter()
        .map(|item| {
            let marker = if item.route == active { ">" } else { " " };
            if collapsed {
                format!("{marker} {}", &item.title[..1])
            } else {
                format!("{marker} {}", item.title)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_title_or_route() {
        assert_eq!(find("members").map(|item| item.route), Some("/members"));
        assert_eq!(find("/donations").map(|item| item.title), Some("Donations"));
        assert_eq!(find("dashboard").map(|item| item.route), Some("/"));
        assert!(find("reports").is_none());
    }

    #[test]
    fn collapsed_sidebar_shows_initials() {
        let lines = sidebar_lines("/events", true);
        assert_eq!(lines[2], "> E");
        assert_eq!(sidebar_lines("/", false)[0], "> Dashboard");
    }
}
