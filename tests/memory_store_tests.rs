mod common;

use std::time::{Duration, Instant};

use community_core::{
    directory::{ListingQuery, MemberQuery, Paginator, StatusFilter},
    domain::{Event, Identifiable, MemberRecord, PageRequest},
    errors::CommunityError,
    storage::{InMemoryStore, RecordStore},
};

#[tokio::test]
async fn pages_through_seeded_members() {
    let store = common::seeded::<MemberRecord>();
    let mut pager = Paginator::new(2);
    let mut seen = Vec::new();
    loop {
        let page = store.list(pager.request()).await.unwrap();
        pager.observe(&page);
        seen.extend(page.items.iter().filter_map(|m| m.id().map(str::to_string)));
        if !pager.next() {
            break;
        }
    }
    assert_eq!(seen, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(pager.label(), "Page 3 of 3");
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let store = common::seeded::<MemberRecord>();
    let page = store.list(PageRequest::new(4, 2)).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 5);
    assert!(!page.has_next());
}

#[tokio::test]
async fn filters_apply_to_the_fetched_page() {
    let store = common::seeded::<MemberRecord>();
    let page = store.list(PageRequest::first(10)).await.unwrap();
    let inactive = MemberQuery::new(None, StatusFilter::parse("inactive").unwrap()).apply(&page.items);
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].full_name(), "Carol Williams");
}

#[tokio::test]
async fn create_continues_the_numeric_ids() {
    let store = common::seeded::<Event>();
    let mut event = store.get("1").await.unwrap();
    event.id = None;
    event.name = "Advent Concert".into();

    let saved = store.create(&event).await.unwrap();
    assert_eq!(saved.id(), Some("6"));
    assert_eq!(store.get("6").await.unwrap().name, "Advent Concert");
    assert_eq!(store.len().await, 6);
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let store = common::seeded::<Event>();
    let event = store.get("2").await.unwrap();
    let err = store.update("42", &event).await.unwrap_err();
    assert!(matches!(err, CommunityError::NotFound(_)));
}

#[tokio::test]
async fn latency_is_applied_to_every_call() {
    let store = InMemoryStore::<MemberRecord>::seeded(Duration::from_millis(30));
    let started = Instant::now();
    store.get("1").await.unwrap();
    store.list(PageRequest::first(5)).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(60));
}
