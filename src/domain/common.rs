use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::errors::{CommunityError, Result};

/// Entities that may carry a server-assigned identifier.
pub trait Identifiable {
    /// Identifier as reported by the record itself, if any.
    fn id(&self) -> Option<&str>;

    fn assign_id(&mut self, id: String);

    /// Working identifier: the record's own id, else the id the caller
    /// used when addressing it.
    fn resolve_id(&self, requested: &str) -> String {
        self.id()
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| requested.to_string())
    }
}

/// Supplies a presentation-ready label for listings and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Names under which a record type is exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceNames {
    /// Path segment for listing and fetching (`members`, `members/{id}`).
    pub collection: &'static str,
    /// Path segment for create and update (`member`).
    pub item: &'static str,
    /// Human noun used in messages.
    pub label: &'static str,
}

pub trait Resource {
    const NAMES: ResourceNames;
}

/// Enumerations with a fixed backend spelling and a human label.
pub trait WireEnum: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_wire(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_wire() == raw)
    }

    /// Accepts either the wire spelling or the label, ignoring case.
    fn parse_loose(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL.iter().copied().find(|candidate| {
            candidate.as_wire().eq_ignore_ascii_case(needle)
                || candidate.label().eq_ignore_ascii_case(needle)
        })
    }
}

/// Zero-based page request, matching the backend's `page`/`size` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(10)
    }
}

/// One page of records with the totals needed to drive pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            items,
            number: request.page,
            size: request.size,
            total_elements,
            total_pages: pages_for(total_elements, request.size),
        }
    }

    /// Slices an in-memory collection into the requested page.
    pub fn slice(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        let items = all
            .iter()
            .skip(request.offset())
            .take(request.size as usize)
            .cloned()
            .collect();
        Self::new(items, request, all.len() as u64)
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

fn pages_for(total: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size as u64) as u32
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMetadata {
    #[serde(default)]
    size: Option<u32>,
    #[serde(default)]
    number: Option<u32>,
    total_elements: u64,
    #[serde(default)]
    total_pages: Option<u32>,
}

/// The listing shapes the backend has been observed to return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Nested {
        content: Vec<T>,
        page: PageMetadata,
    },
    Flat {
        content: Vec<T>,
        #[serde(flatten)]
        page: PageMetadata,
    },
    Bare(Vec<T>),
}

impl<T: DeserializeOwned> Page<T> {
    /// Decodes a listing body in either pagination envelope, or a bare array.
    pub fn from_json(body: &str, request: PageRequest) -> Result<Self> {
        let envelope: Envelope<T> = serde_json::from_str(body)
            .map_err(|err| CommunityError::Decode(format!("unrecognised listing body: {err}")))?;
        Ok(match envelope {
            Envelope::Nested { content, page } | Envelope::Flat { content, page } => {
                let size = page.size.unwrap_or(request.size).max(1);
                Page {
                    total_pages: page
                        .total_pages
                        .unwrap_or_else(|| pages_for(page.total_elements, size)),
                    number: page.number.unwrap_or(request.page),
                    size,
                    total_elements: page.total_elements,
                    items: content,
                }
            }
            Envelope::Bare(items) => {
                let total = items.len() as u64;
                let size = (items.len() as u32).max(1);
                Page {
                    items,
                    number: 0,
                    size,
                    total_elements: total,
                    total_pages: pages_for(total, size),
                }
            }
        })
    }
}

/// Accepts identifiers encoded as strings or numbers; blank strings become `None`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw
        .map(|value| match value {
            RawId::Text(text) => text.trim().to_string(),
            RawId::Integer(number) => number.to_string(),
            RawId::Float(number) => number.to_string(),
        })
        .filter(|id| !id.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        name: String,
    }

    #[test]
    fn nested_envelope_reads_page_total() {
        let body = r#"{"content":[{"name":"a"},{"name":"b"}],
            "page":{"size":2,"number":0,"totalElements":5,"totalPages":3}}"#;
        let page: Page<Row> = Page::from_json(body, PageRequest::first(2)).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
    }

    #[test]
    fn flat_envelope_reads_top_level_total() {
        let body = r#"{"content":[{"name":"a"}],"totalPages":4,"number":3,"size":1,"totalElements":4}"#;
        let page: Page<Row> = Page::from_json(body, PageRequest::first(1)).unwrap();
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.number, 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn flat_envelope_without_page_count_derives_it() {
        let body = r#"{"content":[],"totalElements":21}"#;
        let page: Page<Row> = Page::from_json(body, PageRequest::new(1, 10)).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn bare_array_is_a_single_page() {
        let page: Page<Row> = Page::from_json(r#"[{"name":"x"}]"#, PageRequest::default()).unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn unrelated_body_is_a_decode_error() {
        let err = Page::<Row>::from_json(r#"{"items":[]}"#, PageRequest::default()).unwrap_err();
        assert!(matches!(err, CommunityError::Decode(_)));
    }

    #[test]
    fn slice_reports_totals() {
        let all: Vec<u32> = (0..7).collect();
        let page = Page::slice(&all, PageRequest::new(1, 3));
        assert_eq!(page.items, vec![3, 4, 5]);
        assert_eq!(page.total_pages, 3);
    }
}
