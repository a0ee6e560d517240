//! Filtered, paginated ticket queries.
//!
//! All filters combine with logical AND and are evaluated in memory against
//! a project's tickets. Ordering is `updated_at` descending with ticket id
//! ascending as the tie-break, so pagination is deterministic. Substring
//! matching (`assignee`, `search`) is byte-wise case-sensitive
//! (`str::contains`); this is the documented implementation choice and is
//! the same for every storage backend.

use serde::{Deserialize, Serialize};

use crate::domain::{Priority, Status, Ticket};

/// Hard upper bound on page size, enforced regardless of caller input.
pub const MAX_PAGE_SIZE: usize = 200;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Filter and pagination parameters for listing tickets.
///
/// Malformed pagination is normalized rather than rejected: `page` clamps
/// to at least 1 and `page_size` to `[1, MAX_PAGE_SIZE]`. Enum fields are
/// already validated by the boundary layer (CLI or HTTP parsing) before a
/// filter is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketFilter {
    /// Exact status match
    pub status: Option<Status>,
    /// Exact priority match
    pub priority: Option<Priority>,
    /// Substring match against the assignee; unassigned tickets never match
    pub assignee: Option<String>,
    /// Substring match against title or description
    pub search: Option<String>,
    /// 1-based page number
    pub page: usize,
    /// Items per page
    pub page_size: usize,
}

impl Default for TicketFilter {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            assignee: None,
            search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the total match count before pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl TicketFilter {
    /// Effective page after clamping.
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Effective page size after clamping.
    pub fn page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Check whether a single ticket matches every supplied filter.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(status) = self.status {
            if ticket.status() != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if ticket.priority() != priority {
                return false;
            }
        }
        if let Some(ref assignee) = self.assignee {
            if !assignee.is_empty() {
                match ticket.assignee() {
                    Some(a) if a.contains(assignee.as_str()) => {}
                    _ => return false,
                }
            }
        }
        if let Some(ref search) = self.search {
            if !search.is_empty() {
                let in_title = ticket.title().contains(search.as_str());
                let in_description = ticket
                    .description()
                    .map(|d| d.contains(search.as_str()))
                    .unwrap_or(false);
                if !in_title && !in_description {
                    return false;
                }
            }
        }
        true
    }

    /// Filter, order, and paginate a set of tickets.
    ///
    /// `total` counts matches before pagination; a page beyond the result
    /// set yields empty items, not an error.
    pub fn apply(&self, tickets: Vec<Ticket>) -> PagedResult<Ticket> {
        let mut matched: Vec<Ticket> = tickets.into_iter().filter(|t| self.matches(t)).collect();

        matched.sort_by(|a, b| {
            b.updated_at()
                .cmp(&a.updated_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        let total = matched.len();
        let page = self.page();
        let page_size = self.page_size();

        let items = matched
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        PagedResult {
            items,
            total,
            page,
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn ticket(title: &str) -> Ticket {
        Ticket::create("proj-1", title, None, Priority::Medium).unwrap()
    }

    fn ticket_at(id: &str, minutes_ago: i64) -> Ticket {
        let mut t = ticket("Filterable ticket");
        t.set_id_for_test(id);
        t.set_updated_at_for_test(Utc::now() - Duration::minutes(minutes_ago));
        t
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TicketFilter::default();
        assert!(filter.matches(&ticket("Fix login bug")));
    }

    #[test]
    fn test_status_filter_excludes_other_statuses() {
        let mut resolved = ticket("Resolved ticket");
        resolved.change_status(Status::InProgress).unwrap();
        resolved.change_status(Status::Resolved).unwrap();

        let filter = TicketFilter {
            status: Some(Status::New),
            ..Default::default()
        };
        assert!(!filter.matches(&resolved));
        assert!(filter.matches(&ticket("Still new")));
    }

    #[test]
    fn test_priority_filter() {
        let high = Ticket::create("p", "High priority", None, Priority::High).unwrap();
        let filter = TicketFilter {
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert!(filter.matches(&high));
        assert!(!filter.matches(&ticket("Medium by default")));
    }

    #[test]
    fn test_unassigned_never_matches_assignee_filter() {
        let filter = TicketFilter {
            assignee: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&ticket("Nobody owns this")));

        let mut owned = ticket("Owned ticket");
        owned.assign("alice@example.com").unwrap();
        assert!(filter.matches(&owned));
    }

    #[test]
    fn test_assignee_substring_is_case_sensitive() {
        let mut t = ticket("Owned ticket");
        t.assign("Alice").unwrap();

        let lower = TicketFilter {
            assignee: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(!lower.matches(&t));

        let exact = TicketFilter {
            assignee: Some("Ali".to_string()),
            ..Default::default()
        };
        assert!(exact.matches(&t));
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let with_desc =
            Ticket::create("p", "Fix login bug", Some("users can't log in"), Priority::Low)
                .unwrap();

        let title_hit = TicketFilter {
            search: Some("login".to_string()),
            ..Default::default()
        };
        assert!(title_hit.matches(&with_desc));

        let desc_hit = TicketFilter {
            search: Some("users".to_string()),
            ..Default::default()
        };
        assert!(desc_hit.matches(&with_desc));

        let miss = TicketFilter {
            search: Some("payments".to_string()),
            ..Default::default()
        };
        assert!(!miss.matches(&with_desc));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut t = Ticket::create("p", "Fix login bug", None, Priority::High).unwrap();
        t.assign("alice").unwrap();

        let both = TicketFilter {
            priority: Some(Priority::High),
            assignee: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(both.matches(&t));

        let mismatched = TicketFilter {
            priority: Some(Priority::Low),
            assignee: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(!mismatched.matches(&t));
    }

    #[test]
    fn test_ordering_most_recently_updated_first() {
        let tickets = vec![ticket_at("a", 30), ticket_at("b", 10), ticket_at("c", 20)];
        let result = TicketFilter::default().apply(tickets);
        let ids: Vec<&str> = result.items.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ordering_ties_broken_by_id_ascending() {
        let at = Utc::now();
        let mut tickets = vec![ticket_at("c", 0), ticket_at("a", 0), ticket_at("b", 0)];
        for t in &mut tickets {
            t.set_updated_at_for_test(at);
        }
        let result = TicketFilter::default().apply(tickets);
        let ids: Vec<&str> = result.items.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pagination_shape() {
        let tickets: Vec<Ticket> = (0..25).map(|i| ticket_at(&format!("t{:02}", i), i)).collect();

        let page1 = TicketFilter {
            page: 1,
            page_size: 10,
            ..Default::default()
        }
        .apply(tickets.clone());
        assert_eq!(page1.items.len(), 10);
        assert_eq!(page1.total, 25);

        let page3 = TicketFilter {
            page: 3,
            page_size: 10,
            ..Default::default()
        }
        .apply(tickets.clone());
        assert_eq!(page3.items.len(), 5);
        assert_eq!(page3.total, 25);

        let page4 = TicketFilter {
            page: 4,
            page_size: 10,
            ..Default::default()
        }
        .apply(tickets);
        assert_eq!(page4.items.len(), 0);
        assert_eq!(page4.total, 25);
    }

    #[test]
    fn test_pages_do_not_overlap() {
        let tickets: Vec<Ticket> = (0..25).map(|i| ticket_at(&format!("t{:02}", i), i)).collect();

        let mut seen = Vec::new();
        for page in 1..=3 {
            let result = TicketFilter {
                page,
                page_size: 10,
                ..Default::default()
            }
            .apply(tickets.clone());
            seen.extend(result.items.iter().map(|t| t.id().to_string()));
        }
        let mut deduped = seen.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(seen.len(), 25);
        assert_eq!(deduped.len(), 25);
    }

    #[test]
    fn test_page_and_page_size_clamped() {
        let filter = TicketFilter {
            page: 0,
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.page_size(), 1);

        let oversized = TicketFilter {
            page_size: 10_000,
            ..Default::default()
        };
        assert_eq!(oversized.page_size(), MAX_PAGE_SIZE);

        let result = oversized.apply(vec![ticket("Fix login bug")]);
        assert_eq!(result.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_total_counts_matches_not_page() {
        let mut tickets: Vec<Ticket> = (0..5).map(|i| ticket_at(&format!("t{}", i), i)).collect();
        for t in tickets.iter_mut().take(3) {
            t.assign("alice").unwrap();
        }

        let result = TicketFilter {
            assignee: Some("alice".to_string()),
            page: 1,
            page_size: 2,
            ..Default::default()
        }
        .apply(tickets);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total, 3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Clamping always lands in the allowed ranges.
            #[test]
            fn clamps_are_total(page in 0usize..10_000, page_size in 0usize..10_000) {
                let filter = TicketFilter { page, page_size, ..Default::default() };
                prop_assert!(filter.page() >= 1);
                prop_assert!((1..=MAX_PAGE_SIZE).contains(&filter.page_size()));
            }

            /// A page never exceeds its size, and total is stable across pages.
            #[test]
            fn page_never_exceeds_size(count in 0usize..60, page in 1usize..8, page_size in 1usize..30) {
                let tickets: Vec<Ticket> = (0..count)
                    .map(|i| {
                        let mut t = Ticket::create("p", "Property ticket", None, Priority::Low).unwrap();
                        t.set_id_for_test(&format!("t{:03}", i));
                        t
                    })
                    .collect();
                let filter = TicketFilter { page, page_size, ..Default::default() };
                let result = filter.apply(tickets);
                prop_assert!(result.items.len() <= page_size);
                prop_assert_eq!(result.total, count);
            }
        }
    }
}
