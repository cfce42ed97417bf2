use heliodesk_core::domain::lead::{Lead, LeadStatus};

/// Client-side lead filter for the board views.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<i64>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(status) = self.status {
            if lead.status != status {
                return false;
            }
        }
        if let Some(assigned_to) = self.assigned_to {
            if lead.assigned_to != Some(assigned_to) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|lead| self.matches(lead)).collect()
    }
}

/// One page of a client-side paginated list. Page numbers are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { number: 1, size: 10 }
    }
}

pub fn paginate<T>(items: &[T], page: Page) -> &[T] {
    if page.size == 0 {
        return &[];
    }
    let start = page.number.saturating_sub(1).saturating_mul(page.size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page.size).min(items.len());
    &items[start..end]
}

pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

#[cfg(test)]
mod tests {
    use heliodesk_core::domain::lead::{Lead, LeadStatus};

    use super::{page_count, paginate, LeadFilter, Page};

    fn lead(id: i64, status: LeadStatus, assigned_to: Option<i64>) -> Lead {
        Lead { id, status, assigned_to, name: None, email: None, mobile: None }
    }

    #[test]
    fn filters_compose_status_and_assignee() {
        let leads = vec![
            lead(1, LeadStatus::New, None),
            lead(2, LeadStatus::Assigned, Some(17)),
            lead(3, LeadStatus::Assigned, Some(9)),
        ];

        let by_status = LeadFilter { status: Some(LeadStatus::Assigned), ..LeadFilter::default() };
        assert_eq!(by_status.apply(&leads).len(), 2);

        let by_both = LeadFilter { status: Some(LeadStatus::Assigned), assigned_to: Some(17) };
        let matched = by_both.apply(&leads);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 2);

        let empty_filter = LeadFilter::default();
        assert_eq!(empty_filter.apply(&leads).len(), 3);
    }

    #[test]
    fn pagination_slices_one_based_pages() {
        let items: Vec<i64> = (1..=25).collect();

        let first = paginate(&items, Page { number: 1, size: 10 });
        assert_eq!(first.first(), Some(&1));
        assert_eq!(first.len(), 10);

        let last = paginate(&items, Page { number: 3, size: 10 });
        assert_eq!(last, &[21, 22, 23, 24, 25]);

        assert!(paginate(&items, Page { number: 4, size: 10 }).is_empty());
        assert!(paginate(&items, Page { number: 1, size: 0 }).is_empty());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(30, 10), 3);
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(5, 0), 0);
    }
}
