//! Page window math and the `{url, label, active}` link list consumed by the
//! client-side paginator.

use serde::Serialize;

/// Number of rows shown on one listing page.
pub const ITEMS_PER_PAGE: usize = 10;

pub const PREVIOUS_LABEL: &str = "Previous";
pub const NEXT_LABEL: &str = "Next";

/// Coerces a requested page number to a valid 1-based page.
pub fn normalize_page(page: usize) -> usize {
    page.max(1)
}

/// Returns the `(limit, offset)` pair for the given 1-based page.
///
/// The offset saturates for page numbers far beyond any real listing.
pub fn limit_and_offset(page: usize, per_page: usize) -> (usize, usize) {
    let page = normalize_page(page);
    (per_page, (page - 1).saturating_mul(per_page))
}

/// Number of the last page for `total` rows; zero when there are no rows.
pub fn max_page(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// Builds the link list: `Previous`, one link per page, `Next`.
///
/// `page_url` maps a page number onto its URL.
pub fn page_links<F>(total: usize, current_page: usize, page_url: F) -> Vec<PageLink>
where
    F: Fn(usize) -> String,
{
    let current_page = normalize_page(current_page);
    let last_page = max_page(total, ITEMS_PER_PAGE);

    let mut links = Vec::with_capacity(last_page + 2);

    links.push(PageLink {
        url: (current_page > 1).then(|| page_url(current_page - 1)),
        label: PREVIOUS_LABEL.to_string(),
        active: false,
    });

    links.extend((1..=last_page).map(|page| PageLink {
        url: Some(page_url(page)),
        label: page.to_string(),
        active: page == current_page,
    }));

    links.push(PageLink {
        url: (current_page < last_page).then(|| page_url(current_page + 1)),
        label: NEXT_LABEL.to_string(),
        active: false,
    });

    links
}

/// One page of rows together with its navigation links.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub links: Vec<PageLink>,
}

impl<T> Paginated<T> {
    pub fn new<F>(data: Vec<T>, total: usize, current_page: usize, page_url: F) -> Self
    where
        F: Fn(usize) -> String,
    {
        Self {
            data,
            links: page_links(total, current_page, page_url),
        }
    }

    pub fn map<U, M>(self, f: M) -> Paginated<U>
    where
        M: FnMut(T) -> U,
    {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            links: self.links,
        }
    }
}
