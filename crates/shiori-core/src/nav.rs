//! Navigation derived from the site's title map.
//!
//! Everything here is a pure function of a [`TitleMap`] and the current
//! pathname: the sidebar tree, breadcrumbs and previous/next links.

use crate::TitleMap;
use serde::Serialize;
use std::collections::HashMap;

/// URL prefix the docs are served under unless configured otherwise.
pub const DEFAULT_DOCS_BASE: &str = "/docs";

const INTRODUCTION_LABEL: &str = "Introduction";

/// Breadcrumb trails shorter than this get an introduction crumb.
const MIN_CRUMBS: usize = 3;

/// One entry of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub path: String,
    pub label: String,
    /// Depth, 0 for top-level pages.
    pub level: usize,
    pub parent_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Absolute URL path of the crumb.
    pub path: String,
    pub label: String,
}

/// A link to another page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub path: String,
    pub label: String,
    pub url: String,
}

/// Pages before and after the current one in title map order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageNeighbors {
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// Page path of `pathname` relative to `base`, without surrounding slashes.
pub fn current_path<'p>(pathname: &'p str, base: &str) -> &'p str {
    let relative = if base.is_empty() {
        pathname
    } else {
        pathname.strip_prefix(base).unwrap_or(pathname)
    };
    relative.trim_matches('/')
}

/// Sidebar entries for every page, in title map order.
pub fn sidebar_items(titles: &TitleMap) -> Vec<SidebarItem> {
    titles
        .pages()
        .map(|(path, label)| {
            let segments: Vec<&str> = path.split('/').collect();
            let level = segments.len() - 1;
            let parent_path = (level > 0).then(|| segments[..level].join("/"));
            SidebarItem {
                path: path.to_string(),
                label: label.to_string(),
                level,
                parent_path,
            }
        })
        .collect()
}

/// Children of each parent path, in sidebar order.
pub fn sidebar_children(items: &[SidebarItem]) -> HashMap<&str, Vec<&SidebarItem>> {
    let mut children: HashMap<&str, Vec<&SidebarItem>> = HashMap::new();
    for item in items {
        if let Some(parent) = item.parent_path.as_deref() {
            children.entry(parent).or_default().push(item);
        }
    }
    children
}

/// Whether `item` is the current page.
pub fn is_active(item: &SidebarItem, current: &str) -> bool {
    item.path == current
}

/// Whether `item`'s children should be shown for the current page.
pub fn is_expanded(item: &SidebarItem, current: &str) -> bool {
    current == item.path
        || current
            .strip_prefix(item.path.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Breadcrumb trail for `pathname`.
///
/// Empty at the docs base. Short trails are prefixed with a crumb for the
/// introduction page.
pub fn breadcrumbs(pathname: &str, base: &str, titles: &TitleMap) -> Vec<Breadcrumb> {
    let base = base.trim_end_matches('/');
    if pathname.trim_end_matches('/') == base {
        return Vec::new();
    }

    let relative = pathname
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(pathname)
        .trim_matches('/');
    if relative.is_empty() {
        return Vec::new();
    }

    let segments: Vec<&str> = relative.split('/').collect();
    let mut crumbs: Vec<Breadcrumb> = segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let path = segments[..=index].join("/");
            let label = titles
                .get(&path)
                .filter(|label| !label.is_empty())
                .unwrap_or(*segment)
                .to_string();
            Breadcrumb {
                path: format!("{base}/{path}"),
                label,
            }
        })
        .collect();

    if crumbs.len() < MIN_CRUMBS {
        crumbs.insert(
            0,
            Breadcrumb {
                path: base.to_string(),
                label: INTRODUCTION_LABEL.to_string(),
            },
        );
    }
    crumbs
}

/// Previous and next pages around `pathname`.
pub fn neighbors(pathname: &str, base: &str, titles: &TitleMap) -> PageNeighbors {
    let base = base.trim_end_matches('/');
    let current = current_path(pathname, base);
    let pages: Vec<(&str, &str)> = titles.pages().collect();

    let Some(index) = pages.iter().position(|(path, _)| *path == current) else {
        return PageNeighbors::default();
    };

    let link = |(path, label): (&str, &str)| NavLink {
        path: path.to_string(),
        label: label.to_string(),
        url: format!("{base}/{path}"),
    };

    PageNeighbors {
        previous: index.checked_sub(1).map(|i| link(pages[i])),
        next: pages.get(index + 1).copied().map(link),
    }
}
