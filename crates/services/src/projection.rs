//! # Tab Projection
//!
//! Derives the navigation tab list from the ordered category list. A home
//! tab is always prepended; page tabs are identified by the category name,
//! board tabs by their board type. No sorting, no deduplication: the stored
//! order is the displayed order, and duplicate-prone input stays exactly as
//! authored.

use domains::models::{Category, CategoryKind, Tab, TabKind};

/// Id of the always-present first tab.
pub const HOME_TAB_ID: &str = "home";

pub fn tabs_for(categories: &[Category]) -> Vec<Tab> {
    let mut tabs = Vec::with_capacity(categories.len() + 1);
    tabs.push(Tab {
        id: HOME_TAB_ID.into(),
        name: "Home".into(),
        kind: TabKind::Home,
    });
    for category in categories {
        let (id, kind) = match category.kind {
            CategoryKind::Page => (category.name.clone(), TabKind::Page),
            CategoryKind::Board => (category.board_type.clone(), TabKind::Board),
        };
        tabs.push(Tab {
            id,
            name: category.name.clone(),
            kind,
        });
    }
    tabs
}
