//! Editor configuration and caller-owned editing context.

use crate::search::SearchOptions;

/// Controls how a Tab key press is handled by [`Document::insert_tab`](crate::Document::insert_tab).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TabKeyBehavior {
    /// Insert a literal tab character (`'\t'`).
    #[default]
    Tab,
    /// Insert spaces up to the next tab stop (based on the current `tab_width` setting).
    Spaces,
}

/// Settings that shape the editing actions of a [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Width of a tab stop, in columns.
    pub tab_width: usize,
    /// What the Tab key inserts.
    pub tab_key_behavior: TabKeyBehavior,
    /// Options used by the document search actions.
    pub search_options: SearchOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            tab_key_behavior: TabKeyBehavior::default(),
            search_options: SearchOptions::default(),
        }
    }
}

/// State shared by the editing actions above a single document.
///
/// Owned by the caller and passed explicitly to the actions that need it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditContext {
    /// Text most recently copied or cut.
    pub clipboard: String,
    /// Query of the most recent search.
    pub last_search: Option<String>,
}
