//! Store actions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{DetailView, SummaryView};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Dex category =====
    /// Intent: load the summary list (no-op once the list has left Empty)
    DexFetch,

    /// Result: full summary list in ascending id order
    DexDidLoad(Vec<SummaryView>),

    /// Result: list load failed; the message is shown in the list view
    DexDidError(String),

    // ===== Detail category =====
    /// Intent: fetch one detail record and open the overlay
    DetailFetch(u16),

    /// Result: detail loaded, overlay opens
    DetailDidLoad(DetailView),

    /// Result: detail fetch failed. The overlay stays closed; the error is
    /// kept only by the action recorder, never committed to state.
    DetailDidError { id: u16, error: String },

    // ===== Modal category =====
    /// Close the overlay; the selected detail is cleared after a short delay
    ModalClose,

    /// Deferred clear fired by the close timer
    ModalDidClear,

    // ===== Page category =====
    /// Jump to a page; out-of-range requests are silently ignored
    PageSet(usize),
    PageNext,
    PagePrev,

    /// Move the selection within the visible page
    CursorSet(usize),

    // ===== Uncategorized (global) =====
    /// Force a re-render
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
