//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// One row in the dex list. Names and type labels are already
/// display-formatted by the mapping layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryView {
    pub id: u16,
    pub name: String,
    pub image: Option<String>,
    pub types: Vec<String>,
    pub height: u16,
    pub weight: u16,
}

/// Everything the detail overlay shows; a superset of [`SummaryView`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailView {
    pub id: u16,
    pub name: String,
    pub image: Option<String>,
    pub types: Vec<String>,
    pub height: u16,
    pub weight: u16,
    pub abilities: Vec<String>,
    pub moves: Vec<String>,
}

/// Entries shown per page.
pub const PAGE_SIZE: usize = 10;

/// The original 151-entry Kanto dex; ids 1..=limit are fetched, with
/// DEX_LIMIT as the default slice.
pub const DEX_LIMIT: u16 = 151;

/// How long the overlay exit transition gets to draw before the selected
/// detail is cleared.
pub const MODAL_CLEAR_DELAY_MS: u64 = 300;

/// Spinner animation cadence while a fetch is in flight.
pub const SPINNER_TICK_MS: u64 = 90;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Dex lifecycle: Empty -> Loading -> Loaded/Failed. Loaded and Failed
    /// are terminal for the session; there is no retry.
    #[debug(section = "Dex", label = "List", debug_fmt)]
    pub dex: DataResource<Vec<SummaryView>>,

    /// How many entries the fetch loads, set once from the CLI.
    #[debug(section = "Dex", label = "Limit")]
    pub limit: u16,

    /// 1-based page into the loaded list.
    #[debug(section = "Dex", label = "Page")]
    pub current_page: usize,

    /// Selection within the visible page.
    #[debug(section = "Dex", label = "Cursor")]
    pub cursor: usize,

    /// Set only by a successful detail fetch; survives a modal close until
    /// the deferred clear fires.
    #[debug(section = "Detail", label = "Selected", debug_fmt)]
    pub selected_detail: Option<DetailView>,

    #[debug(section = "Detail", label = "Loading")]
    pub is_detail_loading: bool,

    #[debug(section = "Detail", label = "Modal open")]
    pub is_modal_open: bool,

    /// Spinner frame counter.
    #[debug(skip)]
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dex: DataResource::Empty,
            limit: DEX_LIMIT,
            current_page: 1,
            cursor: 0,
            selected_detail: None,
            is_detail_loading: false,
            is_modal_open: false,
            tick: 0,
        }
    }
}

impl AppState {
    pub fn new(limit: u16) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Loaded summaries, or an empty slice before the list arrives.
    pub fn items(&self) -> &[SummaryView] {
        self.dex.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_pages(&self) -> usize {
        self.items().len().div_ceil(PAGE_SIZE)
    }

    /// The window of summaries visible on the current page.
    pub fn page_items(&self) -> &[SummaryView] {
        let items = self.items();
        let start = self.current_page.saturating_sub(1) * PAGE_SIZE;
        if start >= items.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(items.len());
        &items[start..end]
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    /// The summary under the cursor, if the page has any entries.
    pub fn current_item(&self) -> Option<&SummaryView> {
        self.page_items().get(self.cursor)
    }

    pub fn fetch_active(&self) -> bool {
        self.dex.is_loading() || self.is_detail_loading
    }
}
