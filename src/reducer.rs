//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Dex actions =====
        Action::DexFetch => {
            // Cache-once: Loading, Loaded and Failed all refuse a re-fetch.
            if !state.dex.is_empty() {
                return DispatchResult::unchanged();
            }
            state.dex = DataResource::Loading;
            state.tick = 0;
            DispatchResult::changed_with(Effect::FetchDex { limit: state.limit })
        }

        Action::DexDidLoad(items) => {
            state.dex = DataResource::Loaded(items);
            state.current_page = 1;
            state.cursor = 0;
            DispatchResult::changed()
        }

        Action::DexDidError(error) => {
            state.dex = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Detail actions =====
        Action::DetailFetch(id) => {
            if state.is_detail_loading {
                return DispatchResult::unchanged();
            }
            state.is_detail_loading = true;
            DispatchResult::changed_with(Effect::FetchDetail { id })
        }

        Action::DetailDidLoad(detail) => {
            state.is_detail_loading = false;
            state.selected_detail = Some(detail);
            state.is_modal_open = true;
            DispatchResult::changed()
        }

        Action::DetailDidError { .. } => {
            // The overlay stays closed and no message is committed to state;
            // the action recorder keeps the error.
            state.is_detail_loading = false;
            DispatchResult::changed()
        }

        // ===== Modal actions =====
        Action::ModalClose => {
            if !state.is_modal_open {
                return DispatchResult::unchanged();
            }
            state.is_modal_open = false;
            DispatchResult::changed_with(Effect::ScheduleModalClear)
        }

        Action::ModalDidClear => {
            // A reopen that raced the close timer wins; keep its detail.
            if state.is_modal_open || state.selected_detail.is_none() {
                return DispatchResult::unchanged();
            }
            state.selected_detail = None;
            DispatchResult::changed()
        }

        // ===== Page actions =====
        Action::PageSet(page) => set_page(state, page),
        Action::PageNext => set_page(state, state.current_page + 1),
        Action::PagePrev => set_page(state, state.current_page.saturating_sub(1)),

        Action::CursorSet(index) => {
            let len = state.page_items().len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(len - 1);
            if bounded == state.cursor {
                return DispatchResult::unchanged();
            }
            state.cursor = bounded;
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.fetch_active() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Page bounds check; out-of-range requests are silently ignored. A page
/// change jumps the cursor back to the top of the new page.
fn set_page(state: &mut AppState, page: usize) -> DispatchResult<Effect> {
    if page < 1 || page > state.total_pages() || page == state.current_page {
        return DispatchResult::unchanged();
    }
    state.current_page = page;
    state.cursor = 0;
    DispatchResult::changed()
}
