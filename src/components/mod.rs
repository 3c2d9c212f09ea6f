pub mod detail_overlay;
pub mod dex_list;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_overlay::{DetailOverlay, DetailOverlayProps};
pub use dex_list::{DexList, DexListProps};
