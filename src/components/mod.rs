pub mod card_grid;
pub mod catalog_screen;
pub mod detail_modal;
pub mod filter_bar;
pub mod search_overlay;
pub mod title_banner;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_grid::{CARD_HEIGHT, CardGrid, CardGridProps, EMPTY_MESSAGE, ERROR_MESSAGE, GridStatus};
pub use catalog_screen::{CatalogScreen, CatalogScreenProps};
pub use detail_modal::{DetailModal, DetailModalProps};
pub use filter_bar::{FilterBar, FilterBarProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use title_banner::{BannerPalette, TitleBanner, TitleBannerProps};
