//! Actions: every user event and async result, one variant each

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::state::{CategoryFilter, SortMode};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Start the one-time catalog load
    Init,

    // ===== Catalog category =====
    /// Result: catalog document parsed
    CatalogDidLoad(Vec<Record>),

    /// Result: catalog could not be read or parsed
    CatalogDidError(String),

    // ===== RoleFilter category =====
    RoleFilterSet(CategoryFilter),
    RoleFilterNext,
    RoleFilterPrev,

    // ===== Search category =====
    /// Focus the search input
    SearchOpen,

    /// Leave the search input, keeping the term
    SearchClose,

    /// Search text changed (debounced display refresh)
    SearchQueryChange(String),

    /// Explicit confirm: refresh the display list now
    SearchSubmit,

    /// Empty the term and refresh now
    SearchClear,

    // ===== Suggestion category =====
    /// Highlight a suggestion (by index)
    SuggestionSelect(usize),

    /// Use a suggestion's name as the search term
    SuggestionAccept(usize),

    // ===== Sort category =====
    SortSet(SortMode),
    SortByName,
    SortByYearToggle,

    // ===== Filters category =====
    /// Restore category, search and sort to their defaults
    FiltersReset,

    // ===== Grid category =====
    GridMove { dx: i16, dy: i16 },
    GridSelect(usize),
    GridFlip,

    // ===== Detail category =====
    /// Open the detail modal for a record identifier
    DetailOpen(String),

    /// Close the modal and release media playback
    DetailClose,

    DetailFocusNext,

    // ===== Gallery category =====
    /// Hover an ability thumbnail: preview its media
    GalleryAbilityHover(usize),

    /// Activate an ability: media and description
    GalleryAbilityActivate(usize),

    GallerySkinActivate(usize),

    // ===== Related category =====
    RelatedSelect(usize),
    RelatedOpen(usize),

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Advances the logical clock; drives the search debounce
    Tick,

    /// Exit the application
    Quit,
}
