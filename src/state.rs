//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{DebugSection, DebugState, ron_string};

use crate::autocomplete;
use crate::catalog::Catalog;
use crate::debounce::Debounce;
use crate::query;
use crate::record::Record;
use crate::view::GallerySelection;

/// Quiet period between the last keystroke and the display-list refresh.
pub const SEARCH_DEBOUNCE_MS: u64 = 220;

/// Logical clock step per `Action::Tick`.
pub const TICK_MS: u64 = 20;

/// Loading banner animation cycle, in ticks.
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// Rendered width of one card in the grid, border included.
pub const CARD_WIDTH: u16 = 28;

/// Card columns that fit `width` cells once the grid border is taken off.
pub fn columns_for(width: u16) -> usize {
    usize::from((width.saturating_sub(2) / CARD_WIDTH).max(1))
}

/// Active category filter
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CategoryFilter {
    #[default]
    All,
    Role(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Role(role) => role,
        }
    }
}

/// Display-list ordering. Only one axis is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SortMode {
    None,
    NameAsc,
    YearAsc,
    #[default]
    YearDesc,
}

impl SortMode {
    /// Year button behavior: flip direction, or start from newest-first when
    /// another axis was active.
    pub fn toggle_year(self) -> Self {
        match self {
            SortMode::YearDesc => SortMode::YearAsc,
            SortMode::YearAsc | SortMode::NameAsc | SortMode::None => SortMode::YearDesc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::None => "Unsorted",
            SortMode::NameAsc => "A-Z",
            SortMode::YearAsc => "Year (oldest)",
            SortMode::YearDesc => "Year (newest)",
        }
    }
}

/// User-chosen filter/search/sort parameters for the session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewState {
    pub category: CategoryFilter,
    pub search_term: String,
    pub sort: SortMode,
    /// Pending display-list refresh after search typing.
    pub search_debounce: Debounce,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search_term: String::new(),
            sort: SortMode::default(),
            search_debounce: Debounce::new(SEARCH_DEBOUNCE_MS),
        }
    }
}

/// Which gallery of the detail modal receives navigation keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DetailFocus {
    #[default]
    Abilities,
    Skins,
    Related,
}

impl DetailFocus {
    pub fn next(self) -> Self {
        match self {
            DetailFocus::Abilities => DetailFocus::Skins,
            DetailFocus::Skins => DetailFocus::Related,
            DetailFocus::Related => DetailFocus::Abilities,
        }
    }
}

/// The open detail modal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailState {
    pub record_id: String,
    pub selection: GallerySelection,
    pub focus: DetailFocus,
    pub related_cursor: usize,
}

impl DetailState {
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            selection: GallerySelection::default(),
            focus: DetailFocus::default(),
            related_cursor: 0,
        }
    }
}

/// Media currently loaded in the ability player
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Playback {
    #[default]
    Stopped,
    Playing { source: String },
}

impl Playback {
    pub fn source(&self) -> Option<&str> {
        match self {
            Playback::Stopped => None,
            Playback::Playing { source } => Some(source),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Playback::Playing { .. })
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Catalog location as given on the command line
    pub source: String,

    /// Catalog lifecycle: Empty → Loading → Loaded/Failed
    pub catalog: DataResource<Catalog>,

    pub view: ViewState,

    /// Derived display list, as indices into the catalog
    pub display: Vec<usize>,

    /// Grid cursor, an index into `display`
    pub cursor: usize,

    /// Identifier of the card currently turned over
    pub flipped: Option<String>,

    /// Whether the search input has focus
    pub search_mode: bool,

    /// Autocomplete matches, as indices into the catalog
    pub suggestions: Vec<usize>,

    /// Highlighted suggestion, once the user navigates the list
    pub suggestion_selected: Option<usize>,

    pub detail: Option<DetailState>,

    pub playback: Playback,

    /// Logical clock in milliseconds, advanced by `Tick`
    pub clock_ms: u64,

    /// Loading animation frame counter
    pub tick_count: u32,

    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("demos/champions.json")
    }
}

impl AppState {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            catalog: DataResource::Empty,
            view: ViewState::default(),
            display: Vec::new(),
            cursor: 0,
            flipped: None,
            search_mode: false,
            suggestions: Vec::new(),
            suggestion_selected: None,
            detail: None,
            playback: Playback::Stopped,
            clock_ms: 0,
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    /// State with an already loaded catalog and its display list derived.
    pub fn with_records(records: Vec<Record>) -> Self {
        let mut state = Self {
            catalog: DataResource::Loaded(Catalog::from_records(records)),
            ..Self::default()
        };
        state.rederive();
        state
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.data()
    }

    pub fn records(&self) -> &[Record] {
        self.catalog().map(Catalog::records).unwrap_or(&[])
    }

    /// The display list as records.
    pub fn display_records(&self) -> Vec<&Record> {
        let records = self.records();
        self.display
            .iter()
            .filter_map(|&index| records.get(index))
            .collect()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        let index = *self.display.get(self.cursor)?;
        self.records().get(index)
    }

    pub fn suggestion_records(&self) -> Vec<&Record> {
        let records = self.records();
        self.suggestions
            .iter()
            .filter_map(|&index| records.get(index))
            .collect()
    }

    pub fn detail_record(&self) -> Option<&Record> {
        let detail = self.detail.as_ref()?;
        self.catalog()?.find_by_id(&detail.record_id)
    }

    pub fn categories(&self) -> Vec<String> {
        self.catalog().map(Catalog::categories).unwrap_or_default()
    }

    /// Rebuild the display list from the current view state. The grid is
    /// replaced wholesale, so the flipped card is dropped and the cursor
    /// clamped. Any pending search refresh is superseded.
    pub fn rederive(&mut self) {
        self.view.search_debounce.cancel();
        self.display = query::derive_indices(self.records(), &self.view);
        self.flipped = None;
        if self.cursor >= self.display.len() {
            self.cursor = 0;
        }
        tracing::debug!(
            category = self.view.category.label(),
            term = %self.view.search_term,
            sort = ?self.view.sort,
            shown = self.display.len(),
            "display list derived"
        );
    }

    pub fn refresh_suggestions(&mut self) {
        self.suggestions = autocomplete::suggest_indices(self.records(), &self.view.search_term);
        self.suggestion_selected = None;
    }

    pub fn hide_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_selected = None;
    }

    /// Number of card columns that fit the current terminal width.
    pub fn grid_columns(&self) -> usize {
        columns_for(self.terminal_size.0)
    }

    pub fn loading_anim_active(&self) -> bool {
        self.catalog.is_loading()
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("source", ron_string(&self.source))
                .entry("loaded", ron_string(&self.catalog.is_loaded()))
                .entry("records", ron_string(&self.records().len()))
                .entry("error", ron_string(&self.catalog.error())),
            DebugSection::new("View")
                .entry("category", ron_string(&self.view.category))
                .entry("search", ron_string(&self.view.search_term))
                .entry("sort", ron_string(&self.view.sort))
                .entry("debounce_due", ron_string(&self.view.search_debounce.due_at()))
                .entry("shown", ron_string(&self.display.len()))
                .entry("cursor", ron_string(&self.cursor)),
            DebugSection::new("Detail")
                .entry(
                    "record",
                    ron_string(&self.detail.as_ref().map(|detail| detail.record_id.clone())),
                )
                .entry("playback", ron_string(&self.playback))
                .entry("clock_ms", ron_string(&self.clock_ms)),
        ]
    }
}
