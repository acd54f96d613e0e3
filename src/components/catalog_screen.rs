use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::title_banner::BANNER_OVERHEAD;
use super::{
    BannerPalette, CardGrid, CardGridProps, Component, FilterBar, FilterBarProps, GridStatus,
    TitleBanner, TitleBannerProps,
};
use crate::action::Action;
use crate::state::AppState;
use crate::view;

/// Props for CatalogScreen - read-only view of state
pub struct CatalogScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Banner, filters, card grid and key hints
#[derive(Default)]
pub struct CatalogScreen {
    grid: CardGrid,
}

impl CatalogScreen {
    fn grid_status(state: &AppState) -> GridStatus<'_> {
        match &state.catalog {
            DataResource::Empty => GridStatus::Idle,
            DataResource::Loading => GridStatus::Loading,
            DataResource::Failed(error) => GridStatus::Failed(error),
            DataResource::Loaded(_) => GridStatus::Ready,
        }
    }

    fn banner_height(area: Rect) -> u16 {
        // Shrink the FIGlet font before the grid loses its last row
        if area.height >= 30 {
            6 + BANNER_OVERHEAD
        } else if area.height >= 20 {
            4 + BANNER_OVERHEAD
        } else {
            1 + BANNER_OVERHEAD
        }
    }
}

impl Component<Action> for CatalogScreen {
    type Props<'a> = CatalogScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            let global = match key.code {
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('c') => Some(Action::SearchClear),
                KeyCode::Char('n') => Some(Action::SortByName),
                KeyCode::Char('y') => Some(Action::SortByYearToggle),
                KeyCode::Char('x') => Some(Action::FiltersReset),
                KeyCode::Tab | KeyCode::Char(']') => Some(Action::RoleFilterNext),
                KeyCode::BackTab | KeyCode::Char('[') => Some(Action::RoleFilterPrev),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            };
            if let Some(action) = global {
                return vec![action];
            }
        }

        let state = props.state;
        let cards = view::project_cards(&state.display_records());
        self.grid
            .handle_event(
                event,
                CardGridProps {
                    cards: &cards,
                    cursor: state.cursor,
                    flipped: state.flipped.as_deref(),
                    status: Self::grid_status(state),
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: CatalogScreenProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(Self::banner_height(area)),
            Constraint::Length(3), // Filters
            Constraint::Min(1),    // Cards
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let caption = match &state.catalog {
            DataResource::Loaded(catalog) => format!("{} champions", catalog.len()),
            DataResource::Loading => "Summoning...".to_string(),
            DataResource::Failed(_) => "Catalog unavailable".to_string(),
            DataResource::Empty => String::new(),
        };
        let mut banner = TitleBanner;
        banner.render(
            frame,
            chunks[0],
            TitleBannerProps {
                text: "Champdex",
                caption: &caption,
                palette: if state.catalog.is_failed() {
                    BannerPalette::Muted
                } else {
                    BannerPalette::Gold
                },
                is_animating: state.loading_anim_active(),
                tick_count: state.tick_count,
            },
        );

        let categories = state.categories();
        let mut filters = FilterBar;
        filters.render(
            frame,
            chunks[1],
            FilterBarProps {
                categories: &categories,
                active: &state.view.category,
                term: &state.view.search_term,
                sort: state.view.sort,
                pending: state.view.search_debounce.is_pending(),
                shown: state.display.len(),
                total: state.records().len(),
            },
        );

        let cards = view::project_cards(&state.display_records());
        self.grid.render(
            frame,
            chunks[2],
            CardGridProps {
                cards: &cards,
                cursor: state.cursor,
                flipped: state.flipped.as_deref(),
                status: Self::grid_status(state),
                is_focused: props.is_focused,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("tab", "role"),
                    StatusBarHint::new("n", "a-z"),
                    StatusBarHint::new("y", "year"),
                    StatusBarHint::new("f", "flip"),
                    StatusBarHint::new("enter", "about"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use tui_dispatch::testing::*;

    fn sample_state() -> AppState {
        AppState::with_records(vec![
            Record {
                id: "ahri".into(),
                name: "Ahri".into(),
                year: Some(2011),
                ..Default::default()
            },
            Record {
                id: "zed".into(),
                name: "Zed".into(),
                year: Some(2012),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_handle_event_search() {
        let mut screen = CatalogScreen::default();
        let state = sample_state();
        let props = CatalogScreenProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = screen
            .handle_event(&EventKind::Key(key("/")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::SearchOpen);
    }

    #[test]
    fn test_handle_event_flip_goes_to_grid() {
        let mut screen = CatalogScreen::default();
        let state = sample_state();
        let props = CatalogScreenProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = screen
            .handle_event(&EventKind::Key(key("f")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::GridFlip);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut screen = CatalogScreen::default();
        let state = sample_state();
        let props = CatalogScreenProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = screen
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_loading() {
        let mut render = RenderHarness::new(100, 30);
        let mut screen = CatalogScreen::default();
        let state = AppState {
            catalog: DataResource::Loading,
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            let props = CatalogScreenProps {
                state: &state,
                is_focused: true,
            };
            screen.render(frame, frame.area(), props);
        });

        assert!(output.contains("Loading champions..."));
    }

    #[test]
    fn test_render_cards_newest_first() {
        let mut render = RenderHarness::new(100, 30);
        let mut screen = CatalogScreen::default();
        let state = sample_state();

        let output = render.render_to_string_plain(|frame| {
            let props = CatalogScreenProps {
                state: &state,
                is_focused: true,
            };
            screen.render(frame, frame.area(), props);
        });

        let zed = output.find("Zed").unwrap_or(usize::MAX);
        let ahri = output.find("Ahri").unwrap_or(usize::MAX);
        assert!(zed < ahri, "newest champion should come first:\n{output}");
    }
}
