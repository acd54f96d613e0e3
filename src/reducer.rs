//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::catalog::{Catalog, CatalogSource};
use crate::effect::Effect;
use crate::state::{AppState, CategoryFilter, DetailState, Playback, SortMode, ViewState, TICK_MS};
use crate::view;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.catalog = DataResource::Loading;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::LoadCatalog {
                source: CatalogSource::parse(&state.source),
            })
        }

        // ===== Catalog actions =====
        Action::CatalogDidLoad(records) => {
            state.catalog = DataResource::Loaded(Catalog::from_records(records));
            state.cursor = 0;
            state.rederive();
            DispatchResult::changed()
        }

        Action::CatalogDidError(msg) => {
            state.catalog = DataResource::Failed(msg);
            state.display.clear();
            state.cursor = 0;
            DispatchResult::changed()
        }

        // ===== Role filter actions =====
        Action::RoleFilterSet(filter) => {
            if state.view.category == filter {
                return DispatchResult::unchanged();
            }
            state.view.category = filter;
            state.rederive();
            DispatchResult::changed()
        }

        Action::RoleFilterNext => cycle_role(state, 1),
        Action::RoleFilterPrev => cycle_role(state, -1),

        // ===== Search actions =====
        Action::SearchOpen => {
            if state.search_mode {
                return DispatchResult::unchanged();
            }
            state.search_mode = true;
            state.refresh_suggestions();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            if !state.search_mode && state.suggestions.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search_mode = false;
            state.hide_suggestions();
            DispatchResult::changed()
        }

        Action::SearchQueryChange(term) => {
            state.view.search_term = term;
            state.refresh_suggestions();
            state.view.search_debounce.schedule(state.clock_ms);
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search_mode = false;
            state.hide_suggestions();
            state.rederive();
            DispatchResult::changed()
        }

        Action::SearchClear => {
            state.view.search_term.clear();
            state.hide_suggestions();
            state.rederive();
            DispatchResult::changed()
        }

        // ===== Suggestion actions =====
        Action::SuggestionSelect(index) => {
            if index < state.suggestions.len() && state.suggestion_selected != Some(index) {
                state.suggestion_selected = Some(index);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SuggestionAccept(index) => {
            let Some(name) = state
                .suggestions
                .get(index)
                .and_then(|&record| state.records().get(record))
                .map(|record| record.name.clone())
            else {
                return DispatchResult::unchanged();
            };
            state.view.search_term = name;
            state.search_mode = false;
            state.hide_suggestions();
            state.rederive();
            DispatchResult::changed()
        }

        // ===== Sort actions =====
        Action::SortSet(mode) => apply_sort(state, mode),
        Action::SortByName => apply_sort(state, SortMode::NameAsc),
        Action::SortByYearToggle => {
            let mode = state.view.sort.toggle_year();
            apply_sort(state, mode)
        }

        Action::FiltersReset => {
            state.view = ViewState::default();
            state.search_mode = false;
            state.hide_suggestions();
            state.rederive();
            DispatchResult::changed()
        }

        // ===== Grid actions =====
        Action::GridMove { dx, dy } => {
            if state.display.is_empty() {
                return DispatchResult::unchanged();
            }
            let columns = state.grid_columns() as i64;
            let last = state.display.len() as i64 - 1;
            let target = (state.cursor as i64 + i64::from(dx) + i64::from(dy) * columns)
                .clamp(0, last) as usize;
            if target == state.cursor {
                return DispatchResult::unchanged();
            }
            state.cursor = target;
            DispatchResult::changed()
        }

        Action::GridSelect(index) => {
            if index >= state.display.len() || index == state.cursor {
                return DispatchResult::unchanged();
            }
            state.cursor = index;
            DispatchResult::changed()
        }

        Action::GridFlip => {
            let Some(id) = state.selected_record().map(|record| record.id.clone()) else {
                return DispatchResult::unchanged();
            };
            if state.flipped.as_deref() == Some(id.as_str()) {
                state.flipped = None;
            } else {
                state.flipped = Some(id);
            }
            DispatchResult::changed()
        }

        // ===== Detail actions =====
        Action::DetailOpen(id) => open_detail(state, id),

        Action::DetailClose => {
            if state.detail.take().is_none() {
                return DispatchResult::unchanged();
            }
            state.playback = Playback::Stopped;
            DispatchResult::changed()
        }

        Action::DetailFocusNext => {
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            detail.focus = detail.focus.next();
            DispatchResult::changed()
        }

        // ===== Gallery actions =====
        Action::GalleryAbilityHover(index) => {
            let Some(video) = ability_video(state, index) else {
                return DispatchResult::unchanged();
            };
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            detail.selection.ability_preview = Some(index);
            if let Some(source) = video {
                state.playback = Playback::Playing { source };
            }
            DispatchResult::changed()
        }

        Action::GalleryAbilityActivate(index) => {
            let Some(video) = ability_video(state, index) else {
                return DispatchResult::unchanged();
            };
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            detail.selection.active_ability = index;
            detail.selection.ability_preview = Some(index);
            if let Some(source) = video {
                state.playback = Playback::Playing { source };
            }
            DispatchResult::changed()
        }

        Action::GallerySkinActivate(index) => {
            let skin_count = state
                .detail_record()
                .map(|record| record.skins.len())
                .unwrap_or(0);
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            if index >= skin_count || index == detail.selection.active_skin {
                return DispatchResult::unchanged();
            }
            detail.selection.active_skin = index;
            DispatchResult::changed()
        }

        // ===== Related actions =====
        Action::RelatedSelect(index) => {
            let related_count = related_ids(state).len();
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            if index >= related_count || index == detail.related_cursor {
                return DispatchResult::unchanged();
            }
            detail.related_cursor = index;
            DispatchResult::changed()
        }

        Action::RelatedOpen(index) => {
            let Some(id) = related_ids(state).into_iter().nth(index) else {
                return DispatchResult::unchanged();
            };
            open_detail(state, id)
        }

        // ===== UI actions =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            state.clock_ms = state.clock_ms.saturating_add(TICK_MS);
            let mut changed = false;
            if state.loading_anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                changed = true;
            }
            if state.view.search_debounce.fire(state.clock_ms) {
                state.rederive();
                changed = true;
            }
            if changed {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn apply_sort(state: &mut AppState, mode: SortMode) -> DispatchResult<Effect> {
    if state.view.sort == mode {
        return DispatchResult::unchanged();
    }
    state.view.sort = mode;
    state.rederive();
    DispatchResult::changed()
}

/// Step through `All` followed by every role in the catalog, wrapping.
fn cycle_role(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let roles = state.categories();
    if roles.is_empty() {
        return DispatchResult::unchanged();
    }
    let slots = roles.len() as i16 + 1;
    let current = match &state.view.category {
        CategoryFilter::All => 0,
        CategoryFilter::Role(role) => roles
            .iter()
            .position(|known| known == role)
            .map(|index| index as i16 + 1)
            .unwrap_or(0),
    };
    let next = (current + step).rem_euclid(slots);
    state.view.category = if next == 0 {
        CategoryFilter::All
    } else {
        CategoryFilter::Role(roles[(next - 1) as usize].clone())
    };
    state.rederive();
    DispatchResult::changed()
}

fn open_detail(state: &mut AppState, id: String) -> DispatchResult<Effect> {
    let Some(playback) = state
        .catalog()
        .and_then(|catalog| catalog.find_by_id(&id))
        .map(view::opening_playback)
    else {
        return DispatchResult::unchanged();
    };
    state.playback = playback;
    state.detail = Some(DetailState::new(id));
    state.search_mode = false;
    state.hide_suggestions();
    DispatchResult::changed()
}

/// `None` when the ability does not exist; otherwise its optional video.
fn ability_video(state: &AppState, index: usize) -> Option<Option<String>> {
    let ability = state.detail_record()?.abilities.get(index)?;
    Some(ability.video.clone())
}

/// Identifiers of the open record's relationships that resolve.
fn related_ids(state: &AppState) -> Vec<String> {
    let (Some(record), Some(catalog)) = (state.detail_record(), state.catalog()) else {
        return Vec::new();
    };
    record
        .related
        .iter()
        .filter_map(|token| catalog.find_by_name_or_id(token))
        .map(|related| related.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Ability, Record};
    use pretty_assertions::assert_eq;

    fn champion(id: &str, name: &str, year: i32) -> Record {
        Record {
            id: id.into(),
            name: name.into(),
            year: Some(year),
            ..Default::default()
        }
    }

    fn shown(state: &AppState) -> Vec<String> {
        state
            .display_records()
            .iter()
            .map(|record| record.name.clone())
            .collect()
    }

    fn ticks(state: &mut AppState, count: u64) {
        for _ in 0..count {
            reducer(state, Action::Tick);
        }
    }

    #[test]
    fn test_init_requests_load() {
        let mut state = AppState::new("data/champions.json");

        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.catalog.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::LoadCatalog {
                source: CatalogSource::parse("data/champions.json"),
            }]
        );
    }

    #[test]
    fn test_catalog_did_load_derives_by_year_desc() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);

        reducer(
            &mut state,
            Action::CatalogDidLoad(vec![champion("x", "Xin", 2011), champion("y", "Yun", 2020)]),
        );

        assert!(state.catalog.is_loaded());
        assert_eq!(shown(&state), vec!["Yun", "Xin"]);

        reducer(&mut state, Action::SortByName);
        assert_eq!(shown(&state), vec!["Xin", "Yun"]);
    }

    #[test]
    fn test_catalog_error() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);

        reducer(&mut state, Action::CatalogDidError("HTTP 404".into()));

        assert!(state.catalog.is_failed());
        assert!(state.display.is_empty());
    }

    #[test]
    fn test_typing_is_debounced() {
        let mut state = AppState::with_records(vec![
            champion("x", "Xin", 2011),
            champion("y", "Yun", 2020),
        ]);

        reducer(&mut state, Action::SearchQueryChange("x".into()));
        ticks(&mut state, 5);
        reducer(&mut state, Action::SearchQueryChange("xi".into()));

        // Suggestions follow every keystroke, the grid does not.
        assert_eq!(state.suggestions, vec![0]);
        assert_eq!(shown(&state), vec!["Yun", "Xin"]);

        ticks(&mut state, SEARCH_TICKS - 1);
        assert_eq!(shown(&state), vec!["Yun", "Xin"]);

        ticks(&mut state, 1);
        assert_eq!(shown(&state), vec!["Xin"]);
        assert!(!state.view.search_debounce.is_pending());
    }

    const SEARCH_TICKS: u64 = crate::state::SEARCH_DEBOUNCE_MS / TICK_MS;

    #[test]
    fn test_submit_cancels_debounce() {
        let mut state = AppState::with_records(vec![
            champion("x", "Xin", 2011),
            champion("y", "Yun", 2020),
        ]);

        reducer(&mut state, Action::SearchQueryChange("yun".into()));
        reducer(&mut state, Action::SearchSubmit);

        assert_eq!(shown(&state), vec!["Yun"]);
        assert!(!state.view.search_debounce.is_pending());
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_clear_search() {
        let mut state = AppState::with_records(vec![
            champion("x", "Xin", 2011),
            champion("y", "Yun", 2020),
        ]);
        reducer(&mut state, Action::SearchQueryChange("yun".into()));
        reducer(&mut state, Action::SearchSubmit);
        reducer(&mut state, Action::SearchQueryChange("y".into()));

        reducer(&mut state, Action::SearchClear);

        assert!(state.view.search_term.is_empty());
        assert!(!state.view.search_debounce.is_pending());
        assert_eq!(shown(&state), vec!["Yun", "Xin"]);
    }

    #[test]
    fn test_suggestion_accept_matches_typed_commit() {
        let records = vec![
            champion("a", "Annie", 2009),
            champion("b", "Anivia", 2009),
            champion("c", "Vayne", 2011),
        ];
        let mut typed = AppState::with_records(records.clone());
        reducer(&mut typed, Action::SearchQueryChange("Anivia".into()));
        reducer(&mut typed, Action::SearchSubmit);

        let mut picked = AppState::with_records(records);
        reducer(&mut picked, Action::SearchQueryChange("ani".into()));
        assert_eq!(picked.suggestions, vec![1]);
        reducer(&mut picked, Action::SuggestionAccept(0));

        assert_eq!(picked.view.search_term, "Anivia");
        assert_eq!(picked.display, typed.display);
    }

    #[test]
    fn test_sort_axes_are_exclusive() {
        let mut state = AppState::with_records(vec![champion("x", "Xin", 2011)]);

        reducer(&mut state, Action::SortByName);
        assert_eq!(state.view.sort, SortMode::NameAsc);

        reducer(&mut state, Action::SortByYearToggle);
        assert_eq!(state.view.sort, SortMode::YearDesc);

        reducer(&mut state, Action::SortByYearToggle);
        assert_eq!(state.view.sort, SortMode::YearAsc);

        let result = reducer(&mut state, Action::SortSet(SortMode::YearAsc));
        assert!(!result.changed);
    }

    #[test]
    fn test_role_cycle_wraps_through_all() {
        let mut state = AppState::with_records(
            serde_json::from_str(
                r#"[{ "nome": "A", "funcao": "Mago" }, { "nome": "B", "funcao": "Tanque" }]"#,
            )
            .unwrap(),
        );

        reducer(&mut state, Action::RoleFilterNext);
        assert_eq!(state.view.category, CategoryFilter::Role("Mago".into()));
        assert_eq!(shown(&state), vec!["A"]);

        reducer(&mut state, Action::RoleFilterNext);
        reducer(&mut state, Action::RoleFilterNext);
        assert_eq!(state.view.category, CategoryFilter::All);

        reducer(&mut state, Action::RoleFilterPrev);
        assert_eq!(state.view.category, CategoryFilter::Role("Tanque".into()));
    }

    #[test]
    fn test_filters_reset() {
        let mut state = AppState::with_records(vec![champion("x", "Xin", 2011)]);
        reducer(&mut state, Action::RoleFilterSet(CategoryFilter::Role("Mago".into())));
        reducer(&mut state, Action::SortByName);
        reducer(&mut state, Action::SearchQueryChange("q".into()));

        reducer(&mut state, Action::FiltersReset);

        assert_eq!(state.view, ViewState::default());
        assert_eq!(shown(&state), vec!["Xin"]);
    }

    #[test]
    fn test_grid_move_clamps() {
        let mut state = AppState::with_records(
            (0..5).map(|i| champion(&i.to_string(), &format!("C{i}"), i)).collect(),
        );
        state.terminal_size = (2 + crate::state::CARD_WIDTH * 2, 40);

        assert!(!reducer(&mut state, Action::GridMove { dx: -1, dy: 0 }).changed);
        reducer(&mut state, Action::GridMove { dx: 0, dy: 1 });
        assert_eq!(state.cursor, 2);
        reducer(&mut state, Action::GridMove { dx: 0, dy: 5 });
        assert_eq!(state.cursor, 4);
    }

    #[test]
    fn test_flip_resets_on_rederive() {
        let mut state = AppState::with_records(vec![champion("x", "Xin", 2011)]);

        reducer(&mut state, Action::GridFlip);
        assert_eq!(state.flipped.as_deref(), Some("x"));

        reducer(&mut state, Action::SortByName);
        assert_eq!(state.flipped, None);
    }

    #[test]
    fn test_detail_does_not_touch_view_state() {
        let mut state = AppState::with_records(vec![champion("x", "Xin", 2011)]);
        let view_before = state.view.clone();

        reducer(&mut state, Action::DetailOpen("x".into()));

        assert_eq!(state.view, view_before);
        assert_eq!(state.detail.as_ref().map(|d| d.record_id.as_str()), Some("x"));
    }

    #[test]
    fn test_detail_open_unknown_id() {
        let mut state = AppState::with_records(vec![champion("x", "Xin", 2011)]);

        let result = reducer(&mut state, Action::DetailOpen("nope".into()));

        assert!(!result.changed);
        assert!(state.detail.is_none());
    }

    #[test]
    fn test_close_releases_playback() {
        let mut record = champion("x", "Xin", 2011);
        record.abilities = vec![
            Ability {
                name: "Q".into(),
                video: Some("q.mp4".into()),
                ..Default::default()
            },
            Ability {
                name: "W".into(),
                video: None,
                ..Default::default()
            },
        ];
        let mut state = AppState::with_records(vec![record]);

        reducer(&mut state, Action::DetailOpen("x".into()));
        assert_eq!(state.playback.source(), Some("q.mp4"));

        // Abilities without video keep the current media.
        reducer(&mut state, Action::GalleryAbilityActivate(1));
        assert_eq!(state.playback.source(), Some("q.mp4"));
        assert_eq!(state.detail.as_ref().unwrap().selection.active_ability, 1);

        reducer(&mut state, Action::DetailClose);
        assert_eq!(state.playback, Playback::Stopped);
        assert!(state.detail.is_none());
    }

    #[test]
    fn test_hover_previews_without_activating() {
        let mut record = champion("x", "Xin", 2011);
        record.abilities = vec![
            Ability {
                name: "Q".into(),
                ..Default::default()
            },
            Ability {
                name: "W".into(),
                video: Some("w.mp4".into()),
                ..Default::default()
            },
        ];
        let mut state = AppState::with_records(vec![record]);
        reducer(&mut state, Action::DetailOpen("x".into()));
        assert!(!state.playback.is_playing());

        reducer(&mut state, Action::GalleryAbilityHover(1));

        let selection = &state.detail.as_ref().unwrap().selection;
        assert_eq!(selection.active_ability, 0);
        assert_eq!(selection.ability_preview, Some(1));
        assert_eq!(state.playback.source(), Some("w.mp4"));
    }

    #[test]
    fn test_related_open_navigates() {
        let ana = champion("a", "Ana", 2010);
        let mut bea = champion("b", "Bea", 2012);
        bea.related = vec!["Unknown".into(), "ana".into()];
        let mut state = AppState::with_records(vec![ana, bea]);
        reducer(&mut state, Action::DetailOpen("b".into()));

        assert!(!reducer(&mut state, Action::RelatedSelect(1)).changed);
        reducer(&mut state, Action::RelatedOpen(0));

        assert_eq!(state.detail.as_ref().map(|d| d.record_id.as_str()), Some("a"));
    }

    #[test]
    fn test_tick_idle_is_unchanged() {
        let mut state = AppState::with_records(vec![champion("x", "Xin", 2011)]);

        let result = reducer(&mut state, Action::Tick);

        assert!(!result.changed);
        assert_eq!(state.clock_ms, TICK_MS);
    }
}
