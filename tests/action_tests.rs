//! Action and state tests using EffectStore and TestHarness

use champdex::{
    action::Action,
    catalog::CatalogSource,
    components::{CatalogScreen, CatalogScreenProps, Component},
    effect::Effect,
    record::Record,
    reducer::reducer,
    state::{AppState, CategoryFilter, SEARCH_DEBOUNCE_MS, SortMode, TICK_MS},
};
use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};

fn records() -> Vec<Record> {
    serde_json::from_str(
        r#"[
            { "nome": "Xin", "titulo": "the Seneschal", "funcao": "Lutador", "ano": 2011 },
            { "nome": "Yun", "titulo": "the Wanderer", "funcoes": ["Mago", "Suporte"], "ano": 2020 },
            { "nome": "Élise", "titulo": "the Spider Queen", "funcao": "Mago", "ano": 2012 }
        ]"#,
    )
    .unwrap()
}

fn shown(state: &AppState) -> Vec<String> {
    state
        .display_records()
        .iter()
        .map(|record| record.name.clone())
        .collect()
}

#[test]
fn test_reducer_init_loads_catalog() {
    let mut store = EffectStore::new(AppState::new("https://example.test/champions.json"), reducer);

    assert!(store.state().catalog.is_empty());

    let result = store.dispatch(Action::Init);
    assert!(result.changed, "State should change");
    assert!(store.state().catalog.is_loading());
    assert_eq!(
        result.effects,
        vec![Effect::LoadCatalog {
            source: CatalogSource::Url("https://example.test/champions.json".into()),
        }]
    );
}

#[test]
fn test_reducer_loaded_catalog_has_ids_and_order() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::Init);
    store.dispatch(Action::CatalogDidLoad(records()));

    let ids: Vec<&str> = store
        .state()
        .records()
        .iter()
        .map(|record| record.id.as_str())
        .collect();
    assert_eq!(ids, vec!["xin-0", "yun-1", "élise-2"]);
    assert_eq!(shown(store.state()), vec!["Yun", "Élise", "Xin"]);
}

#[test]
fn test_reducer_category_and_sort() {
    let mut store = EffectStore::new(AppState::with_records(records()), reducer);

    store.dispatch(Action::RoleFilterSet(CategoryFilter::Role("Mago".into())));
    assert_eq!(shown(store.state()), vec!["Yun", "Élise"]);

    store.dispatch(Action::SortByName);
    assert_eq!(shown(store.state()), vec!["Élise", "Yun"]);

    store.dispatch(Action::SortByYearToggle);
    assert_eq!(store.state().view.sort, SortMode::YearDesc);
    store.dispatch(Action::SortByYearToggle);
    assert_eq!(shown(store.state()), vec!["Élise", "Yun"]);

    store.dispatch(Action::FiltersReset);
    assert_eq!(shown(store.state()), vec!["Yun", "Élise", "Xin"]);
}

#[test]
fn test_reducer_search_debounce_single_commit() {
    let mut store = EffectStore::new(AppState::with_records(records()), reducer);

    for term in ["s", "sp", "spi"] {
        store.dispatch(Action::SearchQueryChange(term.into()));
        store.dispatch(Action::Tick);
    }
    // Title matches count for the grid but not for suggestions
    assert!(store.state().suggestions.is_empty());
    assert_eq!(shown(store.state()).len(), 3);

    let mut commits = 0;
    for _ in 0..(SEARCH_DEBOUNCE_MS / TICK_MS) * 2 {
        let before = store.state().display.clone();
        store.dispatch(Action::Tick);
        if store.state().display != before {
            commits += 1;
        }
    }
    assert_eq!(commits, 1);
    assert_eq!(shown(store.state()), vec!["Élise"]);
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::new(AppState::with_records(records()));
    let mut component = CatalogScreen::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("/ n y x", |state, event| {
        let props = CatalogScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(4);
    actions.assert_first(Action::SearchOpen);
    assert_emitted!(actions, Action::SortByName);
    assert_emitted!(actions, Action::SortByYearToggle);
    assert_emitted!(actions, Action::FiltersReset);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = CatalogScreen::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("/ q n", |state, event| {
        let props = CatalogScreenProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::CatalogDidLoad(Vec::new());
    let open = Action::SearchOpen;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("catalog_did"));
    assert_eq!(open.category(), Some("search"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_catalog_did());
    assert!(open.is_search());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::Init);
    harness.emit(Action::SearchQueryChange("ahri".into()));
    harness.emit(Action::CatalogDidError("oops".into()));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![Action::DetailOpen("ahri-0".into()), Action::GalleryAbilityHover(2)];

    assert_emitted!(actions, Action::DetailOpen(_));
    assert_emitted!(actions, Action::GalleryAbilityHover(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::DetailClose);
}
