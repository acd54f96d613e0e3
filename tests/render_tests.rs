//! Render tests using RenderHarness
//!
//! Render components to a test buffer and inspect the plain text.

use champdex::{
    catalog::Catalog,
    components::{
        CatalogScreen, CatalogScreenProps, Component, DetailModal, DetailModalProps,
        SearchOverlay, SearchOverlayProps,
    },
    record::Record,
    state::{AppState, DetailFocus},
    view,
};
use tui_dispatch::{DataResource, testing::*};

fn render_screen(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = CatalogScreen::default();
    render.render_to_string_plain(|frame| {
        let props = CatalogScreenProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn sample_record() -> Record {
    serde_json::from_str(
        r#"{
            "id": "ahri",
            "nome": "Ahri",
            "titulo": "the Nine-Tailed Fox",
            "descricao": "Short blurb.",
            "historia_completa": "Innately connected to the magic of the spirit realm.",
            "frase": "Don't you trust me?",
            "viabilidade": { "dano": 8, "mobilidade": 9.5, "controle": 12 },
            "habilidades": [
                { "nome": "Orb of Deception", "video": "https://example.test/q.mp4", "descricao": "Sends out an orb." },
                { "nome": "Charm", "descricao": "Blows a kiss." }
            ],
            "skins": [
                { "nome": "Arcade Ahri", "imagem": "Ahri_14.jpg" }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn test_render_initial_state() {
    let output = render_screen(&AppState::default(), 80, 24);

    assert!(output.contains("CHAMPIONS (0)"), "Grid frame should render");
    assert!(output.contains("search"), "Should show search hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_loading_state() {
    let state = AppState {
        catalog: DataResource::Loading,
        tick_count: 7,
        ..Default::default()
    };

    let output = render_screen(&state, 80, 24);

    assert!(output.contains("Loading champions..."));
}

#[test]
fn test_render_error_state() {
    let state = AppState {
        catalog: DataResource::Failed("failed to read demos/champions.json".into()),
        ..Default::default()
    };

    let output = render_screen(&state, 100, 24);

    assert!(output.contains("Could not load the champions."));
    assert!(output.contains("failed to read demos/champions.json"));
}

#[test]
fn test_render_cursor_scrolls_into_view() {
    let records = (0..30)
        .map(|i| Record {
            name: format!("Champ{i:02}"),
            year: Some(2000 + i),
            ..Default::default()
        })
        .collect();
    let mut state = AppState::with_records(records);
    state.cursor = 29;

    let output = render_screen(&state, 60, 24);

    // Newest first, so the last card is the oldest champion
    assert!(output.contains("Champ00"), "Cursor card should be visible:\n{output}");
    assert!(!output.contains("Champ29"), "First row should scroll away:\n{output}");
}

#[test]
fn test_render_detail_modal() {
    let record = sample_record();
    let catalog = Catalog::from_records(vec![record]);
    let detail = view::project_detail(&catalog.records()[0], &catalog);

    let mut render = RenderHarness::new(120, 40);
    let mut modal = DetailModal::new();
    let output = render.render_to_string_plain(|frame| {
        let props = DetailModalProps {
            detail: &detail,
            focus: DetailFocus::Abilities,
            related_cursor: 0,
            is_focused: true,
        };
        modal.render(frame, frame.area(), props);
    });

    assert!(output.contains("Innately connected"), "Full story preferred:\n{output}");
    assert!(!output.contains("Short blurb."));
    assert!(output.contains("Dano"));
    assert!(output.contains("Mobilidade"));
    assert!(output.contains("Sends out an orb."));
    assert!(output.contains("https://example.test/q.mp4"));
    assert!(output.contains("Arcade Ahri"));
    assert!(output.contains("No known relations."));
}

#[test]
fn test_render_search_overlay() {
    let ahri = Record {
        name: "Ahri".into(),
        ..Default::default()
    };
    let akali = Record {
        name: "Akali".into(),
        ..Default::default()
    };
    let mut render = RenderHarness::new(80, 24);
    let mut overlay = SearchOverlay::new();
    overlay.set_open(true);

    let output = render.render_to_string_plain(|frame| {
        let props = SearchOverlayProps {
            term: "a",
            suggestions: &[&ahri, &akali],
            selected: Some(1),
            is_focused: true,
        };
        overlay.render(frame, frame.area(), props);
    });

    assert!(output.contains("Ahri"));
    assert!(output.contains("Akali"));
}
