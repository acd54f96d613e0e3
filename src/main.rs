//! Champdex - champion catalog browser

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use champdex::action::Action;
use champdex::catalog;
use champdex::components::{
    CatalogScreen, CatalogScreenProps, Component, DetailModal, DetailModalProps, SearchOverlay,
    SearchOverlayProps,
};
use champdex::effect::Effect;
use champdex::logging;
use champdex::reducer::reducer;
use champdex::state::{AppState, TICK_MS};
use champdex::view;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Champdex - browse, filter and inspect a champion catalog
#[derive(Parser, Debug)]
#[command(name = "champdex")]
#[command(about = "A champion catalog browser built on tui-dispatch")]
struct Args {
    /// Catalog JSON, as a file path or an http(s) URL
    #[arg(long, short, default_value = "demos/champions.json")]
    source: String,

    /// Append tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ChampComponentId {
    Grid,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ChampContext {
    Main,
    Search,
    Detail,
}

impl EventRoutingState<ChampComponentId, ChampContext> for AppState {
    fn focused(&self) -> Option<ChampComponentId> {
        if self.detail.is_some() {
            Some(ChampComponentId::Detail)
        } else if self.search_mode {
            Some(ChampComponentId::Search)
        } else {
            Some(ChampComponentId::Grid)
        }
    }

    fn modal(&self) -> Option<ChampComponentId> {
        if self.detail.is_some() {
            Some(ChampComponentId::Detail)
        } else if self.search_mode {
            Some(ChampComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ChampComponentId) -> ChampContext {
        match id {
            ChampComponentId::Grid => ChampContext::Main,
            ChampComponentId::Search => ChampContext::Search,
            ChampComponentId::Detail => ChampContext::Detail,
        }
    }

    fn default_context(&self) -> ChampContext {
        ChampContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        source,
        log_file,
        debug: debug_args,
    } = Args::parse();

    logging::init(log_file.as_deref())?;

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let mut state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(source))
        })
        .await
        .map_err(debug_error)?;
    if let Ok(size) = crossterm::terminal::size() {
        state.terminal_size = size;
    }

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct ChampUi {
    screen: CatalogScreen,
    search: SearchOverlay,
    detail: DetailModal,
}

impl ChampUi {
    fn new() -> Self {
        Self {
            screen: CatalogScreen::default(),
            search: SearchOverlay::new(),
            detail: DetailModal::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ChampComponentId>,
    ) {
        event_ctx.set_component_area(ChampComponentId::Grid, area);

        let overlay_open = state.search_mode || state.detail.is_some();
        let props = CatalogScreenProps {
            state,
            is_focused: render_ctx.is_focused() && !overlay_open,
        };
        self.screen.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode && state.detail.is_none() {
            event_ctx.set_component_area(ChampComponentId::Search, SearchOverlay::area(area));
            let suggestions = state.suggestion_records();
            let props = SearchOverlayProps {
                term: &state.view.search_term,
                suggestions: &suggestions,
                selected: state.suggestion_selected,
                is_focused: render_ctx.is_focused(),
            };
            self.search.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&ChampComponentId::Search);
        }

        let detail = state.detail.as_ref().zip(state.detail_record()).zip(state.catalog());
        if let Some(((detail, record), catalog)) = detail {
            event_ctx.set_component_area(ChampComponentId::Detail, DetailModal::area(area));
            let model =
                view::project_detail_with(record, catalog, &detail.selection, &state.playback);
            let props = DetailModalProps {
                detail: &model,
                focus: detail.focus,
                related_cursor: detail.related_cursor,
                is_focused: render_ctx.is_focused(),
            };
            self.detail.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&ChampComponentId::Detail);
        }
    }

    fn handle_grid_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = CatalogScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.screen.handle_event(event, props).into_iter().collect();
        handler_response(actions)
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let suggestions = state.suggestion_records();
        let props = SearchOverlayProps {
            term: &state.view.search_term,
            suggestions: &suggestions,
            selected: state.suggestion_selected,
            is_focused: true,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let (Some(detail), Some(record), Some(catalog)) =
            (state.detail.as_ref(), state.detail_record(), state.catalog())
        else {
            return HandlerResponse::ignored();
        };
        let model = view::project_detail_with(record, catalog, &detail.selection, &state.playback);
        let props = DetailModalProps {
            detail: &model,
            focus: detail.focus,
            related_cursor: detail.related_cursor,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ChampUi::new()));
    let mut bus: EventBus<AppState, Action, ChampComponentId, ChampContext> = EventBus::new();
    let keybindings: Keybindings<ChampContext> = Keybindings::new();

    let ui_grid = Rc::clone(&ui);
    bus.register(ChampComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_grid_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(ChampComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(ChampComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    // Card columns depend on the terminal width
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalog { source } => {
            ctx.tasks().spawn("catalog", async move {
                match catalog::load(&source).await {
                    Ok(records) => Action::CatalogDidLoad(records),
                    Err(e) => {
                        tracing::error!(%source, error = %e, "catalog load failed");
                        Action::CatalogDidError(e.to_string())
                    }
                }
            });
        }
    }
}
