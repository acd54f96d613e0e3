use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, ScrollbarStyle, SelectList,
    SelectListBehavior, SelectListProps, SelectListStyle, SelectionStyle, TextInput,
    TextInputProps, TextInputStyle, centered_rect, highlight_substring,
};

use super::Component;
use crate::action::Action;
use crate::record::Record;

const PLACEHOLDER: &str = "Search champions by name or title...";

/// Search input with the autocomplete dropdown underneath
pub struct SearchOverlay {
    input: TextInput,
    list: SelectList,
    modal: Modal,
    was_open: bool,
}

pub struct SearchOverlayProps<'a> {
    pub term: &'a str,
    pub suggestions: &'a [&'a Record],
    pub selected: Option<usize>,
    pub is_focused: bool,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the input when the overlay reopens so the cursor lands at the
    /// end of the current term.
    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
            self.list = SelectList::new();
        }
        self.was_open = is_open;
    }

    /// Overlay footprint within `area`.
    pub fn area(area: Rect) -> Rect {
        centered_rect(64, 16, area)
    }

    fn suggestion_items(suggestions: &[&Record], term: &str) -> Vec<Line<'static>> {
        let base = Style::default().fg(Color::Reset);
        let highlight = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        suggestions
            .iter()
            .map(|record| highlight_substring(&record.name, term, base, highlight))
            .collect()
    }
}

impl Component<Action> for SearchOverlay {
    type Props<'a> = SearchOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        let last = props.suggestions.len().checked_sub(1);
        match key.code {
            KeyCode::Esc => return vec![Action::SearchClose],
            KeyCode::Enter => {
                // A highlighted suggestion wins over the typed text
                return match props.selected {
                    Some(index) if index < props.suggestions.len() => {
                        vec![Action::SuggestionAccept(index)]
                    }
                    _ => vec![Action::SearchSubmit],
                };
            }
            KeyCode::Down => {
                let Some(last) = last else {
                    return Vec::new();
                };
                let next = props.selected.map_or(0, |index| (index + 1).min(last));
                return vec![Action::SuggestionSelect(next)];
            }
            KeyCode::Up => {
                return match props.selected {
                    Some(index) if index > 0 => vec![Action::SuggestionSelect(index - 1)],
                    _ => Vec::new(),
                };
            }
            _ => {}
        }

        // All other keys go to the input
        let input_props = TextInputProps {
            value: props.term,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::SearchQueryChange,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 8 {
            return;
        }

        let SearchOverlay {
            input, list, modal, ..
        } = self;
        let modal_area = Self::area(area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Input
                Constraint::Min(1),    // Suggestions
            ])
            .split(content_area);

            let input_props = TextInputProps {
                value: props.term,
                placeholder: PLACEHOLDER,
                is_focused: props.is_focused,
                style: TextInputStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::all(1),
                        bg: Some(Color::Rgb(40, 44, 60)),
                        fg: None,
                    },
                    placeholder_style: None,
                    cursor_style: None,
                },
                on_change: Action::SearchQueryChange,
                on_submit: |_| Action::SearchSubmit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[0], input_props);

            if props.suggestions.is_empty() {
                return;
            }
            let items = Self::suggestion_items(props.suggestions, props.term);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: props.selected.unwrap_or(0),
                is_focused: props.is_focused && props.selected.is_some(),
                style: SelectListStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::xy(1, 1),
                        bg: None,
                        fg: None,
                    },
                    selection: SelectionStyle::default(),
                    scrollbar: ScrollbarStyle::default(),
                },
                behavior: SelectListBehavior::default(),
                on_select: Action::SuggestionSelect,
                render_item: &|item| item.clone(),
            };
            list.render(frame, chunks[1], list_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(24, 28, 40)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::SearchClose,
                render_content: &mut render_content,
            },
        );
    }
}
