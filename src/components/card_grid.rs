use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::state::{columns_for, CARD_WIDTH};
use crate::view::CardViewModel;

/// Rendered height of one card, border included.
pub const CARD_HEIGHT: u16 = 7;

pub const EMPTY_MESSAGE: &str = "No champions found.";
pub const ERROR_MESSAGE: &str = "Could not load the champions.";

const ACCENT: Color = Color::Rgb(200, 155, 60);
const CARD_BG: Color = Color::Rgb(16, 22, 34);
const TEXT_DIM: Color = Color::Rgb(150, 160, 175);

/// What the grid area shows besides cards
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridStatus<'a> {
    Idle,
    Loading,
    Failed(&'a str),
    Ready,
}

#[derive(Default)]
pub struct CardGrid;

pub struct CardGridProps<'a> {
    pub cards: &'a [CardViewModel],
    pub cursor: usize,
    pub flipped: Option<&'a str>,
    pub status: GridStatus<'a>,
    pub is_focused: bool,
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.cards.is_empty() {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::GridMove { dx: -1, dy: 0 }),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::GridMove { dx: 1, dy: 0 }),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::GridMove { dx: 0, dy: -1 }),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::GridMove { dx: 0, dy: 1 }),
                KeyCode::Home => Some(Action::GridSelect(0)),
                KeyCode::End => Some(Action::GridSelect(props.cards.len() - 1)),
                KeyCode::Char(' ') | KeyCode::Char('f') => Some(Action::GridFlip),
                KeyCode::Enter => props
                    .cards
                    .get(props.cursor)
                    .map(|card| Action::DetailOpen(card.id.clone())),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => Some(Action::GridMove {
                dx: 0,
                dy: delta.signum() as i16,
            }),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXT_DIM))
            .title(format!(" CHAMPIONS ({}) ", props.cards.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match props.status {
            GridStatus::Idle => return,
            GridStatus::Loading => {
                render_message(frame, inner, vec![Line::from("Loading champions...").fg(TEXT_DIM)]);
                return;
            }
            GridStatus::Failed(error) => {
                render_message(
                    frame,
                    inner,
                    vec![
                        Line::from(ERROR_MESSAGE).fg(Color::Red).bold(),
                        Line::from(error.to_string()).fg(Color::Rgb(200, 100, 100)),
                    ],
                );
                return;
            }
            GridStatus::Ready => {}
        }

        if props.cards.is_empty() {
            render_message(frame, inner, vec![Line::from(EMPTY_MESSAGE).fg(TEXT_DIM)]);
            return;
        }

        let columns = columns_for(area.width);
        let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
        let cursor_row = props.cursor / columns;
        let first_row = cursor_row.saturating_sub(visible_rows - 1);

        let rows = props.cards.chunks(columns).enumerate().skip(first_row).take(visible_rows);
        for (screen_row, (row, cards)) in rows.enumerate() {
            let y = inner.y + screen_row as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(inner.bottom().saturating_sub(y));
            for (column, card) in cards.iter().enumerate() {
                let x = inner.x + column as u16 * CARD_WIDTH;
                let card_area = Rect::new(x, y, CARD_WIDTH.min(inner.right() - x), height);
                let index = row * columns + column;
                render_card(
                    frame,
                    card_area,
                    card,
                    index == props.cursor,
                    props.flipped == Some(card.id.as_str()),
                );
            }
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &CardViewModel, selected: bool, flipped: bool) {
    let border = if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(Style::default().bg(CARD_BG));

    let text = if flipped {
        Text::from(vec![
            Line::from(card.summary.clone()).fg(Color::White),
            Line::from(""),
            Line::from(Span::styled("[ ABOUT ]", Style::default().fg(ACCENT).bold())),
        ])
    } else {
        Text::from(vec![
            Line::from(Span::styled(
                card.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.title.clone(), Style::default().fg(TEXT_DIM).italic())),
        ])
    };

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let lines: Vec<Line> = lines.into_iter().map(Line::centered).collect();
    frame.render_widget(Paragraph::new(lines), row);
}
