use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding};

use super::{BannerPalette, Component, TitleBanner, TitleBannerProps};
use crate::action::Action;
use crate::state::DetailFocus;
use crate::view::{AbilityGallery, DetailViewModel, SkinDisplay, SkinGallery, StatBar};

const ACCENT: Color = Color::Rgb(200, 155, 60);
const ACCENT_TEAL: Color = Color::Rgb(10, 200, 185);
const TEXT_MAIN: Color = Color::Rgb(232, 236, 240);
const TEXT_DIM: Color = Color::Rgb(150, 160, 175);
const BG_MODAL: Color = Color::Rgb(14, 18, 28);

/// Full record view: story, stats, galleries and relationships
pub struct DetailModal {
    modal: Modal,
}

pub struct DetailModalProps<'a> {
    pub detail: &'a DetailViewModel,
    pub focus: DetailFocus,
    pub related_cursor: usize,
    pub is_focused: bool,
}

impl Default for DetailModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Modal footprint within `area`.
    pub fn area(area: Rect) -> Rect {
        area.inner(Margin::new(3, 1))
    }

    fn ability_keys(gallery: &AbilityGallery, code: KeyCode) -> Option<Action> {
        let last = gallery.thumbs.len().checked_sub(1)?;
        let cursor = gallery
            .thumbs
            .iter()
            .position(|thumb| thumb.previewed)
            .or_else(|| gallery.thumbs.iter().position(|thumb| thumb.active))
            .unwrap_or(0);
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                Some(Action::GalleryAbilityHover(cursor.saturating_sub(1)))
            }
            KeyCode::Right | KeyCode::Char('l') => {
                Some(Action::GalleryAbilityHover((cursor + 1).min(last)))
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::GalleryAbilityActivate(cursor)),
            _ => None,
        }
    }

    fn skin_keys(gallery: &SkinGallery, code: KeyCode) -> Option<Action> {
        let last = gallery.thumbs.len().checked_sub(1)?;
        let active = gallery.thumbs.iter().position(|thumb| thumb.active).unwrap_or(0);
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                Some(Action::GallerySkinActivate(active.saturating_sub(1)))
            }
            KeyCode::Right | KeyCode::Char('l') => {
                Some(Action::GallerySkinActivate((active + 1).min(last)))
            }
            _ => None,
        }
    }

    fn related_keys(count: usize, cursor: usize, code: KeyCode) -> Option<Action> {
        let last = count.checked_sub(1)?;
        match code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::RelatedSelect(cursor.saturating_sub(1))),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::RelatedSelect((cursor + 1).min(last))),
            KeyCode::Enter => Some(Action::RelatedOpen(cursor.min(last))),
            _ => None,
        }
    }
}

impl Component<Action> for DetailModal {
    type Props<'a> = DetailModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => Some(Action::DetailClose),
            KeyCode::Tab => Some(Action::DetailFocusNext),
            code => match props.focus {
                DetailFocus::Abilities => Self::ability_keys(&props.detail.abilities, code),
                DetailFocus::Skins => Self::skin_keys(&props.detail.skins, code),
                DetailFocus::Related => {
                    Self::related_keys(props.detail.related.len(), props.related_cursor, code)
                }
            },
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 30 || area.height < 12 {
            return;
        }

        let detail = props.detail;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let [banner_area, body_area] =
                Layout::vertical([Constraint::Length(8), Constraint::Fill(1)]).areas(content_area);

            let mut banner = TitleBanner;
            banner.render(
                frame,
                banner_area,
                TitleBannerProps {
                    text: &detail.name,
                    caption: &detail.title,
                    palette: BannerPalette::Arcane,
                    is_animating: false,
                    tick_count: 0,
                },
            );

            let [left, right] =
                Layout::horizontal([Constraint::Percentage(42), Constraint::Percentage(58)])
                    .areas(body_area);
            render_story(frame, left, detail);

            let [abilities_area, skins_area, related_area] = Layout::vertical([
                Constraint::Fill(2),
                Constraint::Length(6),
                Constraint::Fill(1),
            ])
            .areas(right);
            render_abilities(
                frame,
                abilities_area,
                &detail.abilities,
                props.focus == DetailFocus::Abilities,
            );
            render_skins(frame, skins_area, &detail.skins, props.focus == DetailFocus::Skins);
            render_related(
                frame,
                related_area,
                detail,
                props.related_cursor,
                props.focus == DetailFocus::Related,
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: Self::area(area),
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_MODAL),
                        padding: Padding::xy(1, 0),
                        border: None,
                        fg: Some(TEXT_MAIN),
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::DetailClose,
                render_content: &mut render_content,
            },
        );
    }
}

fn section(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(ACCENT_TEAL)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
}

fn render_story(frame: &mut Frame, area: Rect, detail: &DetailViewModel) {
    let stats_height = if detail.stats.is_empty() {
        0
    } else {
        detail.stats.len() as u16 + 2
    };
    let [story_area, stats_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(stats_height)]).areas(area);

    let mut lines = vec![Line::from(detail.narrative.clone()).fg(TEXT_MAIN)];
    if let Some(quote) = &detail.quote {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("\u{201c}{quote}\u{201d}")).fg(ACCENT).italic());
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(section("STORY", false))
            .wrap(Wrap { trim: true }),
        story_area,
    );

    if !detail.stats.is_empty() {
        render_stats(frame, stats_area, &detail.stats);
    }
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &[StatBar]) {
    let block = section("STATS", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical(stats.iter().map(|_| Constraint::Length(1))).split(inner);
    for (stat, row) in stats.iter().zip(rows.iter()) {
        let [label_area, bar_area] =
            Layout::horizontal([Constraint::Length(14), Constraint::Fill(1)]).areas(*row);
        frame.render_widget(Paragraph::new(stat.name.clone()).fg(TEXT_DIM), label_area);
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(ACCENT).bg(Color::Rgb(40, 44, 60)))
                .percent(stat.percent.round() as u16),
            bar_area,
        );
    }
}

fn render_abilities(frame: &mut Frame, area: Rect, gallery: &AbilityGallery, focused: bool) {
    let block = section("ABILITIES", focused);
    if gallery.is_empty() {
        frame.render_widget(
            Paragraph::new("No abilities listed.").fg(TEXT_DIM).block(block),
            area,
        );
        return;
    }

    let thumbs: Vec<Span> = gallery
        .thumbs
        .iter()
        .flat_map(|thumb| {
            let mut style = Style::default().fg(TEXT_DIM);
            if thumb.active {
                style = style.fg(ACCENT).add_modifier(Modifier::BOLD);
            }
            if thumb.previewed {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            let marker = if thumb.has_video { "\u{25b6}" } else { "\u{00b7}" };
            [Span::styled(format!("{marker} {}", thumb.name), style), Span::raw("  ")]
        })
        .collect();

    let media = match &gallery.media {
        Some(source) => Line::from(vec![
            Span::styled("\u{25b6} ", Style::default().fg(ACCENT_TEAL)),
            Span::styled(source.clone(), Style::default().fg(TEXT_DIM).underlined()),
        ]),
        None => Line::from("No preview video.").fg(TEXT_DIM),
    };

    let text = Text::from(vec![
        Line::from(thumbs),
        Line::from(""),
        Line::from(gallery.name.clone()).fg(TEXT_MAIN).bold(),
        Line::from(gallery.description.clone()).fg(TEXT_MAIN),
        Line::from(""),
        media,
    ]);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_skins(frame: &mut Frame, area: Rect, gallery: &SkinGallery, focused: bool) {
    let block = section("SKINS", focused);
    if gallery.is_empty() {
        frame.render_widget(Paragraph::new("No skins listed.").fg(TEXT_DIM).block(block), area);
        return;
    }

    let thumbs: Vec<Span> = gallery
        .thumbs
        .iter()
        .flat_map(|thumb| {
            let style = if thumb.active {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_DIM)
            };
            [Span::styled(thumb.name.clone(), style), Span::raw("  ")]
        })
        .collect();

    let mut lines = vec![Line::from(thumbs)];
    match &gallery.display {
        Some(SkinDisplay::Video(source)) => {
            lines.push(Line::from(format!("\u{25b6} {source}")).fg(ACCENT_TEAL))
        }
        Some(SkinDisplay::Image(source)) => lines.push(Line::from(source.clone()).fg(TEXT_DIM)),
        None => {}
    }
    if let Some(active) = gallery.thumbs.iter().find(|thumb| thumb.active) {
        lines.push(Line::from(active.thumbnail.clone()).fg(TEXT_DIM).italic());
    }
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_related(
    frame: &mut Frame,
    area: Rect,
    detail: &DetailViewModel,
    cursor: usize,
    focused: bool,
) {
    let block = section("RELATED", focused);
    if detail.related.is_empty() {
        frame.render_widget(Paragraph::new("No known relations.").fg(TEXT_DIM).block(block), area);
        return;
    }

    let lines: Vec<Line> = detail
        .related
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let selected = focused && index == cursor;
            let name_style = if selected {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_MAIN)
            };
            Line::from(vec![
                Span::raw(if selected { "> " } else { "  " }),
                Span::styled(entry.name.clone(), name_style),
                Span::styled(format!("  {}", entry.title), Style::default().fg(TEXT_DIM)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
