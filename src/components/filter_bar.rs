use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use super::Component;
use crate::action::Action;
use crate::state::{CategoryFilter, SortMode};

const ACCENT: Color = Color::Rgb(200, 155, 60);
const ACCENT_TEAL: Color = Color::Rgb(10, 200, 185);
const TEXT_DIM: Color = Color::Rgb(150, 160, 175);

/// Category tabs plus the current search term and sort order
pub struct FilterBar;

pub struct FilterBarProps<'a> {
    pub categories: &'a [String],
    pub active: &'a CategoryFilter,
    pub term: &'a str,
    pub sort: SortMode,
    /// A search refresh is waiting on the debounce
    pub pending: bool,
    pub shown: usize,
    pub total: usize,
}

impl FilterBar {
    fn selected_tab(categories: &[String], active: &CategoryFilter) -> usize {
        match active {
            CategoryFilter::All => 0,
            CategoryFilter::Role(role) => categories
                .iter()
                .position(|category| category == role)
                .map_or(0, |index| index + 1),
        }
    }
}

impl Component<Action> for FilterBar {
    type Props<'a> = FilterBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXT_DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [tabs_area, info_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(48)]).areas(inner);

        let titles: Vec<&str> = std::iter::once("All")
            .chain(props.categories.iter().map(String::as_str))
            .collect();
        let tabs = Tabs::new(titles)
            .select(Self::selected_tab(props.categories, props.active))
            .style(Style::default().fg(TEXT_DIM))
            .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, tabs_area);

        let search = if props.term.is_empty() {
            "/".to_string()
        } else if props.pending {
            format!("/{}…", props.term)
        } else {
            format!("/{}", props.term)
        };
        let info = Line::from(vec![
            Span::styled(search, Style::default().fg(ACCENT_TEAL)),
            Span::raw("  |  "),
            Span::styled(props.sort.label(), Style::default().fg(ACCENT)),
            Span::raw("  |  "),
            Span::styled(
                format!("{}/{}", props.shown, props.total),
                Style::default().fg(TEXT_DIM),
            ),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(info), info_area);
    }
}
