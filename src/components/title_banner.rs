use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::cmp::Ordering;

use super::Component;
use crate::action::Action;
use crate::state::LOADING_ANIM_CYCLE_TICKS;

/// FIGlet heading with a one-line caption underneath
pub struct TitleBanner;

pub struct TitleBannerProps<'a> {
    pub text: &'a str,
    pub caption: &'a str,
    pub palette: BannerPalette,
    pub is_animating: bool,
    pub tick_count: u32,
}

/// Rows used by the caption and its spacer.
pub const BANNER_OVERHEAD: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerPalette {
    Gold,
    Arcane,
    Muted,
}

impl BannerPalette {
    /// Gradient stops across the banner. Positions ascend from 0.0 to 1.0 and
    /// both ends share a color so the band tiles while it scrolls.
    fn stops(self) -> Vec<(f32, ArtColor)> {
        match self {
            // Dark metal with a narrow bright sheen in the middle
            BannerPalette::Gold => {
                let deep = ArtColor::rgb(120, 90, 40);
                let gold = ArtColor::rgb(200, 155, 60);
                let shine = ArtColor::rgb(240, 230, 210);
                vec![(0.0, deep), (0.4, gold), (0.5, shine), (0.6, gold), (1.0, deep)]
            }
            BannerPalette::Arcane => {
                let teal = ArtColor::rgb(10, 200, 185);
                let violet = ArtColor::rgb(120, 140, 255);
                vec![(0.0, teal), (0.5, violet), (1.0, teal)]
            }
            BannerPalette::Muted => {
                let gray = ArtColor::rgb(170, 170, 170);
                vec![(0.0, gray), (1.0, gray)]
            }
        }
    }
}

/// Shift `stops` right by `phase`, wrapping what falls off the end.
fn scroll_stops(stops: &[(f32, ArtColor)], phase: f32) -> Vec<artbox::ColorStop> {
    let phase = phase.rem_euclid(1.0);
    let seam = sample_color(stops, 1.0 - phase);
    let mut shifted = Vec::with_capacity(stops.len() + 2);
    shifted.push((0.0, seam));
    shifted.push((1.0, seam));
    shifted.extend(stops.iter().map(|&(pos, color)| ((pos + phase) % 1.0, color)));
    shifted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    shifted
        .into_iter()
        .map(|(pos, color)| artbox::ColorStop::new(pos, color))
        .collect()
}

fn animated_phase(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % steps) as f32 / steps as f32
}

/// Color at `position` along ascending `stops`.
fn sample_color(stops: &[(f32, ArtColor)], position: f32) -> ArtColor {
    let pos = position.clamp(0.0, 1.0);
    stops
        .windows(2)
        .find(|pair| pair[1].0 >= pos)
        .map(|pair| {
            let ((from, start), (to, end)) = (pair[0], pair[1]);
            if to - from <= f32::EPSILON {
                end
            } else {
                start.interpolate(end, (pos - from) / (to - from))
            }
        })
        .or_else(|| stops.last().map(|&(_, color)| color))
        .unwrap_or(ArtColor::rgb(0, 0, 0))
}

impl Component<Action> for TitleBanner {
    type Props<'a> = TitleBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet text, artbox picks the font that fits
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Caption
        ])
        .split(area);

        let phase = if props.is_animating {
            animated_phase(props.tick_count)
        } else {
            0.0
        };
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(Fill::Linear(LinearGradient::new(
                8.0,
                scroll_stops(&props.palette.stops(), phase),
            )));

        frame.render_widget(ArtBox::new(&renderer, props.text), chunks[0]);

        let caption = Line::from(vec![Span::styled(
            props.caption.to_string(),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(caption), chunks[2]);
    }
}
