//! View-models for the card grid and the detail modal

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::record::Record;
use crate::state::Playback;

/// Base URL of the portrait art used for skin thumbnails.
pub const SKIN_ART_BASE: &str = "https://ddragon.leagueoflegends.com/cdn/img/champion/loading";

/// Stat values are on a 0-10 scale; bars are percentages.
const STAT_SCALE: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct CardViewModel {
    pub id: String,
    pub name: String,
    pub title: String,
    pub summary: String,
    pub image: String,
}

/// One card per record, in display order.
pub fn project_cards(display: &[&Record]) -> Vec<CardViewModel> {
    display
        .iter()
        .map(|record| CardViewModel {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            summary: record.summary.clone(),
            image: record.image.clone(),
        })
        .collect()
}

/// Active items of the detail galleries. `ability_preview` is the hovered
/// thumbnail, which swaps media but not the description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GallerySelection {
    pub active_ability: usize,
    pub ability_preview: Option<usize>,
    pub active_skin: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatBar {
    pub name: String,
    /// Bar width, 0-100.
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelatedEntry {
    pub id: String,
    pub name: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AbilityThumb {
    pub name: String,
    pub icon: String,
    pub has_video: bool,
    pub active: bool,
    pub previewed: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbilityGallery {
    pub thumbs: Vec<AbilityThumb>,
    /// Name and description of the active ability.
    pub name: String,
    pub description: String,
    /// Video loaded in the player.
    pub media: Option<String>,
}

impl AbilityGallery {
    pub fn is_empty(&self) -> bool {
        self.thumbs.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SkinDisplay {
    Video(String),
    Image(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkinThumb {
    pub name: String,
    pub thumbnail: String,
    pub active: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkinGallery {
    pub thumbs: Vec<SkinThumb>,
    pub display: Option<SkinDisplay>,
}

impl SkinGallery {
    pub fn is_empty(&self) -> bool {
        self.thumbs.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailViewModel {
    pub id: String,
    pub image: String,
    pub name: String,
    pub title: String,
    pub narrative: String,
    pub quote: Option<String>,
    pub stats: Vec<StatBar>,
    pub related: Vec<RelatedEntry>,
    pub abilities: AbilityGallery,
    pub skins: SkinGallery,
}

/// Detail view as first opened: first ability and first skin active, the
/// first ability's video loaded.
pub fn project_detail(record: &Record, catalog: &Catalog) -> DetailViewModel {
    let selection = GallerySelection::default();
    let playback = opening_playback(record);
    project_detail_with(record, catalog, &selection, &playback)
}

pub fn project_detail_with(
    record: &Record,
    catalog: &Catalog,
    selection: &GallerySelection,
    playback: &Playback,
) -> DetailViewModel {
    DetailViewModel {
        id: record.id.clone(),
        image: record.image.clone(),
        name: record.name.clone(),
        title: record.title.clone(),
        narrative: record.narrative().to_string(),
        quote: record.quote.clone().filter(|quote| !quote.is_empty()),
        stats: stat_bars(record),
        related: related_entries(record, catalog),
        abilities: ability_gallery(record, selection, playback),
        skins: skin_gallery(record, selection),
    }
}

/// Playback state when a record's detail opens.
pub fn opening_playback(record: &Record) -> Playback {
    match record.abilities.first().and_then(|ability| ability.video.clone()) {
        Some(source) => Playback::Playing { source },
        None => Playback::Stopped,
    }
}

fn stat_bars(record: &Record) -> Vec<StatBar> {
    record
        .stats
        .iter()
        .map(|(name, value)| StatBar {
            name: capitalize(name),
            percent: (value * STAT_SCALE).clamp(0.0, 100.0),
        })
        .collect()
}

fn related_entries(record: &Record, catalog: &Catalog) -> Vec<RelatedEntry> {
    record
        .related
        .iter()
        .filter_map(|token| catalog.find_by_name_or_id(token))
        .map(|related| RelatedEntry {
            id: related.id.clone(),
            name: related.name.clone(),
            title: related.title.clone(),
        })
        .collect()
}

fn ability_gallery(
    record: &Record,
    selection: &GallerySelection,
    playback: &Playback,
) -> AbilityGallery {
    let Some(active) = record.abilities.get(selection.active_ability) else {
        return AbilityGallery::default();
    };
    let thumbs = record
        .abilities
        .iter()
        .enumerate()
        .map(|(index, ability)| AbilityThumb {
            name: ability.name.clone(),
            icon: ability.icon.clone(),
            has_video: ability.video.is_some(),
            active: index == selection.active_ability,
            previewed: selection.ability_preview == Some(index),
        })
        .collect();
    AbilityGallery {
        thumbs,
        name: active.name.clone(),
        description: active.description.clone(),
        media: playback.source().map(str::to_string),
    }
}

fn skin_gallery(record: &Record, selection: &GallerySelection) -> SkinGallery {
    let Some(active) = record.skins.get(selection.active_skin) else {
        return SkinGallery::default();
    };
    let thumbs = record
        .skins
        .iter()
        .enumerate()
        .map(|(index, skin)| SkinThumb {
            name: skin.name.clone(),
            thumbnail: skin_thumbnail_url(&record.id, &skin.image),
            active: index == selection.active_skin,
        })
        .collect();
    let display = match &active.video {
        Some(video) => SkinDisplay::Video(video.clone()),
        None => SkinDisplay::Image(active.image.clone()),
    };
    SkinGallery {
        thumbs,
        display: Some(display),
    }
}

/// Portrait art for a skin: `<base>/<record id>_<last "_" segment of the image>`.
pub fn skin_thumbnail_url(record_id: &str, skin_image: &str) -> String {
    let suffix = skin_image.rsplit('_').next().unwrap_or(skin_image);
    format!("{SKIN_ART_BASE}/{record_id}_{suffix}")
}

/// Upper-case the first character, leaving the rest untouched.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
