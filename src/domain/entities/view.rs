use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::entities::card::{Card, Category};

// ───── Constants ──────────────────────────────────────────────────────
const DESCRIPTION_PREVIEW_CHARS: usize = 140;

static BARE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+([.,]\d+)*$").expect("bare number pattern"));


// ───── Presentation Models ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardLayout {
    Grid,
    List,
}

impl DashboardLayout {
    /// INFO renders as a reading list, every other tab as a card grid.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Info => DashboardLayout::List,
            _ => DashboardLayout::Grid,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCardView {
    pub id: String,
    pub title: String,
    pub badge: String,
    pub image_url: String,
    pub description_preview: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventBlockView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBlockView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_line: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoEntryView {
    pub id: String,
    pub title: String,
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CardPresentation {
    Grid(GridCardView),
    List(InfoEntryView),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub active_category: Category,
    pub tab_label: String,
    pub search_term: String,
    pub layout: DashboardLayout,
    pub empty: bool,
    pub items: Vec<CardPresentation>,
}

// ───── Builders ─────────────────────────────────────────────────────

impl DashboardView {
    pub fn build(category: Category, search_term: &str, cards: &[Card]) -> Self {
        let layout = DashboardLayout::for_category(category);
        let items: Vec<CardPresentation> = cards
            .iter()
            .map(|card| match layout {
                DashboardLayout::Grid => CardPresentation::Grid(GridCardView::from_card(card)),
                DashboardLayout::List => CardPresentation::List(InfoEntryView::from_card(card)),
            })
            .collect();

        DashboardView {
            active_category: category,
            tab_label: category.tab_label().to_string(),
            search_term: search_term.to_string(),
            layout,
            empty: items.is_empty(),
            items,
        }
    }
}

impl GridCardView {
    pub fn from_card(card: &Card) -> Self {
        let event = if card.category == Category::Events {
            EventBlockView::from_card(card)
        } else {
            None
        };

        GridCardView {
            id: card.id.clone(),
            title: card.title.clone(),
            badge: card.category.badge_label().to_string(),
            image_url: card
                .image_url
                .as_ref()
                .map(|image| image.as_str().to_string())
                .unwrap_or_else(|| default_image_url(card.category).to_string()),
            description_preview: preview_text(&card.description),
            link: card.link.clone(),
            event,
        }
    }
}

impl EventBlockView {
    /// None when the card carries no event details at all, so the face
    /// renders like a plain card.
    pub fn from_card(card: &Card) -> Option<Self> {
        let date_line = date_line(card.date.as_deref(), card.time.as_deref());
        let price = card.price.as_deref().map(display_price);

        if date_line.is_none() && card.location.is_none() && card.address.is_none() && price.is_none()
        {
            return None;
        }

        Some(EventBlockView {
            date_line,
            location: card.location.clone(),
            address: card.address.clone(),
            price,
        })
    }
}

impl InfoEntryView {
    pub fn from_card(card: &Card) -> Self {
        InfoEntryView {
            id: card.id.clone(),
            title: card.title.clone(),
            description: card.description.clone(),
            link: card.link.clone(),
            image_url: card.image_url.as_ref().map(|image| image.as_str().to_string()),
        }
    }
}

// ───── Display Rules ────────────────────────────────────────────────

/// Stand-in artwork for cards saved without their own image.
pub fn default_image_url(category: Category) -> &'static str {
    match category {
        Category::Sights => "https://picsum.photos/seed/sights/800/600",
        Category::Food => "https://picsum.photos/seed/food/800/600",
        Category::Nightlife => "https://picsum.photos/seed/nightlife/800/600",
        Category::Events => "https://picsum.photos/seed/events/800/600",
        Category::Info => "https://picsum.photos/800/600",
    }
}

/// Grid faces show a trimmed description, the stored text stays intact.
pub fn preview_text(description: &str) -> String {
    let mut chars = description.chars();
    let preview: String = chars.by_ref().take(DESCRIPTION_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}…")
    } else {
        preview
    }
}

/// Date and time fold into one line, either part may stand alone.
pub fn date_line(date: Option<&str>, time: Option<&str>) -> Option<String> {
    match (date, time) {
        (Some(d), Some(t)) => Some(format!("{} at {}", d, t)),
        (Some(d), None) => Some(d.to_string()),
        (None, Some(t)) => Some(t.to_string()),
        (None, None) => None,
    }
}

/// A bare number gets the currency mark, anything else ("Free", "20€")
/// is shown exactly as entered.
pub fn display_price(raw: &str) -> String {
    let trimmed = raw.trim();
    if BARE_NUMBER_RE.is_match(trimmed) {
        format!("{trimmed}€")
    } else {
        trimmed.to_string()
    }
}
