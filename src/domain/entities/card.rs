use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use url::Url;
use validator::{Validate, ValidationError};

use crate::{
    entities::option_fields::OptionField,
    errors::{AppError, FieldError},
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_INFO_DESCRIPTION_CHARS: usize = 1000;


// ───── Core Models ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Sights,
    Food,
    Nightlife,
    Events,
    Info,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Sights,
        Category::Food,
        Category::Nightlife,
        Category::Events,
        Category::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sights => "SIGHTS",
            Category::Food => "FOOD",
            Category::Nightlife => "NIGHTLIFE",
            Category::Events => "EVENTS",
            Category::Info => "INFO",
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            Category::Sights => "Sights & Landmarks",
            Category::Food => "Food & Restaurants",
            Category::Nightlife => "Nightlife & Clubs",
            Category::Events => "Events & Concerts",
            Category::Info => "Good to Know",
        }
    }

    pub fn badge_label(&self) -> &'static str {
        match self {
            Category::Sights => "Sights",
            Category::Food => "Food",
            Category::Nightlife => "Nightlife",
            Category::Events => "Events",
            Category::Info => "Info",
        }
    }

    /// INFO cards are plain text entries, everything else is a visual card.
    pub fn requires_image(&self) -> bool {
        !matches!(self, Category::Info)
    }

    pub fn requires_link(&self) -> bool {
        !matches!(self, Category::Info)
    }

    pub fn max_description_chars(&self) -> Option<usize> {
        match self {
            Category::Info => Some(MAX_INFO_DESCRIPTION_CHARS),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Unknown category '{}', expected one of SIGHTS, FOOD, NIGHTLIFE, EVENTS, INFO",
                    s
                ))
            })
    }
}

/// Image reference on a card. `Inline` holds a base64 `data:` URL as
/// produced by the normalizer, `Remote` an ordinary http(s) URL.
#[derive(Debug, Clone, PartialEq)]
pub enum CardImage {
    Inline(String),
    Remote(Url),
}

impl CardImage {
    pub fn as_str(&self) -> &str {
        match self {
            CardImage::Inline(data) => data,
            CardImage::Remote(url) => url.as_str(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, CardImage::Inline(_))
    }
}

impl FromStr for CardImage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("data:image/") {
            return Ok(CardImage::Inline(s.to_string()));
        }
        match Url::parse(s) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                Ok(CardImage::Remote(url))
            }
            _ => Err(new_validation_error(
                "invalid_image",
                "Image must be a data:image/.. URL or an http(s) URL",
            )),
        }
    }
}

impl Serialize for CardImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CardImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| {
            de::Error::custom("expected a data:image/.. URL or an http(s) URL")
        })
    }
}

/// Image slot on the wire: `null` and a blank string both mean "no
/// image", anything else must parse as a [`CardImage`].
fn deserialize_image_slot<'de, D>(deserializer: D) -> Result<Option<CardImage>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom("expected a data:image/.. URL or an http(s) URL")),
    }
}

/// Same rule for PATCH bodies, where `null` and a blank string clear the
/// slot and an absent field never reaches this function.
fn deserialize_image_field<'de, D>(deserializer: D) -> Result<OptionField<CardImage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match deserialize_image_slot(deserializer)? {
        None => OptionField::SetToNull,
        Some(image) => OptionField::SetToValue(image),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,

    #[serde(
        default,
        deserialize_with = "deserialize_image_slot",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<CardImage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date_added: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CardMutationResponse {
    pub card: Card,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CardDeletedResponse {
    pub deleted: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// The current collection rendered as a seed literal, ready to be pasted
/// over the built-in collection.
#[derive(Debug, Serialize)]
pub struct SeedExportResponse {
    pub count: usize,
    pub content: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCardRequest {
    #[validate(
        length(min = 1, message = "Title cannot be empty"),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,

    pub category: Category,

    #[serde(
        default,
        deserialize_with = "deserialize_image_slot",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<CardImage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_link"))]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCardRequest {
    #[validate(custom(function = "validate_optional_title"))]
    pub title: OptionField<String>,

    #[validate(custom(function = "validate_optional_not_blank"))]
    pub description: OptionField<String>,

    pub category: OptionField<Category>,

    #[serde(deserialize_with = "deserialize_image_field")]
    pub image_url: OptionField<CardImage>,

    #[validate(custom(function = "validate_optional_link"))]
    pub link: OptionField<String>,

    pub location: OptionField<String>,

    pub date: OptionField<String>,

    pub time: OptionField<String>,

    pub address: OptionField<String>,

    pub price: OptionField<String>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(new_validation_error("title_blank", "Title cannot be empty"));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("blank", "Description cannot be empty"));
    }
    Ok(())
}

pub fn validate_link(link: &str) -> Result<(), ValidationError> {
    match Url::parse(link) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error(
                    "invalid_link_scheme",
                    "Link must start with http:// or https://",
                ))
            }
        }
        Err(_) => Err(new_validation_error("invalid_link", "Invalid link format")),
    }
}

pub fn validate_optional_title(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(title) = value {
        validate_title(title)?;
    }
    Ok(())
}

pub fn validate_optional_not_blank(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(text) = value {
        validate_not_blank(text)?;
    }
    Ok(())
}

pub fn validate_optional_link(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(link) = value {
        validate_link(link)?;
    }
    Ok(())
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ───── Conversions & Rules ──────────────────────────────────────────

impl NewCardRequest {
    /// Build the stored card. `stamp` is the creation instant in epoch
    /// milliseconds and doubles as the card id.
    pub fn into_card(self, stamp: i64) -> Result<Card, AppError> {
        self.validate().map_err(AppError::from)?;

        let card = Card {
            id: stamp.to_string(),
            title: self.title,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
            link: none_if_blank(self.link),
            date_added: DateTime::from_timestamp_millis(stamp).unwrap_or_else(Utc::now),
            location: none_if_blank(self.location),
            date: none_if_blank(self.date),
            time: none_if_blank(self.time),
            address: none_if_blank(self.address),
            price: none_if_blank(self.price),
        };

        card.enforce_category_rules()?;
        Ok(card)
    }
}

impl UpdateCardRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_unchanged()
            && self.description.is_unchanged()
            && self.category.is_unchanged()
            && self.image_url.is_unchanged()
            && self.link.is_unchanged()
            && self.location.is_unchanged()
            && self.date.is_unchanged()
            && self.time.is_unchanged()
            && self.address.is_unchanged()
            && self.price.is_unchanged()
    }

    /// Apply the patch on top of an existing card. The id and creation
    /// stamp of `current` always survive the merge.
    pub fn merge_into(self, current: Card) -> Result<Card, AppError> {
        self.validate().map_err(AppError::from)?;

        let mut card = current;
        let mut errors = Vec::new();

        match self.title {
            OptionField::SetToValue(title) => card.title = title,
            OptionField::SetToNull => errors.push(FieldError {
                field: "title".to_string(),
                message: "Title cannot be removed".to_string(),
            }),
            OptionField::Unchanged => {}
        }
        match self.description {
            OptionField::SetToValue(description) => card.description = description,
            OptionField::SetToNull => errors.push(FieldError {
                field: "description".to_string(),
                message: "Description cannot be removed".to_string(),
            }),
            OptionField::Unchanged => {}
        }
        match self.category {
            OptionField::SetToValue(category) => card.category = category,
            OptionField::SetToNull => errors.push(FieldError {
                field: "category".to_string(),
                message: "Category cannot be removed".to_string(),
            }),
            OptionField::Unchanged => {}
        }

        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        card.image_url = self.image_url.apply_to(card.image_url);
        card.link = none_if_blank(self.link.apply_to(card.link));
        card.location = none_if_blank(self.location.apply_to(card.location));
        card.date = none_if_blank(self.date.apply_to(card.date));
        card.time = none_if_blank(self.time.apply_to(card.time));
        card.address = none_if_blank(self.address.apply_to(card.address));
        card.price = none_if_blank(self.price.apply_to(card.price));

        card.enforce_category_rules()?;
        Ok(card)
    }
}

impl Card {
    /// Completeness rules that depend on the category. Checked after
    /// create and after every merge, so a category switch re-applies the
    /// target category's requirements.
    pub fn enforce_category_rules(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        if self.category.requires_image() && self.image_url.is_none() {
            errors.push(FieldError {
                field: "imageUrl".to_string(),
                message: format!("An image is required for {} cards", self.category),
            });
        }
        if self.category.requires_link() && self.link.is_none() {
            errors.push(FieldError {
                field: "link".to_string(),
                message: format!("A link is required for {} cards", self.category),
            });
        }
        if let Some(max) = self.category.max_description_chars() {
            if self.description.chars().count() > max {
                errors.push(FieldError {
                    field: "description".to_string(),
                    message: format!(
                        "Description is limited to {} characters for {} cards",
                        max, self.category
                    ),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(errors))
        }
    }
}
