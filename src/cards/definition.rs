//! Card definitions - static card data.
//!
//! `CardDefinition` holds the printed properties of a card: category,
//! colors, stats and its effects. Definitions are loaded once from the
//! catalog and shared behind `Arc` by every zone that holds the card, so
//! the deck, hand, life and trash never own a mutable copy.
//!
//! Instance-specific data (rested, modifiers, keywords gained in play) lives
//! in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::keyword::Keyword;
use crate::effects::{Effect, EffectTiming};

/// Printed card identifier, e.g. `OP01-001`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardCategory {
    Leader,
    Character,
    Event,
    Stage,
    Don,
}

impl CardCategory {
    /// Parse a category name, ignoring case (`"Character"`, `"LEADER"`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "LEADER" => Some(Self::Leader),
            "CHARACTER" => Some(Self::Character),
            "EVENT" => Some(Self::Event),
            "STAGE" => Some(Self::Stage),
            "DON" | "DON!!" => Some(Self::Don),
            _ => None,
        }
    }
}

/// Card color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Purple,
    Black,
    Yellow,
}

impl CardColor {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "RED" => Some(Self::Red),
            "GREEN" => Some(Self::Green),
            "BLUE" => Some(Self::Blue),
            "PURPLE" => Some(Self::Purple),
            "BLACK" => Some(Self::Black),
            "YELLOW" => Some(Self::Yellow),
            _ => None,
        }
    }

    /// Parse a multicolor string such as `"Red/Green"`, dropping unknown parts.
    #[must_use]
    pub fn parse_list(raw: &str) -> SmallVec<[CardColor; 2]> {
        raw.split('/').filter_map(Self::parse).collect()
    }
}

/// Battle attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardAttribute {
    Strike,
    Slash,
    Special,
    Wisdom,
    Ranged,
}

impl CardAttribute {
    /// Parse an attribute; for dual attributes (`"Slash;Strike"`) the first wins.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let first = raw.split([';', '/']).next()?;
        match first.trim().to_ascii_uppercase().as_str() {
            "STRIKE" => Some(Self::Strike),
            "SLASH" => Some(Self::Slash),
            "SPECIAL" => Some(Self::Special),
            "WISDOM" => Some(Self::Wisdom),
            "RANGED" => Some(Self::Ranged),
            _ => None,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use optcg_engine::cards::{CardCategory, CardDefinition};
///
/// let zoro = CardDefinition::new("OP01-025", "Roronoa Zoro", CardCategory::Character)
///     .with_cost(3)
///     .with_power(5000)
///     .with_counter(1000);
///
/// assert_eq!(zoro.power, 5000);
/// assert!(zoro.is_field_card());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub category: CardCategory,
    pub colors: SmallVec<[CardColor; 2]>,
    pub cost: i64,
    pub power: i64,
    pub counter: i64,
    /// Life cards granted by a leader; 0 for other categories.
    pub life: u32,
    pub attribute: Option<CardAttribute>,
    /// Type tags, e.g. "Straw Hat Crew".
    #[serde(default)]
    pub tags: Vec<String>,
    /// Raw rules text, kept for diagnostics.
    #[serde(default)]
    pub effect_text: String,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl CardDefinition {
    /// Create a definition with zeroed stats.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: CardCategory) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            category,
            colors: SmallVec::new(),
            cost: 0,
            power: 0,
            counter: 0,
            life: 0,
            attribute: None,
            tags: Vec::new(),
            effect_text: String::new(),
            effects: Vec::new(),
        }
    }

    /// Stand-in leader for a deck whose leader id is missing from the catalog.
    #[must_use]
    pub fn mock_leader(id: &CardId) -> Self {
        Self::new(id.as_str(), format!("Mock {id}"), CardCategory::Leader)
            .with_cost(5)
            .with_power(5000)
            .with_life(5)
            .with_attribute(CardAttribute::Strike)
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: i64) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_counter(mut self, counter: i64) -> Self {
        self.counter = counter;
        self
    }

    #[must_use]
    pub fn with_life(mut self, life: u32) -> Self {
        self.life = life;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: CardColor) -> Self {
        self.colors.push(color);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: CardAttribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_effect_text(mut self, text: impl Into<String>) -> Self {
        self.effect_text = text.into();
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Characters and stages occupy a field slot when played.
    #[must_use]
    pub fn is_field_card(&self) -> bool {
        matches!(self.category, CardCategory::Character | CardCategory::Stage)
    }

    /// Keywords printed on the card (its static keyword effects).
    pub fn printed_keywords(&self) -> impl Iterator<Item = Keyword> + '_ {
        self.effects.iter().filter_map(|e| match e.timing {
            EffectTiming::Static(keyword) => Some(keyword),
            _ => None,
        })
    }

    /// Effects that fire at the given timing.
    pub fn effects_at(&self, timing: EffectTiming) -> impl Iterator<Item = &Effect> + '_ {
        self.effects.iter().filter(move |e| e.timing == timing)
    }
}
