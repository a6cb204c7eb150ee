//! Effect definitions.
//!
//! An `Effect` is one structured ability of a card: when it fires, what it
//! does, to what, and how much. Effects are built by the text parser or by
//! hand and resolved one at a time by `EffectResolver`.

use serde::{Deserialize, Serialize};

use super::targeting::TargetFilter;
use crate::cards::Keyword;

/// When an effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectTiming {
    /// `[On Play]`: after the card enters the field.
    OnPlay,
    /// `[When Attacking]`: when the card declares an attack.
    WhenAttacking,
    /// `[Activate: Main]`: activated by its controller in the main phase.
    ActivateMain,
    /// `[Trigger]`: revealed from life.
    Trigger,
    /// A keyword the card always has while on the field.
    Static(Keyword),
}

impl EffectTiming {
    #[must_use]
    pub fn is_static(self) -> bool {
        matches!(self, EffectTiming::Static(_))
    }
}

/// What an effect does.
///
/// The numeric payload lives in `Effect::value`: a signed power delta for
/// `BuffPower`, a signed cost delta for `CostChange`, a card count for
/// `DrawCard`/`TrashCard`, and the "up to N" count for the rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectAction {
    /// Move a character to its owner's trash.
    Ko,
    BuffPower,
    DrawCard,
    /// Discard from the end of the controller's hand.
    TrashCard,
    ReturnToHand,
    ReturnToBottomDeck,
    CostChange,
    GrantKeyword(Keyword),
    /// Set the target active (un-rest).
    SetActive,
}

impl EffectAction {
    /// Actions that act on an instance rather than on the controller.
    #[must_use]
    pub fn needs_target(self) -> bool {
        !matches!(self, EffectAction::DrawCard | EffectAction::TrashCard)
    }
}

/// A structured card effect.
///
/// ## Example
///
/// ```
/// use optcg_engine::effects::{Effect, EffectAction, EffectTiming, TargetFilter};
///
/// let ko: TargetFilter = "opponent|character|cost<=3".parse().unwrap();
/// let effect = Effect::new(EffectTiming::OnPlay, EffectAction::Ko, 1).with_target(ko);
///
/// assert_eq!(effect.target.unwrap().to_string(), "opponent|character|cost<=3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub timing: EffectTiming,

    /// DON!! cards returned to the DON!! deck to activate (`DON!! -N`).
    #[serde(default)]
    pub don_cost: u32,

    /// DON!! cards that must be attached to the source (`[DON!! xN]`).
    #[serde(default)]
    pub don_condition: u32,

    /// Target filter; `None` means the source itself.
    #[serde(default)]
    pub target: Option<TargetFilter>,

    pub action: EffectAction,

    #[serde(default)]
    pub value: i64,

    /// Source text, for diagnostics.
    #[serde(default)]
    pub description: String,
}

impl Effect {
    #[must_use]
    pub fn new(timing: EffectTiming, action: EffectAction, value: i64) -> Self {
        Self {
            timing,
            don_cost: 0,
            don_condition: 0,
            target: None,
            action,
            value,
            description: String::new(),
        }
    }

    /// A static keyword (`[Blocker]`, `[Rush]`, ...).
    #[must_use]
    pub fn keyword(keyword: Keyword) -> Self {
        Self::new(EffectTiming::Static(keyword), EffectAction::GrantKeyword(keyword), 0)
            .with_description(keyword.tag())
    }

    /// `[On Play] Draw N cards.`
    #[must_use]
    pub fn on_play_draw(count: i64) -> Self {
        Self::new(EffectTiming::OnPlay, EffectAction::DrawCard, count)
            .with_description(format!("Draw {count} cards"))
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetFilter) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_don_cost(mut self, don: u32) -> Self {
        self.don_cost = don;
        self
    }

    #[must_use]
    pub fn with_don_condition(mut self, don: u32) -> Self {
        self.don_condition = don;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
