//! Card text to structured effects.
//!
//! A best-effort, lossy reading of a card's rules box. The parser finds the
//! bracketed timing tags, cuts the text after each one into a chunk, and
//! runs an ordered list of phrase heuristics over the chunk. The first
//! heuristic that matches produces the chunk's effect.
//!
//! Keyword tags (`[Blocker]`, `[Rush]`, ...) become static keyword effects
//! and end any open timing chunk, unless written as a grant ("gains
//! [Rush]"). A grant stays in its chunk and is read by the chunk heuristics.
//!
//! Chunks no heuristic understands are kept in `ParseReport::unmatched`, so
//! "this card has no effect" and "this effect was not understood" stay
//! distinguishable.

use super::effect::{Effect, EffectAction, EffectTiming};
use super::targeting::{TargetFilter, TargetOwner, TargetZone};
use crate::cards::Keyword;

/// Result of parsing one card's text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseReport {
    pub effects: Vec<Effect>,
    /// Timing chunks (or untagged text) that produced no effect.
    pub unmatched: Vec<String>,
    /// Chunks examined.
    pub chunks: usize,
}

impl ParseReport {
    /// Share of chunks that produced an effect; 1.0 when there was nothing to parse.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.chunks == 0 {
            return 1.0;
        }
        (self.chunks - self.unmatched.len()) as f64 / self.chunks as f64
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Parse a rules box, discarding the report.
#[must_use]
pub fn parse_effects(text: &str) -> Vec<Effect> {
    parse_effect_text(text).effects
}

/// Parse a rules box into effects plus a record of what was not understood.
///
/// ## Example
///
/// ```
/// use optcg_engine::effects::{parse_effect_text, EffectAction, EffectTiming};
///
/// let report = parse_effect_text(
///     "[On Play] K.O. up to 1 of your opponent's Characters with a cost of 3 or less.",
/// );
///
/// assert_eq!(report.effects[0].timing, EffectTiming::OnPlay);
/// assert_eq!(report.effects[0].action, EffectAction::Ko);
/// assert_eq!(report.coverage(), 1.0);
/// ```
#[must_use]
pub fn parse_effect_text(text: &str) -> ParseReport {
    let text = normalize(text);
    let lower = text.to_ascii_lowercase();
    let tags = scan_tags(&lower);

    let mut report = ParseReport::default();
    let mut chunk_spans: Vec<(usize, usize)> = Vec::new();

    for (i, tag) in tags.iter().enumerate() {
        let Marker::Timing(timing) = tag.marker else {
            continue;
        };

        let end = tags[i + 1..]
            .iter()
            .find(|t| match t.marker {
                Marker::Timing(_) | Marker::DonCondition(_) => true,
                Marker::Keyword(_) => !is_grant(&lower, t),
            })
            .map_or(text.len(), |t| t.start);
        chunk_spans.push((tag.end, end));

        let chunk = text[tag.end..end].trim();
        if chunk.is_empty() {
            continue;
        }
        report.chunks += 1;

        let don_condition = i
            .checked_sub(1)
            .map(|p| &tags[p])
            .filter(|prev| text[prev.end..tag.start].trim().is_empty())
            .and_then(|prev| match prev.marker {
                Marker::DonCondition(n) => Some(n),
                _ => None,
            })
            .unwrap_or(0);

        match parse_chunk(timing, chunk) {
            Some(effect) => report.effects.push(effect.with_don_condition(don_condition)),
            None => report.unmatched.push(chunk.to_string()),
        }
    }

    let mut keywords: Vec<Keyword> = Vec::new();
    for tag in &tags {
        if let Marker::Keyword(keyword) = tag.marker {
            let in_chunk = chunk_spans.iter().any(|&(s, e)| tag.start >= s && tag.start < e);
            let granted = in_chunk && is_grant(&lower, tag);
            if !granted && !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
    }
    report.effects.extend(keywords.into_iter().map(Effect::keyword));

    let tagged = tags
        .iter()
        .any(|t| matches!(t.marker, Marker::Timing(_) | Marker::Keyword(_)));
    if !tagged && !text.trim().is_empty() {
        report.chunks += 1;
        report.unmatched.push(text.trim().to_string());
    }

    report
}

// === Tags ===

#[derive(Clone, Copy, Debug, PartialEq)]
enum Marker {
    Timing(EffectTiming),
    Keyword(Keyword),
    /// `[DON!! xN]`
    DonCondition(u32),
}

#[derive(Debug)]
struct Tag {
    start: usize,
    /// Byte just past the closing bracket.
    end: usize,
    marker: Marker,
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace("<br>", " ")
        .replace('\u{2212}', "-")
        .replace('\u{2019}', "'")
}

/// Recognized bracketed tags in order of appearance.
fn scan_tags(lower: &str) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut from = 0;
    while let Some(open) = lower[from..].find('[').map(|i| i + from) {
        let Some(close) = lower[open..].find(']').map(|i| i + open) else {
            break;
        };
        if let Some(marker) = classify(&lower[open + 1..close]) {
            tags.push(Tag {
                start: open,
                end: close + 1,
                marker,
            });
        }
        from = close + 1;
    }
    tags
}

/// Keyword tag written as the object of "gain"/"gains".
fn is_grant(lower: &str, tag: &Tag) -> bool {
    let head = lower[..tag.start].trim_end();
    head.ends_with("gain") || head.ends_with("gains")
}

fn classify(inner: &str) -> Option<Marker> {
    let compact: String = inner.chars().filter(|c| !c.is_whitespace()).collect();
    let marker = match compact.as_str() {
        "onplay" => Marker::Timing(EffectTiming::OnPlay),
        "whenattacking" => Marker::Timing(EffectTiming::WhenAttacking),
        "activate:main" => Marker::Timing(EffectTiming::ActivateMain),
        "trigger" => Marker::Timing(EffectTiming::Trigger),
        "blocker" => Marker::Keyword(Keyword::Blocker),
        "rush" => Marker::Keyword(Keyword::Rush),
        "banish" => Marker::Keyword(Keyword::Banish),
        "doubleattack" => Marker::Keyword(Keyword::DoubleAttack),
        other => {
            let n = other.strip_prefix("don!!x")?.parse().ok()?;
            Marker::DonCondition(n)
        }
    };
    Some(marker)
}

// === Chunk heuristics ===

fn parse_chunk(timing: EffectTiming, chunk: &str) -> Option<Effect> {
    let lower = chunk.to_ascii_lowercase();
    let (don_cost, body) = strip_don_cost(&lower);

    let effect = parse_action(timing, &body)?;
    Some(effect.with_don_cost(don_cost).with_description(chunk))
}

fn parse_action(timing: EffectTiming, body: &str) -> Option<Effect> {
    let max_cost = count_between(body, "cost of ", " or less");

    if body.contains("power") {
        if let Some(delta) = signed_before(body, " power").or_else(|| first_signed(body)) {
            let mut effect = Effect::new(timing, EffectAction::BuffPower, delta);
            effect.target = guess_target(body);
            return Some(effect);
        }
    }

    if body.contains("k.o.") {
        return Some(
            Effect::new(timing, EffectAction::Ko, 1).with_target(TargetFilter::opponent_character(max_cost)),
        );
    }

    if let Some(n) = count_between(body, "draw ", " card") {
        return Some(Effect::new(timing, EffectAction::DrawCard, n));
    }

    if body.contains("from your hand") {
        if let Some(n) = count_between(body, "trash ", " card") {
            return Some(Effect::new(timing, EffectAction::TrashCard, n));
        }
    }

    if body.contains("to the owner's hand") {
        if let Some(n) = count_between(body, "return up to ", " ") {
            return Some(
                Effect::new(timing, EffectAction::ReturnToHand, n).with_target(field_filter(body, max_cost)),
            );
        }
    }

    if body.contains("bottom of the owner's deck") {
        let count = count_between(body, "place up to ", " ").or_else(|| count_between(body, "return up to ", " "));
        if let Some(n) = count {
            return Some(
                Effect::new(timing, EffectAction::ReturnToBottomDeck, n)
                    .with_target(field_filter(body, max_cost)),
            );
        }
    }

    if body.contains("give") {
        if let Some(delta) = signed_before(body, " cost") {
            return Some(
                Effect::new(timing, EffectAction::CostChange, delta).with_target(field_filter(body, None)),
            );
        }
    }

    if body.contains("set ") && body.contains("as active") {
        let mut effect = Effect::new(timing, EffectAction::SetActive, 0);
        effect.target = guess_target(body);
        return Some(effect);
    }

    if body.contains("gain") {
        let keyword = scan_tags(body).into_iter().find_map(|t| match t.marker {
            Marker::Keyword(k) => Some(k),
            _ => None,
        })?;
        let mut effect = Effect::new(timing, EffectAction::GrantKeyword(keyword), 0);
        effect.target = guess_target(body);
        return Some(effect);
    }

    None
}

/// Coarse target guess from the chunk's wording.
fn guess_target(body: &str) -> Option<TargetFilter> {
    if body.contains("this character") {
        Some(TargetFilter::Source)
    } else if body.contains("opponent's") {
        let zone = if body.contains("character") {
            TargetZone::Character
        } else if body.contains("leader") {
            TargetZone::Leader
        } else {
            TargetZone::Any
        };
        Some(TargetFilter::Select {
            owner: TargetOwner::Opponent,
            zone,
            max_cost: None,
        })
    } else if body.contains("leader") {
        Some(TargetFilter::Leader)
    } else {
        None
    }
}

/// Character filter for "up to N ... Characters" phrasing.
fn field_filter(body: &str, max_cost: Option<i64>) -> TargetFilter {
    let owner = if body.contains("opponent's") {
        TargetOwner::Opponent
    } else if body.contains("your character") {
        TargetOwner::Own
    } else {
        TargetOwner::Any
    };
    TargetFilter::Select {
        owner,
        zone: TargetZone::Character,
        max_cost,
    }
}

/// Split a `DON!! -N` activation cost off the chunk.
fn strip_don_cost(lower: &str) -> (u32, String) {
    const PREFIX: &str = "don!! -";
    let Some(pos) = lower.find(PREFIX) else {
        return (0, lower.to_string());
    };
    let rest = &lower[pos + PREFIX.len()..];
    let len = digit_len(rest);
    let cost = rest[..len].parse().unwrap_or(0);

    let mut body = String::with_capacity(lower.len());
    body.push_str(&lower[..pos]);
    body.push_str(&rest[len..]);
    (cost, body)
}

// === Number scanning ===

fn digit_len(s: &str) -> usize {
    s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len())
}

/// The number N in the first `{prefix}N{suffix}` occurrence.
fn count_between(hay: &str, prefix: &str, suffix: &str) -> Option<i64> {
    hay.match_indices(prefix).find_map(|(i, _)| {
        let rest = &hay[i + prefix.len()..];
        let len = digit_len(rest);
        if len == 0 || !rest[len..].starts_with(suffix) {
            return None;
        }
        rest[..len].parse().ok()
    })
}

/// The signed number immediately before the first matching `suffix`,
/// e.g. `-2000` in `"gets -2000 power"`.
fn signed_before(hay: &str, suffix: &str) -> Option<i64> {
    hay.match_indices(suffix).find_map(|(i, _)| {
        let head = &hay[..i];
        let digits_start = head
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(0, |(p, c)| p + c.len_utf8());
        let digits = &head[digits_start..];
        let sign = head[..digits_start].chars().next_back()?;
        if digits.is_empty() || !matches!(sign, '+' | '-') {
            return None;
        }
        let value: i64 = digits.parse().ok()?;
        Some(if sign == '-' { -value } else { value })
    })
}

/// The first `+N` or `-N` anywhere in the text.
fn first_signed(hay: &str) -> Option<i64> {
    hay.char_indices().find_map(|(i, c)| {
        if !matches!(c, '+' | '-') {
            return None;
        }
        let rest = &hay[i + 1..];
        let len = digit_len(rest);
        let value: i64 = rest[..len].parse().ok()?;
        Some(if c == '-' { -value } else { value })
    })
}
