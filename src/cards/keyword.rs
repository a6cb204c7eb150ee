//! Keyword abilities.
//!
//! Keywords are printed as bracketed tags (`[Blocker]`, `[Rush]`) and may
//! also be granted by effects while a card is on the field. An instance
//! holds at most one copy of each keyword.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A keyword ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Keyword {
    Rush,
    Blocker,
    DoubleAttack,
    Banish,
}

impl Keyword {
    pub const ALL: [Keyword; 4] = [
        Keyword::Rush,
        Keyword::Blocker,
        Keyword::DoubleAttack,
        Keyword::Banish,
    ];

    /// The bracketed tag printed on cards.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Keyword::Rush => "[Rush]",
            Keyword::Blocker => "[Blocker]",
            Keyword::DoubleAttack => "[Double Attack]",
            Keyword::Banish => "[Banish]",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Keyword::Rush => "RUSH",
            Keyword::Blocker => "BLOCKER",
            Keyword::DoubleAttack => "DOUBLE_ATTACK",
            Keyword::Banish => "BANISH",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Small set of keywords held by an instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordSet(SmallVec<[Keyword; 4]>);

impl KeywordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyword. Returns false if it was already present.
    pub fn insert(&mut self, keyword: Keyword) -> bool {
        if self.contains(keyword) {
            return false;
        }
        self.0.push(keyword);
        true
    }

    /// Remove a keyword. Returns true if it was present.
    pub fn remove(&mut self, keyword: Keyword) -> bool {
        match self.0.iter().position(|k| *k == keyword) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, keyword: Keyword) -> bool {
        self.0.contains(&keyword)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Keyword> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        let mut set = Self::new();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}
