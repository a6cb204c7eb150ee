//! Card system: definitions, instances, keywords, catalog and decks.
//!
//! ## Key Types
//!
//! - `CardId`: Printed card identifier (`OP01-001`)
//! - `CardDefinition`: Immutable printed card data, shared behind `Arc`
//! - `CardInstance`: A card on the field (leader, character, stage)
//! - `KeywordSet`: Printed and granted keywords of an instance
//! - `CardCatalog`: Definition lookup and JSON loading
//! - `DeckDescriptor` / `DeckList`: Deck files and resolved decks

pub mod deck;
pub mod definition;
pub mod instance;
pub mod keyword;
pub mod registry;

pub use deck::{build_deck, DeckBuild, DeckDescriptor, DeckEntry, DeckList};
pub use definition::{CardAttribute, CardCategory, CardColor, CardDefinition, CardId};
pub use instance::CardInstance;
pub use keyword::{Keyword, KeywordSet};
pub use registry::{CardCatalog, CatalogError, LoadReport, SkippedRecord};
