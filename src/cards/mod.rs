//! Catalog content: cards and nobles.
//!
//! - `Card`: immutable tiered item with cost, points and a bonus color
//! - `Noble`: immutable prestige award with a bonus requirement
//! - `Catalog`: the opaque read-only content a game is built from

pub mod definition;
pub mod noble;
pub mod registry;

pub use definition::{Card, CardId, Tier};
pub use noble::{Noble, NobleId};
pub use registry::Catalog;
