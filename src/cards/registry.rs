//! Card and noble catalog.
//!
//! The `Catalog` is opaque read-only content handed to the engine: three
//! tiers of cards plus the noble list. The engine does not validate it;
//! well-formed content is the supplier's responsibility.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, Tier};
use super::noble::{Noble, NobleId};

/// Catalog of every card and noble in a game.
///
/// ## Example
///
/// ```
/// use gem_market::cards::{Card, CardId, Catalog, Tier};
/// use gem_market::core::GemColor;
///
/// let mut catalog = Catalog::new();
/// catalog.register_card(Card::new(CardId::new(1), Tier::One, 0, GemColor::Red));
///
/// assert_eq!(catalog.card(CardId::new(1)).unwrap().bonus, GemColor::Red);
/// assert_eq!(catalog.tier(Tier::One).len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tiers: [Vec<Card>; 3],
    nobles: Vec<Noble>,
    card_index: FxHashMap<CardId, (Tier, usize)>,
    noble_index: FxHashMap<NobleId, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from complete card and noble lists.
    #[must_use]
    pub fn from_parts(cards: impl IntoIterator<Item = Card>, nobles: impl IntoIterator<Item = Noble>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register_card(card);
        }
        for noble in nobles {
            catalog.register_noble(noble);
        }
        catalog
    }

    /// Add a card to its tier.
    pub fn register_card(&mut self, card: Card) {
        let row = &mut self.tiers[card.tier.index()];
        self.card_index.insert(card.id, (card.tier, row.len()));
        row.push(card);
    }

    /// Add a noble.
    pub fn register_noble(&mut self, noble: Noble) {
        self.noble_index.insert(noble.id, self.nobles.len());
        self.nobles.push(noble);
    }

    /// Cards of one tier, in registration order.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[Card] {
        &self.tiers[tier.index()]
    }

    /// All nobles, in registration order.
    #[must_use]
    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.card_index
            .get(&id)
            .map(|&(tier, slot)| &self.tiers[tier.index()][slot])
    }

    /// Look up a noble by ID.
    #[must_use]
    pub fn noble(&self, id: NobleId) -> Option<&Noble> {
        self.noble_index.get(&id).map(|&slot| &self.nobles[slot])
    }

    /// Total number of cards across tiers.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    /// Iterate over every card, tier one first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.tiers.iter().flat_map(|row| row.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GemColor, Gems};

    fn sample() -> Catalog {
        let cards = [
            Card::new(CardId::new(1), Tier::One, 0, GemColor::Red),
            Card::new(CardId::new(2), Tier::Two, 2, GemColor::Blue),
            Card::new(CardId::new(3), Tier::Three, 4, GemColor::Black),
            Card::new(CardId::new(4), Tier::One, 1, GemColor::White),
        ];
        let nobles = [Noble::new(NobleId::new(1), 3, Gems::new().with(GemColor::Red, 4))];
        Catalog::from_parts(cards, nobles)
    }

    #[test]
    fn test_tiers_preserve_order() {
        let catalog = sample();
        let ids: Vec<_> = catalog.tier(Tier::One).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CardId::new(1), CardId::new(4)]);
        assert_eq!(catalog.card_count(), 4);
        assert_eq!(catalog.cards().count(), 4);
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();
        assert_eq!(catalog.card(CardId::new(3)).map(|c| c.points), Some(4));
        assert!(catalog.card(CardId::new(99)).is_none());
        assert_eq!(catalog.noble(NobleId::new(1)).map(|n| n.prestige), Some(3));
        assert!(catalog.noble(NobleId::new(2)).is_none());
    }
}
