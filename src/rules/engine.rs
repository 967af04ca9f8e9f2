//! Rules engine: pure predicates and arithmetic over gems.
//!
//! Nothing here holds state or mutates its inputs. The transition function
//! and the legal-action enumerator both build on these checks, so a rule
//! lives in exactly one place.

use crate::cards::{Card, Noble};
use crate::core::config::{GEM_CAP, RESERVATION_CAP, TAKE_TWO_MINIMUM, WIN_THRESHOLD};
use crate::core::{GameState, GemColor, GemSelection, Gems, PlayerId, PlayerState};

use super::error::RuleViolation;

/// Result of a legal take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TakeOutcome {
    /// Gems the player will hold beyond the cap afterwards.
    pub excess: u32,
}

impl TakeOutcome {
    #[must_use]
    pub fn requires_discard(&self) -> bool {
        self.excess > 0
    }
}

/// The standard take shapes: two of one color (pool permitting) or three
/// distinct colors. Gold never qualifies.
#[must_use]
pub fn can_take_resources(selection: &GemSelection, pool: &Gems) -> bool {
    if selection.colors().iter().any(|c| c.is_wildcard()) {
        return false;
    }
    match selection.len() {
        2 if selection.is_pair() => pool[selection.colors()[0]] >= TAKE_TWO_MINIMUM,
        3 => selection.is_distinct(),
        _ => false,
    }
}

/// Colored gems with at least one left in the pool.
#[must_use]
pub fn available_colors(pool: &Gems) -> Vec<GemColor> {
    GemColor::COLORED
        .iter()
        .copied()
        .filter(|&c| pool[c] > 0)
        .collect()
}

/// Full take legality: shape, pool availability, and the post-take count.
///
/// Beyond the standard shapes, a single gem is always allowed and two
/// distinct gems are allowed once fewer than three colors remain. Going
/// over the cap is legal; the outcome reports the excess to discard.
pub fn validate_take(
    selection: &GemSelection,
    pool: &Gems,
    player_gems: &Gems,
) -> Result<TakeOutcome, RuleViolation> {
    let colors = selection.colors();
    if colors.is_empty() || colors.len() > 3 {
        return Err(RuleViolation::SelectionSize(colors.len()));
    }
    if colors.iter().any(|c| c.is_wildcard()) {
        return Err(RuleViolation::WildcardSelected);
    }

    if selection.is_pair() {
        let color = colors[0];
        if pool[color] < TAKE_TWO_MINIMUM {
            return Err(RuleViolation::PairUnavailable {
                color,
                available: pool[color],
            });
        }
    } else {
        if !selection.is_distinct() {
            return Err(RuleViolation::InvalidShape);
        }
        if let Some(&missing) = colors.iter().find(|&&c| pool[c] == 0) {
            return Err(RuleViolation::ColorExhausted(missing));
        }
        let degraded = match colors.len() {
            1 => true,
            2 => available_colors(pool).len() < 3,
            _ => false,
        };
        if !degraded && !can_take_resources(selection, pool) {
            return Err(RuleViolation::InvalidShape);
        }
    }

    let after = player_gems.total() + selection.len() as u32;
    Ok(TakeOutcome {
        excess: after.saturating_sub(GEM_CAP),
    })
}

/// Colored gems still missing after spending what is held of each color.
#[must_use]
pub fn colored_shortfall(resources: &Gems, cost: &Gems) -> u32 {
    GemColor::COLORED
        .iter()
        .map(|&c| u32::from(cost[c].saturating_sub(resources[c])))
        .sum()
}

/// Whether `resources` can pay `cost`, using gold for any colored shortfall.
#[must_use]
pub fn can_afford(resources: &Gems, cost: &Gems) -> bool {
    colored_shortfall(resources, cost) <= u32::from(resources[GemColor::Gold])
}

/// The gems actually spent to pay `cost`: colored first, gold for the rest.
#[must_use]
pub fn payment_for(resources: &Gems, cost: &Gems) -> Option<Gems> {
    if !can_afford(resources, cost) {
        return None;
    }
    let mut payment = Gems::new();
    let mut gold_needed = 0u8;
    for color in GemColor::COLORED {
        let from_color = cost[color].min(resources[color]);
        payment[color] = from_color;
        gold_needed = gold_needed.saturating_add(cost[color] - from_color);
    }
    payment[GemColor::Gold] = gold_needed;
    Some(payment)
}

/// Per-color permanent discount from purchased cards.
#[must_use]
pub fn bonus_discount(player: &PlayerState) -> Gems {
    player.bonuses()
}

/// A card's cost after the player's bonus discount.
#[must_use]
pub fn effective_cost(player: &PlayerState, card: &Card) -> Gems {
    card.cost.minus(&bonus_discount(player))
}

/// Whether the player can buy the card right now.
#[must_use]
pub fn can_purchase(player: &PlayerState, card: &Card) -> bool {
    can_afford(&player.gems, &effective_cost(player, card))
}

#[must_use]
pub fn can_reserve(player: &PlayerState) -> bool {
    player.reserved.len() < RESERVATION_CAP
}

/// Whether the player's bonus totals meet the noble's requirement.
#[must_use]
pub fn can_claim_noble(player: &PlayerState, noble: &Noble) -> bool {
    can_afford(&bonus_discount(player), &noble.requirement)
}

/// Nobles in the pool the player currently qualifies for.
#[must_use]
pub fn eligible_nobles(state: &GameState, player: PlayerId) -> Vec<Noble> {
    let Some(player) = state.player(player) else {
        return Vec::new();
    };
    let bonuses = bonus_discount(player);
    state
        .nobles
        .iter()
        .filter(|noble| can_afford(&bonuses, &noble.requirement))
        .copied()
        .collect()
}

/// Whether any player reached the win threshold.
#[must_use]
pub fn is_game_over(state: &GameState) -> bool {
    state.players.iter().any(|p| p.prestige >= WIN_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, NobleId, Tier};
    use crate::core::PlayerKind;

    fn sel(colors: &[GemColor]) -> GemSelection {
        GemSelection::new(colors)
    }

    fn player_with(gems: Gems) -> PlayerState {
        let mut player = PlayerState::new(PlayerId::new(0), "Ada", PlayerKind::Human);
        player.gems = gems;
        player
    }

    #[test]
    fn test_can_take_resources_shapes() {
        let pool = Gems::uniform(4, 5);
        assert!(can_take_resources(&sel(&[GemColor::Red, GemColor::Red]), &pool));
        assert!(can_take_resources(&sel(&[GemColor::Red, GemColor::Blue, GemColor::Green]), &pool));
        assert!(!can_take_resources(&sel(&[GemColor::Red]), &pool));
        assert!(!can_take_resources(&sel(&[GemColor::Red, GemColor::Blue]), &pool));
        assert!(!can_take_resources(&sel(&[GemColor::Gold, GemColor::Gold]), &pool));

        let low = pool.with(GemColor::Red, 3);
        assert!(!can_take_resources(&sel(&[GemColor::Red, GemColor::Red]), &low));
    }

    #[test]
    fn test_validate_take_pair_rule() {
        let pool = Gems::uniform(4, 5);
        let pair = sel(&[GemColor::Red, GemColor::Red]);
        assert_eq!(validate_take(&pair, &pool, &Gems::new()), Ok(TakeOutcome { excess: 0 }));

        let drained = pool.with(GemColor::Red, 2);
        assert_eq!(
            validate_take(&pair, &drained, &Gems::new()),
            Err(RuleViolation::PairUnavailable { color: GemColor::Red, available: 2 })
        );
    }

    #[test]
    fn test_validate_take_rejects_gold_and_sizes() {
        let pool = Gems::uniform(4, 5);
        assert_eq!(
            validate_take(&sel(&[GemColor::Gold]), &pool, &Gems::new()),
            Err(RuleViolation::WildcardSelected)
        );
        assert_eq!(
            validate_take(&sel(&[]), &pool, &Gems::new()),
            Err(RuleViolation::SelectionSize(0))
        );
        let four = sel(&[GemColor::Red, GemColor::Blue, GemColor::Green, GemColor::White]);
        assert_eq!(validate_take(&four, &pool, &Gems::new()), Err(RuleViolation::SelectionSize(4)));
        let mixed = sel(&[GemColor::Red, GemColor::Red, GemColor::Blue]);
        assert_eq!(validate_take(&mixed, &pool, &Gems::new()), Err(RuleViolation::InvalidShape));
    }

    #[test]
    fn test_validate_take_degraded_pairs() {
        let pool = Gems::uniform(4, 5);
        let two = sel(&[GemColor::Red, GemColor::Blue]);
        assert_eq!(validate_take(&two, &pool, &Gems::new()), Err(RuleViolation::InvalidShape));

        let sparse = Gems::new().with(GemColor::Red, 1).with(GemColor::Blue, 1);
        assert!(validate_take(&two, &sparse, &Gems::new()).is_ok());
        assert_eq!(
            validate_take(&sel(&[GemColor::Green]), &sparse, &Gems::new()),
            Err(RuleViolation::ColorExhausted(GemColor::Green))
        );
    }

    #[test]
    fn test_validate_take_reports_excess() {
        let pool = Gems::uniform(4, 5);
        let nine = Gems::new().with(GemColor::Red, 9);
        let ten = Gems::new().with(GemColor::Red, 10);

        assert_eq!(validate_take(&sel(&[GemColor::Red]), &pool, &nine).unwrap().excess, 0);
        let outcome = validate_take(&sel(&[GemColor::Red]), &pool, &ten).unwrap();
        assert_eq!(outcome.excess, 1);
        assert!(outcome.requires_discard());
    }

    #[test]
    fn test_validate_take_is_order_independent() {
        let pool = Gems::uniform(4, 5).with(GemColor::Black, 0);
        let held = Gems::new().with(GemColor::White, 8);
        let a = sel(&[GemColor::Green, GemColor::Black, GemColor::Red]);
        let b = sel(&[GemColor::Blue, GemColor::Blue]);

        let first = (validate_take(&a, &pool, &held), validate_take(&b, &pool, &held));
        let second = (validate_take(&b, &pool, &held), validate_take(&a, &pool, &held));
        assert_eq!(first.0, second.1);
        assert_eq!(first.1, second.0);
    }

    #[test]
    fn test_can_afford_uses_gold_for_shortfall() {
        let cost = Gems::from_pairs(&[(GemColor::Red, 3), (GemColor::Blue, 1)]);
        let held = Gems::from_pairs(&[(GemColor::Red, 2), (GemColor::Blue, 1), (GemColor::Gold, 1)]);
        assert!(can_afford(&held, &cost));
        assert!(!can_afford(&held.with(GemColor::Gold, 0), &cost));

        let payment = payment_for(&held, &cost).unwrap();
        assert_eq!(payment[GemColor::Red], 2);
        assert_eq!(payment[GemColor::Blue], 1);
        assert_eq!(payment[GemColor::Gold], 1);
        assert!(payment_for(&Gems::new(), &cost).is_none());
    }

    #[test]
    fn test_discount_reduces_cost() {
        let mut player = player_with(Gems::new().with(GemColor::Red, 1));
        player.purchased.push_back(Card::new(CardId::new(1), Tier::One, 0, GemColor::Red));
        player.purchased.push_back(Card::new(CardId::new(2), Tier::One, 0, GemColor::Red));

        let card = Card::new(CardId::new(3), Tier::Two, 2, GemColor::Blue)
            .with_cost(Gems::new().with(GemColor::Red, 3));

        assert_eq!(bonus_discount(&player)[GemColor::Red], 2);
        assert_eq!(effective_cost(&player, &card)[GemColor::Red], 1);
        assert!(can_purchase(&player, &card));
    }

    #[test]
    fn test_can_reserve_cap() {
        let mut player = player_with(Gems::new());
        for id in 0..3 {
            assert!(can_reserve(&player));
            player.reserved.push_back(Card::new(CardId::new(id), Tier::One, 0, GemColor::Red));
        }
        assert!(!can_reserve(&player));
    }

    #[test]
    fn test_noble_uses_bonuses_not_gems() {
        let noble = Noble::new(NobleId::new(1), 3, Gems::new().with(GemColor::Green, 2));
        let mut player = player_with(Gems::new().with(GemColor::Green, 5));
        assert!(!can_claim_noble(&player, &noble));

        player.purchased.push_back(Card::new(CardId::new(1), Tier::One, 0, GemColor::Green));
        player.purchased.push_back(Card::new(CardId::new(2), Tier::One, 0, GemColor::Green));
        assert!(can_claim_noble(&player, &noble));
    }

    #[test]
    fn test_eligible_nobles_and_game_over() {
        let mut player = player_with(Gems::new());
        player.purchased.push_back(Card::new(CardId::new(1), Tier::One, 0, GemColor::White));
        let mut state = GameState::new([player]);
        state.nobles.push_back(Noble::new(NobleId::new(1), 3, Gems::new().with(GemColor::White, 1)));
        state.nobles.push_back(Noble::new(NobleId::new(2), 3, Gems::new().with(GemColor::Black, 1)));

        let eligible = eligible_nobles(&state, PlayerId::new(0));
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, NobleId::new(1));
        assert!(eligible_nobles(&state, PlayerId::new(3)).is_empty());

        assert!(!is_game_over(&state));
        state.player_mut(PlayerId::new(0)).unwrap().prestige = WIN_THRESHOLD;
        assert!(is_game_over(&state));
    }
}
