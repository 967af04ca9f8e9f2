//! Legal-action enumeration.
//!
//! Builds the complete set of actions a seat may submit. The controller
//! rejects anything outside this set, and computer seats choose only from
//! it, so every rule check here defers to `rules::engine`.

use crate::cards::Tier;
use crate::core::{
    Action, GameState, GemColor, GemSelection, Gems, PlayerId, ReserveTarget,
};
use crate::core::config::TAKE_TWO_MINIMUM;
use crate::rules::{available_colors, can_purchase, can_reserve, eligible_nobles, validate_take};

/// Every action `player` may legally submit in `state`.
///
/// Empty when the game is finished or it is not `player`'s turn. While a
/// discard is owed, only discard actions are returned. Otherwise end-turn is
/// always present, followed by noble claims and, if no main action was taken
/// yet this turn, every take, reserve and purchase.
#[must_use]
pub fn valid_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    if state.is_finished() || player != state.current {
        return Vec::new();
    }
    let Some(seat) = state.player(player) else {
        return Vec::new();
    };

    if let Some(count) = state.discard_owed_by(player) {
        return discard_options(&seat.gems, count)
            .into_iter()
            .map(|gems| Action::DiscardGems { player, gems })
            .collect();
    }

    let mut actions = vec![Action::EndTurn { player }];
    actions.extend(
        eligible_nobles(state, player)
            .into_iter()
            .map(|noble| Action::ClaimNoble { player, noble: noble.id }),
    );

    if state.main_action_taken {
        return actions;
    }

    actions.extend(
        take_selections(&state.pool)
            .into_iter()
            .filter(|gems| validate_take(gems, &state.pool, &seat.gems).is_ok())
            .map(|gems| Action::TakeGems { player, gems }),
    );

    if can_reserve(seat) {
        actions.extend(state.displayed_cards().map(|card| Action::ReserveCard {
            player,
            target: ReserveTarget::Displayed(card.id),
        }));
        actions.extend(
            Tier::ALL
                .iter()
                .filter(|&&tier| state.deck_size(tier) > 0)
                .map(|&tier| Action::ReserveCard {
                    player,
                    target: ReserveTarget::DeckTop(tier),
                }),
        );
    }

    actions.extend(
        state
            .displayed_cards()
            .chain(seat.reserved.iter())
            .filter(|card| can_purchase(seat, card))
            .map(|card| Action::PurchaseCard { player, card: card.id }),
    );

    actions
}

/// Candidate take selections for a pool.
///
/// All single colors, pairs where the pool holds at least four, every
/// three-color subset, and two-color subsets once fewer than three colors
/// remain.
#[must_use]
pub fn take_selections(pool: &Gems) -> Vec<GemSelection> {
    let colors = available_colors(pool);
    let mut selections: Vec<GemSelection> = colors.iter().map(|&c| GemSelection::new(&[c])).collect();

    selections.extend(
        colors
            .iter()
            .filter(|&&c| pool[c] >= TAKE_TWO_MINIMUM)
            .map(|&c| GemSelection::pair(c)),
    );

    if colors.len() >= 3 {
        for (i, &a) in colors.iter().enumerate() {
            for (j, &b) in colors.iter().enumerate().skip(i + 1) {
                for &c in colors.iter().skip(j + 1) {
                    selections.push(GemSelection::new(&[a, b, c]));
                }
            }
        }
    } else if colors.len() == 2 {
        selections.push(GemSelection::new(&colors));
    }

    selections
}

/// Every distinct gem multiset of exactly `count` drawn from `held`.
#[must_use]
pub fn discard_options(held: &Gems, count: u8) -> Vec<Gems> {
    fn expand(held: &Gems, color_idx: usize, remaining: u8, current: Gems, out: &mut Vec<Gems>) {
        if remaining == 0 {
            out.push(current);
            return;
        }
        let Some(&color) = GemColor::ALL.get(color_idx) else {
            return;
        };
        let most = held[color].min(remaining);
        for n in (0..=most).rev() {
            expand(held, color_idx + 1, remaining - n, current.with(color, n), out);
        }
    }

    let mut out = Vec::new();
    if u32::from(count) <= held.total() {
        expand(held, 0, count, Gems::new(), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Noble, NobleId};
    use crate::core::{PendingDiscard, PlayerKind, PlayerState};

    fn state_with_pool(pool: Gems) -> GameState {
        let mut state = GameState::new([
            PlayerState::new(PlayerId::new(0), "Ada", PlayerKind::Human),
            PlayerState::new(PlayerId::new(1), "Bot", PlayerKind::Computer { difficulty: None }),
        ]);
        state.pool = pool;
        state
    }

    #[test]
    fn test_take_selections_full_pool() {
        let selections = take_selections(&Gems::uniform(4, 5));
        // 5 singles + 5 pairs + C(5,3) triples
        assert_eq!(selections.len(), 5 + 5 + 10);
        assert!(selections.iter().all(|s| !s.colors().contains(&GemColor::Gold)));
    }

    #[test]
    fn test_take_selections_pair_gate() {
        let pool = Gems::uniform(3, 5).with(GemColor::Red, 4);
        let pairs: Vec<_> = take_selections(&pool).into_iter().filter(GemSelection::is_pair).collect();
        assert_eq!(pairs, vec![GemSelection::pair(GemColor::Red)]);
    }

    #[test]
    fn test_take_selections_degraded() {
        let two = Gems::new().with(GemColor::Red, 1).with(GemColor::Blue, 2);
        let selections = take_selections(&two);
        assert_eq!(selections.len(), 3);
        assert!(selections.contains(&GemSelection::new(&[GemColor::Red, GemColor::Blue])));

        let one = Gems::new().with(GemColor::Black, 5);
        let selections = take_selections(&one);
        assert_eq!(selections, vec![GemSelection::new(&[GemColor::Black]), GemSelection::pair(GemColor::Black)]);

        assert!(take_selections(&Gems::new().with(GemColor::Gold, 5)).is_empty());
    }

    #[test]
    fn test_discard_options_exact_count() {
        let held = Gems::new().with(GemColor::Red, 2).with(GemColor::Gold, 1);
        let options = discard_options(&held, 2);
        // {R,R}, {R,Gold}
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|o| o.total() == 2 && held.contains(o)));

        assert!(discard_options(&held, 4).is_empty());
        assert_eq!(discard_options(&held, 0), vec![Gems::new()]);
    }

    #[test]
    fn test_not_your_turn_is_empty() {
        let state = state_with_pool(Gems::uniform(4, 5));
        assert!(valid_actions(&state, PlayerId::new(1)).is_empty());
        assert!(!valid_actions(&state, PlayerId::new(0)).is_empty());
    }

    #[test]
    fn test_pending_discard_only_discards() {
        let mut state = state_with_pool(Gems::uniform(4, 5));
        state.player_mut(PlayerId::new(0)).unwrap().gems = Gems::new().with(GemColor::Red, 11);
        state.pending_discard = Some(PendingDiscard { player: PlayerId::new(0), count: 1 });

        let actions = valid_actions(&state, PlayerId::new(0));
        assert_eq!(
            actions,
            vec![Action::DiscardGems { player: PlayerId::new(0), gems: Gems::new().with(GemColor::Red, 1) }]
        );
    }

    #[test]
    fn test_after_main_action_only_end_and_nobles() {
        let mut state = state_with_pool(Gems::uniform(4, 5));
        state.main_action_taken = true;
        state.player_mut(PlayerId::new(0)).unwrap().purchased.push_back(
            Card::new(CardId::new(1), Tier::One, 0, GemColor::Red),
        );
        state.nobles.push_back(Noble::new(NobleId::new(3), 3, Gems::new().with(GemColor::Red, 1)));

        let actions = valid_actions(&state, PlayerId::new(0));
        assert_eq!(
            actions,
            vec![
                Action::EndTurn { player: PlayerId::new(0) },
                Action::ClaimNoble { player: PlayerId::new(0), noble: NobleId::new(3) },
            ]
        );
    }

    #[test]
    fn test_reserve_and_purchase_listed() {
        let mut state = state_with_pool(Gems::uniform(4, 5));
        let free = Card::new(CardId::new(1), Tier::One, 0, GemColor::Red);
        let pricey = Card::new(CardId::new(2), Tier::One, 0, GemColor::Red).with_cost(Gems::uniform(3, 0));
        state.display[0] = [free, pricey].into_iter().collect();
        state.decks[1].push_back(Card::new(CardId::new(3), Tier::Two, 1, GemColor::Blue));

        let actions = valid_actions(&state, PlayerId::new(0));
        let p = PlayerId::new(0);
        assert!(actions.contains(&Action::PurchaseCard { player: p, card: CardId::new(1) }));
        assert!(!actions.contains(&Action::PurchaseCard { player: p, card: CardId::new(2) }));
        assert!(actions.contains(&Action::ReserveCard { player: p, target: ReserveTarget::Displayed(CardId::new(2)) }));
        assert!(actions.contains(&Action::ReserveCard { player: p, target: ReserveTarget::DeckTop(Tier::Two) }));
        assert!(!actions.contains(&Action::ReserveCard { player: p, target: ReserveTarget::DeckTop(Tier::One) }));
    }

    #[test]
    fn test_reserve_cap_excludes_reserves() {
        let mut state = state_with_pool(Gems::uniform(4, 5));
        state.display[0].push_back(Card::new(CardId::new(1), Tier::One, 0, GemColor::Red).with_cost(Gems::uniform(1, 0)));
        for id in 10..13 {
            state.player_mut(PlayerId::new(0)).unwrap().reserved.push_back(
                Card::new(CardId::new(id), Tier::Three, 4, GemColor::Black).with_cost(Gems::uniform(7, 0)),
            );
        }
        let actions = valid_actions(&state, PlayerId::new(0));
        assert!(!actions.iter().any(|a| matches!(a, Action::ReserveCard { .. })));
    }

    #[test]
    fn test_finished_game_has_no_actions() {
        let mut state = state_with_pool(Gems::uniform(4, 5));
        state.phase = crate::core::Phase::Finished;
        assert!(valid_actions(&state, PlayerId::new(0)).is_empty());
    }
}
