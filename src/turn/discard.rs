//! Automatic discard selection for computer seats.

use crate::core::{GemColor, Gems};

/// Pick `count` gems to shed from `held`.
///
/// One gem at a time from the largest colored holding (ties to the earlier
/// color); gold is only shed once no colored gem remains.
#[must_use]
pub fn auto_discard(held: &Gems, count: u8) -> Gems {
    let mut remaining = *held;
    let mut shed = Gems::new();

    for _ in 0..count {
        let largest = GemColor::COLORED
            .iter()
            .copied()
            .filter(|&c| remaining[c] > 0)
            .fold(None::<GemColor>, |best, c| match best {
                Some(b) if remaining[b] >= remaining[c] => Some(b),
                _ => Some(c),
            });

        let color = match largest {
            Some(color) => color,
            None if remaining[GemColor::Gold] > 0 => GemColor::Gold,
            None => break,
        };
        remaining.remove(color, 1);
        shed.add(color, 1);
    }

    shed
}
