use crate::config::settings::RatingSettings;

// BTTC methodology: 16 points to the winner over an equally rated opponent,
// shifted by 4% of the rating difference. A favorite 400 or more points above
// their opponent gains nothing for winning (4% of 400 is 16), while an
// underdog winning by the same gap gains 32.

/// Signed rating delta for side A of one match.
///
/// Call twice with the arguments swapped to get both sides; the two deltas
/// are computed independently and need not sum to zero. A match with no
/// recorded wins on either side is treated as unplayed. A tie in wins counts
/// as a loss for both sides (neither strictly won), preserved from the
/// league's original rules.
pub fn adjust(
    rating_a: i64,
    wins_a: i64,
    rating_b: i64,
    wins_b: i64,
    settings: &RatingSettings,
) -> i64 {
    if wins_a == 0 && wins_b == 0 {
        return 0;
    }

    let difference = (rating_a - rating_b).abs();
    // The factor is a multiple of 0.04, so an exact .5 never reaches round()
    // and the rounding mode cannot matter.
    let factor = (settings.difference_factor * difference as f64).round() as i64;
    let baseline = settings.baseline_points;
    let won = wins_a > wins_b;

    if won {
        if rating_a > rating_b {
            // Favorite won, the expected result
            (baseline - factor).max(0)
        } else {
            // Upset
            baseline + factor
        }
    } else if rating_b > rating_a {
        // Underdog lost, the expected result
        -(baseline - factor).max(0)
    } else {
        // Favorite lost
        -(baseline + factor)
    }
}
