/// Weighted random selection over parallel item and weight slices.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::phrase::PhraseError;

/// Pick one item with probability proportional to its weight.
///
/// Draws a uniform value in `[0, total)` and walks the cumulative
/// weight prefixes until one exceeds the draw, so the probability
/// semantics do not depend on any library sampling routine. The caller
/// supplies the rng, which keeps every draw reproducible under a fixed
/// seed.
pub fn weighted_choice<'a, T>(
    items: &'a [T],
    weights: &[u64],
    rng: &mut StdRng,
) -> Result<&'a T, PhraseError> {
    if items.is_empty() {
        return Err(PhraseError::InvalidWeights(
            "nothing to choose from".to_string(),
        ));
    }
    if items.len() != weights.len() {
        return Err(PhraseError::InvalidWeights(format!(
            "{} items but {} weights",
            items.len(),
            weights.len()
        )));
    }

    let total: u64 = weights.iter().sum();
    if total == 0 {
        return Err(PhraseError::InvalidWeights(
            "weights sum to zero".to_string(),
        ));
    }

    let draw = rng.gen_range(0..total);
    let mut cumulative = 0u64;
    for (item, weight) in items.iter().zip(weights) {
        cumulative += weight;
        if draw < cumulative {
            return Ok(item);
        }
    }

    // Unreachable: the draw is strictly below the final prefix.
    Err(PhraseError::InvalidWeights(
        "draw exceeded cumulative weights".to_string(),
    ))
}
