//! Frequency ranking of filtered tokens.

use std::collections::HashMap;

/// Default number of keywords kept per paper.
pub const DEFAULT_TOP_N: usize = 5;

/// Return the `n` most frequent tokens.
///
/// Ties go to the token seen first. Fewer than `n` distinct tokens returns
/// all of them; `n == 0` returns nothing.
pub fn top_keywords<I>(tokens: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    if n == 0 {
        return Vec::new();
    }

    // Distinct tokens in first-seen order, with their counts.
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        match slots.get(&token) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                slots.insert(token.clone(), order.len());
                order.push((token, 1));
            }
        }
    }

    // Stable: equal counts keep first-seen order.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(n);
    order.into_iter().map(|(token, _)| token).collect()
}
