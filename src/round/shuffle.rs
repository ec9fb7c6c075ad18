//! Presentation-order shuffling.

use crate::core::RoundRng;

/// Fisher–Yates shuffler over an injected [`RoundRng`].
///
/// ```
/// use quiz_round::round::Shuffler;
///
/// let mut shuffler = Shuffler::seeded(3);
/// let source = vec![1, 2, 3, 4];
/// let mut shuffled = shuffler.shuffle(&source);
///
/// assert_eq!(source, vec![1, 2, 3, 4]);
/// shuffled.sort();
/// assert_eq!(shuffled, source);
/// ```
#[derive(Clone, Debug)]
pub struct Shuffler {
    rng: RoundRng,
}

impl Shuffler {
    /// Shuffle with the given random source.
    #[must_use]
    pub fn new(rng: RoundRng) -> Self {
        Self { rng }
    }

    /// Deterministic shuffler for tests and replays.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(RoundRng::new(seed))
    }

    /// Return a shuffled copy, leaving `items` untouched.
    #[must_use]
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle_in_place(&mut out);
        out
    }

    /// Shuffle a slice in place.
    ///
    /// Walks `i` from the last index down to 1, swapping with a uniform
    /// `j` in `0..=i`.
    pub fn shuffle_in_place<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.gen_index_inclusive(i);
            items.swap(i, j);
        }
    }
}
