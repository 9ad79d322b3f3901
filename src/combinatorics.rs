//! Combinatorial iterators used by the factor recombination stage.
//!
//! ```rust
//! use numfield::combinatorics::CombinationIterator;
//!
//! let mut c = CombinationIterator::new(4, 2);
//! let mut combinations = vec![];
//! while let Some(a) = c.next() {
//!     combinations.push(a.to_vec());
//! }
//!
//! assert_eq!(combinations.len(), 6);
//! assert_eq!(combinations[0], [0, 1]);
//! assert_eq!(combinations[5], [2, 3]);
//! ```

/// Generates all `k`-subsets of `0..n` as sorted index lists,
/// in lexicographical order.
pub struct CombinationIterator {
    n: usize,
    indices: Vec<usize>,
    init: bool,
}

impl CombinationIterator {
    pub fn new(n: usize, k: usize) -> CombinationIterator {
        CombinationIterator {
            indices: (0..k).collect(),
            n,
            init: false,
        }
    }

    /// Advances the iterator and returns the next combination. The slice
    /// borrows the iterator, so it has to be copied if it is kept.
    pub fn next(&mut self) -> Option<&[usize]> {
        let k = self.indices.len();
        if k == 0 || k > self.n {
            return None;
        }

        if !self.init {
            self.init = true;
            return Some(&self.indices);
        }

        // find the rightmost index that can still move up
        let i = (0..k).rev().find(|i| self.indices[*i] < self.n - k + i)?;

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }

        Some(&self.indices)
    }
}

#[cfg(test)]
mod test {
    use super::CombinationIterator;

    #[test]
    fn combinations() {
        let mut c = CombinationIterator::new(4, 3);
        let mut combinations = vec![];
        while let Some(a) = c.next() {
            combinations.push(a.to_vec());
        }

        let ans = vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

        assert_eq!(combinations, ans);
    }

    #[test]
    fn degenerate() {
        assert!(CombinationIterator::new(2, 3).next().is_none());
        assert!(CombinationIterator::new(3, 0).next().is_none());

        let mut c = CombinationIterator::new(3, 3);
        assert_eq!(c.next(), Some(&[0, 1, 2][..]));
        assert_eq!(c.next(), None);
    }
}
