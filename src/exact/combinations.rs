use num::BigUint;

/// Enumerates the `k`-element index subsets of `0..n` in lexicographic order.
///
/// Each combination is handed out as a sorted slice borrowed from the
/// enumerator, so no allocation happens per candidate.
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    finished: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            finished: k > n,
        }
    }

    /// Moves to the next combination and returns it, `None` once every
    /// combination has been produced.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.as_slice());
        }
        let k = self.indices.len();
        // rightmost position that can still be incremented
        let pos = (0..k)
            .rev()
            .find(|&i| self.indices[i] < self.n - k + i);
        match pos {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                Some(self.indices.as_slice())
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

/// Number of `k`-subsets of an `n`-set, zero when `k > n`.
pub fn search_space_size(n: usize, k: usize) -> BigUint {
    if k > n {
        return BigUint::from(0u32);
    }
    num::integer::binomial(BigUint::from(n), BigUint::from(k))
}
