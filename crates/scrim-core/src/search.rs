//! Iterative index sequences used by the exhaustive searches.
//!
//! Both iterators walk their space in lexicographic order, which is the
//! tie-break order of every optimizer in this crate.

/// All `K`-element subsets of `0..n`, each in ascending order.
#[derive(Debug, Clone)]
pub struct Combinations<const K: usize> {
    n: usize,
    current: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            current: core::array::from_fn(|i| i),
            done: K > n,
        }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.current;

        // Rightmost slot that can still move right.
        match (0..K).rev().find(|&i| self.current[i] < self.n - K + i) {
            Some(i) => {
                self.current[i] += 1;
                for j in (i + 1)..K {
                    self.current[j] = self.current[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(out)
    }
}

/// All orderings of `0..N`, starting from the identity.
#[derive(Debug, Clone)]
pub struct Permutations<const N: usize> {
    current: [usize; N],
    done: bool,
}

impl<const N: usize> Permutations<N> {
    pub fn new() -> Self {
        Self {
            current: core::array::from_fn(|i| i),
            done: false,
        }
    }
}

impl<const N: usize> Default for Permutations<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Iterator for Permutations<N> {
    type Item = [usize; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.current;

        let a = &mut self.current;
        match (0..N.saturating_sub(1)).rev().find(|&i| a[i] < a[i + 1]) {
            Some(pivot) => {
                let successor = (pivot + 1..N)
                    .rev()
                    .find(|&j| a[j] > a[pivot])
                    .unwrap_or(pivot + 1);
                a.swap(pivot, successor);
                a[pivot + 1..].reverse();
            }
            None => self.done = true,
        }

        Some(out)
    }
}

/// Indices of `0..n` that are not in `subset`; `subset` must be ascending.
pub fn complement<const K: usize, const R: usize>(subset: &[usize; K], n: usize) -> [usize; R] {
    let mut out = [0usize; R];
    let mut filled = 0;
    let mut cursor = 0;
    for idx in 0..n {
        if cursor < K && subset[cursor] == idx {
            cursor += 1;
        } else if filled < R {
            out[filled] = idx;
            filled += 1;
        }
    }
    out
}
