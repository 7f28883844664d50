/// A mixed-radix counter. The first digit turns fastest and carries into the
/// next one, like the wheels of an odometer read from the right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Odometer {
    digits: Vec<usize>,
    radices: Vec<usize>,
}

impl Odometer {
    /// Every radix must be at least 1.
    pub fn new(radices: Vec<usize>) -> Self {
        debug_assert!(radices.iter().all(|r| *r > 0));
        Self {
            digits: vec![0; radices.len()],
            radices,
        }
    }

    pub fn uniform(len: usize, radix: usize) -> Self {
        Self::new(vec![radix; len])
    }

    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    /// Number of distinct readings, saturating.
    pub fn combinations(&self) -> u128 {
        self.radices
            .iter()
            .fold(1u128, |acc, r| acc.saturating_mul(*r as u128))
    }

    /// Advances by one. Returns false when the last digit overflows, leaving
    /// every digit back at zero.
    pub fn increment(&mut self) -> bool {
        for (digit, radix) in self.digits.iter_mut().zip(&self.radices) {
            if *digit + 1 < *radix {
                *digit += 1;
                return true;
            }
            *digit = 0;
        }
        false
    }

    /// Every reading from the current one up to the last, in counting order.
    pub fn readings(self) -> Readings {
        Readings {
            odometer: self,
            exhausted: false,
        }
    }
}

pub struct Readings {
    odometer: Odometer,
    exhausted: bool,
}

impl Iterator for Readings {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.odometer.digits.clone();
        self.exhausted = !self.odometer.increment();
        Some(current)
    }
}

/// Rearranges `items` into the next lexicographically greater permutation.
/// Returns false, with `items` sorted ascending, after the last one.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        items.reverse();
        return false;
    };
    let successor = items
        .iter()
        .rposition(|item| items[pivot] < *item)
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

/// Every distinct ordering of a sequence in lexicographic order, starting
/// from the sorted one. Equal items do not produce repeated orderings.
pub struct Permutations<T> {
    next: Option<Vec<T>>,
}

impl<T: Ord + Clone> Permutations<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort();
        Self { next: Some(items) }
    }
}

impl<T: Ord + Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut following = current.clone();
        if next_permutation(&mut following) {
            self.next = Some(following);
        }
        Some(current)
    }
}

pub fn factorial(n: usize) -> u128 {
    (1..=n as u128).fold(1u128, |acc, i| acc.saturating_mul(i))
}
