use crate::data::model::AxisRange;

/// `count` equal-width half-open buckets `[x0, x1)` over a domain. The last
/// bucket ends exactly at `domain.max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Buckets {
    domain: AxisRange,
    count: usize,
}

impl Buckets {
    pub fn new(domain: AxisRange, count: usize) -> Self {
        Self { domain, count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Lower edge of bucket `i`; `lower(count)` is the domain's max.
    pub fn lower(&self, i: usize) -> f64 {
        if i >= self.count {
            return self.domain.max;
        }
        self.domain.min + self.domain.width() * (i as f64 / self.count as f64)
    }

    pub fn edges(&self, i: usize) -> (f64, f64) {
        (self.lower(i), self.lower(i + 1))
    }

    pub fn center(&self, i: usize) -> f64 {
        let (x0, x1) = self.edges(i);
        (x0 + x1) / 2.0
    }

    /// Bucket holding `value`, with the last bucket closed on the right.
    /// `None` outside the domain or for NaN.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        if self.count == 0 || !self.domain.contains(value) {
            return None;
        }
        let last = self.count - 1;
        if value >= self.lower(last) {
            return Some(last);
        }

        let width = self.domain.width();
        let guess = ((value - self.domain.min) / width * self.count as f64).floor();
        let mut i = (guess.max(0.0) as usize).min(last);
        // The guess can be off by one where it disagrees with `lower`.
        while i > 0 && value < self.lower(i) {
            i -= 1;
        }
        while i < last && value >= self.lower(i + 1) {
            i += 1;
        }
        Some(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_partition_the_domain() {
        let b = Buckets::new(AxisRange::new(0.0, 10.0), 4);
        assert_eq!(b.edges(0), (0.0, 2.5));
        assert_eq!(b.edges(3), (7.5, 10.0));
        assert_eq!(b.center(1), 3.75);
    }

    #[test]
    fn index_is_half_open_except_last() {
        let b = Buckets::new(AxisRange::new(0.0, 10.0), 4);
        assert_eq!(b.index_of(0.0), Some(0));
        assert_eq!(b.index_of(2.5), Some(1));
        assert_eq!(b.index_of(2.4999), Some(0));
        assert_eq!(b.index_of(10.0), Some(3));
        assert_eq!(b.index_of(10.5), None);
        assert_eq!(b.index_of(-0.1), None);
        assert_eq!(b.index_of(f64::NAN), None);
    }

    #[test]
    fn zero_width_domain_lands_in_last_bucket() {
        let b = Buckets::new(AxisRange::new(2.0, 2.0), 3);
        assert_eq!(b.edges(0), (2.0, 2.0));
        assert_eq!(b.index_of(2.0), Some(2));
    }

    #[test]
    fn no_buckets_hold_nothing() {
        let b = Buckets::new(AxisRange::new(0.0, 1.0), 0);
        assert_eq!(b.index_of(0.5), None);
    }
}
