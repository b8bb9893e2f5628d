use std::collections::VecDeque;
use super::ScoreFilter;

/// Sliding-window median over blink scores
///
/// Emits nothing until the window is full. The median is the element at
/// `len / 2` of the sorted window, so even-length windows yield the upper of
/// the two middle values rather than their mean.
pub struct MedianFilter {
    window_size: usize,
    buffer: VecDeque<f64>,
}

impl MedianFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            buffer: VecDeque::with_capacity(window_size),
        }
    }

    fn calculate_median(values: &VecDeque<f64>) -> f64 {
        let mut sorted: Vec<f64> = values.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        sorted[sorted.len() / 2]
    }
}

impl ScoreFilter for MedianFilter {
    fn apply(&mut self, score: f64) -> Option<f64> {
        if self.buffer.len() >= self.window_size {
            self.buffer.pop_front();
        }
        self.buffer.push_back(score);

        if self.buffer.len() < self.window_size {
            return None;
        }
        Some(Self::calculate_median(&self.buffer))
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn name(&self) -> &str {
        "MedianFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_median_filter() {
        let mut filter = MedianFilter::new(3);

        assert_eq!(filter.apply(0.1), None);
        assert_eq!(filter.apply(0.9), None);
        assert_eq!(filter.apply(0.5), Some(0.5)); // median of [0.1, 0.9, 0.5]

        // Window slides, oldest value is dropped
        assert_eq!(filter.apply(0.95), Some(0.9)); // [0.9, 0.5, 0.95]
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_even_window_takes_upper_middle() {
        let mut filter = MedianFilter::new(2);
        assert_eq!(filter.apply(0.2), None);
        assert_eq!(filter.apply(0.8), Some(0.8));

        let mut filter = MedianFilter::new(4);
        for s in [0.4, 0.1, 0.3] {
            assert_eq!(filter.apply(s), None);
        }
        // sorted [0.1, 0.2, 0.3, 0.4] -> index 2
        assert_eq!(filter.apply(0.2), Some(0.3));
    }

    #[test]
    fn test_median_with_outliers() {
        let mut filter = MedianFilter::new(3);

        filter.apply(0.10);
        filter.apply(0.11);
        let m = filter.apply(1.0); // spike

        assert_eq!(m, Some(0.11));
    }

    #[test]
    fn test_reset_requires_refill() {
        let mut filter = MedianFilter::new(3);
        for s in [0.5, 0.5, 0.5] {
            filter.apply(s);
        }
        filter.reset();
        assert_eq!(filter.len(), 0);
        assert_eq!(filter.apply(0.5), None);
    }

    proptest! {
        #[test]
        fn prop_buffer_bounded_by_window(
            scores in prop::collection::vec(0.0f64..=1.0, 0..100),
            window in 1usize..10,
        ) {
            let mut filter = MedianFilter::new(window);
            for (i, s) in scores.iter().enumerate() {
                let out = filter.apply(*s);
                prop_assert!(filter.len() <= window);
                prop_assert_eq!(out.is_some(), i + 1 >= window);
            }
        }
    }
}
