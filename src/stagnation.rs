//! Detection of a flat-lined best-fitness trend.

use std::collections::VecDeque;

/// Sliding window over the most recent best-fitness values.
#[derive(Debug, Clone)]
pub struct StagnationMonitor {
    window: VecDeque<u64>,
    capacity: usize,
}

impl StagnationMonitor {
    /// Create a monitor remembering the last `capacity` values.
    pub fn new(capacity: usize) -> Self {
        StagnationMonitor {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a generation's best fitness, dropping the oldest value when full.
    pub fn record(&mut self, best_fitness: u64) {
        self.window.push_back(best_fitness);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
    }

    /// True when the window is full and every value in it is the same.
    pub fn is_stagnant(&self) -> bool {
        self.capacity > 0
            && self.window.len() >= self.capacity
            && self.window.iter().all(|&f| f == self.window[0])
    }

    /// The recorded values, oldest first.
    pub fn values(&self) -> impl Iterator<Item = &u64> {
        self.window.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_stagnant_until_full() {
        let mut monitor = StagnationMonitor::new(4);
        for _ in 0..3 {
            monitor.record(7);
            assert!(!monitor.is_stagnant());
        }
        monitor.record(7);
        assert!(monitor.is_stagnant());
    }

    #[test]
    fn test_any_difference_breaks_stagnation() {
        let mut monitor = StagnationMonitor::new(3);
        monitor.record(5);
        monitor.record(4);
        monitor.record(4);
        assert!(!monitor.is_stagnant());

        // The differing value slides out of the window
        monitor.record(4);
        assert!(monitor.is_stagnant());

        monitor.record(3);
        assert!(!monitor.is_stagnant());
    }

    #[test]
    fn test_window_keeps_latest_values() {
        let mut monitor = StagnationMonitor::new(2);
        monitor.record(1);
        monitor.record(2);
        monitor.record(3);
        assert_eq!(monitor.values().copied().collect::<Vec<_>>(), vec![2, 3]);
    }
}
