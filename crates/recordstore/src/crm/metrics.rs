//! CRM operation counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters emitted by the CRM service.
#[derive(Debug, Default)]
pub struct CrmMetrics {
    persons_added: AtomicU64,
}

impl CrmMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successfully added person.
    pub fn person_added(&self) {
        self.persons_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of persons added since construction.
    pub fn persons_added(&self) -> u64 {
        self.persons_added.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero_and_increments() {
        let metrics = CrmMetrics::new();
        assert_eq!(metrics.persons_added(), 0);

        metrics.person_added();
        metrics.person_added();
        assert_eq!(metrics.persons_added(), 2);
    }
}
