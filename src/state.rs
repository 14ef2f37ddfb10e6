// Current snapshot shared between the poller and the dashboard

use crate::models::Row;
use std::sync::{Arc, Mutex, PoisonError};

/// Complete set of rows from one poll cycle. Replaced whole, never edited.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    rows: Arc<[Row]>,
    cycle: u64,
}

impl Snapshot {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of publishes so far; 0 before the first one.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}

/// Holder of the current snapshot. The lock is held only to swap or clone the `Arc`.
#[derive(Debug, Default)]
pub struct SharedState {
    current: Mutex<Snapshot>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current snapshot with `rows`.
    pub fn publish(&self, rows: Vec<Row>) {
        let rows: Arc<[Row]> = rows.into();
        // Poisoning cannot leave a half-written snapshot: the value is only ever replaced.
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Snapshot {
            rows,
            cycle: current.cycle + 1,
        };
    }

    /// Read-only copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
