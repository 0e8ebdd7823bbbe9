//! Best-effort batch results
//!
//! Batch operations never abort on a single bad item. Instead they report how
//! many items went through and why the others did not.

use serde::Serialize;

/// One item a batch operation could not process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    /// Filename, URL or record id the failure applies to
    pub item: String,
    pub reason: String,
}

impl ItemFailure {
    pub fn new(item: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            item: item.into(),
            reason: reason.to_string(),
        }
    }
}

/// Success count plus per-item failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub count: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchOutcome {
    pub fn record_success(&mut self) {
        self.count += 1;
    }

    pub fn record_failure(&mut self, failure: ItemFailure) {
        tracing::warn!(item = %failure.item, reason = %failure.reason, "Batch item skipped");
        self.failures.push(failure);
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
