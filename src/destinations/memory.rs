//! In-memory destination
//!
//! Keeps every record it receives. Clones share the same buffer, so a test can
//! hand one clone to a backend and inspect the other.

use crate::core::{Destination, Result, Severity};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemoryDestination {
    records: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Received records with their severities, oldest first
    pub fn records(&self) -> Vec<(Severity, String)> {
        self.records.lock().clone()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Most recent payload decoded as JSON, if there is one and it parses
    pub fn last_json(&self) -> Option<serde_json::Value> {
        self.records
            .lock()
            .last()
            .and_then(|(_, payload)| serde_json::from_str(payload).ok())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Destination for MemoryDestination {
    fn write(&mut self, severity: Severity, payload: &str) -> Result<()> {
        self.records.lock().push((severity, payload.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() -> Result<()> {
        let memory = MemoryDestination::new();
        let mut writer = memory.clone();

        writer.write(Severity::Error, r#"{"event":"boom"}"#)?;

        assert_eq!(memory.len(), 1);
        assert_eq!(memory.records()[0].0, Severity::Error);
        assert_eq!(memory.last_json().unwrap()["event"], "boom");

        memory.clear();
        assert!(writer.is_empty());
        Ok(())
    }
}
