//! Append-only chain-of-custody log.

use trustseal_types::grievance::GrievanceLogEntry;

/// Ordered, append-only record of who touched a grievance and when.
///
/// Entries can be read but never modified or removed once appended.
#[derive(Debug, Clone, Default)]
pub struct CustodyLog {
    entries: Vec<GrievanceLogEntry>,
}

impl CustodyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: GrievanceLogEntry) -> &GrievanceLogEntry {
        tracing::debug!(
            grievance_id = entry.grievance_id,
            action = %entry.action,
            "custody entry appended"
        );
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&GrievanceLogEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GrievanceLogEntry> {
        self.entries.iter()
    }

    /// Timeline for a single grievance, oldest first.
    pub fn for_grievance(&self, grievance_id: i64) -> impl Iterator<Item = &GrievanceLogEntry> {
        self.entries.iter().filter(move |e| e.grievance_id == grievance_id)
    }

    pub fn as_slice(&self) -> &[GrievanceLogEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustseal_types::grievance::GrievanceAction;

    #[test]
    fn test_append_and_filter() {
        let mut log = CustodyLog::new();
        assert!(log.is_empty());
        log.append(GrievanceLogEntry::new(1, None, GrievanceAction::AiTriage, "filed"));
        log.append(GrievanceLogEntry::new(2, Some(7), GrievanceAction::NoteAdded, "other case"));
        log.append(GrievanceLogEntry::new(1, Some(7), GrievanceAction::NoteAdded, "called bank"));

        assert_eq!(log.len(), 3);
        let timeline: Vec<_> = log.for_grievance(1).map(|e| e.details.as_str()).collect();
        assert_eq!(timeline, vec!["filed", "called bank"]);
        assert_eq!(log.last().unwrap().details, "called bank");
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut log = CustodyLog::new();
        for i in 0..5 {
            log.append(GrievanceLogEntry::new(1, Some(i), GrievanceAction::NoteAdded, format!("note {i}")));
        }
        let actors: Vec<_> = log.iter().map(|e| e.actor_id).collect();
        assert_eq!(actors, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(log.as_slice().len(), 5);
    }
}
