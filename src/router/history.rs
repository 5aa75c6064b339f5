/// One browser history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Path recorded by the router, if this entry was created by it
    pub state: Option<String>,
    /// Location of the entry
    pub location: String,
}

impl HistoryEntry {
    /// Path to restore on back/forward: the recorded state, else the location
    pub fn path(&self) -> &str {
        self.state.as_deref().unwrap_or(&self.location)
    }
}

/// Session history with push/replace and back/forward traversal
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl History {
    /// Start a session at `location`, with no recorded state
    pub fn new(location: &str) -> Self {
        Self {
            entries: vec![HistoryEntry {
                state: None,
                location: location.to_string(),
            }],
            index: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn location(&self) -> &str {
        &self.current().location
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry after the current one, dropping any forward entries
    pub fn push_state(&mut self, path: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            state: Some(path.to_string()),
            location: path.to_string(),
        });
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the current entry
    pub fn replace_state(&mut self, path: &str) {
        self.entries[self.index] = HistoryEntry {
            state: Some(path.to_string()),
            location: path.to_string(),
        };
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}
