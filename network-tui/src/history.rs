use serde_json::Value;

/// One entry of the session history: the location plus whatever state was
/// pushed with it. The state is opaque JSON, the same way a browser stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub location: String,
    pub state: Option<Value>,
}

/// Delivered when the user moves back or forward through history
#[derive(Debug, Clone, PartialEq)]
pub struct PopEvent {
    pub location: String,
    pub state: Option<Value>,
}

/// In-process session history with browser semantics: pushing drops any
/// forward entries, back/forward move a cursor and report a `PopEvent`.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl BrowserHistory {
    /// Start a history whose first entry is `location` with no state attached
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                location: location.into(),
                state: None,
            }],
            index: 0,
        }
    }

    pub fn location(&self) -> &str {
        &self.entries[self.index].location
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Append a new entry after the current one, discarding forward history
    pub fn push_state(&mut self, state: Value, location: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            location: location.into(),
            state: Some(state),
        });
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the state and location of the current entry
    pub fn replace_state(&mut self, state: Value, location: impl Into<String>) {
        self.entries[self.index] = HistoryEntry {
            location: location.into(),
            state: Some(state),
        };
    }

    pub fn back(&mut self) -> Option<PopEvent> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        Some(self.pop_event())
    }

    pub fn forward(&mut self) -> Option<PopEvent> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        Some(self.pop_event())
    }

    fn pop_event(&self) -> PopEvent {
        let entry = &self.entries[self.index];
        PopEvent {
            location: entry.location.clone(),
            state: entry.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_then_back_and_forward() {
        let mut history = BrowserHistory::new("/all");
        history.push_state(json!({"n": 1}), "/following");
        history.push_state(json!({"n": 2}), "/profile/bob");

        let event = history.back().unwrap();
        assert_eq!(event.location, "/following");
        assert_eq!(event.state, Some(json!({"n": 1})));

        let event = history.back().unwrap();
        assert_eq!(event.location, "/all");
        assert_eq!(event.state, None, "initial entry carries no state");
        assert!(history.back().is_none());

        let event = history.forward().unwrap();
        assert_eq!(event.location, "/following");
        assert_eq!(history.location(), "/following");
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = BrowserHistory::new("/all");
        history.push_state(json!(1), "/following");
        history.back();
        history.push_state(json!(2), "/profile/carol");

        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(history.location(), "/profile/carol");
    }

    #[test]
    fn test_replace_state_keeps_length() {
        let mut history = BrowserHistory::new("/");
        history.replace_state(json!("start"), "/all");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().state, Some(json!("start")));
        assert_eq!(history.location(), "/all");
    }
}
