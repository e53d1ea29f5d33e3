//! Outcome of a pager interaction.

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored (disabled control, nothing changed).
    Ignored,
    /// Event was consumed and state changed.
    Consumed,
}

impl EventResult {
    /// Whether the event changed anything.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
