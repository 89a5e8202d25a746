//! Single-item holder used as the deferred-pickup mailbox.

/// Holds at most one value. Storing replaces the previous value; claiming
/// takes it out, so a stored value is handed out once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSlot<T> {
    value: Option<T>,
}

impl<T> Default for PendingSlot<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> PendingSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, returning the value it displaced, if any.
    pub fn put(&mut self, value: T) -> Option<T> {
        self.value.replace(value)
    }

    pub fn claim(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn peek(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.value.is_some()
    }
}
