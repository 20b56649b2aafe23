//! Single-slot staging for one display field

/// Holds at most one staged value until the coordinator drains it
///
/// The first value offered wins: while the slot is occupied, later offers
/// are dropped rather than overwriting or queueing. Only the coordinator
/// empties the slot, at an animation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate<T> {
    slot: Option<T>,
}

impl<T> Default for PendingUpdate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PendingUpdate<T> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Stage `value` if the slot is empty
    ///
    /// Returns `false` (and drops `value`) if a value is already staged.
    pub fn offer(&mut self, value: T) -> bool {
        if self.slot.is_some() {
            return false;
        }
        self.slot = Some(value);
        true
    }

    /// Whether a value is waiting to be drained
    pub fn is_occupied(&self) -> bool {
        self.slot.is_some()
    }

    /// The staged value, if any
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Remove the staged value, leaving the slot empty
    pub(crate) fn take(&mut self) -> Option<T> {
        self.slot.take()
    }
}
