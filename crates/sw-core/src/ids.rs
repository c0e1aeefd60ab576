use crate::entity::StarId;

/// Hands out star ids in strictly increasing order.
///
/// An allocator is an explicit value rather than process-wide state: the
/// generator borrows one, and the store can build one that continues after
/// the highest id it has already persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator whose first id is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Create an allocator continuing after `last`, or from 0 if nothing was allocated yet.
    pub fn after(last: Option<StarId>) -> Self {
        match last {
            Some(id) => Self::starting_at(id.0.saturating_add(1)),
            None => Self::new(),
        }
    }

    /// The id the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> StarId {
        StarId(self.next)
    }

    /// Take the next id.
    pub fn allocate(&mut self) -> StarId {
        let id = StarId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
