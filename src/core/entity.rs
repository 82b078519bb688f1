//! Card instance identification.
//!
//! Every physical card copy in a game (hero, equipment, weapons, deck cards)
//! has a unique `InstanceId`. Ids are handed out by an `IdAllocator` owned by
//! the game state, so two games never share a counter.
//!
//! ## Usage
//!
//! ```
//! use rust_tcg::core::IdAllocator;
//!
//! let mut ids = IdAllocator::new();
//! let first = ids.next_id();
//! let second = ids.next_id();
//!
//! assert!(second > first);
//! assert_eq!(ids.allocated(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for one physical card copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance id from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Monotonic id allocator scoped to a single game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
