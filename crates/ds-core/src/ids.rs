//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize`, e.g. for display ordinals or `Vec` indexing.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Identity of a traveller.  Allocated by the controller, never reused
    /// within one run (a reset restarts numbering).
    pub struct TravellerId(u32);
}

typed_id! {
    /// Identity of a deliverable box.
    pub struct BoxId(u32);
}

// ── IdAllocator ───────────────────────────────────────────────────────────────

/// Monotonic traveller id source owned by whoever composes travellers.
///
/// Replaces a process-wide counter: two simulations in one process each own
/// an allocator and number their travellers independently.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> TravellerId {
        let id = TravellerId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out since construction or the last reset.
    pub fn allocated(&self) -> u32 {
        self.next
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}
