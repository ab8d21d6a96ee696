//! What a traveller is doing.

use std::fmt;

/// One state of the delivery workflow.
///
/// ```text
/// Starting ─► MovingToPickup ─► PickingUp ─► MovingToDelivery ─► Delivering
///                 ▲    │            ▲                               │
///                 │    └► Waiting ──┘                               │
///                 └──────────────── Returning ◄─────────────────────┘
/// any ─► Finished
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activity {
    Starting,
    MovingToPickup,
    PickingUp,
    MovingToDelivery,
    Delivering,
    Returning,
    /// Queued at the pickup point for a free bay.
    Waiting,
    Finished,
}

impl Activity {
    pub const ALL: [Activity; 8] = [
        Activity::Starting,
        Activity::MovingToPickup,
        Activity::PickingUp,
        Activity::MovingToDelivery,
        Activity::Delivering,
        Activity::Returning,
        Activity::Waiting,
        Activity::Finished,
    ];

    /// Whether the workflow allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: Activity) -> bool {
        use Activity::*;
        match (self, next) {
            (Finished, _) => false,
            (_, Finished) => true,
            (Starting, MovingToPickup)
            | (MovingToPickup, PickingUp)
            | (MovingToPickup, Waiting)
            | (Waiting, PickingUp)
            | (PickingUp, MovingToDelivery)
            | (MovingToDelivery, Delivering)
            | (Delivering, Returning)
            | (Returning, MovingToPickup) => true,
            _ => false,
        }
    }

    pub fn is_finished(self) -> bool {
        self == Activity::Finished
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Activity::Starting         => "Starting",
            Activity::MovingToPickup   => "Moving to pickup",
            Activity::PickingUp        => "Picking up",
            Activity::MovingToDelivery => "Moving to delivery",
            Activity::Delivering       => "Delivering",
            Activity::Returning        => "Returning",
            Activity::Waiting          => "Waiting",
            Activity::Finished         => "Finished",
        };
        f.write_str(label)
    }
}
