//! `ds-core` — foundational types for the box delivery simulator.
//!
//! This crate is a dependency of every other `ds-*` crate.  It intentionally
//! has no `ds-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`ids`]       | `TravellerId`, `BoxId`, `IdAllocator`                 |
//! | [`time`]      | `SimTime`, `SimClock`                                 |
//! | [`geo`]       | `Point`, `Layout`                                     |
//! | [`config`]    | `SimConfig`                                           |
//! | [`error`]     | `DsError`, `DsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{DsError, DsResult};
pub use geo::{Layout, Point};
pub use ids::{BoxId, IdAllocator, TravellerId};
pub use time::{SimClock, SimTime};
