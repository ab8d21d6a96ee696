//! `ds-agent` — traveller state, timelines, and storage.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`activity`]  | `Activity` enum and its legal transitions                  |
//! | [`timeline`]  | `TravellerSegment`, `Timeline` (append-only activity log)  |
//! | [`traveller`] | `Traveller` — per-agent workflow state                     |
//! | [`store`]     | `TravellerStore` — active set, finished list, id allocator |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                             |
//!
//! Nothing here schedules anything: `ds-sim` drives travellers from event
//! handlers and this crate only keeps their state consistent.

pub mod activity;
pub mod error;
pub mod store;
pub mod timeline;
pub mod traveller;

#[cfg(test)]
mod tests;

pub use activity::Activity;
pub use error::{AgentError, AgentResult};
pub use store::TravellerStore;
pub use timeline::{Timeline, TravellerSegment};
pub use traveller::Traveller;
