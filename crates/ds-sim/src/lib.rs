//! `ds-sim` — the box delivery simulation controller.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`sim`]        | `Sim` — commands, driving, read accessors                |
//! | [`builder`]    | `SimBuilder`                                             |
//! | [`world`]      | `World` — pool, delivered boxes, travellers, bays        |
//! | [`workflow`]   | Event handlers: the traveller state machine              |
//! | [`bays`]       | `LoadingBays` — bounded pickup slots with a FIFO line    |
//! | [`observer`]   | `SimObserver`, `NoopObserver`                            |
//! | [`snapshot`]   | `TravellerView`, `SegmentView`                           |
//! | [`error`]      | `SimError`, `SimResult<T>`, `Fault`                      |
//!
//! # Driving a run
//!
//! ```text
//! external command ─► Sim ─► Scheduler::schedule / BoxPool
//! Sim::tick / advance ─► Scheduler::advance(world)
//!                          └► handler(world, Scheduling) ─► Traveller + Timeline
//!                                                        └► more events
//!                          └► Relay ─► SimObserver (notices, faults, completion)
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ds_core::SimConfig;
//! use ds_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! let finished = sim.run_until_complete(0.25, 600.0, &mut NoopObserver)?;
//! for view in sim.travellers() {
//!     println!("{}: {} segments", view.name, view.timeline.len());
//! }
//! ```

pub mod bays;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod workflow;
pub mod world;


pub use bays::LoadingBays;
pub use builder::SimBuilder;
pub use error::{Fault, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{SegmentView, TravellerView};
pub use world::{Notice, Timings, World};
