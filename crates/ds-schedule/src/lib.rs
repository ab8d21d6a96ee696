//! `ds-schedule` — discrete-event queue, scheduler, and tick driver.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`event`]       | `EventKind`, `EventPayload`, `Event<C>`, `EventRecord`     |
//! | [`event_queue`] | `EventQueue<C>` (`BTreeMap<SimTime, VecDeque<Event<C>>>`)  |
//! | [`scheduler`]   | `Scheduler<C>` (clock + queue), `Scheduling<'_, C>`        |
//! | [`observer`]    | `ClockObserver<C>`, `NoClockObserver`                      |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Advance model (summary)
//!
//! ```text
//! target = now + delta
//! while next_time <= target:
//!     now = next_time                 → on_time_advanced
//!     for event at now (FIFO, incl. events scheduled at `now` meanwhile):
//!         handler(ctx, Scheduling)    → on_event_processed
//! if now < target:
//!     now = target                    → on_time_advanced
//! ```
//!
//! Handlers never see the scheduler itself, only a [`Scheduling`] handle that
//! can read the time and push events, so a handler cannot re-enter `advance`.

pub mod error;
pub mod event;
pub mod event_queue;
pub mod observer;
pub mod scheduler;


pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventKind, EventPayload, EventRecord, Handler, handler};
pub use event_queue::EventQueue;
pub use observer::{ClockObserver, NoClockObserver};
pub use scheduler::{Scheduler, Scheduling};
