//! `ds-pool` — where boxes live when no traveller holds them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`item`]      | `DeliveryBox` — an identity plus a position         |
//! | [`pool`]      | `BoxPool` — FIFO of boxes awaiting pickup           |
//! | [`delivered`] | `Delivered` — terminal collection at the end point  |
//! | [`error`]     | `PoolError`, `PoolResult<T>`                        |
//!
//! # Ownership
//!
//! `DeliveryBox` is neither `Copy` nor `Clone`.  A box moves by value from
//! the pool to a traveller and from the traveller to `Delivered`, so the type
//! system guarantees it never has two holders.

pub mod delivered;
pub mod error;
pub mod item;
pub mod pool;

#[cfg(test)]
mod tests;

pub use delivered::Delivered;
pub use error::{PoolError, PoolResult};
pub use item::DeliveryBox;
pub use pool::BoxPool;
