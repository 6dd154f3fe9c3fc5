//! kairanban/crates/kb-board/src/lib.rs
//!
//! Business rules of the circular board: the post repository, session
//! context, reaction engine, feed selection, the unseen-notification
//! counter, whole-store import/export, and demo seeding.
//!
//! Every mutating operation is a full read-modify-write of the affected
//! record against a [`kb_core::StateStore`]; nothing is cached across
//! calls. The acting [`kb_core::User`] is always an explicit argument.

pub mod feed;
pub mod notify;
pub mod reactions;
pub mod repository;
pub mod seed;
pub mod session;
pub mod transfer;
