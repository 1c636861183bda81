//! Authentication module for managing the persisted user session.
//!
//! `Session` holds the access and refresh credentials plus a snapshot of
//! the signed-in user, persisted to `session.json` across invocations.

pub mod session;

pub use session::{Session, SessionData};
