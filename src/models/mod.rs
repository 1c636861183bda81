//! Data models for Voyaga API entities.
//!
//! - `User`, `AuthPayload`, `Tokens`: account and authentication payloads
//! - `Notification`: in-app notifications
//! - `ChatTurn`, `ChatReply`: Voya AI chat exchanges
//! - `Wallet`: wallet balance

pub mod chat;
pub mod notification;
pub mod payment;
pub mod user;

pub use chat::{ChatReply, ChatTurn};
pub use notification::Notification;
pub use payment::Wallet;
pub use user::{AuthPayload, RegisterRequest, Tokens, User};
