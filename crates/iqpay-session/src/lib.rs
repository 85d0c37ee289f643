#![forbid(unsafe_code)]

//! Persisted session flag for the iQpay wallet prototype.
//!
//! One key (`"wallet_auth"`), one value (a 30-day expiry timestamp). The
//! storage backend is an injected trait so controllers and tests choose
//! between an in-memory store and an atomic JSON file.
//!
//! # Degradation contract
//!
//! Storage failures never escalate past this crate's `Result`s, and a
//! corrupt or unreadable file is treated as "no session" (logged, not
//! fatal). The worst outcome of a broken store is re-authentication.

pub mod flag;
pub mod store;

pub use flag::{SESSION_KEY, SESSION_TTL, SessionFlag};
pub use store::{
    FileSessionStore, MemorySessionStore, SessionBackend, SessionStore, StoreError, StoreResult,
};
