//! Client-side route guarding and token-based session validation.
//!
//! This crate provides:
//! - `Session`: fail-closed validity check over a stored JWT-shaped credential
//! - `Router`: a static route table with a pre-navigation auth guard
//!
//! Only the credential's embedded expiry claim is inspected. No signatures
//! are verified and no network calls are made; denial of a navigation
//! manifests solely as a redirect to the landing route.

pub mod router;
pub mod session;

pub use router::{
    GuardDecision, NavigationOutcome, Route, RouteTable, Router, RouterError, LANDING_PATH,
};
pub use session::{
    Claims, DecodeError, FileStore, KeyringStore, MemoryStore, Navigator, Session, SessionStore,
};
