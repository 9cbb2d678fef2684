//! Clerk webhook ingestion.
//!
//! A delivery is accepted only after its Svix signature checks out; the event
//! is then decoded and applied to the user store.

pub mod events;
pub mod handlers;
pub mod signature;
