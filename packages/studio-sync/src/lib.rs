//! # studio-sync
//!
//! Client-side optimistic synchronization core for the studio content
//! dashboard. Every resource the dashboard manages (ideas,
//! inspirations, publications, categories, topics, content types,
//! personal brands) is fetched, cached, and mutated through one
//! uniform contract that applies changes locally before the network
//! round trip completes and reconciles with server truth when a
//! mutation fails.
//!
//! ## Architecture
//!
//! ```text
//! SelectionContext ──(active brand id)──► ResourceStore<T> ×7
//!                                              │
//!                                              ▼
//!                                        ResourceClient<T>
//!                                     (RestClient / InMemoryClient)
//!                                              │
//!                                              ▼
//!                                         resource API
//!
//! ReviewQueue ◄──(list snapshot)── InspirationStore
//!      │
//!      └──(accept/reject commands)──► store mutations
//!
//! Publisher ──(LocalScheduleTime)──► late::LateClient ──► Late API
//! ```
//!
//! ## Key invariants
//!
//! 1. **Caches converge**: after any settled operation a store's cache
//!    is the last successful fetch result plus at most one pending
//!    optimistic delta; every failed mutation is followed by one
//!    corrective load.
//! 2. **Last load wins**: loads are sequence-numbered and stale
//!    completions (success or failure) are discarded.
//! 3. **Mutations touch records by id**, never by position, so they
//!    tolerate interleaving with loads.
//! 4. **Errors are structured**: a [`SyncError`], never `anyhow`,
//!    crosses this library's boundary; stores stay usable after any
//!    error.
//! 5. **The review queue trusts the list, not itself**: it waits for
//!    the upstream list to drop a processed item rather than decrement
//!    a local count.

mod client;
mod config;
mod error;
mod filter;
mod http;
mod publisher;
mod resource;
mod review;
mod scheduling;
mod selection;
mod store;

pub mod id;
pub mod resources;

// Testing utilities (feature-gated)
#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use client::ResourceClient;
pub use config::Config;
pub use error::SyncError;
pub use filter::ListFilter;
pub use http::RestClient;
pub use publisher::{build_post_request, PublishTarget, Publisher};
pub use resource::{CreatePayload, Resource};
pub use review::{
    ReviewCommand, ReviewDecision, ReviewHandler, ReviewItem, ReviewQueue, ReviewSession,
    ReviewState,
};
pub use scheduling::LocalScheduleTime;
pub use selection::SelectionContext;
pub use store::ResourceStore;

// Re-export commonly used external types
pub use async_trait::async_trait;
