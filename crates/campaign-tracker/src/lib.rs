//! Top-level facade crate for Campaign Tracker.
//!
//! Re-exports the core computations and the gateway library so users can depend on a single crate.

pub mod core {
    pub use campaign_tracker_core::*;
}

pub mod gateway {
    pub use campaign_tracker_gateway::*;
}
