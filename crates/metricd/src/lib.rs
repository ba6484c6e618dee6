//! Top-level facade crate for metricd.
//!
//! Re-exports the core storage and the server library so users can depend on a single crate.

pub mod core {
    pub use metricd_core::*;
}

pub mod server {
    pub use metricd_server::*;
}
