//! Top-level facade crate for osinfo.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use osinfo_core::*;
}

pub mod server {
    pub use osinfo_server::*;
}
