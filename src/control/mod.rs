//! Line-delimited JSON control interface for host-embedded mode.
//!
//! The interactive dashboard, checkpoint I/O, and the full host-embedding
//! runtime loop remain external collaborators; what's
//! implemented here is the wire envelope, the typed message variants, and
//! a dispatcher a host process can drive directly.

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod message;

pub use dispatch::{dispatch, error_to_outbound, proxy_info, result_to_outbound};
pub use envelope::Envelope;
pub use error::ControlError;
pub use message::{InboundMessage, OutboundMessage};
