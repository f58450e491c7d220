//! Transport layer (TCP).
//!
//! Framing, the channel adapter the session loop reads from, the per-connection
//! pipeline, and the accept loop.

pub mod channel;
pub mod framing;
pub mod server;
pub mod session;

pub use channel::{Channel, FramedChannel, TcpChannel};
pub use session::{process_frame, run_session, Stage};
