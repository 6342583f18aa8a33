//! Integration test common infrastructure.
//!
//! Provides an in-process RCON server, a recording chat transport and a few
//! canned handlers.

pub mod chat;
pub mod handlers;
pub mod rcon;

#[allow(unused_imports)]
pub use chat::MockTransport;
#[allow(unused_imports)]
pub use rcon::FakeRcon;
