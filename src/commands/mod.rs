//! Command handling.
//!
//! This module contains the command registry, the handler interface, the
//! dispatcher and the built-in handlers.
//!
//! ## Handler Interface
//!
//! Every command is a [`Handler`] receiving an [`Invocation`]: the RCON
//! bridge, the whitespace-split arguments, the invoking user and their
//! resolved level. Handlers return an optional [`Reply`]; faults are
//! [`HandlerError`](crate::error::HandlerError)s and never reach the chat
//! transport as errors.
//!
//! ## Dispatch
//!
//! [`Link::dispatch`](crate::Link::dispatch) returns a tagged [`Outcome`];
//! [`Link::call`](crate::Link::call) flattens it into a [`Reply`].

pub mod context;
pub mod dispatch;
pub mod help;
pub mod passthrough;
pub mod registry;

pub use context::{Handler, Invocation, Reply};
pub use dispatch::Outcome;
pub use help::HelpHandler;
pub use passthrough::RconPassthrough;
pub use registry::{Command, Registry};
