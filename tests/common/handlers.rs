//! Canned handlers for dispatcher tests.

use async_trait::async_trait;
use mclink::commands::{Handler, Invocation, Reply};
use mclink::error::{HandlerError, HandlerResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replies with fixed text and counts invocations.
#[derive(Clone, Default)]
pub struct Counting {
    pub calls: Arc<AtomicUsize>,
    pub text: &'static str,
}

impl Counting {
    pub fn new(text: &'static str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            text,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Handler for Counting {
    async fn handle(&self, _inv: Invocation<'_>) -> HandlerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Reply::success(self.text)))
    }
}

/// Echoes its arguments.
pub struct Echo;

#[async_trait]
impl Handler for Echo {
    async fn handle(&self, inv: Invocation<'_>) -> HandlerResult {
        Ok(Some(Reply::success(inv.args.join("|"))))
    }
}

/// Always fails.
pub struct Failing;

#[async_trait]
impl Handler for Failing {
    async fn handle(&self, _inv: Invocation<'_>) -> HandlerResult {
        Err(HandlerError::Internal("disk on fire".to_string()))
    }
}

/// Always panics.
pub struct Panicking;

#[async_trait]
impl Handler for Panicking {
    async fn handle(&self, _inv: Invocation<'_>) -> HandlerResult {
        panic!("handler exploded");
    }
}

/// Returns nothing.
pub struct Silent;

#[async_trait]
impl Handler for Silent {
    async fn handle(&self, _inv: Invocation<'_>) -> HandlerResult {
        Ok(None)
    }
}

/// Returns a failed reply.
pub struct Refusing;

#[async_trait]
impl Handler for Refusing {
    async fn handle(&self, _inv: Invocation<'_>) -> HandlerResult {
        Ok(Some(Reply::failure("not today")))
    }
}
