//! The action contract and task metadata

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::error::BoxError;

/// What an action produces: success, or any boxed error for the engine to
/// wrap with the task's identity
pub type ActionResult = Result<(), BoxError>;

/// A named, cancellable unit of work.
///
/// Actions are shared (`Arc`) so a registered task and compositions built
/// from it can reference the same unit. They receive the cancellation token
/// threaded from the top-level run and are expected to observe it around
/// long-running work.
pub type Action = Arc<dyn Fn(CancellationToken) -> BoxFuture<'static, ActionResult> + Send + Sync>;

/// Wrap an async closure into an [`Action`].
pub fn action<F, Fut>(f: F) -> Action
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ActionResult> + Send + 'static,
{
    Arc::new(move |cancel| -> BoxFuture<'static, ActionResult> { Box::pin(f(cancel)) })
}

/// Presentation snapshot of a registered task.
///
/// Description and declared dependencies are optional annotation data for
/// listing and filtering; they carry no execution semantics in the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: String,
    pub description: Option<String>,
    pub deps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_action_adapter_invokes_closure() {
        let act = action(|_cancel| async { Ok(()) });
        act(CancellationToken::new()).await.unwrap();
    }

    #[tokio::test]
    async fn test_action_sees_cancellation_state() {
        let act = action(|cancel: CancellationToken| async move {
            if cancel.is_cancelled() {
                Err("was cancelled".into())
            } else {
                Ok(())
            }
        });
        let token = CancellationToken::new();
        token.cancel();
        assert!(act(token).await.is_err());
    }
}
