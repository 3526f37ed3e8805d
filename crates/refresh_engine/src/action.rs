use std::fmt::Display;
use std::future::Future;

use engine_logging::engine_warn;
use refresh_core::RefreshOutcome;

/// The caller-supplied work a completed pull triggers.
///
/// The controller awaits it exactly once per refresh session and never
/// cancels it. The outcome is only logged; both outcomes end in `Completed`.
#[async_trait::async_trait]
pub trait RefreshAction: Send + Sync {
    async fn refresh(&self) -> RefreshOutcome;
}

/// Adapts a closure returning `impl Future<Output = ()>`.
pub struct FnRefreshAction<F> {
    f: F,
}

pub fn refresh_fn<F, Fut>(f: F) -> FnRefreshAction<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send,
{
    FnRefreshAction { f }
}

#[async_trait::async_trait]
impl<F, Fut> RefreshAction for FnRefreshAction<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send,
{
    async fn refresh(&self) -> RefreshOutcome {
        (self.f)().await;
        RefreshOutcome::Succeeded
    }
}

/// Adapts a closure returning `impl Future<Output = Result<(), E>>`.
pub struct TryFnRefreshAction<F> {
    f: F,
}

pub fn try_refresh_fn<F, Fut, E>(f: F) -> TryFnRefreshAction<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Display + Send,
{
    TryFnRefreshAction { f }
}

#[async_trait::async_trait]
impl<F, Fut, E> RefreshAction for TryFnRefreshAction<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Display + Send,
{
    async fn refresh(&self) -> RefreshOutcome {
        match (self.f)().await {
            Ok(()) => RefreshOutcome::Succeeded,
            Err(err) => {
                engine_warn!("refresh action failed: {err}");
                RefreshOutcome::Failed
            }
        }
    }
}
