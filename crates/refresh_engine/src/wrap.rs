use std::sync::Arc;

use refresh_core::RefreshConfig;

use crate::{
    Animator, EngineError, HapticSink, NoAnimation, NoHaptics, RefreshAction, RefreshController,
    RefreshHandle,
};

/// Scrollable content with a live pull-to-refresh controller attached.
pub struct Refreshable<C> {
    content: C,
    handle: RefreshHandle,
}

impl<C> Refreshable<C> {
    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn handle(&self) -> &RefreshHandle {
        &self.handle
    }

    pub fn into_parts(self) -> (C, RefreshHandle) {
        (self.content, self.handle)
    }
}

pub struct RefreshableBuilder<C> {
    content: C,
    action: Arc<dyn RefreshAction>,
    haptics: Arc<dyn HapticSink>,
    animator: Arc<dyn Animator>,
    config: RefreshConfig,
}

/// Wraps `content` so that a completed pull runs `action`.
///
/// Haptics and animation default to no-ops and the config to
/// [`RefreshConfig::default`]; call [`RefreshableBuilder::spawn`] inside a
/// tokio runtime to start the controller.
pub fn refreshable<C, A>(content: C, action: A) -> RefreshableBuilder<C>
where
    A: RefreshAction + 'static,
{
    RefreshableBuilder {
        content,
        action: Arc::new(action),
        haptics: Arc::new(NoHaptics),
        animator: Arc::new(NoAnimation),
        config: RefreshConfig::default(),
    }
}

impl<C> RefreshableBuilder<C> {
    pub fn with_haptics(mut self, haptics: impl HapticSink + 'static) -> Self {
        self.haptics = Arc::new(haptics);
        self
    }

    pub fn with_animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Arc::new(animator);
        self
    }

    pub fn with_config(mut self, config: RefreshConfig) -> Self {
        self.config = config;
        self
    }

    pub fn spawn(self) -> Result<Refreshable<C>, EngineError> {
        let handle =
            RefreshController::spawn(self.config, self.action, self.haptics, self.animator)?;
        Ok(Refreshable {
            content: self.content,
            handle,
        })
    }
}
