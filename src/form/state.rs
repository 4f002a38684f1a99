//! Form lifecycle: `Loading` until the artifacts are in memory, then `Ready` for good

use crate::error::StartupError;
use crate::inference::{ArtifactContext, ArtifactPaths};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub enum FormState {
    /// Artifacts not yet available
    Loading(ArtifactPaths),
    /// Artifacts loaded; accepting interactions
    Ready(Arc<ArtifactContext>),
}

impl FormState {
    pub fn new(paths: ArtifactPaths) -> Self {
        FormState::Loading(paths)
    }

    /// Move `Loading` to `Ready`. A form that is already `Ready` stays as it is.
    pub fn load(self) -> Result<Self, StartupError> {
        match self {
            FormState::Loading(paths) => {
                let context = ArtifactContext::load(&paths)?;
                info!(labels = ?context.labels(), "Prediction form ready");
                Ok(FormState::Ready(Arc::new(context)))
            }
            ready @ FormState::Ready(_) => Ok(ready),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FormState::Ready(_))
    }

    pub fn context(&self) -> Option<&Arc<ArtifactContext>> {
        match self {
            FormState::Ready(context) => Some(context),
            FormState::Loading(_) => None,
        }
    }

    /// Shared handle to the artifacts, or `None` while loading
    pub fn into_context(self) -> Option<Arc<ArtifactContext>> {
        match self {
            FormState::Ready(context) => Some(context),
            FormState::Loading(_) => None,
        }
    }
}
