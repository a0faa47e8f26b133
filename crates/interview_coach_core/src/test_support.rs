//! In-memory generation service used by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{GenerationRequest, GenerationService, PortError, PortResult};

/// Replays scripted replies in order, then falls back to a fixed behavior.
/// Every request is recorded for inspection.
pub(crate) struct ScriptedGateway {
    script: Mutex<VecDeque<Result<String, String>>>,
    otherwise: Result<String, String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGateway {
    pub(crate) fn replying(text: &str) -> Self {
        Self::build(Vec::new(), Ok(text.to_string()))
    }

    pub(crate) fn failing(error: PortError) -> Self {
        Self::build(Vec::new(), Err(error.to_string()))
    }

    /// `Ok` steps are replies, `Err` steps become `PortError::Upstream`.
    pub(crate) fn scripted(steps: Vec<Result<&str, &str>>) -> Self {
        let steps = steps
            .into_iter()
            .map(|step| step.map(str::to_string).map_err(str::to_string))
            .collect();
        Self::build(steps, Err("script exhausted".to_string()))
    }

    fn build(script: Vec<Result<String, String>>, otherwise: Result<String, String>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            otherwise,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationService for ScriptedGateway {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.otherwise.clone());
        step.map_err(PortError::Upstream)
    }
}
