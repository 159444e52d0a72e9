//! Lazy, retry-wrapped agent lifecycle
//!
//! The agent needs live credentials and one network round trip before it can
//! serve, and the hosting environment cold-starts. Initialization is
//! therefore lazy and wrapped in a bounded fixed-backoff retry, modeled as an
//! explicit state machine instead of ad hoc flags.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::info;
use tracing::warn;

use crate::agent::RagAgent;
use crate::config::AppConfig;
use crate::config::Credentials;
use crate::errors::Result;
use crate::errors::ViviRagError;

/// How a credential is looked up; injectable so tests never touch the
/// process environment.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lifecycle state of the shared agent.
enum AgentState {
    Uninitialized,
    Ready(Arc<RagAgent>),
    Degraded { last_error: String },
}

impl AgentState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready(_) => "ready",
            Self::Degraded { .. } => "degraded",
        }
    }
}

/// Shared handle that initializes the agent on first use and re-attempts
/// initialization after failures.
///
/// Transitions: `Uninitialized -> Ready` on a successful probe,
/// `Uninitialized -> Degraded` once the retry budget is exhausted, and
/// `Degraded -> Ready` when a later probe succeeds. Probes are the
/// [`Self::acquire`] calls issued by request handling and `/api/health`.
pub struct AgentHandle {
    config: Arc<AppConfig>,
    lookup: EnvLookup,
    state: RwLock<AgentState>,
}

impl AgentHandle {
    /// Handle backed by the process environment.
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::with_lookup(config, Arc::new(|name: &str| std::env::var(name).ok()))
    }

    /// Handle with an injected credential lookup.
    pub fn with_lookup(config: Arc<AppConfig>, lookup: EnvLookup) -> Self {
        Self {
            config,
            lookup,
            state: RwLock::new(AgentState::Uninitialized),
        }
    }

    /// Current lifecycle state name, for diagnostics.
    pub async fn state_name(&self) -> &'static str {
        self.state.read().await.name()
    }

    /// Last initialization error, if the handle is degraded.
    pub async fn last_error(&self) -> Option<String> {
        match &*self.state.read().await {
            AgentState::Degraded { last_error } => Some(last_error.clone()),
            _ => None,
        }
    }

    /// Get the ready agent, initializing it if necessary.
    ///
    /// Initialization is retried up to the configured budget with a fixed
    /// sleep between attempts; exhaustion leaves the handle degraded until a
    /// later probe succeeds.
    pub async fn acquire(&self) -> Result<Arc<RagAgent>> {
        if let AgentState::Ready(agent) = &*self.state.read().await {
            return Ok(agent.clone());
        }

        let mut state = self.state.write().await;
        // Another task may have finished initializing while we waited.
        if let AgentState::Ready(agent) = &*state {
            return Ok(agent.clone());
        }

        let attempts = self.config.retry.max_attempts.max(1);
        let delay = self.config.retry_delay();
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match self.init().await {
                Ok(agent) => {
                    let agent = Arc::new(agent);
                    info!("Agent ready after {attempt} attempt(s)");
                    *state = AgentState::Ready(agent.clone());
                    return Ok(agent);
                }
                Err(e) => {
                    warn!("Agent initialization attempt {attempt}/{attempts} failed: {e}");
                    last_error = e.to_string();
                    if attempt < attempts {
                        sleep(delay).await;
                    }
                }
            }
        }

        *state = AgentState::Degraded {
            last_error: last_error.clone(),
        };
        Err(ViviRagError::AgentUnavailable(last_error))
    }

    async fn init(&self) -> Result<RagAgent> {
        let credentials = Credentials::from_lookup(|name| (self.lookup)(name))?;
        RagAgent::new(&self.config, &credentials).await
    }

    /// Presence report for the required environment variables.
    pub fn credential_presence(&self) -> Vec<(&'static str, bool)> {
        Credentials::presence(|name| (self.lookup)(name))
    }
}
