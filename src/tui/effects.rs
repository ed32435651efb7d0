use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::action::Action;
use crate::journal::{load_book, JournalProvider};

/// Side effects returned by the reducer
pub enum Effect {
    None,
    Action(Action),
    Batch(Vec<Effect>),
    Async(Pin<Box<dyn Future<Output = Action> + Send>>),
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "None"),
            Effect::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
            Effect::Async(_) => write!(f, "Async(..)"),
        }
    }
}

/// Dispatch a tick once `delay` has elapsed
pub fn tick_after(delay: Duration) -> Effect {
    Effect::Async(Box::pin(async move {
        tokio::time::sleep(delay).await;
        Action::Tick(Instant::now())
    }))
}

/// Journal loading effects
///
/// Holds the provider so the reducer stays free of I/O.
pub struct JournalEffects {
    provider: Arc<dyn JournalProvider>,
}

impl JournalEffects {
    pub fn new(provider: Arc<dyn JournalProvider>) -> Self {
        Self { provider }
    }

    pub fn source(&self) -> String {
        self.provider.describe()
    }

    /// Load the journal book in the background
    pub fn handle_reload(&self) -> Effect {
        let provider = Arc::clone(&self.provider);
        debug!("EFFECT: loading journals from {}", provider.describe());
        Effect::Async(Box::pin(async move {
            let result = load_book(provider.as_ref())
                .await
                .map(Arc::new)
                .map_err(|e| e.to_string());
            Action::JournalsLoaded(result)
        }))
    }
}
