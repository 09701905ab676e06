//! Shared service state.

use std::sync::Arc;

use askpdf_core::agent::Agent;
use askpdf_core::document::DocumentIngestor;
use askpdf_core::provider::ProviderContext;
use askpdf_core::session::Session;
use askpdf_core::{ProviderConfig, Result};
use tokio::sync::Mutex;

/// Inner state for [`ServiceState`].
struct ServiceInner {
    providers: ProviderContext,
    ingestor: DocumentIngestor,
    session: Mutex<Session>,
}

/// Shared state behind every handler.
///
/// Holds the connected provider clients, the document ingestor, and the
/// single in-process session. The session sits behind a mutex because a
/// turn (history append + reply + append) and an agent swap must each be
/// atomic with respect to one another. Cheap to clone.
#[derive(Clone)]
pub struct ServiceState {
    inner: Arc<ServiceInner>,
}

impl ServiceState {
    /// Connects providers and creates the initial session.
    ///
    /// The session starts with an agent over empty context, so questions
    /// asked before any upload are answered (or refused) without one.
    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        let providers = ProviderContext::connect(&config)?;
        let ingestor = DocumentIngestor::new(providers.files().cloned());
        let session = Mutex::new(Session::new(Agent::empty(&providers)));

        Ok(Self {
            inner: Arc::new(ServiceInner {
                providers,
                ingestor,
                session,
            }),
        })
    }

    /// Returns the connected provider clients.
    pub fn providers(&self) -> &ProviderContext {
        &self.inner.providers
    }

    /// Returns the document ingestor.
    pub fn ingestor(&self) -> &DocumentIngestor {
        &self.inner.ingestor
    }

    /// Returns the session guard.
    pub fn session(&self) -> &Mutex<Session> {
        &self.inner.session
    }
}
