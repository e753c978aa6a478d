//! Console wiring
//!
//! [`Console`] owns one instance of each piece of client state and wires the
//! sync store's feedback into the toast queue. Front-ends construct exactly
//! one per session; nothing here is global.

use std::sync::Arc;

use deckhand_core::config::Config;
use deckhand_core::ports::IConsoleApi;

use crate::modal::ModalBroker;
use crate::store::SyncStore;
use crate::toast::ToastQueue;

/// The client-side state of one console session
#[derive(Debug, Clone)]
pub struct Console {
    toasts: ToastQueue,
    modals: ModalBroker,
    store: SyncStore,
}

impl Console {
    /// Wires a console session against `api`
    ///
    /// Toast lifetime comes from `config.toasts`.
    pub fn new(api: Arc<dyn IConsoleApi>, config: &Config) -> Self {
        let toasts = ToastQueue::new(config.toasts.default_duration());
        let store = SyncStore::new(api, Arc::new(toasts.clone()));
        Self {
            toasts,
            modals: ModalBroker::new(),
            store,
        }
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn modals(&self) -> &ModalBroker {
        &self.modals
    }

    pub fn store(&self) -> &SyncStore {
        &self.store
    }
}
