//! Modal broker: confirmation and text-input dialogs
//!
//! Each dialog kind is a single-slot request/response channel. Asking
//! publishes a request (with a [`Resolver`]) into an observable slot and
//! hands the caller a [`Deferred`] to await. The UI renders the slot and
//! answers through `close_confirm` / `close_input`.
//!
//! ## Superseded requests
//!
//! Asking again while a request is still open overwrites the slot. The
//! earlier caller's [`Deferred`] then never completes: it is neither
//! resolved nor turned into an error. Callers that must not hang should
//! race the deferred against their own timeout.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::debug;

use crate::observable::ObservableState;

// ============================================================================
// Deferred / Resolver
// ============================================================================

/// Creates a connected resolver/deferred pair
pub fn deferred<T>() -> (Resolver<T>, Deferred<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Resolver {
            sender: Arc::new(Mutex::new(Some(tx))),
        },
        Deferred {
            receiver: rx,
            abandoned: false,
        },
    )
}

/// The completing half of a [`Deferred`]
///
/// Clones share one underlying sender: the first `resolve` wins and later
/// calls are no-ops.
pub struct Resolver<T> {
    sender: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Resolver<T> {
    /// Completes the deferred with `value`
    ///
    /// Returns `false` if it was already resolved or its deferred was dropped.
    pub fn resolve(&self, value: T) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }

    /// Whether `resolve` has not been called yet
    pub fn is_pending(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> PartialEq for Resolver<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sender, &other.sender)
    }
}

impl<T> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// A value the user has not supplied yet
///
/// Completes when its [`Resolver`] is resolved. If every clone of the
/// resolver is dropped unresolved, the deferred stays pending forever.
#[must_use = "a deferred does nothing unless awaited"]
pub struct Deferred<T> {
    receiver: oneshot::Receiver<T>,
    abandoned: bool,
}

impl<T> Future for Deferred<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        if self.abandoned {
            return Poll::Pending;
        }
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(value)) => Poll::Ready(value),
            Poll::Ready(Err(_)) => {
                self.abandoned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("abandoned", &self.abandoned)
            .finish()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// State of the confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmRequest {
    pub active: bool,
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Render the confirm button as destructive
    pub dangerous: bool,
    pub resolver: Option<Resolver<bool>>,
}

impl Default for ConfirmRequest {
    fn default() -> Self {
        Self {
            active: false,
            title: String::new(),
            message: String::new(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            dangerous: false,
            resolver: None,
        }
    }
}

impl ConfirmRequest {
    /// Starts a request with the default button labels
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    pub fn dangerous(mut self, dangerous: bool) -> Self {
        self.dangerous = dangerous;
        self
    }
}

/// State of the text-input dialog
#[derive(Debug, Clone, PartialEq)]
pub struct InputRequest {
    pub active: bool,
    pub title: String,
    pub message: String,
    /// Initial text of the field
    pub value: String,
    pub placeholder: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub resolver: Option<Resolver<Option<String>>>,
}

impl Default for InputRequest {
    fn default() -> Self {
        Self {
            active: false,
            title: String::new(),
            message: String::new(),
            value: String::new(),
            placeholder: String::new(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            resolver: None,
        }
    }
}

impl InputRequest {
    /// Starts a request with an empty message, value and placeholder
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }
}

/// Shared shape of the two dialog slots
trait ModalSlot: Clone + Send + 'static {
    type Answer: Send + 'static;

    fn open(self, resolver: Resolver<Self::Answer>) -> Self;
    fn resolver(&self) -> Option<&Resolver<Self::Answer>>;
    fn closed(&self) -> Self;
}

impl ModalSlot for ConfirmRequest {
    type Answer = bool;

    fn open(self, resolver: Resolver<bool>) -> Self {
        Self {
            active: true,
            resolver: Some(resolver),
            ..self
        }
    }

    fn resolver(&self) -> Option<&Resolver<bool>> {
        self.resolver.as_ref()
    }

    fn closed(&self) -> Self {
        Self {
            active: false,
            ..self.clone()
        }
    }
}

impl ModalSlot for InputRequest {
    type Answer = Option<String>;

    fn open(self, resolver: Resolver<Option<String>>) -> Self {
        Self {
            active: true,
            resolver: Some(resolver),
            ..self
        }
    }

    fn resolver(&self) -> Option<&Resolver<Option<String>>> {
        self.resolver.as_ref()
    }

    fn closed(&self) -> Self {
        Self {
            active: false,
            ..self.clone()
        }
    }
}

fn ask<R: ModalSlot>(slot: &ObservableState<R>, request: R) -> Deferred<R::Answer> {
    let (resolver, deferred) = deferred();
    slot.set(request.open(resolver));
    deferred
}

fn close<R: ModalSlot>(slot: &ObservableState<R>, answer: R::Answer) {
    slot.update(move |current| {
        match current.resolver() {
            Some(resolver) => {
                let delivered = resolver.resolve(answer);
                debug!(delivered, "Modal answered");
            }
            None => debug!("Modal closed with no pending request"),
        }
        current.closed()
    });
}

// ============================================================================
// ModalBroker
// ============================================================================

/// The confirm and input dialog slots
///
/// Cloning shares both slots.
#[derive(Debug, Clone, Default)]
pub struct ModalBroker {
    confirm: ObservableState<ConfirmRequest>,
    input: ObservableState<InputRequest>,
}

impl ModalBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observable confirmation slot
    pub fn confirm_state(&self) -> &ObservableState<ConfirmRequest> {
        &self.confirm
    }

    /// Observable input slot
    pub fn input_state(&self) -> &ObservableState<InputRequest> {
        &self.input
    }

    /// Opens the confirmation dialog and returns the pending answer
    ///
    /// Supersedes any request still open; see the module docs.
    pub fn ask_confirm(&self, request: ConfirmRequest) -> Deferred<bool> {
        debug!(title = %request.title, dangerous = request.dangerous, "Asking for confirmation");
        ask(&self.confirm, request)
    }

    /// Answers the open confirmation (if any) and deactivates the dialog
    pub fn close_confirm(&self, result: bool) {
        close(&self.confirm, result);
    }

    /// Opens the input dialog and returns the pending answer
    ///
    /// `None` is an explicit cancellation. Supersedes any request still open.
    pub fn ask_input(&self, request: InputRequest) -> Deferred<Option<String>> {
        debug!(title = %request.title, "Asking for input");
        ask(&self.input, request)
    }

    /// Answers the open input request (if any) and deactivates the dialog
    pub fn close_input(&self, result: Option<String>) {
        close(&self.input, result);
    }
}
