//! Terminal session
//!
//! Wires a [`Console`] to the HTTP adapter and to the terminal: toasts are
//! printed as they appear, and confirm/input dialogs are answered from
//! stdin.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{bail, Context, Result};
use deckhand_api::{ConsoleClient, HttpConsoleApi};
use deckhand_core::config::Config;
use deckhand_core::domain::ToastId;
use deckhand_state::{
    ConfirmRequest, Console, InputRequest, Outcome, Subscription, SyncState, Toast, ToastQueue,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Loads and validates the configuration
///
/// An explicit `path` must exist; otherwise the default location is tried
/// and built-in defaults are used when it is missing.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load_or_default(&Config::default_path()),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        bail!("Invalid configuration: {}", details.join("; "));
    }
    Ok(config)
}

pub struct Session {
    console: Console,
    formatter: Arc<dyn OutputFormatter>,
    format: OutputFormat,
    base_url: String,
    _toasts: Subscription,
}

impl Session {
    pub fn open(config: &Config, format: OutputFormat, quiet: bool) -> Self {
        let client = ConsoleClient::from_config(&config.api);
        let base_url = client.base_url().to_string();
        info!(base_url = %base_url, "Opening console session");

        let console = Console::new(Arc::new(HttpConsoleApi::new(client)), config);
        let formatter: Arc<dyn OutputFormatter> = Arc::from(get_formatter(format, quiet));
        let printer = ToastPrinter::new(Arc::clone(&formatter));
        let toasts = print_toasts(console.toasts(), Arc::new(printer));

        Self {
            console,
            formatter,
            format,
            base_url,
            _toasts: toasts,
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter.as_ref()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Fetches instances and folders, failing if either could not be read
    pub async fn load(&self) -> Result<SyncState> {
        match self.console.store().load().await {
            Outcome::Confirmed => Ok(self.console.store().snapshot()),
            _ => bail!("Could not load instances and folders from {}", self.base_url),
        }
    }

    /// Opens a confirm dialog and answers it from stdin
    pub async fn confirm(&self, request: ConfirmRequest) -> Result<bool> {
        let modals = self.console.modals();
        let answer = modals.ask_confirm(request);
        let shown = modals.confirm_state().get();

        let line = prompt_line(&confirm_prompt(&shown)).await?;
        let accepted = confirm_answer(&shown, line.as_deref());
        debug!(title = %shown.title, accepted, "Confirm dialog answered");
        modals.close_confirm(accepted);
        Ok(answer.await)
    }

    /// Opens an input dialog and answers it from stdin
    pub async fn input(&self, request: InputRequest) -> Result<Option<String>> {
        let modals = self.console.modals();
        let answer = modals.ask_input(request);
        let shown = modals.input_state().get();

        let line = prompt_line(&input_prompt(&shown)).await?;
        modals.close_input(input_answer(&shown, line.as_deref()));
        Ok(answer.await)
    }
}

/// Prints each toast once, when it first appears in the queue
///
/// Only ids still in the queue are remembered.
struct ToastPrinter {
    formatter: Arc<dyn OutputFormatter>,
    shown: Mutex<HashSet<ToastId>>,
}

impl ToastPrinter {
    fn new(formatter: Arc<dyn OutputFormatter>) -> Self {
        Self {
            formatter,
            shown: Mutex::new(HashSet::new()),
        }
    }

    fn observe(&self, toasts: &[Toast]) {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        for toast in toasts {
            if shown.insert(toast.id) {
                self.formatter.toast(&toast.message, toast.kind);
            }
        }
        shown.retain(|id| toasts.iter().any(|t| t.id == *id));
    }

    #[cfg(test)]
    fn remembered(&self) -> usize {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

fn print_toasts(queue: &ToastQueue, printer: Arc<ToastPrinter>) -> Subscription {
    queue
        .state()
        .subscribe(move |toasts: &Vec<Toast>| printer.observe(toasts))
}

/// Writes `prompt` to stderr and reads one line; `None` at end of input
async fn prompt_line(prompt: &str) -> Result<Option<String>> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(prompt.as_bytes()).await?;
    stderr.flush().await?;

    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string()))
}

fn confirm_prompt(request: &ConfirmRequest) -> String {
    let marker = if request.dangerous { "\u{26a0} " } else { "" };
    format!(
        "{}{}: {} [{}/{}] ",
        marker, request.title, request.message, request.confirm_text, request.cancel_text
    )
}

/// Anything but an explicit yes (or the confirm label) cancels
fn confirm_answer(request: &ConfirmRequest, line: Option<&str>) -> bool {
    let Some(line) = line else {
        return false;
    };
    let answer = line.trim().to_lowercase();
    answer == "y" || answer == "yes" || answer == request.confirm_text.to_lowercase()
}

fn input_prompt(request: &InputRequest) -> String {
    let mut prompt = request.title.clone();
    if !request.message.is_empty() {
        prompt.push_str(&format!(" ({})", request.message));
    }
    if !request.value.is_empty() {
        prompt.push_str(&format!(" [{}]", request.value));
    } else if !request.placeholder.is_empty() {
        prompt.push_str(&format!(" [e.g. {}]", request.placeholder));
    }
    prompt.push_str(": ");
    prompt
}

/// An empty line keeps the prefilled value, or cancels when there is none
fn input_answer(request: &InputRequest, line: Option<&str>) -> Option<String> {
    let answer = line?.trim();
    if !answer.is_empty() {
        Some(answer.to_string())
    } else if !request.value.is_empty() {
        Some(request.value.clone())
    } else {
        None
    }
}
