//! Search widget controller
//!
//! [`SearchWidget`] binds to an input of a [`Page`], listens to its events
//! and drives the results dropdown through a search lifecycle:
//! trigger, loading, then results or error.
//!
//! Every search takes a new sequence number and cancels the search before
//! it. A response that comes back after a newer search started is dropped,
//! so the dropdown always reflects the latest query.

pub mod dom;
pub mod view;

use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::WidgetConfig;
use crate::debounce::Debounced;
use crate::error::{Result, WidgetError};
use crate::registry::SearchBackend;

pub use dom::{DomEvent, EventOutcome, InputElement, Page, Rect};
pub use view::{ItemNode, ResultsPanel, WidgetState, WidgetView};

/// Draws the widget whenever its state changes
pub trait Renderer: Send + Sync {
    fn render(&self, view: &WidgetView);
}

struct WidgetInner {
    input: InputElement,
    panel: ResultsPanel,
    listening: bool,
    /// Sequence number of the latest search
    generation: u64,
    /// Cancels the search currently waiting on the backend
    in_flight: Option<CancellationToken>,
    renderer: Option<Arc<dyn Renderer>>,
}

impl WidgetInner {
    fn view(&self) -> WidgetView {
        WidgetView {
            input: self.input.clone(),
            panel: self.panel.clone(),
        }
    }

    fn render(&self) {
        if let Some(renderer) = &self.renderer {
            renderer.render(&self.view());
        }
    }

    fn hide_results(&mut self) {
        self.panel.wrapper.hide();
        self.render();
    }
}

/// State shared between the widget and its debounced search task
#[derive(Clone)]
struct Controller {
    inner: Arc<Mutex<WidgetInner>>,
    backend: Arc<dyn SearchBackend>,
}

impl Controller {
    async fn search(&self) -> Option<JoinHandle<()>> {
        let (seq, query, token) = {
            let mut inner = self.inner.lock().await;
            inner.generation += 1;
            let seq = inner.generation;
            if let Some(previous) = inner.in_flight.take() {
                previous.cancel();
            }

            inner.panel.clear_results();
            let query = inner.input.value.clone();
            if query.is_empty() {
                tracing::debug!(seq, "empty query, skipping search");
                inner.panel.hide_loading();
                inner.render();
                return None;
            }

            let token = CancellationToken::new();
            inner.in_flight = Some(token.clone());
            inner.panel.show_loading();
            inner.render();
            (seq, query, token)
        };

        tracing::debug!(seq, query = %query, "search started");
        let controller = self.clone();
        Some(tokio::spawn(async move {
            controller.complete(seq, query, token).await;
        }))
    }

    async fn complete(&self, seq: u64, query: String, token: CancellationToken) {
        let outcome = tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!(seq, "search superseded before the registry answered");
                return;
            }
            outcome = self.backend.search(&query) => outcome,
        };

        let mut inner = self.inner.lock().await;
        if inner.generation != seq {
            tracing::debug!(seq, latest = inner.generation, "discarding stale response");
            return;
        }
        inner.in_flight = None;
        inner.panel.hide_loading();

        match outcome {
            Ok(page) => {
                tracing::debug!(seq, results = page.len(), "search completed");
                inner.panel.show_results(&page);
            }
            Err(e) => {
                tracing::warn!(seq, kind = e.kind(), "registry search failed: {}", e);
                inner.panel.show_error();
            }
        }
        inner.render();
    }
}

/// Autocomplete dropdown bound to one input
pub struct SearchWidget {
    input_id: String,
    debounce: Duration,
    controller: Controller,
    debounced: Option<Debounced<()>>,
}

impl SearchWidget {
    /// Build the dropdown for the input `config.input_id` of `page`.
    ///
    /// Fails with [`WidgetError::InputNotFound`] if the page has no such
    /// input. Nothing listens to events until [`SearchWidget::init`].
    pub fn attach(
        page: &Page,
        backend: Arc<dyn SearchBackend>,
        config: &WidgetConfig,
    ) -> Result<Self> {
        let input = page
            .input_by_id(&config.input_id)
            .cloned()
            .ok_or_else(|| WidgetError::InputNotFound(config.input_id.clone()))?;

        let inner = WidgetInner {
            input,
            panel: ResultsPanel::new(),
            listening: false,
            generation: 0,
            in_flight: None,
            renderer: None,
        };

        Ok(Self {
            input_id: config.input_id.clone(),
            debounce: config.debounce,
            controller: Controller {
                inner: Arc::new(Mutex::new(inner)),
                backend,
            },
            debounced: None,
        })
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub async fn set_renderer(&self, renderer: Arc<dyn Renderer>) {
        self.controller.inner.lock().await.renderer = Some(renderer);
    }

    /// Position the dropdown under the input and start listening to events.
    ///
    /// The position is computed once; moving the input later does not move
    /// the dropdown.
    pub async fn init(&mut self) {
        {
            let mut inner = self.controller.inner.lock().await;
            let rect = inner.input.rect;
            inner.panel.position_below(&rect);
            inner.listening = true;
            inner.render();
        }

        let controller = self.controller.clone();
        self.debounced = Some(Debounced::new(self.debounce, move |()| {
            let controller = controller.clone();
            async move {
                let _ = controller.search().await;
            }
            .boxed()
        }));
        tracing::debug!(input_id = %self.input_id, "search widget initialized");
    }

    /// Handle an event on the input or on a result item.
    pub async fn dispatch(&self, event: DomEvent) -> EventOutcome {
        if !self.controller.inner.lock().await.listening {
            tracing::trace!(?event, "widget not initialized, ignoring event");
            return EventOutcome::default();
        }

        match event {
            DomEvent::Focus => {
                {
                    let mut inner = self.controller.inner.lock().await;
                    inner.input.focus();
                    inner.panel.wrapper.show();
                    inner.render();
                }
                let _ = self.controller.search().await;
                EventOutcome::default()
            }
            DomEvent::Blur => {
                let mut inner = self.controller.inner.lock().await;
                inner.input.blur();
                inner.hide_results();
                EventOutcome::default()
            }
            DomEvent::Input(value) => {
                {
                    let mut inner = self.controller.inner.lock().await;
                    inner.input.value = value;
                    inner.render();
                }
                if let Some(debounced) = &self.debounced {
                    debounced.call(());
                }
                EventOutcome::default()
            }
            // Keeps the input focused until the click lands
            DomEvent::MouseDown(index) => {
                let inner = self.controller.inner.lock().await;
                if index < inner.panel.items.len() {
                    EventOutcome::prevented()
                } else {
                    EventOutcome::default()
                }
            }
            DomEvent::Click(index) => {
                let mut inner = self.controller.inner.lock().await;
                let Some(item) = inner.panel.items.get(index) else {
                    tracing::debug!(index, "click outside of the result list");
                    return EventOutcome::default();
                };
                let siren = item.siren.clone();
                tracing::debug!(siren = %siren, "result selected");
                inner.input.value = siren;
                inner.input.blur();
                inner.hide_results();
                EventOutcome::prevented()
            }
        }
    }

    /// Type `text` into the input as a user would, focusing it first when
    /// it lost focus (after a selection or a blur).
    pub async fn type_text(&self, text: impl Into<String>) -> EventOutcome {
        let focused = self.controller.inner.lock().await.input.focused;
        if !focused {
            self.dispatch(DomEvent::Focus).await;
        }
        self.dispatch(DomEvent::Input(text.into())).await
    }

    /// Run a search for the current input value right away.
    ///
    /// Returns the task waiting on the backend, or `None` when the query is
    /// empty and nothing was requested.
    pub async fn search(&self) -> Option<JoinHandle<()>> {
        self.controller.search().await
    }

    pub async fn snapshot(&self) -> WidgetView {
        self.controller.inner.lock().await.view()
    }

    pub async fn state(&self) -> WidgetState {
        self.controller.inner.lock().await.panel.state()
    }
}
