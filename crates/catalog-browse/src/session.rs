//! Async driver for the catalog page.
//!
//! A session task owns the [`CatalogController`] and a search-text
//! [`Debouncer`]. Intents arrive over an mpsc channel, each fetch plan runs
//! as its own tokio task, and finished fetches come back tagged with their
//! generation so the controller can drop stale ones. Every processed event
//! publishes a fresh view on a watch channel.

use std::error::Error as StdError;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use catalog_core::catalog::Category;
use catalog_core::failure_message;
use catalog_core::search::{CatalogResponse, SortOption};
use catalog_data::CatalogApi;
use futures::FutureExt;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::{CatalogController, CatalogView, FetchPlan};
use crate::debounce::Debouncer;
use crate::settings::BrowseSettings;
use crate::LOAD_FAILURE_MESSAGE;

/// A user intent for the catalog page.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Search text changed (debounced before it affects the query).
    Search(String),
    /// Category selected; `None` or empty for all categories.
    Category(Option<String>),
    /// Sort option selected.
    Sort(SortOption),
    /// Jump to a page (0-indexed).
    Page(u32),
    /// Next page.
    NextPage,
    /// Previous page.
    PrevPage,
    /// Re-run the current query.
    Refresh,
}

/// Errors talking to a session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The session task has stopped.
    #[error("catalog session has stopped")]
    Closed,
}

/// A published view plus the number of intents processed before it.
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Intents processed so far.
    pub processed: u64,
    /// The renderable state.
    pub view: CatalogView,
}

struct FetchDone {
    generation: u64,
    result: Result<CatalogResponse, String>,
}

/// Runs a catalog page against a [`CatalogApi`].
pub struct CatalogSession<A> {
    api: Arc<A>,
    controller: CatalogController,
    debouncer: Debouncer<String>,
    debounced: watch::Receiver<String>,
    done_tx: mpsc::UnboundedSender<FetchDone>,
    done_rx: mpsc::UnboundedReceiver<FetchDone>,
    views: watch::Sender<SessionView>,
    processed: u64,
}

impl<A: CatalogApi + 'static> CatalogSession<A> {
    /// Start a session task. Loads the categories and the first page.
    pub fn spawn(api: Arc<A>, settings: BrowseSettings) -> SessionHandle {
        let (intents_tx, intents_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (categories_tx, categories_rx) = watch::channel(Vec::new());

        let mut controller = CatalogController::new(&settings);
        let first = controller.refresh();
        let (views, views_rx) = watch::channel(SessionView {
            processed: 0,
            view: controller.view(),
        });

        let debouncer = Debouncer::new(String::new(), settings.debounce);
        let session = Self {
            api: Arc::clone(&api),
            controller,
            debounced: debouncer.subscribe(),
            debouncer,
            done_tx,
            done_rx,
            views,
            processed: 0,
        };
        session.launch(first);

        tokio::spawn(load_categories(api, categories_tx));
        let task = tokio::spawn(session.run(intents_rx));

        SessionHandle {
            intents: intents_tx,
            views: views_rx,
            categories: categories_rx,
            sent: 0,
            task,
        }
    }

    async fn run(mut self, mut intents: mpsc::UnboundedReceiver<Intent>) {
        loop {
            tokio::select! {
                intent = intents.recv() => {
                    let Some(intent) = intent else { break };
                    self.processed += 1;
                    self.handle(intent);
                }
                changed = self.debounced.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let text = self.debounced.borrow_and_update().clone();
                    if let Some(plan) = self.controller.apply_debounced_search(&text) {
                        self.launch(plan);
                    }
                }
                Some(done) = self.done_rx.recv() => {
                    self.controller.complete(done.generation, done.result);
                }
            }
            self.publish();
        }

        debug!(processed = self.processed, "catalog session stopped");
    }

    fn handle(&mut self, intent: Intent) {
        debug!(?intent, "catalog intent");
        let plan = match intent {
            Intent::Search(text) => {
                self.controller.set_search_text(text.clone());
                self.debouncer.update(text);
                None
            }
            Intent::Category(slug) => self.controller.set_category(slug.as_deref()),
            Intent::Sort(sort) => self.controller.set_sort(sort),
            Intent::Page(page_index) => self.controller.set_page(page_index),
            Intent::NextPage => self.controller.next_page(),
            Intent::PrevPage => self.controller.prev_page(),
            Intent::Refresh => Some(self.controller.refresh()),
        };
        if let Some(plan) = plan {
            self.launch(plan);
        }
    }

    fn launch(&self, plan: FetchPlan) {
        let api = Arc::clone(&self.api);
        let done = self.done_tx.clone();

        tokio::spawn(async move {
            let FetchPlan { generation, query } = plan;
            let outcome = AssertUnwindSafe(api.fetch(&query)).catch_unwind().await;
            let result = match outcome {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(e)) => {
                    let e: Box<dyn StdError + Send + Sync> = Box::new(e);
                    Err(failure_message(&e, LOAD_FAILURE_MESSAGE))
                }
                Err(panic) => Err(failure_message(&*panic, LOAD_FAILURE_MESSAGE)),
            };
            // The session may have stopped; nothing to deliver to then.
            let _ = done.send(FetchDone { generation, result });
        });
    }

    fn publish(&self) {
        self.views.send_replace(SessionView {
            processed: self.processed,
            view: self.controller.view(),
        });
    }
}

async fn load_categories<A: CatalogApi>(api: Arc<A>, out: watch::Sender<Vec<Category>>) {
    let categories = match api.list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            warn!(error = %e, "failed to load categories");
            Vec::new()
        }
    };
    out.send_replace(categories);
}

/// Client side of a running [`CatalogSession`].
pub struct SessionHandle {
    intents: mpsc::UnboundedSender<Intent>,
    views: watch::Receiver<SessionView>,
    categories: watch::Receiver<Vec<Category>>,
    sent: u64,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Queue an intent.
    pub fn send(&mut self, intent: Intent) -> Result<(), SessionError> {
        self.intents
            .send(intent)
            .map_err(|_| SessionError::Closed)?;
        self.sent += 1;
        Ok(())
    }

    /// Wait until every sent intent is processed, no fetch is in flight and
    /// no search text is waiting on the debounce window.
    pub async fn settle(&mut self) -> Result<CatalogView, SessionError> {
        let sent = self.sent;
        let settled = self
            .views
            .wait_for(|s| s.processed >= sent && !s.view.loading && !s.view.search_pending)
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(settled.view.clone())
    }

    /// Send an intent and wait for the page to settle.
    pub async fn apply(&mut self, intent: Intent) -> Result<CatalogView, SessionError> {
        self.send(intent)?;
        self.settle().await
    }

    /// Latest published view.
    pub fn view(&self) -> CatalogView {
        self.views.borrow().view.clone()
    }

    /// Categories loaded so far (empty until the list arrives or on failure).
    pub fn categories(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }

    /// Wait for the category list to arrive.
    pub async fn categories_loaded(&mut self) -> Vec<Category> {
        // An error means the loader finished; the last value stands either way.
        let _ = self.categories.changed().await;
        self.categories.borrow_and_update().clone()
    }

    /// Stop the session and wait for its task to finish.
    pub async fn shutdown(self) {
        let SessionHandle { intents, task, .. } = self;
        drop(intents);
        if let Err(e) = task.await {
            warn!(error = %e, "catalog session task failed");
        }
    }
}
