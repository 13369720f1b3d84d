//! View-model: repository results projected into UI-observable channels.

use crate::error::RepoError;
use crate::repository::CategoryRepository;
use futures::stream::BoxStream;
use futures::StreamExt;
use skystore_model::Category;
use skystore_rx::{materialize, split};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::warn;

/// Presentation-facing configuration.
#[derive(Debug, Clone)]
pub struct ViewModelConfig {
    /// Prefix for the formatted name message.
    pub name_prefix: String,
    /// Fixed, non-technical message published on any load failure. Error
    /// detail stays in the logs.
    pub failure_message: String,
    /// Capacity of each broadcast output channel.
    pub channel_capacity: usize,
}

impl Default for ViewModelConfig {
    fn default() -> Self {
        Self {
            name_prefix: "Category: ".to_string(),
            failure_message: "Failed to load".to_string(),
            channel_capacity: 16,
        }
    }
}

/// Publishes processed repository state into three broadcast channels:
/// formatted name messages, failure messages, and decoded category lists.
///
/// Observers attach via the `*_messages`/[`categories`](Self::categories)
/// accessors; values are append-only, observers never mutate them. All
/// subscription work runs in tasks owned by the view-model, so dropping it
/// (or calling [`cancel_all`](Self::cancel_all)) tears down every in-flight
/// operation and live listener.
pub struct CategoryViewModel {
    repository: Arc<dyn CategoryRepository>,
    config: ViewModelConfig,
    name_tx: broadcast::Sender<String>,
    error_tx: broadcast::Sender<String>,
    categories_tx: broadcast::Sender<Vec<Category>>,
    tasks: Mutex<JoinSet<()>>,
}

impl CategoryViewModel {
    #[must_use]
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self::with_config(repository, ViewModelConfig::default())
    }

    #[must_use]
    pub fn with_config(repository: Arc<dyn CategoryRepository>, config: ViewModelConfig) -> Self {
        let (name_tx, _) = broadcast::channel(config.channel_capacity);
        let (error_tx, _) = broadcast::channel(config.channel_capacity);
        let (categories_tx, _) = broadcast::channel(config.channel_capacity);
        Self {
            repository,
            config,
            name_tx,
            error_tx,
            categories_tx,
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Formatted name messages, one per successful [`load`](Self::load).
    #[must_use]
    pub fn name_messages(&self) -> broadcast::Receiver<String> {
        self.name_tx.subscribe()
    }

    /// Fixed failure messages, one per failed operation.
    #[must_use]
    pub fn error_messages(&self) -> broadcast::Receiver<String> {
        self.error_tx.subscribe()
    }

    /// Decoded category lists, one per completed list load or live update.
    #[must_use]
    pub fn categories(&self) -> broadcast::Receiver<Vec<Category>> {
        self.categories_tx.subscribe()
    }

    /// Loads one category. Publishes exactly one message: the formatted name
    /// on success, the fixed failure message on failure — never both.
    pub fn load(&self, id: &str) {
        let repository = Arc::clone(&self.repository);
        let id = id.to_string();
        let name_tx = self.name_tx.clone();
        let error_tx = self.error_tx.clone();
        let prefix = self.config.name_prefix.clone();
        let failure = self.config.failure_message.clone();
        self.spawn(async move {
            match repository.fetch_category(&id).await {
                Ok(category) => {
                    let _ = name_tx.send(format!("{prefix}{}", category.name));
                }
                Err(error) => {
                    warn!(%id, %error, "category load failed");
                    let _ = error_tx.send(failure);
                }
            }
        });
    }

    /// Loads the category list once. An empty store still yields one
    /// emission (the empty list); a failure yields one failure message.
    pub fn load_list(&self) {
        self.pipe_list(self.repository.categories());
    }

    /// Subscribes to live category-list updates until cancelled. Each store
    /// change yields one list emission; the first failure yields one failure
    /// message and ends the subscription.
    pub fn watch_list(&self) {
        self.pipe_list(self.repository.observe_categories());
    }

    /// Aborts every task this view-model has spawned, releasing any live
    /// listeners they hold. Dropping the view-model does the same.
    pub fn cancel_all(&self) {
        self.tasks.lock().unwrap().abort_all();
    }

    /// Runs a list stream through the envelope split and forwards each
    /// branch to its output channel.
    fn pipe_list(&self, stream: BoxStream<'static, Result<Vec<Category>, RepoError>>) {
        let (mut lists, mut failures) = split(materialize(stream));

        let categories_tx = self.categories_tx.clone();
        self.spawn(async move {
            while let Some(list) = lists.next().await {
                let _ = categories_tx.send(list);
            }
        });

        let error_tx = self.error_tx.clone();
        let failure = self.config.failure_message.clone();
        self.spawn(async move {
            while let Some(error) = failures.next().await {
                warn!(%error, "category list load failed");
                let _ = error_tx.send(failure.clone());
            }
        });
    }

    fn spawn(&self, fut: impl Future<Output = ()> + Send + 'static) {
        self.tasks.lock().unwrap().spawn(fut);
    }
}
