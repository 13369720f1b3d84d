//! Domain-level category access over the stream layer.

use crate::error::{RepoError, RepoResult};
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use skystore_client::{CollectionRef, DocumentRef, DocumentStore, QuerySnapshot};
use skystore_model::Category;
use skystore_rx::{add_once, fetch_once, query_once, subscribe_query, write_once};
use std::sync::Arc;
use tracing::warn;

/// Read/write access to categories, independent of the store's native types.
///
/// Object-safe so view-models can hold `Arc<dyn CategoryRepository>` and
/// tests can substitute mocks.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetches one category by document id. A record that exists but does
    /// not decode is this operation's failure — no partial entity.
    async fn fetch_category(&self, id: &str) -> RepoResult<Category>;

    /// All categories as a stream that emits exactly one list, then ends.
    ///
    /// Undecodable records are dropped from the list rather than failing it;
    /// the result is sorted ascending by `id` (store order is not trusted).
    fn categories(&self) -> BoxStream<'static, RepoResult<Vec<Category>>>;

    /// Live variant of [`categories`](Self::categories): emits the current
    /// list and then again on every change, until the stream is dropped.
    fn observe_categories(&self) -> BoxStream<'static, RepoResult<Vec<Category>>>;

    /// Adds a category with a store-assigned document id.
    async fn add_category(&self, category: &Category) -> RepoResult<DocumentRef>;

    /// Writes a category to its own document. With `merge`, fields absent
    /// from the payload are left untouched.
    async fn save_category(&self, category: &Category, merge: bool) -> RepoResult<()>;
}

/// Store-backed repository. The store handle is injected at construction;
/// there is no process-wide client.
pub struct StoreCategoryRepository<S: DocumentStore> {
    store: Arc<S>,
    collection: CollectionRef,
}

impl<S: DocumentStore> StoreCategoryRepository<S> {
    /// Repository over the default `categories` collection.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_collection(store, "categories")
    }

    /// Repository over a caller-chosen collection path.
    #[must_use]
    pub fn with_collection(store: Arc<S>, path: impl Into<String>) -> Self {
        Self {
            store,
            collection: CollectionRef::new(path),
        }
    }
}

#[async_trait]
impl<S: DocumentStore> CategoryRepository for StoreCategoryRepository<S> {
    async fn fetch_category(&self, id: &str) -> RepoResult<Category> {
        let doc = self.collection.doc(id);
        let snapshot = fetch_once(self.store.as_ref(), &doc).await?;
        Ok(Category::from_snapshot(&snapshot)?)
    }

    fn categories(&self) -> BoxStream<'static, RepoResult<Vec<Category>>> {
        let query = self.collection.query();
        query_once(self.store.as_ref(), &query)
            .map(|item| item.map(decode_documents).map_err(RepoError::from))
            .boxed()
    }

    fn observe_categories(&self) -> BoxStream<'static, RepoResult<Vec<Category>>> {
        let query = self.collection.query();
        subscribe_query(self.store.as_ref(), &query)
            .map(|item| item.map(decode_documents).map_err(RepoError::from))
            .boxed()
    }

    async fn add_category(&self, category: &Category) -> RepoResult<DocumentRef> {
        Ok(add_once(self.store.as_ref(), &self.collection, category.to_fields()).await?)
    }

    async fn save_category(&self, category: &Category, merge: bool) -> RepoResult<()> {
        let doc = self.collection.doc(category.key.clone());
        Ok(write_once(self.store.as_ref(), &doc, category.to_fields(), merge).await?)
    }
}

/// Decodes every record in the snapshot, dropping the ones that fail, and
/// returns the survivors sorted ascending by `id`.
fn decode_documents(snapshot: QuerySnapshot) -> Vec<Category> {
    let mut categories: Vec<Category> = snapshot
        .documents
        .iter()
        .filter_map(|doc| match Category::from_snapshot(doc) {
            Ok(category) => Some(category),
            Err(error) => {
                warn!(doc = %doc.id, %error, "dropping undecodable record");
                None
            }
        })
        .collect();
    categories.sort_by_key(|category| category.id);
    categories
}
