//! Shared test doubles: an in-memory store and a scriptable repository.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use serde_json::Value;
use skystore_app::{CategoryRepository, RepoError, RepoResult};
use skystore_client::{
    AddCallback, CollectionRef, DocumentCallback, DocumentListener, DocumentRef, DocumentSnapshot,
    DocumentStore, ListenerRegistration, QueryCallback, QueryListener, QueryRef, QuerySnapshot,
    StoreError, WriteCallback,
};
use skystore_model::Category;
use skystore_rx::RxError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Enables log output for a test run when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub fn category(key: &str, id: i64, name: &str) -> Category {
    Category {
        key: key.into(),
        id,
        name: name.into(),
        created_at: 0,
        updated_at: 0,
    }
}

pub fn stub_error() -> RepoError {
    RepoError::Rx(RxError::Store(StoreError::Backend("stubbed failure".into())))
}

// ── FakeStore ─────────────────────────────────────────────────────

/// Minimal in-memory `DocumentStore`; callbacks run synchronously.
#[derive(Clone)]
pub struct FakeStore {
    inner: Arc<Inner>,
}

struct Inner {
    documents: Mutex<BTreeMap<String, DocumentSnapshot>>,
    fail_with: Mutex<Option<StoreError>>,
    query_listeners: Mutex<Vec<(u64, String, QueryListener)>>,
    next_listener_id: AtomicU64,
    next_auto_id: AtomicU64,
    removed: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                documents: Mutex::new(BTreeMap::new()),
                fail_with: Mutex::new(None),
                query_listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(1),
                next_auto_id: AtomicU64::new(1),
                removed: AtomicUsize::new(0),
            }),
        }
    }

    pub fn insert(&self, doc: &DocumentRef, fields: Value) {
        self.inner
            .documents
            .lock()
            .unwrap()
            .insert(doc.path(), DocumentSnapshot::new(doc.id.clone(), fields));
    }

    pub fn fail_with(&self, error: StoreError) {
        *self.inner.fail_with.lock().unwrap() = Some(error);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.query_listeners.lock().unwrap().len()
    }

    pub fn removed_count(&self) -> usize {
        self.inner.removed.load(Ordering::SeqCst)
    }

    pub fn push_query_update(&self, collection: &CollectionRef) {
        let snapshot = self.collection_snapshot(&collection.path);
        let listeners: Vec<QueryListener> = self
            .inner
            .query_listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, path, _)| *path == collection.path)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(Some(snapshot.clone()), None);
        }
    }

    fn collection_snapshot(&self, path: &str) -> QuerySnapshot {
        let prefix = format!("{path}/");
        let documents = self
            .inner
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|(doc_path, _)| doc_path.starts_with(&prefix))
            .map(|(_, snapshot)| snapshot.clone())
            .collect();
        QuerySnapshot::new(documents)
    }

    fn scripted_failure(&self) -> Option<StoreError> {
        self.inner.fail_with.lock().unwrap().clone()
    }
}

impl DocumentStore for FakeStore {
    fn get_document(&self, doc: &DocumentRef, completion: DocumentCallback) {
        if let Some(error) = self.scripted_failure() {
            completion(None, Some(error));
            return;
        }
        match self.inner.documents.lock().unwrap().get(&doc.path()).cloned() {
            Some(snapshot) => completion(Some(snapshot), None),
            None => completion(
                None,
                Some(StoreError::Backend(format!("no document at {}", doc.path()))),
            ),
        }
    }

    fn set_document(
        &self,
        doc: &DocumentRef,
        fields: Value,
        _merge: bool,
        completion: WriteCallback,
    ) {
        if let Some(error) = self.scripted_failure() {
            completion(Some(error));
            return;
        }
        self.insert(doc, fields);
        completion(None);
    }

    fn add_document(&self, collection: &CollectionRef, fields: Value, completion: AddCallback) {
        if let Some(error) = self.scripted_failure() {
            completion(None, Some(error));
            return;
        }
        let id = format!("auto{}", self.inner.next_auto_id.fetch_add(1, Ordering::SeqCst));
        let doc = collection.doc(id);
        self.insert(&doc, fields);
        completion(Some(doc), None);
    }

    fn get_documents(&self, query: &QueryRef, completion: QueryCallback) {
        if let Some(error) = self.scripted_failure() {
            completion(None, Some(error));
            return;
        }
        completion(Some(self.collection_snapshot(&query.collection.path)), None);
    }

    fn listen_document(
        &self,
        _doc: &DocumentRef,
        _listener: DocumentListener,
    ) -> ListenerRegistration {
        ListenerRegistration::new(|| {})
    }

    fn listen_query(&self, query: &QueryRef, listener: QueryListener) -> ListenerRegistration {
        listener(Some(self.collection_snapshot(&query.collection.path)), None);
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::SeqCst);
        self.inner
            .query_listeners
            .lock()
            .unwrap()
            .push((id, query.collection.path.clone(), listener));
        let inner = Arc::clone(&self.inner);
        ListenerRegistration::new(move || {
            inner
                .query_listeners
                .lock()
                .unwrap()
                .retain(|(lid, _, _)| *lid != id);
            inner.removed.fetch_add(1, Ordering::SeqCst);
        })
    }
}

// ── MockCategoryRepository ────────────────────────────────────────

/// Scriptable repository for view-model tests.
#[derive(Default)]
pub struct MockCategoryRepository {
    /// Returned by `fetch_category` on success.
    pub stubbed_category: Mutex<Option<Category>>,
    /// When true, `fetch_category` fails.
    pub should_fail: AtomicBool,
    /// When true, `fetch_category` never resolves.
    pub hang: AtomicBool,
    /// Items the `categories` stream yields, in order.
    pub stubbed_lists: Mutex<Vec<RepoResult<Vec<Category>>>>,
    pub fetch_calls: AtomicUsize,
    pub last_fetched_id: Mutex<Option<String>>,
}

impl MockCategoryRepository {
    pub fn with_category(category: Category) -> Self {
        let mock = Self::default();
        *mock.stubbed_category.lock().unwrap() = Some(category);
        mock
    }

    pub fn with_list(list: RepoResult<Vec<Category>>) -> Self {
        let mock = Self::default();
        mock.stubbed_lists.lock().unwrap().push(list);
        mock
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepository {
    async fn fetch_category(&self, id: &str) -> RepoResult<Category> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_fetched_id.lock().unwrap() = Some(id.to_string());

        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(stub_error());
        }
        match self.stubbed_category.lock().unwrap().clone() {
            Some(category) => Ok(category),
            None => Err(stub_error()),
        }
    }

    fn categories(&self) -> BoxStream<'static, RepoResult<Vec<Category>>> {
        let items: Vec<_> = self.stubbed_lists.lock().unwrap().drain(..).collect();
        stream::iter(items).boxed()
    }

    fn observe_categories(&self) -> BoxStream<'static, RepoResult<Vec<Category>>> {
        self.categories()
    }

    async fn add_category(&self, _category: &Category) -> RepoResult<DocumentRef> {
        Ok(DocumentRef::new("categories", "auto1"))
    }

    async fn save_category(&self, _category: &Category, _merge: bool) -> RepoResult<()> {
        Ok(())
    }
}
