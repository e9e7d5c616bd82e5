//! Data-Access Layer
//!
//! Single point of contact between the UI and the transit API. Connectivity
//! failures degrade to the local cache; request failures are reported and
//! propagated. Every failure produces exactly one notice.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{ApiError, ApiResult, ConnectivityCause};
use super::path::{ResourcePath, Shape};
use super::transport::{ApiRequest, Transport};
use crate::cache::{Collection, LocalCache};
use crate::notify::{BusyGuard, Notice, Notifier};

pub const OFFLINE_READ_NOTICE: &str = "Offline: showing locally saved data.";
pub const OFFLINE_WRITE_NOTICE: &str = "Offline: saved locally. It has not reached the server yet.";

const LOCAL_ID_PREFIX: &str = "local-";

/// True for identifiers synthesized while offline
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

/// Session-local identifiers for records created while offline.
///
/// Derived from the wall clock in milliseconds and bumped when the clock has
/// not advanced, so ids strictly increase within one session. Not unique
/// across sessions or devices.
#[derive(Debug, Default)]
pub struct LocalIdGenerator {
    last: AtomicI64,
}

impl LocalIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_millis(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last + 1);
            match self.last.compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }

    pub fn next_id(&self) -> String {
        format!("{}{}", LOCAL_ID_PREFIX, self.next_millis())
    }
}

pub struct DataAccess {
    transport: Arc<dyn Transport>,
    cache: LocalCache,
    notifier: Arc<dyn Notifier>,
    ids: LocalIdGenerator,
    offline_fallback: bool,
}

impl DataAccess {
    pub fn new(transport: Arc<dyn Transport>, cache: LocalCache, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            cache,
            notifier,
            ids: LocalIdGenerator::new(),
            offline_fallback: true,
        }
    }

    /// With the fallback off, connectivity failures are reported like any
    /// other failure and the cache is never used
    pub fn with_offline_fallback(mut self, enabled: bool) -> Self {
        self.offline_fallback = enabled;
        self
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    pub fn offline_fallback(&self) -> bool {
        self.offline_fallback
    }

    // ========================
    // Reads
    // ========================

    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let value = self.fetch_value(path).await?;
        self.decode(path, value)
    }

    pub async fn fetch_value(&self, path: &str) -> ApiResult<Value> {
        self.fetch_value_or_derive(path, |_| None).await
    }

    /// Like [`fetch`](Self::fetch), but when the cache has nothing for `path`
    /// the caller may derive an answer from other cached records.
    pub async fn fetch_or_derive<T, F>(&self, path: &str, derive: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(&LocalCache) -> Option<Value>,
    {
        let value = self.fetch_value_or_derive(path, derive).await?;
        self.decode(path, value)
    }

    async fn fetch_value_or_derive<F>(&self, path: &str, derive: F) -> ApiResult<Value>
    where
        F: FnOnce(&LocalCache) -> Option<Value>,
    {
        let err = match self.send(ApiRequest::get(path)).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if err.is_connectivity() && self.offline_fallback {
            let resource = ResourcePath::parse(path);
            if let Some(value) = self.cached_read(&resource).or_else(|| derive(&self.cache)) {
                tracing::warn!(path, error = %err, "serving cached data");
                self.notifier.notify(Notice::warning(OFFLINE_READ_NOTICE));
                return Ok(value);
            }
            tracing::debug!(path, "no cached data to fall back on");
        }

        self.report(path, &err);
        Err(err)
    }

    /// Cached answer for a read of `resource`, if any
    fn cached_read(&self, resource: &ResourcePath) -> Option<Value> {
        let collection = resource.collection?;
        match (&resource.shape, collection) {
            (Shape::List, Collection::Reports) => self.cache.load_from(collection).pop(),
            (Shape::List, _) => {
                let records = self.cache.load_from(collection);
                (!records.is_empty()).then(|| Value::Array(records))
            }
            (Shape::Item(id), _) => {
                let field = collection.id_field()?;
                self.cache
                    .load_from(collection)
                    .into_iter()
                    .rev()
                    .find(|record| id_matches(record.get(field), id))
            }
            (Shape::Nested, _) => None,
        }
    }

    // ========================
    // Writes
    // ========================

    pub async fn submit<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(payload).map_err(|e| {
            let err = ApiError::Decode(e.to_string());
            self.report(path, &err);
            err
        })?;
        let value = self.submit_value(path, body).await?;
        self.decode(path, value)
    }

    pub async fn submit_value(&self, path: &str, payload: Value) -> ApiResult<Value> {
        match self.send(ApiRequest::post(path, payload.clone())).await {
            Ok(value) => {
                // Sync replaces the collection wholesale; queued offline
                // records for it are dropped here.
                if let Err(e) = self.cache.clear(path) {
                    tracing::warn!(path, error = %e, "failed to clear cache after sync");
                }
                Ok(value)
            }
            Err(err) if err.is_connectivity() && self.offline_fallback => self.queue_offline(path, payload, err),
            Err(err) => {
                self.report(path, &err);
                Err(err)
            }
        }
    }

    fn queue_offline(&self, path: &str, payload: Value, err: ApiError) -> ApiResult<Value> {
        let id_field = Collection::from_path(path).and_then(|c| c.created_id_field());
        let id = self.ids.next_id();

        let mut record = match payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("payload".to_string(), other);
                map
            }
        };
        if let Some(field) = id_field {
            record.insert(field.to_string(), Value::String(id.clone()));
        }

        if let Err(e) = self.cache.save(path, Value::Object(record)) {
            tracing::error!(path, error = %e, "could not queue offline record");
            self.notifier
                .notify(Notice::error(format!("{} Saving locally also failed.", err.user_message())));
            return Err(err);
        }

        tracing::warn!(path, id = %id, error = %err, "queued offline record");
        self.notifier.notify(Notice::warning(OFFLINE_WRITE_NOTICE));

        let mut result = Map::new();
        if let Some(field) = id_field {
            result.insert(field.to_string(), Value::String(id));
        }
        Ok(Value::Object(result))
    }

    // ========================
    // Helpers
    // ========================

    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let _busy = BusyGuard::new(self.notifier.as_ref());
        self.transport.send(request).await
    }

    fn decode<T: DeserializeOwned>(&self, path: &str, value: Value) -> ApiResult<T> {
        serde_json::from_value(value).map_err(|e| {
            let err = ApiError::Decode(e.to_string());
            self.report(path, &err);
            err
        })
    }

    fn report(&self, path: &str, err: &ApiError) {
        match err {
            ApiError::Connectivity(ConnectivityCause::Timeout) => tracing::warn!(path, "request timed out"),
            _ => tracing::error!(path, error = %err, "request failed"),
        }
        self.notifier.notify(Notice::error(err.user_message()));
    }
}

fn id_matches(value: Option<&Value>, id: &str) -> bool {
    match value {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}
