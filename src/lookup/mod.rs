//! Cache-aside lookup of words.
//!
//! [`LookupService::lookup`] is the single entry point used by the HTTP
//! server and the CLI:
//!
//! 1. a cached artifact is returned as stored, with no validity check and no
//!    fetch;
//! 2. a word outside the vocabulary is answered with `None`, with no fetch;
//! 3. otherwise the word is resolved; an empty result is `None` and is not
//!    cached;
//! 4. a non-empty result is persisted, then returned.
//!
//! Resolution and persistence run on spawned tasks. The lookup waits for
//! them, but a cancelled caller cancels neither the fetch nor the write. A
//! failed write is logged and the definitions are still returned.
//!
//! With single-flight enabled, concurrent misses of the same word share one
//! resolver run (and one write) through a map of in-flight futures.

use anyhow::Result;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::Arc;
use tracing::{debug, error};

use crate::cache::CacheStore;
use crate::core::KamoesError;
use crate::models::Definition;
use crate::resolver::Resolver;
use crate::vocabulary::Vocabulary;

type SharedResolution = Shared<BoxFuture<'static, Result<Vec<Definition>, KamoesError>>>;

/// Coordinates the cache, the vocabulary and the resolver.
#[derive(Clone)]
pub struct LookupService {
    cache: CacheStore,
    vocabulary: Arc<Vocabulary>,
    resolver: Resolver,
    single_flight: bool,
    in_flight: Arc<DashMap<String, SharedResolution>>,
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService")
            .field("cache", &self.cache)
            .field("vocabulary", &self.vocabulary.len())
            .field("single_flight", &self.single_flight)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl LookupService {
    /// Create a lookup service.
    pub fn new(
        cache: CacheStore,
        vocabulary: Arc<Vocabulary>,
        resolver: Resolver,
        single_flight: bool,
    ) -> Self {
        Self {
            cache,
            vocabulary,
            resolver,
            single_flight,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// The artifact cache.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// The word validity gate.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Look up `word`.
    ///
    /// Returns `None` for words outside the vocabulary and for words without
    /// entries upstream.
    ///
    /// # Errors
    ///
    /// Returns upstream failures and unreadable artifacts. Cache write
    /// failures are logged, never returned.
    pub async fn lookup(&self, word: &str) -> Result<Option<Vec<Definition>>> {
        if let Some(definitions) = self.cache.get_definitions(word).await? {
            debug!("Cache hit for '{word}'");
            return Ok(Some(definitions));
        }

        if !self.vocabulary.contains(word) {
            debug!("'{word}' is not in the vocabulary");
            return Ok(None);
        }

        let definitions = if self.single_flight {
            self.resolve_shared(word).await?
        } else {
            let task = tokio::spawn(resolve_and_persist(
                self.resolver.clone(),
                self.cache.clone(),
                word.to_string(),
            ));
            task.await.unwrap_or_else(|e| Err(task_failed(&e).into()))?
        };

        Ok((!definitions.is_empty()).then_some(definitions))
    }

    async fn resolve_shared(&self, word: &str) -> Result<Vec<Definition>, KamoesError> {
        let shared = match self.in_flight.entry(word.to_string()) {
            Entry::Occupied(entry) => {
                debug!("Joining in-flight resolution of '{word}'");
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let resolver = self.resolver.clone();
                let cache = self.cache.clone();
                let in_flight = Arc::clone(&self.in_flight);
                let key = word.to_string();

                // Spawned so the resolution finishes even if every waiter goes away
                let task = tokio::spawn(async move {
                    let result = resolve_and_persist(resolver, cache, key.clone())
                        .await
                        .map_err(|e| shareable(&e));
                    in_flight.remove(&key);
                    result
                });

                let shared = task
                    .map(|joined| joined.unwrap_or_else(|e| Err(task_failed(&e))))
                    .boxed()
                    .shared();
                entry.insert(shared.clone());
                shared
            }
        };

        shared.await
    }
}

/// Resolve `word` and persist a non-empty result before returning it.
async fn resolve_and_persist(
    resolver: Resolver,
    cache: CacheStore,
    word: String,
) -> Result<Vec<Definition>> {
    let definitions = resolver.resolve(&word).await?;
    if definitions.is_empty() {
        debug!("No entries for '{word}'");
        return Ok(definitions);
    }

    let persist = {
        let definitions = definitions.clone();
        let word = word.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.put(&word, &definitions).await {
                error!("{e:#}");
            }
        })
    };
    if let Err(e) = persist.await {
        error!("Cache write task for '{word}' failed: {e}");
    }

    Ok(definitions)
}

fn task_failed(error: &tokio::task::JoinError) -> KamoesError {
    KamoesError::Other {
        message: format!("Lookup task failed: {error}"),
    }
}

/// Cloneable form of a resolution error, for sharing between waiters.
fn shareable(error: &anyhow::Error) -> KamoesError {
    error.downcast_ref::<KamoesError>().cloned().unwrap_or_else(|| KamoesError::Other {
        message: format!("{error:#}"),
    })
}
