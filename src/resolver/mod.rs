//! Word resolution: fetch, extract, and follow cross-references.
//!
//! The resolver turns a word into zero or more [`Definition`]s, one per
//! heading block on the entry page. Blocks are resolved concurrently and the
//! results keep document order.
//!
//! A cross-reference block (a non-canonical spelling such as `jaman`) is
//! resolved by recursing on its target (`zaman`) and copying the first
//! resolved definition's senses. Upstream cross-references are not
//! guaranteed to be acyclic, so each recursion carries the chain of words
//! already in progress:
//!
//! - a target already in the chain is a cycle;
//! - a chain longer than the depth bound is cut.
//!
//! Both cases substitute empty senses instead of failing, so the output shape
//! is the same on every path. Fetch errors anywhere in the recursion
//! propagate to the caller.

use anyhow::Result;
use futures::future::try_join_all;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::extractor::{EntryBlock, extract_document};
use crate::fetcher::DocumentFetcher;
use crate::models::{Definition, SenseEntry};

/// Resolves words to definitions through a [`DocumentFetcher`].
#[derive(Clone)]
pub struct Resolver {
    fetcher: Arc<dyn DocumentFetcher>,
    max_depth: usize,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").field("max_depth", &self.max_depth).finish_non_exhaustive()
    }
}

impl Resolver {
    /// Create a resolver following at most `max_depth` nested cross-references.
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, max_depth: usize) -> Self {
        Self {
            fetcher,
            max_depth,
        }
    }

    /// Resolve `word` to its definitions, in document order.
    ///
    /// A page without entries yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error for `word` or for any cross-reference
    /// target.
    pub async fn resolve(&self, word: &str) -> Result<Vec<Definition>> {
        self.resolve_chain(word, Vec::new()).await
    }

    fn resolve_chain<'a>(
        &'a self,
        word: &'a str,
        mut chain: Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Definition>>> + Send + 'a>> {
        Box::pin(async move {
            debug!("Resolving '{word}' (chain: {chain:?})");
            let html = self.fetcher.fetch(word).await?;

            // The parsed document is not Send; only owned blocks cross the await below
            let blocks = extract_document(&html);

            chain.push(word.to_string());
            try_join_all(blocks.into_iter().map(|block| self.resolve_block(block, &chain))).await
        })
    }

    async fn resolve_block(&self, block: EntryBlock, chain: &[String]) -> Result<Definition> {
        let (head, target, display) = match block {
            EntryBlock::Entry(definition) => return Ok(definition),
            EntryBlock::CrossReference {
                head,
                target,
                display,
            } => (head, target, display),
        };

        let senses = self.follow(&target, chain).await?;
        Ok(EntryBlock::redirected(head, display, senses))
    }

    /// Senses of the first definition of `target`, or empty when the
    /// reference cannot or should not be followed.
    async fn follow(&self, target: &str, chain: &[String]) -> Result<Vec<SenseEntry>> {
        if target.is_empty() {
            warn!("Cross-reference from '{}' has no target", chain.join(" → "));
            return Ok(Vec::new());
        }
        if chain.iter().any(|w| w == target) {
            warn!("Cross-reference cycle: {} → {target}", chain.join(" → "));
            return Ok(Vec::new());
        }
        if chain.len() > self.max_depth {
            warn!(
                "Cross-reference chain exceeds depth {}: {} → {target}",
                self.max_depth,
                chain.join(" → ")
            );
            return Ok(Vec::new());
        }

        let resolved = self.resolve_chain(target, chain.to_vec()).await?;
        Ok(resolved.into_iter().next().map(|d| d.senses).unwrap_or_default())
    }
}
