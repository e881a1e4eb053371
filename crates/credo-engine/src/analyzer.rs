//! The claim analysis pipeline.
//!
//! ```text
//! text ─► extract ─► [claim 1] ─► retrieve ─► verify ─┐
//!                    [claim 2] ─► retrieve ─► verify ─┼─► aggregate ─► TrustReport
//!                    [claim n] ─► retrieve ─► verify ─┘
//! ```
//!
//! Each claim runs in its own task on a `JoinSet`; a semaphore bounds how many
//! run at once. The only suspension points are knowledge-source calls. Tasks
//! are owned by the `JoinSet`, so dropping an in-flight `analyze` future aborts
//! every claim and discards partial results.

use std::future::Future;
use std::sync::Arc;

use credo_config::CredoConfig;
use credo_core::{Claim, ClaimSkeleton, TrustReport};
use credo_extract::{ClaimExtractor, context_before};
use credo_sources::{EvidenceQuery, Retriever};
use credo_verify::{ClaimVerifier, degraded};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::{AnalyzeError, aggregate::aggregate, sources::build_sources};

const DEFAULT_MAX_CONCURRENT_CLAIMS: usize = 8;
const DEFAULT_CONTEXT_SENTENCES: usize = 1;
const DEFAULT_CANDIDATES_PER_SOURCE: usize = 5;

/// Runs extraction, retrieval, verification and aggregation for a document.
///
/// Cheap to clone; clones share sources and scorer.
#[derive(Debug, Clone)]
pub struct Analyzer {
    extractor: ClaimExtractor,
    retriever: Arc<Retriever>,
    verifier: Arc<ClaimVerifier>,
    max_concurrent_claims: usize,
    context_sentences: usize,
    candidates_per_source: usize,
}

impl Analyzer {
    #[must_use]
    pub fn new(extractor: ClaimExtractor, retriever: Retriever, verifier: ClaimVerifier) -> Self {
        Self {
            extractor,
            retriever: Arc::new(retriever),
            verifier: Arc::new(verifier),
            max_concurrent_claims: DEFAULT_MAX_CONCURRENT_CLAIMS,
            context_sentences: DEFAULT_CONTEXT_SENTENCES,
            candidates_per_source: DEFAULT_CANDIDATES_PER_SOURCE,
        }
    }

    /// Build an analyzer with the lexical scorer and every source the
    /// configuration enables.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::Config`] for invalid settings and
    /// [`AnalyzeError::Source`] when a source cannot be set up.
    pub fn from_config(config: &CredoConfig) -> Result<Self, AnalyzeError> {
        config.validate()?;
        let retriever = Retriever::new(
            build_sources(config)?,
            config.retrieval.timeout(),
            config.retrieval.similarity_threshold,
        );
        let verifier = ClaimVerifier::lexical(config.analysis.unverifiable_confidence);
        Ok(
            Self::new(
                ClaimExtractor::new(config.analysis.max_input_chars),
                retriever,
                verifier,
            )
            .with_max_concurrent_claims(config.analysis.max_concurrent_claims)
            .with_context_sentences(config.retrieval.context_sentences)
            .with_candidates_per_source(config.retrieval.max_candidates_per_source),
        )
    }

    /// At least one claim always runs.
    #[must_use]
    pub fn with_max_concurrent_claims(mut self, limit: usize) -> Self {
        self.max_concurrent_claims = limit.max(1);
        self
    }

    /// Sentences before a claim used to resolve pronouns.
    #[must_use]
    pub const fn with_context_sentences(mut self, count: usize) -> Self {
        self.context_sentences = count;
        self
    }

    #[must_use]
    pub fn with_candidates_per_source(mut self, limit: usize) -> Self {
        self.candidates_per_source = limit.max(1);
        self
    }

    /// Names of the knowledge sources in use.
    #[must_use]
    pub fn source_names(&self) -> Vec<&str> {
        self.retriever.source_names()
    }

    /// Analyze `text` and return its trust report.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::EmptyInput`] or [`AnalyzeError::InputTooLarge`]
    /// before any claim work starts. Once claims are extracted the call always
    /// produces a complete report.
    pub async fn analyze(&self, text: &str) -> Result<TrustReport, AnalyzeError> {
        let skeletons = self.extractor.extract(text)?;
        tracing::debug!(claims = skeletons.len(), "starting claim pipelines");

        let claims = self.run_claims(text, &skeletons).await;
        let report = aggregate(claims);
        tracing::info!(
            claims = report.total_claims,
            trust_score = report.trust_score,
            risk = %report.risk_level,
            "analysis complete"
        );
        Ok(report)
    }

    /// Like [`Self::analyze`], but gives up as soon as `cancel` completes.
    ///
    /// In-flight source calls are aborted and no partial report is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::Cancelled`] when `cancel` wins, otherwise the
    /// errors of [`Self::analyze`].
    pub async fn analyze_until<F>(&self, text: &str, cancel: F) -> Result<TrustReport, AnalyzeError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                tracing::debug!("analysis cancelled");
                Err(AnalyzeError::Cancelled)
            }
            result = self.analyze(text) => result,
        }
    }

    /// Synchronous entry point for callers without an async runtime.
    ///
    /// Must not be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::Runtime`] if a runtime cannot be started,
    /// otherwise the errors of [`Self::analyze`].
    pub fn analyze_blocking(&self, text: &str) -> Result<TrustReport, AnalyzeError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(AnalyzeError::Runtime)?;
        runtime.block_on(self.analyze(text))
    }

    async fn run_claims(&self, text: &str, skeletons: &[ClaimSkeleton]) -> Vec<Claim> {
        if skeletons.is_empty() {
            return Vec::new();
        }

        let document: Arc<str> = Arc::from(text);
        let permits = Arc::new(Semaphore::new(self.max_concurrent_claims));
        let mut set = JoinSet::new();

        for (index, skeleton) in skeletons.iter().enumerate() {
            let skeleton = skeleton.clone();
            let document = Arc::clone(&document);
            let permits = Arc::clone(&permits);
            let retriever = Arc::clone(&self.retriever);
            let verifier = Arc::clone(&self.verifier);
            let context_sentences = self.context_sentences;
            let limit = self.candidates_per_source;

            set.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (index, skeleton.resolve(degraded("claim scheduler closed")));
                };
                let context = context_before(&document, skeleton.position, context_sentences);
                let query = EvidenceQuery::new(&*skeleton.id, &*skeleton.text, context, limit);
                let retrieval = retriever.retrieve(&query).await;
                if retrieval.all_failed(retriever.source_count()) {
                    tracing::warn!(claim_id = %skeleton.id, "every evidence source failed");
                }
                let verdict = verifier.verify(&skeleton, retrieval.best.as_ref());
                tracing::debug!(
                    claim_id = %skeleton.id,
                    status = %verdict.status(),
                    confidence = verdict.confidence(),
                    "claim verified"
                );
                (index, skeleton.resolve(verdict))
            });
        }

        let mut slots: Vec<Option<Claim>> = vec![None; skeletons.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, claim)) => slots[index] = Some(claim),
                Err(error) => tracing::warn!(%error, "claim task failed"),
            }
        }

        slots
            .into_iter()
            .zip(skeletons)
            .map(|(slot, skeleton)| {
                slot.unwrap_or_else(|| {
                    tracing::warn!(claim_id = %skeleton.id, "claim degraded after task failure");
                    skeleton.clone().resolve(degraded("claim task panicked"))
                })
            })
            .collect()
    }
}
