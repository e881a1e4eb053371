//! Parallel evidence retrieval across knowledge sources.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use credo_core::{EvidenceCandidate, EvidenceMatch, text::keyword_overlap};
use tokio::task::JoinSet;

use crate::{EvidenceQuery, KnowledgeSource, error::SourceError};

/// A source that contributed nothing to one query because it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub error: String,
}

/// Outcome of retrieving evidence for one claim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Retrieval {
    /// Selected candidate, if any cleared the similarity threshold.
    pub best: Option<EvidenceMatch>,
    /// Sources that errored or timed out, in source order.
    pub failures: Vec<SourceFailure>,
}

impl Retrieval {
    /// Whether every consulted source failed.
    #[must_use]
    pub fn all_failed(&self, sources: usize) -> bool {
        sources > 0 && self.failures.len() == sources
    }
}

/// Fans one query out to every configured source.
#[derive(Clone)]
pub struct Retriever {
    sources: Vec<Arc<dyn KnowledgeSource>>,
    timeout: Duration,
    similarity_threshold: f64,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("sources", &self.source_names())
            .field("timeout", &self.timeout)
            .field("similarity_threshold", &self.similarity_threshold)
            .finish()
    }
}

impl Retriever {
    #[must_use]
    pub fn new(
        sources: Vec<Arc<dyn KnowledgeSource>>,
        timeout: Duration,
        similarity_threshold: f64,
    ) -> Self {
        Self {
            sources,
            timeout,
            similarity_threshold,
        }
    }

    #[must_use]
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Query every source concurrently and select at most one candidate.
    ///
    /// Never fails: a source that errors, panics or exceeds the timeout is
    /// logged, recorded in [`Retrieval::failures`] and otherwise treated as
    /// having found nothing.
    pub async fn retrieve(&self, query: &EvidenceQuery) -> Retrieval {
        let mut set = JoinSet::new();
        for (index, source) in self.sources.iter().enumerate() {
            let source = Arc::clone(source);
            let query = query.clone();
            let timeout = self.timeout;
            set.spawn(async move {
                let outcome = match tokio::time::timeout(timeout, source.search(&query)).await {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::Timeout {
                        after_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    }),
                };
                (index, outcome)
            });
        }

        let mut reported = vec![false; self.sources.len()];
        let mut failed: Vec<(usize, String)> = Vec::new();
        let mut pooled: Vec<EvidenceCandidate> = Vec::new();

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, Ok(candidates))) => {
                    reported[index] = true;
                    tracing::debug!(
                        source = self.sources[index].name(),
                        claim_id = %query.claim_id,
                        candidates = candidates.len(),
                        "source answered"
                    );
                    pooled.extend(candidates);
                }
                Ok((index, Err(error))) => {
                    reported[index] = true;
                    tracing::warn!(
                        source = self.sources[index].name(),
                        claim_id = %query.claim_id,
                        %error,
                        "evidence source unavailable"
                    );
                    failed.push((index, error.to_string()));
                }
                Err(join_error) => {
                    tracing::warn!(claim_id = %query.claim_id, %join_error, "evidence source task failed");
                }
            }
        }

        for (index, done) in reported.iter().enumerate() {
            if !done {
                failed.push((index, "source task panicked".to_string()));
            }
        }
        failed.sort_by_key(|(index, _)| *index);

        let scoring = query.scoring_text();
        let matches: Vec<EvidenceMatch> = pooled
            .into_iter()
            .map(|candidate| {
                let similarity = keyword_overlap(&scoring, &candidate.content());
                EvidenceMatch {
                    candidate,
                    similarity,
                }
            })
            .filter(|m| m.similarity > self.similarity_threshold)
            .collect();
        let best = rank_matches(matches).into_iter().next();

        match &best {
            Some(m) => tracing::debug!(
                claim_id = %query.claim_id,
                source = %m.candidate.source_name,
                similarity = m.similarity,
                "selected evidence"
            ),
            None => tracing::debug!(claim_id = %query.claim_id, "no evidence found"),
        }

        Retrieval {
            best,
            failures: failed
                .into_iter()
                .map(|(index, error)| SourceFailure {
                    source: self.sources[index].name().to_string(),
                    error,
                })
                .collect(),
        }
    }
}

/// Sort matches best first.
///
/// Credibility descending, then publication date descending (dated beats
/// undated), then source name and URL ascending, then similarity descending.
/// The order is total, so selection does not depend on which source answered
/// first.
#[must_use]
pub fn rank_matches(mut matches: Vec<EvidenceMatch>) -> Vec<EvidenceMatch> {
    matches.sort_by(compare_matches);
    matches
}

fn compare_matches(a: &EvidenceMatch, b: &EvidenceMatch) -> Ordering {
    let (a_c, b_c) = (&a.candidate, &b.candidate);
    b_c.credibility
        .cmp(&a_c.credibility)
        .then_with(|| b_c.published_at.cmp(&a_c.published_at))
        .then_with(|| a_c.source_name.cmp(&b_c.source_name))
        .then_with(|| a_c.source_url.cmp(&b_c.source_url))
        .then_with(|| b.similarity.total_cmp(&a.similarity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use credo_core::Credibility;

    fn matched(name: &str, url: &str, credibility: Credibility, year: Option<i32>) -> EvidenceMatch {
        EvidenceMatch {
            candidate: EvidenceCandidate {
                source_name: name.into(),
                source_url: url.into(),
                title: String::new(),
                excerpt: String::new(),
                credibility,
                published_at: year.map(|y| Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap()),
                rating: None,
            },
            similarity: 0.5,
        }
    }

    fn names(ranked: &[EvidenceMatch]) -> Vec<&str> {
        ranked
            .iter()
            .map(|m| m.candidate.source_name.as_str())
            .collect()
    }

    #[test]
    fn higher_credibility_wins() {
        let ranked = rank_matches(vec![
            matched("blog", "u1", Credibility::Low, Some(2024)),
            matched("journal", "u2", Credibility::High, None),
            matched("wiki", "u3", Credibility::Medium, Some(2024)),
        ]);
        assert_eq!(names(&ranked), vec!["journal", "wiki", "blog"]);
    }

    #[test]
    fn recency_breaks_credibility_ties() {
        let ranked = rank_matches(vec![
            matched("a", "u1", Credibility::High, Some(2019)),
            matched("b", "u2", Credibility::High, None),
            matched("c", "u3", Credibility::High, Some(2023)),
        ]);
        assert_eq!(names(&ranked), vec!["c", "a", "b"]);
    }

    #[test]
    fn name_then_url_break_remaining_ties() {
        let ranked = rank_matches(vec![
            matched("zeta", "u1", Credibility::Medium, None),
            matched("alpha", "u9", Credibility::Medium, None),
            matched("alpha", "u2", Credibility::Medium, None),
        ]);
        let urls: Vec<&str> = ranked
            .iter()
            .map(|m| m.candidate.source_url.as_str())
            .collect();
        assert_eq!(urls, vec!["u2", "u9", "u1"]);
    }

    #[test]
    fn ranking_ignores_input_order() {
        let a = matched("a", "u1", Credibility::Medium, Some(2020));
        let b = matched("b", "u2", Credibility::Medium, Some(2020));
        let forward = rank_matches(vec![a.clone(), b.clone()]);
        let backward = rank_matches(vec![b, a]);
        assert_eq!(forward, backward);
    }
}
