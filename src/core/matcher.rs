use std::sync::Arc;
use crate::core::{
    criteria::Criteria,
    error::MatchError,
    notify::Notifier,
    repository::{CandidateRetriever, PostingRepository, ProfileRepository},
    scoring::{calculate_match_score, generate_match_reasons, generate_recommendations, ReasonThresholds},
    weights::WeightManager,
};
use crate::models::{
    BatchMatchEntry, Candidate, Casting, Compatibility, MatchResult, MatchingWeights,
    PlatformStats, SearchFilters,
};

/// Tunables of the ranking pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherSettings {
    /// Candidates fetched per requested result
    pub overfetch_factor: u32,
    /// Page size used when the caller asks for an unbounded ranking
    pub max_page_size: u32,
    pub casting_min_score: f64,
    pub similar_min_score: f64,
    pub reason_thresholds: ReasonThresholds,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            overfetch_factor: 5,
            max_page_size: 500,
            casting_min_score: 50.0,
            similar_min_score: 30.0,
            reason_thresholds: ReasonThresholds::default(),
        }
    }
}

/// Matching engine - ranks model profiles against criteria
///
/// # Pipeline
/// 1. Criteria normalization (posting, filters or anchor profile)
/// 2. Candidate retrieval (public profiles only)
/// 3. Scoring with one weight snapshot per ranking
/// 4. Minimum score filter, stable sort, truncation
#[derive(Clone)]
pub struct Matcher {
    retriever: Arc<dyn CandidateRetriever>,
    profiles: Arc<dyn ProfileRepository>,
    postings: Arc<dyn PostingRepository>,
    weights: Arc<WeightManager>,
    notifier: Notifier,
    settings: MatcherSettings,
}

impl Matcher {
    pub fn new(
        retriever: Arc<dyn CandidateRetriever>,
        profiles: Arc<dyn ProfileRepository>,
        postings: Arc<dyn PostingRepository>,
        weights: Arc<WeightManager>,
    ) -> Self {
        Self {
            retriever,
            profiles,
            postings,
            weights,
            notifier: Notifier::disabled(),
            settings: MatcherSettings::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_settings(mut self, settings: MatcherSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn weight_manager(&self) -> &WeightManager {
        &self.weights
    }

    pub fn settings(&self) -> &MatcherSettings {
        &self.settings
    }

    /// Rank public models against explicit criteria
    ///
    /// # Arguments
    /// * `criteria` - Canonical matching target
    /// * `limit` - Maximum number of results, 0 for no limit
    /// * `min_score` - Results scoring below this are dropped
    ///
    /// A retrieval failure aborts the call; an empty page is an empty ranking.
    pub async fn find_models_by_criteria(
        &self,
        criteria: &Criteria,
        limit: usize,
        min_score: f64,
    ) -> Result<Vec<MatchResult>, MatchError> {
        criteria.validate()?;

        let page_size = self.page_size(limit);
        let page = self.retriever.search(criteria, 1, page_size, true).await?;

        tracing::debug!(
            "Retrieved {} candidates (total: {}, page size: {})",
            page.candidates.len(),
            page.total,
            page_size
        );

        let weights = self.weights.weights();
        Ok(self.rank(criteria, page.candidates, &weights, limit, min_score))
    }

    /// Rank models by caller-supplied search filters
    pub async fn find_models_by_filters(
        &self,
        filters: &SearchFilters,
        limit: usize,
        min_score: f64,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let criteria = Criteria::from_filters(filters);
        self.find_models_by_criteria(&criteria, limit, min_score).await
    }

    /// Rank models for a casting and queue notifications for the top matches
    pub async fn find_models_for_casting(
        &self,
        casting: &Casting,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let criteria = Criteria::from_posting(casting);
        let matches = self
            .find_models_by_criteria(&criteria, limit, self.settings.casting_min_score)
            .await?;

        tracing::info!(
            "Found {} matching models for casting {}",
            matches.len(),
            casting.id
        );

        self.notifier.notify(casting, &matches);

        Ok(matches)
    }

    /// Look up a casting by id, then rank models for it
    pub async fn find_models_for_casting_id(
        &self,
        casting_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let casting = self.postings.find_casting(casting_id).await?;
        self.find_models_for_casting(&casting, limit).await
    }

    /// Models similar to an existing one, never including the anchor itself
    pub async fn find_similar_models(
        &self,
        model_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let anchor = self.profiles.find_model(model_id).await?;
        let criteria = Criteria::from_candidate(&anchor);

        // one extra slot absorbs the anchor matching itself
        let fetch_limit = if limit > 0 { limit + 1 } else { 0 };
        let mut matches = self
            .find_models_by_criteria(&criteria, fetch_limit, self.settings.similar_min_score)
            .await?;

        matches.retain(|m| m.model_id != anchor.id);
        if limit > 0 {
            matches.truncate(limit);
        }

        tracing::info!("Found {} models similar to {}", matches.len(), model_id);

        Ok(matches)
    }

    /// Score one model against one casting with improvement suggestions
    pub async fn compatibility(
        &self,
        model_id: &str,
        casting_id: &str,
    ) -> Result<Compatibility, MatchError> {
        let (model, casting) = tokio::try_join!(
            self.profiles.find_model(model_id),
            self.postings.find_casting(casting_id),
        )?;

        let criteria = Criteria::from_posting(&casting);
        let weights = self.weights.weights();
        let result = self.score_candidate(&model, &criteria, &weights)?;
        let recommendations = generate_recommendations(&result.breakdown);

        Ok(Compatibility {
            model_id: model.id,
            casting_id: casting.id,
            score: result.score,
            breakdown: result.breakdown,
            reasons: result.reasons,
            recommendations,
        })
    }

    /// Rank models for many castings concurrently
    ///
    /// Each casting is independent: a failure yields an entry carrying the
    /// error and no matches. Entries come back in input order.
    pub async fn batch_match(&self, casting_ids: &[String], limit: usize) -> Vec<BatchMatchEntry> {
        let handles: Vec<_> = casting_ids
            .iter()
            .map(|casting_id| {
                let matcher = self.clone();
                let casting_id = casting_id.clone();
                tokio::spawn(async move {
                    matcher.find_models_for_casting_id(&casting_id, limit).await
                })
            })
            .collect();

        let mut entries = Vec::with_capacity(handles.len());
        for (casting_id, handle) in casting_ids.iter().zip(handles) {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(e) => Err(MatchError::Internal(format!("matching task failed: {}", e))),
            };

            let entry = match outcome {
                Ok(matches) => BatchMatchEntry {
                    casting_id: casting_id.clone(),
                    matches,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!("Batch matching failed for casting {}: {}", casting_id, e);
                    BatchMatchEntry {
                        casting_id: casting_id.clone(),
                        matches: vec![],
                        error: Some(e.to_string()),
                    }
                }
            };
            entries.push(entry);
        }

        entries
    }

    /// Platform-wide matching statistics
    ///
    /// There is no analytics store behind the engine yet.
    pub async fn platform_stats(&self) -> Result<PlatformStats, MatchError> {
        Err(MatchError::Unimplemented(
            "platform matching statistics are not recorded".to_string(),
        ))
    }

    /// Score, filter, sort and truncate an already retrieved candidate list
    ///
    /// Malformed candidates are skipped. Ties keep retrieval order.
    pub fn rank(
        &self,
        criteria: &Criteria,
        candidates: Vec<Candidate>,
        weights: &MatchingWeights,
        limit: usize,
        min_score: f64,
    ) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .filter(|candidate| {
                if !candidate.is_public {
                    tracing::debug!("Skipping private profile {}", candidate.id);
                }
                candidate.is_public
            })
            .filter_map(|candidate| match self.score_candidate(candidate, criteria, weights) {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::warn!("Skipping candidate {:?}: {}", candidate.id, e);
                    None
                }
            })
            .filter(|result| result.score >= min_score)
            .collect();

        // Vec::sort_by is stable
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if limit > 0 {
            matches.truncate(limit);
        }

        matches
    }

    fn score_candidate(
        &self,
        candidate: &Candidate,
        criteria: &Criteria,
        weights: &MatchingWeights,
    ) -> Result<MatchResult, MatchError> {
        validate_candidate(candidate)?;

        let breakdown = calculate_match_score(candidate, criteria, weights);
        let reasons = generate_match_reasons(
            &breakdown,
            candidate,
            criteria,
            &self.settings.reason_thresholds,
        );

        Ok(MatchResult {
            model_id: candidate.id.clone(),
            display_name: candidate.name().to_string(),
            score: breakdown.total,
            reasons,
            breakdown,
        })
    }

    fn page_size(&self, limit: usize) -> u32 {
        if limit == 0 {
            return self.settings.max_page_size;
        }
        let wanted = (limit as u64).saturating_mul(u64::from(self.settings.overfetch_factor.max(1)));
        wanted.min(u64::from(self.settings.max_page_size)) as u32
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("weights", &self.weights)
            .field("notifier", &self.notifier)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Reject profiles whose numbers cannot be compared
fn validate_candidate(candidate: &Candidate) -> Result<(), MatchError> {
    if candidate.id.trim().is_empty() {
        return Err(MatchError::InvalidArgument("candidate has no id".to_string()));
    }

    for (field, value) in [("height", candidate.height_cm), ("weight", candidate.weight_kg)] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(MatchError::InvalidArgument(format!("invalid {}: {}", field, v)));
            }
        }
    }

    if let Some(rating) = candidate.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(MatchError::InvalidArgument(format!("rating out of range: {}", rating)));
        }
    }

    Ok(())
}
