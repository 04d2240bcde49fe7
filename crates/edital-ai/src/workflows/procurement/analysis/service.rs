use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{AnalysisId, BidId, CompanyId};
use super::repository::{
    AnalysisAlert, AnalysisRecord, AnalysisStore, DecisionNotifier, DirectoryError, NotifyError,
    ProcurementDirectory, StoreError,
};
use super::scoring::{ParticipationCall, ScoreWeights};
use super::BidAnalyzer;

/// Service composing the directory, the analyzer, the store, and the
/// decision alert hook.
pub struct BidAnalysisService<D, S, N> {
    directory: Arc<D>,
    store: Arc<S>,
    notifier: Arc<N>,
    analyzer: Arc<BidAnalyzer>,
}

static ANALYSIS_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_analysis_id() -> AnalysisId {
    let id = ANALYSIS_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AnalysisId(format!("ana-{id:06}"))
}

impl<D, S, N> BidAnalysisService<D, S, N>
where
    D: ProcurementDirectory + 'static,
    S: AnalysisStore + 'static,
    N: DecisionNotifier + 'static,
{
    pub fn new(directory: Arc<D>, store: Arc<S>, notifier: Arc<N>, weights: ScoreWeights) -> Self {
        Self {
            directory,
            store,
            notifier,
            analyzer: Arc::new(BidAnalyzer::new(weights)),
        }
    }

    /// Run a full analysis for a stored notice/company pair and persist
    /// the outcome.
    pub fn analyze(
        &self,
        bid_id: &BidId,
        company_id: &CompanyId,
        today: NaiveDate,
    ) -> Result<AnalysisRecord, AnalysisServiceError> {
        let notice = self
            .directory
            .fetch_bid(bid_id)?
            .ok_or_else(|| AnalysisServiceError::UnknownBid(bid_id.clone()))?;
        let company = self
            .directory
            .fetch_company(company_id)?
            .ok_or_else(|| AnalysisServiceError::UnknownCompany(company_id.clone()))?;

        let analysis = self.analyzer.analyze(&notice, &company, today);

        let record = AnalysisRecord::from_analysis(
            next_analysis_id(),
            bid_id.clone(),
            company_id.clone(),
            analysis,
            today,
        );
        let stored = self.store.insert(record)?;

        if stored.decision.call == ParticipationCall::Participate {
            let mut details = BTreeMap::new();
            details.insert("bid".to_string(), stored.bid_id.0.clone());
            details.insert(
                "overall_score".to_string(),
                stored.overall_score().to_string(),
            );
            self.notifier.publish(AnalysisAlert {
                template: "bid_worth_pursuing".to_string(),
                analysis_id: stored.analysis_id.clone(),
                details,
            })?;
        }

        Ok(stored)
    }

    /// Fetch a stored analysis for API responses.
    pub fn get(&self, analysis_id: &AnalysisId) -> Result<AnalysisRecord, AnalysisServiceError> {
        let record = self
            .store
            .fetch(analysis_id)?
            .ok_or(AnalysisServiceError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error("no notice registered under id '{}'", .0 .0)]
    UnknownBid(BidId),
    #[error("no company registered under id '{}'", .0 .0)]
    UnknownCompany(CompanyId),
    #[error("analysis not found")]
    NotFound,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
