use chrono::NaiveDate;
use edital_ai::workflows::procurement::analysis::{
    AnalysisAlert, AnalysisId, AnalysisRecord, AnalysisStore, BidId, BidNotice, CompanyId,
    CompanyProfile, DecisionNotifier, DirectoryError, NotifyError, ProcurementDirectory,
    StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stand-in for the external bid/company repositories: notices and
/// profiles seeded at startup, read-only afterwards.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProcurementDirectory {
    bids: Arc<Mutex<HashMap<BidId, BidNotice>>>,
    companies: Arc<Mutex<HashMap<CompanyId, CompanyProfile>>>,
}

impl InMemoryProcurementDirectory {
    pub(crate) fn insert_bid(&self, id: BidId, notice: BidNotice) {
        self.bids
            .lock()
            .expect("directory mutex poisoned")
            .insert(id, notice);
    }

    pub(crate) fn insert_company(&self, id: CompanyId, profile: CompanyProfile) {
        self.companies
            .lock()
            .expect("directory mutex poisoned")
            .insert(id, profile);
    }
}

impl ProcurementDirectory for InMemoryProcurementDirectory {
    fn fetch_bid(&self, id: &BidId) -> Result<Option<BidNotice>, DirectoryError> {
        let guard = self.bids.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_company(&self, id: &CompanyId) -> Result<Option<CompanyProfile>, DirectoryError> {
        let guard = self.companies.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalysisStore {
    records: Arc<Mutex<HashMap<AnalysisId, AnalysisRecord>>>,
}

impl AnalysisStore for InMemoryAnalysisStore {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if let Some(existing) = guard.get(&record.analysis_id) {
            return Ok(existing.clone());
        }
        guard.insert(record.analysis_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut records: Vec<AnalysisRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.analysis_id.0.cmp(&a.analysis_id.0));
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDecisionNotifier {
    events: Arc<Mutex<Vec<AnalysisAlert>>>,
}

impl InMemoryDecisionNotifier {
    pub(crate) fn events(&self) -> Vec<AnalysisAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl DecisionNotifier for InMemoryDecisionNotifier {
    fn publish(&self, alert: AnalysisAlert) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

/// Notifier used by the long-running service: alerts land in the log
/// stream until a real outbound channel is wired up.
#[derive(Default, Clone)]
pub(crate) struct LoggingDecisionNotifier;

impl DecisionNotifier for LoggingDecisionNotifier {
    fn publish(&self, alert: AnalysisAlert) -> Result<(), NotifyError> {
        info!(
            template = %alert.template,
            analysis_id = %alert.analysis_id.0,
            "participation alert published"
        );
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
