use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::procurement::analysis::domain::{
    AnalysisId, BidId, BidNotice, CompanyId, CompanyProfile, CompanySize, ContractingAgency,
    DocumentCategory, GovernmentSphere, JudgingCriterion, Modality, QualificationRequirements,
    RequiredDocument, TaxRegime,
};
use crate::workflows::procurement::analysis::repository::{
    AnalysisAlert, AnalysisRecord, AnalysisStore, DecisionNotifier, DirectoryError, NotifyError,
    ProcurementDirectory, StoreError,
};
use crate::workflows::procurement::analysis::{
    analysis_router, BidAnalysisService, BidAnalyzer, ScoreWeights,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
}

pub(super) fn company() -> CompanyProfile {
    CompanyProfile {
        legal_name: "Horizonte Tecnologia Ltda".to_string(),
        size: CompanySize::Small,
        tax_regime: TaxRegime::SimplesNacional,
        annual_revenue: Some(2_000_000.0),
        state: "GO".to_string(),
        expertise_areas: vec!["desenvolvimento de software".to_string()],
        technologies: vec![
            "java".to_string(),
            "postgresql".to_string(),
            "react".to_string(),
        ],
        concurrent_capacity: 3,
    }
}

/// A comfortable notice: mid-band value, small-business benefit, long
/// runway, matching stack.
pub(super) fn favorable_notice() -> BidNotice {
    BidNotice {
        number: "PE-042/2025".to_string(),
        modality: Modality::PregaoEletronico,
        judging: JudgingCriterion::LowestPrice,
        agency: ContractingAgency {
            name: "Secretaria de Estado da Economia".to_string(),
            state: "GO".to_string(),
            cnpj: "01.409.580/0001-38".to_string(),
            sphere: GovernmentSphere::State,
        },
        object: "Contratação de empresa especializada para desenvolvimento de software de gestão de contratos"
            .to_string(),
        estimated_value: Some(250_000.0),
        opening_date: NaiveDate::from_ymd_opt(2025, 3, 25),
        question_deadline: NaiveDate::from_ymd_opt(2025, 3, 20),
        challenge_deadline: NaiveDate::from_ymd_opt(2025, 3, 21),
        execution_days: Some(90),
        validity_months: Some(12),
        expected_payment_days: Some(30),
        allows_subcontracting: false,
        allows_consortium: false,
        small_business_benefit: true,
        emergency: false,
        price_registry: false,
        required_documents: vec![
            RequiredDocument {
                name: "Certidão negativa de débitos federais".to_string(),
                category: DocumentCategory::Basic,
            },
            RequiredDocument {
                name: "Contrato social consolidado".to_string(),
                category: DocumentCategory::Basic,
            },
            RequiredDocument {
                name: "Atestado de capacidade técnica".to_string(),
                category: DocumentCategory::Technical,
            },
            RequiredDocument {
                name: "Balanço patrimonial do último exercício".to_string(),
                category: DocumentCategory::Financial,
            },
        ],
        required_technologies: vec!["java".to_string(), "react".to_string()],
        qualification: QualificationRequirements {
            technical: vec!["atestado compatível com o objeto".to_string()],
            economic: vec!["índices de liquidez mínimos".to_string()],
            legal: vec!["regularidade fiscal e trabalhista".to_string()],
        },
    }
}

/// A hostile notice: eight-figure value, emergency procedure, consortium
/// enabled, three-day runway, punitive contract language.
pub(super) fn risky_notice() -> BidNotice {
    BidNotice {
        number: "CC-101/2025".to_string(),
        modality: Modality::Concorrencia,
        judging: JudgingCriterion::TechniqueAndPrice,
        agency: ContractingAgency {
            name: "Prefeitura Municipal de São Paulo".to_string(),
            state: "SP".to_string(),
            cnpj: "46.395.000/0001-39".to_string(),
            sphere: GovernmentSphere::Municipal,
        },
        object: "Contratação emergencial de sistema de missão crítica com operação 24x7 e SLA rigoroso, sujeito a multa"
            .to_string(),
        estimated_value: Some(2_000_000.0),
        opening_date: NaiveDate::from_ymd_opt(2025, 3, 13),
        question_deadline: NaiveDate::from_ymd_opt(2025, 3, 11),
        challenge_deadline: NaiveDate::from_ymd_opt(2025, 3, 12),
        execution_days: Some(20),
        validity_months: None,
        expected_payment_days: Some(90),
        allows_subcontracting: false,
        allows_consortium: true,
        small_business_benefit: false,
        emergency: true,
        price_registry: false,
        required_documents: vec![
            RequiredDocument {
                name: "Atestado de capacidade técnica 1".to_string(),
                category: DocumentCategory::Technical,
            },
            RequiredDocument {
                name: "Atestado de capacidade técnica 2".to_string(),
                category: DocumentCategory::Technical,
            },
            RequiredDocument {
                name: "Atestado de capacidade técnica 3".to_string(),
                category: DocumentCategory::Technical,
            },
            RequiredDocument {
                name: "Atestado de capacidade técnica 4".to_string(),
                category: DocumentCategory::Technical,
            },
            RequiredDocument {
                name: "Balanço patrimonial".to_string(),
                category: DocumentCategory::Financial,
            },
            RequiredDocument {
                name: "Demonstração de capital social mínimo".to_string(),
                category: DocumentCategory::Financial,
            },
            RequiredDocument {
                name: "Certidão negativa de falência".to_string(),
                category: DocumentCategory::Financial,
            },
        ],
        required_technologies: vec!["cobol".to_string(), "mainframe".to_string()],
        qualification: QualificationRequirements {
            technical: vec![
                "atestado de operação 24x7".to_string(),
                "atestado de SLA".to_string(),
                "equipe certificada".to_string(),
                "visita técnica obrigatória".to_string(),
                "amostra do sistema".to_string(),
                "prova de conceito".to_string(),
            ],
            economic: vec!["capital social mínimo de 10%".to_string()],
            legal: vec!["regularidade fiscal".to_string()],
        },
    }
}

pub(super) fn analyzer() -> BidAnalyzer {
    BidAnalyzer::new(ScoreWeights::default())
}

pub(super) fn bid_id() -> BidId {
    BidId("PE-042/2025".to_string())
}

pub(super) fn company_id() -> CompanyId {
    CompanyId("horizonte".to_string())
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    pub(super) bids: Arc<Mutex<HashMap<BidId, BidNotice>>>,
    pub(super) companies: Arc<Mutex<HashMap<CompanyId, CompanyProfile>>>,
}

impl MemoryDirectory {
    pub(super) fn seeded() -> Self {
        let directory = Self::default();
        directory
            .bids
            .lock()
            .expect("bid mutex poisoned")
            .insert(bid_id(), favorable_notice());
        directory
            .bids
            .lock()
            .expect("bid mutex poisoned")
            .insert(BidId("CC-101/2025".to_string()), risky_notice());
        directory
            .companies
            .lock()
            .expect("company mutex poisoned")
            .insert(company_id(), company());
        directory
    }
}

impl ProcurementDirectory for MemoryDirectory {
    fn fetch_bid(&self, id: &BidId) -> Result<Option<BidNotice>, DirectoryError> {
        let guard = self.bids.lock().expect("bid mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_company(&self, id: &CompanyId) -> Result<Option<CompanyProfile>, DirectoryError> {
        let guard = self.companies.lock().expect("company mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<AnalysisId, AnalysisRecord>>>,
}

impl AnalysisStore for MemoryStore {
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
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<AnalysisAlert>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<AnalysisAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl DecisionNotifier for MemoryNotifier {
    fn publish(&self, alert: AnalysisAlert) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct UnavailableDirectory;

impl ProcurementDirectory for UnavailableDirectory {
    fn fetch_bid(&self, _id: &BidId) -> Result<Option<BidNotice>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_company(&self, _id: &CompanyId) -> Result<Option<CompanyProfile>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl AnalysisStore for UnavailableStore {
    fn insert(&self, _record: AnalysisRecord) -> Result<AnalysisRecord, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &AnalysisId) -> Result<Option<AnalysisRecord>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AnalysisRecord>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn analysis_router_with_service(
    service: BidAnalysisService<MemoryDirectory, MemoryStore, MemoryNotifier>,
) -> axum::Router {
    analysis_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn build_service() -> (
    BidAnalysisService<MemoryDirectory, MemoryStore, MemoryNotifier>,
    Arc<MemoryStore>,
    Arc<MemoryNotifier>,
) {
    let directory = Arc::new(MemoryDirectory::seeded());
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = BidAnalysisService::new(
        directory,
        store.clone(),
        notifier.clone(),
        ScoreWeights::default(),
    );
    (service, store, notifier)
}
