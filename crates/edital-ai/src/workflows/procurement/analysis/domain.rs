use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for procurement notices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BidId(pub String);

/// Identifier wrapper for bidding company profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

/// Identifier wrapper for stored analyses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(pub String);

/// A validated procurement notice ("edital") as consumed by the analysis
/// engine. Numeric fields the source document may omit are `Option`s and
/// contribute no adjustment when absent, so a sparse notice still scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidNotice {
    pub number: String,
    pub modality: Modality,
    pub judging: JudgingCriterion,
    pub agency: ContractingAgency,
    pub object: String,
    pub estimated_value: Option<f64>,
    pub opening_date: Option<NaiveDate>,
    pub question_deadline: Option<NaiveDate>,
    pub challenge_deadline: Option<NaiveDate>,
    pub execution_days: Option<u32>,
    pub validity_months: Option<u32>,
    pub expected_payment_days: Option<u32>,
    pub allows_subcontracting: bool,
    pub allows_consortium: bool,
    pub small_business_benefit: bool,
    pub emergency: bool,
    pub price_registry: bool,
    pub required_documents: Vec<RequiredDocument>,
    pub required_technologies: Vec<String>,
    pub qualification: QualificationRequirements,
}

impl BidNotice {
    pub fn days_until_opening(&self, today: NaiveDate) -> Option<i64> {
        self.opening_date.map(|opening| (opening - today).num_days())
    }

    pub fn documents_in(&self, category: DocumentCategory) -> usize {
        self.required_documents
            .iter()
            .filter(|document| document.category == category)
            .count()
    }
}

/// The body publishing the notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractingAgency {
    pub name: String,
    pub state: String,
    pub cnpj: String,
    pub sphere: GovernmentSphere,
}

/// Administrative sphere of the contracting agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernmentSphere {
    Federal,
    State,
    Municipal,
}

/// Procurement procedure type. Each modality carries different
/// participation rules and competitive dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    PregaoEletronico,
    PregaoPresencial,
    Concorrencia,
    TomadaDePrecos,
    Convite,
    Leilao,
    Other,
}

impl Modality {
    pub const fn is_auction(self) -> bool {
        matches!(self, Modality::PregaoEletronico | Modality::PregaoPresencial)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Modality::PregaoEletronico => "pregão eletrônico",
            Modality::PregaoPresencial => "pregão presencial",
            Modality::Concorrencia => "concorrência",
            Modality::TomadaDePrecos => "tomada de preços",
            Modality::Convite => "convite",
            Modality::Leilao => "leilão",
            Modality::Other => "other",
        }
    }
}

/// How proposals are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgingCriterion {
    LowestPrice,
    BestTechnique,
    TechniqueAndPrice,
    HighestDiscount,
}

/// A document the notice requires from participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDocument {
    pub name: String,
    pub category: DocumentCategory,
}

/// Bucket used by documentary scoring. Basic registration paperwork is
/// assumed to be on hand; technical and financial proofs cost effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Basic,
    Technical,
    Financial,
}

/// Qualification requirements split the way editais present them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationRequirements {
    pub technical: Vec<String>,
    pub economic: Vec<String>,
    pub legal: Vec<String>,
}

/// The bidding company as registered with the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub legal_name: String,
    pub size: CompanySize,
    pub tax_regime: TaxRegime,
    pub annual_revenue: Option<f64>,
    pub state: String,
    pub expertise_areas: Vec<String>,
    pub technologies: Vec<String>,
    pub concurrent_capacity: u8,
}

/// Company size tier. Micro and small companies (ME/EPP) receive
/// procedural benefits in Brazilian public bids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
    Large,
}

impl CompanySize {
    pub const fn is_small_business(self) -> bool {
        matches!(self, CompanySize::Micro | CompanySize::Small)
    }
}

/// Tax regime the company files under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    SimplesNacional,
    LucroPresumido,
    LucroReal,
}
