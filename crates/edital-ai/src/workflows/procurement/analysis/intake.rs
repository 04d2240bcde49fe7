use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    BidNotice, CompanyProfile, CompanySize, ContractingAgency, DocumentCategory, GovernmentSphere,
    JudgingCriterion, Modality, QualificationRequirements, RequiredDocument, TaxRegime,
};

/// Validation errors raised while typing a raw notice or profile.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("notice is missing an identification number")]
    MissingNumber,
    #[error("estimated value must be a positive amount, got {found}")]
    InvalidValue { found: f64 },
    #[error("deadline {deadline} falls after the opening date {opening}")]
    DeadlineAfterOpening {
        deadline: NaiveDate,
        opening: NaiveDate,
    },
    #[error("company profile is missing the home state")]
    MissingCompanyState,
}

/// Raw notice as scraped or received from the ingestion collaborator:
/// every field optional, enumerations as free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidNoticeDraft {
    pub number: Option<String>,
    pub modality: Option<String>,
    pub judging: Option<String>,
    pub agency: AgencyDraft,
    pub object: Option<String>,
    pub estimated_value: Option<f64>,
    pub opening_date: Option<NaiveDate>,
    pub question_deadline: Option<NaiveDate>,
    pub challenge_deadline: Option<NaiveDate>,
    pub execution_days: Option<u32>,
    pub validity_months: Option<u32>,
    pub expected_payment_days: Option<u32>,
    pub allows_subcontracting: Option<bool>,
    pub allows_consortium: Option<bool>,
    pub small_business_benefit: Option<bool>,
    pub emergency: Option<bool>,
    pub price_registry: Option<bool>,
    pub required_documents: Vec<DocumentDraft>,
    pub required_technologies: Vec<String>,
    pub qualification: Option<QualificationRequirements>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyDraft {
    pub name: Option<String>,
    pub state: Option<String>,
    pub cnpj: Option<String>,
    pub sphere: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentDraft {
    pub name: String,
    pub category: Option<String>,
}

/// Raw company profile from the registration collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfileDraft {
    pub legal_name: Option<String>,
    pub size: Option<String>,
    pub tax_regime: Option<String>,
    pub annual_revenue: Option<f64>,
    pub state: Option<String>,
    pub expertise_areas: Vec<String>,
    pub technologies: Vec<String>,
    pub concurrent_capacity: Option<u8>,
}

/// Converts raw drafts into the typed records the engine consumes. Free
/// text becomes enums with explicit defaults; absent numbers stay absent
/// instead of collapsing to zero.
#[derive(Debug, Clone, Default)]
pub struct NoticeIntake;

impl NoticeIntake {
    pub fn notice_from_draft(&self, draft: BidNoticeDraft) -> Result<BidNotice, IntakeError> {
        let number = draft
            .number
            .map(|number| number.trim().to_string())
            .filter(|number| !number.is_empty())
            .ok_or(IntakeError::MissingNumber)?;

        let estimated_value = match draft.estimated_value {
            Some(value) if !value.is_finite() || value <= 0.0 => {
                return Err(IntakeError::InvalidValue { found: value });
            }
            other => other,
        };

        if let Some(opening) = draft.opening_date {
            for deadline in [draft.question_deadline, draft.challenge_deadline]
                .into_iter()
                .flatten()
            {
                if deadline > opening {
                    return Err(IntakeError::DeadlineAfterOpening { deadline, opening });
                }
            }
        }

        let object = draft.object.unwrap_or_default().trim().to_string();
        let agency_name = draft.agency.name.unwrap_or_default().trim().to_string();
        let sphere = resolve_sphere(draft.agency.sphere.as_deref(), &agency_name);

        let object_lower = object.to_lowercase();
        let emergency = draft.emergency.unwrap_or(false)
            || object_lower.contains("emergencial")
            || object_lower.contains("emergência");
        let price_registry = draft.price_registry.unwrap_or(false)
            || object_lower.contains("registro de preços")
            || object_lower.contains("registro de precos");

        let required_documents = draft
            .required_documents
            .into_iter()
            .map(|document| RequiredDocument {
                category: classify_document(&document.name, document.category.as_deref()),
                name: document.name,
            })
            .collect();

        Ok(BidNotice {
            number,
            modality: resolve_modality(draft.modality.as_deref()),
            judging: resolve_judging(draft.judging.as_deref()),
            agency: ContractingAgency {
                name: agency_name,
                state: draft
                    .agency
                    .state
                    .unwrap_or_default()
                    .trim()
                    .to_uppercase(),
                cnpj: draft.agency.cnpj.unwrap_or_default(),
                sphere,
            },
            object,
            estimated_value,
            opening_date: draft.opening_date,
            question_deadline: draft.question_deadline,
            challenge_deadline: draft.challenge_deadline,
            execution_days: draft.execution_days,
            validity_months: draft.validity_months,
            expected_payment_days: draft.expected_payment_days,
            allows_subcontracting: draft.allows_subcontracting.unwrap_or(false),
            allows_consortium: draft.allows_consortium.unwrap_or(false),
            small_business_benefit: draft.small_business_benefit.unwrap_or(false),
            emergency,
            price_registry,
            required_documents,
            required_technologies: draft.required_technologies,
            qualification: draft.qualification.unwrap_or_default(),
        })
    }

    pub fn company_from_draft(
        &self,
        draft: CompanyProfileDraft,
    ) -> Result<CompanyProfile, IntakeError> {
        let state = draft
            .state
            .map(|state| state.trim().to_uppercase())
            .filter(|state| !state.is_empty())
            .ok_or(IntakeError::MissingCompanyState)?;

        Ok(CompanyProfile {
            legal_name: draft.legal_name.unwrap_or_default().trim().to_string(),
            size: resolve_size(draft.size.as_deref()),
            tax_regime: resolve_tax_regime(draft.tax_regime.as_deref()),
            annual_revenue: draft
                .annual_revenue
                .filter(|revenue| revenue.is_finite() && *revenue > 0.0),
            state,
            expertise_areas: draft.expertise_areas,
            technologies: draft.technologies,
            concurrent_capacity: draft.concurrent_capacity.unwrap_or(1),
        })
    }
}

fn resolve_modality(raw: Option<&str>) -> Modality {
    let Some(raw) = raw else {
        return Modality::Other;
    };
    let text = raw.to_lowercase();

    if text.contains("pregão") || text.contains("pregao") {
        if text.contains("presencial") {
            Modality::PregaoPresencial
        } else {
            Modality::PregaoEletronico
        }
    } else if text.contains("concorr") {
        Modality::Concorrencia
    } else if text.contains("tomada") {
        Modality::TomadaDePrecos
    } else if text.contains("convite") {
        Modality::Convite
    } else if text.contains("leilão") || text.contains("leilao") {
        Modality::Leilao
    } else {
        Modality::Other
    }
}

fn resolve_judging(raw: Option<&str>) -> JudgingCriterion {
    let Some(raw) = raw else {
        return JudgingCriterion::LowestPrice;
    };
    let text = raw.to_lowercase();

    if text.contains("técnica e preço") || text.contains("tecnica e preco") {
        JudgingCriterion::TechniqueAndPrice
    } else if text.contains("melhor técnica") || text.contains("melhor tecnica") {
        JudgingCriterion::BestTechnique
    } else if text.contains("desconto") {
        JudgingCriterion::HighestDiscount
    } else {
        JudgingCriterion::LowestPrice
    }
}

fn resolve_sphere(explicit: Option<&str>, agency_name: &str) -> GovernmentSphere {
    if let Some(explicit) = explicit {
        let text = explicit.to_lowercase();
        if text.contains("federal") {
            return GovernmentSphere::Federal;
        }
        if text.contains("municipal") {
            return GovernmentSphere::Municipal;
        }
        if text.contains("estadual") || text.contains("state") {
            return GovernmentSphere::State;
        }
    }

    let name = agency_name.to_lowercase();
    if name.contains("ministério")
        || name.contains("ministerio")
        || name.contains("federal")
        || name.contains("união")
        || name.contains("uniao")
    {
        GovernmentSphere::Federal
    } else if name.contains("prefeitura")
        || name.contains("município")
        || name.contains("municipio")
        || name.contains("câmara municipal")
        || name.contains("camara municipal")
    {
        GovernmentSphere::Municipal
    } else {
        GovernmentSphere::State
    }
}

fn classify_document(name: &str, explicit: Option<&str>) -> DocumentCategory {
    if let Some(explicit) = explicit {
        let text = explicit.to_lowercase();
        if text.contains("technical") || text.contains("técnic") || text.contains("tecnic") {
            return DocumentCategory::Technical;
        }
        if text.contains("financial")
            || text.contains("financeir")
            || text.contains("econôm")
            || text.contains("econom")
        {
            return DocumentCategory::Financial;
        }
        if text.contains("basic") || text.contains("básic") || text.contains("basic") {
            return DocumentCategory::Basic;
        }
    }

    let name = name.to_lowercase();
    if name.contains("atestado") || name.contains("técnic") || name.contains("tecnic") {
        DocumentCategory::Technical
    } else if name.contains("balanço")
        || name.contains("balanco")
        || name.contains("demonstra")
        || name.contains("capital")
        || name.contains("falência")
        || name.contains("falencia")
    {
        DocumentCategory::Financial
    } else {
        DocumentCategory::Basic
    }
}

fn resolve_size(raw: Option<&str>) -> CompanySize {
    let Some(raw) = raw else {
        return CompanySize::Small;
    };
    let text = raw.to_lowercase();

    if text.contains("micro") || text.contains("mei") {
        CompanySize::Micro
    } else if text.contains("grande") || text.contains("large") {
        CompanySize::Large
    } else if text.contains("média") || text.contains("media") || text.contains("medium") {
        CompanySize::Medium
    } else {
        CompanySize::Small
    }
}

fn resolve_tax_regime(raw: Option<&str>) -> TaxRegime {
    let Some(raw) = raw else {
        return TaxRegime::SimplesNacional;
    };
    let text = raw.to_lowercase();

    if text.contains("real") {
        TaxRegime::LucroReal
    } else if text.contains("presumido") {
        TaxRegime::LucroPresumido
    } else {
        TaxRegime::SimplesNacional
    }
}
