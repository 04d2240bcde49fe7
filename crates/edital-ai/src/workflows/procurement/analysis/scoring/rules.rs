use super::super::domain::{
    BidNotice, CompanyProfile, DocumentCategory, GovernmentSphere, Modality,
};
use chrono::NaiveDate;

// Generic signals that the object sits in the company's line of business
// even when no expertise area matches verbatim.
const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "software",
    "sistema",
    "tecnologia",
    "desenvolvimento",
    "aplicativo",
    "plataforma",
    "informática",
    "informatica",
    "dados",
];

const COMPLEXITY_KEYWORDS: &[&str] = &[
    "integração",
    "integracao",
    "migração",
    "migracao",
    "alta disponibilidade",
    "tempo real",
    "interoperabilidade",
    "legado",
    "escalabilidade",
    "criptografia",
];

const HIGH_RISK_KEYWORDS: &[&str] = &[
    "missão crítica",
    "missao critica",
    "24x7",
    "24/7",
    "ininterrupto",
    "sla",
    "multa",
    "penalidade",
];

const SPECIALIZATION_KEYWORDS: &[&str] = &[
    "especializado",
    "especializada",
    "específico",
    "especifico",
    "customizado",
    "sob medida",
    "certificação",
    "certificacao",
];

// States whose procurement markets attract the densest competitive fields.
const MAJOR_MARKET_STATES: &[&str] = &["SP", "RJ", "MG", "DF"];

fn clamp(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

fn matched_keywords(text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count()
}

/// Fit between the contract value and the company's financial capacity.
pub(crate) fn financial_score(notice: &BidNotice, company: &CompanyProfile) -> u8 {
    let mut score: i32 = 50;

    if let (Some(value), Some(revenue)) = (notice.estimated_value, company.annual_revenue) {
        if revenue > 0.0 && value > 0.0 {
            let lower = revenue * 0.05;
            let upper = revenue * 0.30;
            score += if value >= lower && value <= upper {
                30
            } else if value < lower {
                15
            } else if value <= upper * 2.0 {
                20
            } else {
                5
            };
        }
    }

    if notice.modality.is_auction() {
        score += 10;
    } else if notice.modality == Modality::Concorrencia {
        score -= 5;
    }

    if let Some(days) = notice.expected_payment_days {
        score += if days <= 30 {
            15
        } else if days <= 60 {
            5
        } else {
            -10
        };
    }

    clamp(score)
}

/// Match between the notice object and what the company knows how to build.
pub(crate) fn technical_score(notice: &BidNotice, company: &CompanyProfile) -> u8 {
    let mut score: i32 = 50;
    let object = notice.object.to_lowercase();

    let expertise_hit = company
        .expertise_areas
        .iter()
        .any(|area| object.contains(area.to_lowercase().as_str()))
        || matched_keywords(&object, TECHNOLOGY_KEYWORDS) > 0;
    score += if expertise_hit { 25 } else { -15 };

    score += match matched_keywords(&object, COMPLEXITY_KEYWORDS) {
        0 => 15,
        1..=2 => 5,
        3..=4 => -5,
        _ => -10,
    };

    if notice.required_technologies.is_empty() {
        score += 5;
    } else {
        let known: Vec<String> = company
            .technologies
            .iter()
            .map(|technology| technology.to_lowercase())
            .collect();
        let matched = notice
            .required_technologies
            .iter()
            .filter(|required| {
                let required = required.to_lowercase();
                known
                    .iter()
                    .any(|k| k.contains(&required) || required.contains(k.as_str()))
            })
            .count();
        let ratio = matched as f64 / notice.required_technologies.len() as f64;
        score += (20.0 * ratio).round() as i32;
    }

    clamp(score)
}

/// Effort of assembling the required paperwork. Base is high: most
/// companies already hold the basic registration documents.
pub(crate) fn documentary_score(notice: &BidNotice, company: &CompanyProfile) -> u8 {
    let mut score: i32 = 70;

    let technical_documents = notice.documents_in(DocumentCategory::Technical);
    if technical_documents > 3 {
        score -= 20;
    } else if technical_documents > 1 {
        score -= 10;
    }

    let financial_documents = notice.documents_in(DocumentCategory::Financial);
    if financial_documents > 2 {
        score -= 15;
    } else if financial_documents > 0 {
        score -= 5;
    }

    if notice.small_business_benefit && company.size.is_small_business() {
        score += 15;
    }

    let technical_qualifications = notice.qualification.technical.len();
    if technical_qualifications > 5 {
        score -= 15;
    } else if technical_qualifications > 2 {
        score -= 8;
    }

    clamp(score)
}

/// Room to prepare a proposal and live with the contract windows.
pub(crate) fn timeline_score(notice: &BidNotice, today: NaiveDate) -> u8 {
    let mut score: i32 = 50;

    if let Some(days) = notice.days_until_opening(today) {
        score += if days >= 15 {
            20
        } else if days >= 10 {
            10
        } else if days >= 5 {
            0
        } else {
            -20
        };
    }

    if let Some(execution) = notice.execution_days {
        score += if execution >= 180 {
            15
        } else if execution >= 90 {
            10
        } else if execution >= 30 {
            5
        } else {
            -15
        };
    }

    if let Some(months) = notice.validity_months {
        if months >= 12 {
            score += 10;
        } else if months >= 6 {
            score += 5;
        }
    }

    clamp(score)
}

/// Execution and contractual risk. Optimistic base; penalties accumulate
/// for emergency procedures, tight windows, and punitive contract terms.
pub(crate) fn risk_score(notice: &BidNotice, today: NaiveDate) -> u8 {
    let mut score: i32 = 80;

    match notice.agency.sphere {
        GovernmentSphere::Federal => score += 10,
        GovernmentSphere::Municipal => score -= 5,
        GovernmentSphere::State => {}
    }

    if notice.emergency {
        score -= 20;
    }
    if notice.price_registry {
        score -= 10;
    }

    if let Some(value) = notice.estimated_value {
        if value > 1_000_000.0 {
            score -= 15;
        } else if value > 500_000.0 {
            score -= 10;
        } else if value < 50_000.0 {
            score -= 5;
        }
    }

    if notice.allows_subcontracting {
        score += 5;
    }
    if notice.allows_consortium {
        score -= 10;
    }

    if let Some(execution) = notice.execution_days {
        if execution < 30 {
            score -= 20;
        }
    }

    if let Some(days) = notice.days_until_opening(today) {
        if days < 5 {
            score -= 20;
        }
    }

    let object = notice.object.to_lowercase();
    score -= 10 * matched_keywords(&object, HIGH_RISK_KEYWORDS) as i32;

    clamp(score)
}

/// Expected density of the competitive field.
pub(crate) fn competition_score(
    notice: &BidNotice,
    company: &CompanyProfile,
    today: NaiveDate,
) -> u8 {
    let mut score: i32 = 50;

    if let Some(value) = notice.estimated_value {
        score += if value < 100_000.0 {
            25
        } else if value < 300_000.0 {
            15
        } else if value < 1_000_000.0 {
            5
        } else {
            -15
        };
    }

    let object = notice.object.to_lowercase();
    score += 8 * matched_keywords(&object, SPECIALIZATION_KEYWORDS) as i32;

    let agency_state = notice.agency.state.to_uppercase();
    if agency_state.eq_ignore_ascii_case(&company.state) {
        score += 10;
    }
    if !MAJOR_MARKET_STATES.contains(&agency_state.as_str()) {
        score += 15;
    }

    match notice.modality {
        Modality::Convite => score += 30,
        Modality::TomadaDePrecos => score += 10,
        modality if modality.is_auction() => score -= 10,
        _ => {}
    }

    if notice.small_business_benefit && company.size.is_small_business() {
        score += 15;
    }

    if let Some(days) = notice.days_until_opening(today) {
        // A short runway thins out the field: fewer competitors can staff
        // a proposal in under a week.
        if days < 7 {
            score += 10;
        }
    }

    clamp(score)
}
