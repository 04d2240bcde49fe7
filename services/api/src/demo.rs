use crate::infra::{InMemoryAnalysisStore, InMemoryDecisionNotifier, InMemoryProcurementDirectory};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use edital_ai::config::AppConfig;
use edital_ai::error::AppError;
use edital_ai::workflows::procurement::analysis::{
    AgencyDraft, BidAnalysisService, BidAnalyzer, BidDecision, BidId, BidNoticeDraft, CompanyId,
    CompanyProfileDraft, DocumentDraft, FactorPolarity, NoticeIntake, QualificationRequirements,
    ScoreSet, StrategicRecommendation,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub(crate) const FAVORABLE_BID_ID: &str = "PE-042/2025";
pub(crate) const RISKY_BID_ID: &str = "CC-101/2025";
pub(crate) const DEMO_COMPANY_ID: &str = "horizonte";

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyzeArgs {
    /// Path to a JSON bid notice draft
    #[arg(long)]
    pub(crate) bid: PathBuf,
    /// Path to a JSON company profile draft
    #[arg(long)]
    pub(crate) company: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs { bid, company, today } = args;

    let bid_draft: BidNoticeDraft = read_json(&bid)?;
    let company_draft: CompanyProfileDraft = read_json(&company)?;

    let intake = NoticeIntake;
    let notice = intake.notice_from_draft(bid_draft)?;
    let profile = intake.company_from_draft(company_draft)?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let weights = AppConfig::load()?.scoring.weights;
    let analysis = BidAnalyzer::new(weights).analyze(&notice, &profile, today);

    println!("Notice {} evaluated on {}", notice.number, today);
    render_analysis(&analysis.scores, &analysis.decision, &analysis.recommendation);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("Edital viability demo (evaluation date {today})");

    let directory = Arc::new(seeded_directory_at(today)?);
    let store = Arc::new(InMemoryAnalysisStore::default());
    let notifier = Arc::new(InMemoryDecisionNotifier::default());
    let weights = AppConfig::load()?.scoring.weights;
    let service = BidAnalysisService::new(directory, store, notifier.clone(), weights);

    let scenarios = [
        ("Scenario 1: small-value notice with ME/EPP benefit", FAVORABLE_BID_ID),
        ("Scenario 2: rushed eight-figure emergency notice", RISKY_BID_ID),
    ];

    for (label, bid_id) in scenarios {
        let record = service.analyze(
            &BidId(bid_id.to_string()),
            &CompanyId(DEMO_COMPANY_ID.to_string()),
            today,
        )?;

        println!("\n{label}");
        println!("Notice {} -> analysis {}", record.bid_id.0, record.analysis_id.0);
        render_analysis(
            &record.scores.resolve(),
            &record.decision,
            &record.recommendation,
        );

        match serde_json::to_string_pretty(&record.status_view()) {
            Ok(json) => println!("  Public status payload:\n{json}"),
            Err(err) => println!("  Public status payload unavailable: {err}"),
        }
    }

    let events = notifier.events();
    if events.is_empty() {
        println!("\nParticipation alerts: none dispatched");
    } else {
        println!("\nParticipation alerts:");
        for alert in events {
            println!("  - template={} -> {}", alert.template, alert.analysis_id.0);
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

fn render_analysis(
    scores: &ScoreSet,
    decision: &BidDecision,
    recommendation: &StrategicRecommendation,
) {
    println!(
        "  Decision: {} (confidence {}%)",
        decision.call.label(),
        decision.confidence
    );
    println!("  Rationale: {}", decision.justification);

    println!("  Scores:");
    for (kind, score) in scores.by_kind() {
        println!("    - {}: {}", kind.label(), score);
    }
    println!("    - overall: {}", scores.overall);

    if !decision.decisive_factors.is_empty() {
        println!("  Decisive factors:");
        for factor in &decision.decisive_factors {
            let sign = match factor.polarity {
                FactorPolarity::Positive => "+",
                FactorPolarity::Negative => "-",
            };
            println!("    {} {} ({})", sign, factor.kind.label(), factor.score);
        }
    }

    println!(
        "  Strategy: {} | priority {}",
        recommendation.strategy.label(),
        recommendation.priority.label()
    );

    if !recommendation.competitive_advantages.is_empty() {
        println!("  Competitive advantages:");
        for advantage in &recommendation.competitive_advantages {
            println!("    - {advantage}");
        }
    }

    println!(
        "  Pricing: {:?} margin {:.1}% -> suggested price {:.2}",
        recommendation.pricing.approach,
        recommendation.pricing.margin_percent,
        recommendation.pricing.suggested_price
    );

    if recommendation.partnership.partner_types.is_empty() {
        println!("  Partnerships: none suggested");
    } else {
        println!(
            "  Partnerships{}:",
            if recommendation.partnership.required {
                " (required)"
            } else {
                ""
            }
        );
        for partner in &recommendation.partnership.partner_types {
            println!("    - {partner:?}");
        }
    }

    if !recommendation.action_plan.immediate.is_empty() {
        println!("  Immediate actions:");
        for action in &recommendation.action_plan.immediate {
            println!("    - {action}");
        }
    }
    if !recommendation.action_plan.preparation.is_empty() {
        println!("  Preparation actions:");
        for action in &recommendation.action_plan.preparation {
            println!("    - {action}");
        }
    }
    if !recommendation.action_plan.post_decision.is_empty() {
        println!("  Post-decision actions:");
        for action in &recommendation.action_plan.post_decision {
            println!("    - {action}");
        }
    }

    println!("  Proposal timeline:");
    for milestone in &recommendation.milestones {
        println!(
            "    - {}: {} -> {} ({} day(s))",
            milestone.activity.label(),
            milestone.starts_on,
            milestone.ends_on,
            milestone.duration_days
        );
    }

    println!(
        "  ROI: {:.2}% | return {:.2} | payback {} month(s)",
        recommendation.roi.roi_percent,
        recommendation.roi.absolute_return,
        recommendation.roi.payback_months
    );
    println!(
        "  Cost breakdown: direct {:.2} | overhead {:.2} | taxes {:.2}",
        recommendation.roi.cost_breakdown.direct,
        recommendation.roi.cost_breakdown.overhead,
        recommendation.roi.cost_breakdown.taxes
    );
}

/// Seed the in-memory directory with the two demo notices and the demo
/// company, dated relative to the service start so the runways stay
/// meaningful whenever the demo runs.
pub(crate) fn seeded_directory() -> Result<InMemoryProcurementDirectory, AppError> {
    seeded_directory_at(Local::now().date_naive())
}

pub(crate) fn seeded_directory_at(
    reference: NaiveDate,
) -> Result<InMemoryProcurementDirectory, AppError> {
    let intake = NoticeIntake;
    let directory = InMemoryProcurementDirectory::default();

    directory.insert_bid(
        BidId(FAVORABLE_BID_ID.to_string()),
        intake.notice_from_draft(favorable_notice_draft(reference))?,
    );
    directory.insert_bid(
        BidId(RISKY_BID_ID.to_string()),
        intake.notice_from_draft(risky_notice_draft(reference))?,
    );
    directory.insert_company(
        CompanyId(DEMO_COMPANY_ID.to_string()),
        intake.company_from_draft(demo_company_draft())?,
    );

    Ok(directory)
}

/// Mid-band value, ME/EPP benefit, matching stack, 15-day runway.
pub(crate) fn favorable_notice_draft(reference: NaiveDate) -> BidNoticeDraft {
    BidNoticeDraft {
        number: Some(FAVORABLE_BID_ID.to_string()),
        modality: Some("Pregão Eletrônico".to_string()),
        judging: Some("Menor Preço".to_string()),
        agency: AgencyDraft {
            name: Some("Secretaria de Estado da Economia".to_string()),
            state: Some("GO".to_string()),
            cnpj: Some("01.409.580/0001-38".to_string()),
            sphere: None,
        },
        object: Some(
            "Contratação de empresa especializada para desenvolvimento de software de gestão de contratos"
                .to_string(),
        ),
        estimated_value: Some(250_000.0),
        opening_date: Some(reference + Duration::days(15)),
        question_deadline: Some(reference + Duration::days(10)),
        challenge_deadline: Some(reference + Duration::days(11)),
        execution_days: Some(90),
        validity_months: Some(12),
        expected_payment_days: Some(30),
        small_business_benefit: Some(true),
        required_documents: vec![
            DocumentDraft {
                name: "Certidão negativa de débitos federais".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Contrato social consolidado".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Atestado de capacidade técnica".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Balanço patrimonial do último exercício".to_string(),
                category: None,
            },
        ],
        required_technologies: vec!["java".to_string(), "react".to_string()],
        qualification: Some(QualificationRequirements {
            technical: vec!["atestado compatível com o objeto".to_string()],
            economic: vec!["índices de liquidez mínimos".to_string()],
            legal: vec!["regularidade fiscal e trabalhista".to_string()],
        }),
        ..Default::default()
    }
}

/// Municipal emergency, consortium enabled, punitive contract language,
/// three-day runway.
pub(crate) fn risky_notice_draft(reference: NaiveDate) -> BidNoticeDraft {
    BidNoticeDraft {
        number: Some(RISKY_BID_ID.to_string()),
        modality: Some("Concorrência".to_string()),
        judging: Some("Técnica e Preço".to_string()),
        agency: AgencyDraft {
            name: Some("Prefeitura Municipal de São Paulo".to_string()),
            state: Some("SP".to_string()),
            cnpj: Some("46.395.000/0001-39".to_string()),
            sphere: None,
        },
        object: Some(
            "Contratação emergencial de sistema de missão crítica com operação 24x7 e SLA rigoroso, sujeito a multa"
                .to_string(),
        ),
        estimated_value: Some(2_000_000.0),
        opening_date: Some(reference + Duration::days(3)),
        question_deadline: Some(reference + Duration::days(1)),
        challenge_deadline: Some(reference + Duration::days(2)),
        execution_days: Some(20),
        expected_payment_days: Some(90),
        allows_consortium: Some(true),
        required_documents: vec![
            DocumentDraft {
                name: "Atestado de capacidade técnica 1".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Atestado de capacidade técnica 2".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Atestado de capacidade técnica 3".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Atestado de capacidade técnica 4".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Balanço patrimonial".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Demonstração de capital social mínimo".to_string(),
                category: None,
            },
            DocumentDraft {
                name: "Certidão negativa de falência".to_string(),
                category: None,
            },
        ],
        required_technologies: vec!["cobol".to_string(), "mainframe".to_string()],
        qualification: Some(QualificationRequirements {
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
        }),
        ..Default::default()
    }
}

pub(crate) fn demo_company_draft() -> CompanyProfileDraft {
    CompanyProfileDraft {
        legal_name: Some("Horizonte Tecnologia Ltda".to_string()),
        size: Some("Pequena".to_string()),
        tax_regime: Some("Simples Nacional".to_string()),
        annual_revenue: Some(2_000_000.0),
        state: Some("GO".to_string()),
        expertise_areas: vec!["desenvolvimento de software".to_string()],
        technologies: vec![
            "java".to_string(),
            "postgresql".to_string(),
            "react".to_string(),
        ],
        concurrent_capacity: Some(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edital_ai::workflows::procurement::analysis::{
        GovernmentSphere, Modality, ParticipationCall, ScoreWeights,
    };

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
    }

    #[test]
    fn demo_drafts_survive_intake() {
        let intake = NoticeIntake;

        let favorable = intake
            .notice_from_draft(favorable_notice_draft(reference()))
            .expect("favorable draft accepted");
        assert_eq!(favorable.modality, Modality::PregaoEletronico);
        assert_eq!(favorable.agency.sphere, GovernmentSphere::State);

        let risky = intake
            .notice_from_draft(risky_notice_draft(reference()))
            .expect("risky draft accepted");
        assert_eq!(risky.modality, Modality::Concorrencia);
        assert_eq!(risky.agency.sphere, GovernmentSphere::Municipal);
        // the object text flags the emergency even though the draft does not
        assert!(risky.emergency);
    }

    #[test]
    fn seeded_scenarios_split_into_participate_and_decline() {
        let directory = Arc::new(seeded_directory_at(reference()).expect("seeds load"));
        let store = Arc::new(InMemoryAnalysisStore::default());
        let notifier = Arc::new(InMemoryDecisionNotifier::default());
        let service =
            BidAnalysisService::new(directory, store, notifier.clone(), ScoreWeights::default());

        let favorable = service
            .analyze(
                &BidId(FAVORABLE_BID_ID.to_string()),
                &CompanyId(DEMO_COMPANY_ID.to_string()),
                reference(),
            )
            .expect("favorable analysis succeeds");
        assert_eq!(favorable.decision.call, ParticipationCall::Participate);

        let risky = service
            .analyze(
                &BidId(RISKY_BID_ID.to_string()),
                &CompanyId(DEMO_COMPANY_ID.to_string()),
                reference(),
            )
            .expect("risky analysis succeeds");
        assert_eq!(risky.decision.call, ParticipationCall::Decline);

        assert_eq!(notifier.events().len(), 1);
    }
}
