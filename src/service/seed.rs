use crate::db::queries;
use crate::error::Result;
use crate::models::{Tender, TenderStatus, TenderType};
use crate::scoring::ScoringEngine;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rayon::prelude::*;
use sqlx::PgPool;

pub const DEFAULT_SEED_COUNT: usize = 50;

const COUNTRIES: [&str; 10] = ["ES", "PT", "FR", "IT", "DE", "UK", "NL", "BE", "PL", "SE"];

const SECTORS: [&str; 10] = [
    "technology",
    "software development",
    "digital transformation",
    "consulting services",
    "it infrastructure",
    "telecommunications",
    "construction",
    "healthcare",
    "education",
    "public administration",
];

/// 模拟数据目录: 标题/描述/关键词/CPV 成组出现
struct CatalogEntry {
    title: &'static str,
    description: &'static str,
    keywords: &'static str,
    cpv_code: &'static str,
}

const CATALOG: [CatalogEntry; 15] = [
    CatalogEntry {
        title: "Digital Platform for Public Services",
        description: "Development of a comprehensive digital platform to modernize public services and improve citizen engagement.",
        keywords: "digital, cloud, api, saas, platform",
        cpv_code: "48000000",
    },
    CatalogEntry {
        title: "Cloud Infrastructure Migration",
        description: "Migration of legacy systems to cloud infrastructure with focus on scalability and security.",
        keywords: "cloud, infrastructure, migration, scalability",
        cpv_code: "72000000",
    },
    CatalogEntry {
        title: "Cybersecurity Assessment Services",
        description: "Comprehensive cybersecurity assessment and implementation of security best practices.",
        keywords: "cybersecurity, security, assessment, compliance",
        cpv_code: "48000000",
    },
    CatalogEntry {
        title: "API Development and Integration",
        description: "Development and integration of RESTful APIs for inter-system communication.",
        keywords: "api, development, integration, restful",
        cpv_code: "72000000",
    },
    CatalogEntry {
        title: "Data Analytics Platform",
        description: "Implementation of a data analytics platform for business intelligence and reporting.",
        keywords: "data, analytics, business intelligence, reporting",
        cpv_code: "48000000",
    },
    CatalogEntry {
        title: "Software Development Framework",
        description: "Framework development for scalable software solutions.",
        keywords: "software, development, framework, scalable",
        cpv_code: "48000000",
    },
    CatalogEntry {
        title: "Machine Learning Solutions",
        description: "Implementation of machine learning models for predictive analytics.",
        keywords: "ai, machine learning, predictive analytics",
        cpv_code: "48000000",
    },
    CatalogEntry {
        title: "Blockchain Implementation",
        description: "Blockchain-based solution for secure document management.",
        keywords: "blockchain, secure, document management",
        cpv_code: "48000000",
    },
    CatalogEntry {
        title: "SaaS Platform Development",
        description: "Development of a Software-as-a-Service platform for enterprise clients.",
        keywords: "saas, platform, enterprise, cloud",
        cpv_code: "48000000",
    },
    CatalogEntry {
        title: "IT Consulting Services",
        description: "IT consulting services for digital transformation initiatives.",
        keywords: "consulting, digital transformation, it",
        cpv_code: "72000000",
    },
    CatalogEntry {
        title: "Road Construction Project",
        description: "Construction of new road infrastructure connecting major cities.",
        keywords: "construction, infrastructure, roads",
        cpv_code: "45000000",
    },
    CatalogEntry {
        title: "Building Maintenance Services",
        description: "Maintenance and repair services for public buildings.",
        keywords: "maintenance, repair, buildings",
        cpv_code: "50000000",
    },
    CatalogEntry {
        title: "Medical Equipment Supply",
        description: "Supply of medical equipment for public hospitals.",
        keywords: "medical, equipment, healthcare, supply",
        cpv_code: "33000000",
    },
    CatalogEntry {
        title: "Educational Software Platform",
        description: "Educational software platform for online learning.",
        keywords: "education, software, online learning",
        cpv_code: "48000000",
    },
    CatalogEntry {
        title: "Telecommunications Network Upgrade",
        description: "Upgrade of telecommunications network infrastructure.",
        keywords: "telecommunications, network, infrastructure",
        cpv_code: "32000000",
    },
];

/// 预算区间 (分): 5k - 1M EUR
const BUDGET_CENTS_MIN: i64 = 500_000;
const BUDGET_CENTS_MAX: i64 = 100_000_000;

/// 生成模拟招标
///
/// 标题、描述、关键词和CPV按目录循环取用, 其余字段随机。
/// 相同的随机源和基准时间生成相同的数据。
pub fn generate_mock_tenders<R: Rng>(
    rng: &mut R,
    count: usize,
    base_date: DateTime<Utc>,
) -> Vec<Tender> {
    (0..count)
        .map(|i| {
            let entry = &CATALOG[i % CATALOG.len()];

            let cents = rng.random_range(BUDGET_CENTS_MIN..=BUDGET_CENTS_MAX);
            let budget = (BigDecimal::from(cents) / BigDecimal::from(100)).with_scale(2);

            let published_date = base_date - Duration::days(rng.random_range(0..=90));
            let deadline = base_date + Duration::days(rng.random_range(1..=60));

            // 大部分为 open: 70 / 20 / 10
            let status = match rng.random_range(0..100) {
                0..=69 => TenderStatus::Open,
                70..=89 => TenderStatus::Closed,
                _ => TenderStatus::Awarded,
            };
            let tender_type = TenderType::ALL[rng.random_range(0..TenderType::ALL.len())];

            Tender {
                title: entry.title.to_string(),
                description: Some(entry.description.to_string()),
                country: COUNTRIES[rng.random_range(0..COUNTRIES.len())].to_string(),
                sector: SECTORS[rng.random_range(0..SECTORS.len())].to_string(),
                cpv_code: Some(entry.cpv_code.to_string()),
                budget: Some(budget),
                currency: "EUR".to_string(),
                status,
                tender_type: Some(tender_type),
                deadline: Some(deadline),
                published_date: Some(published_date),
                keywords: Some(entry.keywords.to_string()),
            }
        })
        .collect()
}

/// 清空并重新填充 tenders 表, 返回写入条数
pub async fn seed_database<R: Rng>(
    pool: &PgPool,
    engine: &ScoringEngine,
    rng: &mut R,
    count: usize,
) -> Result<u64> {
    tracing::info!("Generating {} mock tenders", count);
    let tenders = generate_mock_tenders(rng, count, Utc::now());

    tracing::info!("Scoring tenders...");
    let scored: Vec<(Tender, f64)> = tenders
        .into_par_iter()
        .map(|tender| {
            let score = engine.calculate_score(&tender);
            (tender, score)
        })
        .collect();

    let mut tx = pool.begin().await?;
    let deleted = queries::delete_all(&mut tx).await?;
    tracing::info!("Removed {} existing tenders", deleted);

    let mut inserted = 0;
    for chunk in scored.chunks(1000) {
        inserted += queries::insert_batch(&mut tx, chunk).await?;
    }
    tx.commit().await?;

    tracing::info!("Seeded {} tenders with computed scores", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base_date() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let tenders = generate_mock_tenders(&mut rng, DEFAULT_SEED_COUNT, base_date());
        assert_eq!(tenders.len(), 50);
        assert!(generate_mock_tenders(&mut rng, 0, base_date()).is_empty());
    }

    #[test]
    fn test_same_seed_same_tenders() {
        let a = generate_mock_tenders(&mut StdRng::seed_from_u64(42), 20, base_date());
        let b = generate_mock_tenders(&mut StdRng::seed_from_u64(42), 20, base_date());
        assert_eq!(a, b);
    }

    #[test]
    fn test_catalog_fields_stay_together() {
        let mut rng = StdRng::seed_from_u64(1);
        let tenders = generate_mock_tenders(&mut rng, 30, base_date());

        for (i, tender) in tenders.iter().enumerate() {
            let entry = &CATALOG[i % CATALOG.len()];
            assert_eq!(tender.title, entry.title);
            assert_eq!(tender.description.as_deref(), Some(entry.description));
            assert_eq!(tender.keywords.as_deref(), Some(entry.keywords));
            assert_eq!(tender.cpv_code.as_deref(), Some(entry.cpv_code));
        }
    }

    #[test]
    fn test_generated_values_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let base = base_date();
        let min_budget = BigDecimal::from(5_000);
        let max_budget = BigDecimal::from(1_000_000);

        for tender in generate_mock_tenders(&mut rng, 200, base) {
            assert!(tender.validate().is_ok());

            let budget = tender.budget.unwrap();
            assert!(budget >= min_budget && budget <= max_budget);

            let published = tender.published_date.unwrap();
            assert!(published <= base && published >= base - Duration::days(90));

            let deadline = tender.deadline.unwrap();
            assert!(deadline > base && deadline <= base + Duration::days(60));

            assert_ne!(tender.status, TenderStatus::Cancelled);
            assert!(COUNTRIES.contains(&tender.country.as_str()));
            assert!(SECTORS.contains(&tender.sector.as_str()));
        }
    }

    #[test]
    fn test_generated_tenders_score_in_bounds() {
        let engine = ScoringEngine::default();
        let mut rng = StdRng::seed_from_u64(3);

        for tender in generate_mock_tenders(&mut rng, 100, base_date()) {
            let score = engine.calculate_score(&tender);
            assert!((0.0..=100.0).contains(&score));
        }
    }
}
