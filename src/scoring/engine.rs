use super::config::ScoringConfig;
use super::factors;
use crate::models::Tender;
use serde::Serialize;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// 六个因子的未截断分值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScores {
    pub budget: f64,
    pub country: f64,
    pub sector: f64,
    pub keywords: f64,
    pub tender_type: f64,
    pub status: f64,
}

impl FactorScores {
    /// 截断前的原始总分
    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, points)| points).sum()
    }

    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("budget", self.budget),
            ("country", self.country),
            ("sector", self.sector),
            ("keywords", self.keywords),
            ("tender_type", self.tender_type),
            ("status", self.status),
        ]
    }
}

/// explain_score 的输出: {"total": .., "breakdown": {..}}
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub breakdown: FactorScores,
}

/// 招标评分引擎
///
/// 纯函数、无内部状态: 同一配置下相同输入总是得到相同分数,
/// 可在多个线程间共享 (`Arc<ScoringEngine>`)。
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// 计算 0-100 的匹配分
    pub fn calculate_score(&self, tender: &Tender) -> f64 {
        clamp_score(self.factor_scores(tender).sum())
    }

    /// 分项解释, total 与 calculate_score 一致
    pub fn explain_score(&self, tender: &Tender) -> ScoreBreakdown {
        let breakdown = self.factor_scores(tender);
        ScoreBreakdown {
            total: clamp_score(breakdown.sum()),
            breakdown,
        }
    }

    pub fn factor_scores(&self, tender: &Tender) -> FactorScores {
        let config = &self.config;
        FactorScores {
            budget: factors::budget_points(tender.budget.as_ref()),
            country: factors::country_points(&tender.country, config.priority_countries()),
            sector: factors::sector_points(&tender.sector, config.target_sectors()),
            keywords: factors::keyword_points(
                tender.keywords.as_deref(),
                tender.description.as_deref(),
                config.relevant_keywords(),
            ),
            tender_type: factors::tender_type_points(
                tender.tender_type,
                config.less_relevant_types(),
            ),
            status: factors::status_points(tender.status),
        }
    }
}

fn clamp_score(raw: f64) -> f64 {
    raw.clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TenderStatus, TenderType};
    use bigdecimal::BigDecimal;

    fn tender(
        budget: Option<i64>,
        country: &str,
        sector: &str,
        keywords: Option<&str>,
        description: Option<&str>,
        tender_type: Option<TenderType>,
        status: TenderStatus,
    ) -> Tender {
        Tender {
            title: "Test tender".to_string(),
            description: description.map(str::to_string),
            country: country.to_string(),
            sector: sector.to_string(),
            cpv_code: None,
            budget: budget.map(BigDecimal::from),
            currency: "EUR".to_string(),
            status,
            tender_type,
            deadline: None,
            published_date: None,
            keywords: keywords.map(str::to_string),
        }
    }

    #[test]
    fn test_full_match_example() {
        let engine = ScoringEngine::default();
        let t = tender(
            Some(600_000),
            "ES",
            "software development",
            Some("cloud, api, saas"),
            Some(""),
            Some(TenderType::Services),
            TenderStatus::Open,
        );

        let explained = engine.explain_score(&t);
        assert_eq!(
            explained.breakdown,
            FactorScores {
                budget: 30.0,
                country: 20.0,
                sector: 20.0,
                keywords: 10.0,
                tender_type: 10.0,
                status: 5.0,
            }
        );
        assert_eq!(explained.total, 95.0);
        assert_eq!(engine.calculate_score(&t), 95.0);
    }

    #[test]
    fn test_low_fit_example() {
        let engine = ScoringEngine::default();
        let t = tender(
            None,
            "BR",
            "construction",
            None,
            None,
            Some(TenderType::Works),
            TenderStatus::Closed,
        );

        let explained = engine.explain_score(&t);
        assert_eq!(
            explained.breakdown,
            FactorScores {
                budget: 0.0,
                country: 5.0,
                sector: 5.0,
                keywords: 0.0,
                tender_type: -5.0,
                status: 0.0,
            }
        );
        assert_eq!(explained.total, 5.0);
    }

    #[test]
    fn test_negative_raw_sum_clamps_to_zero() {
        let engine = ScoringEngine::default();
        let t = tender(
            None,
            "BR",
            "",
            None,
            None,
            Some(TenderType::Works),
            TenderStatus::Cancelled,
        );

        let explained = engine.explain_score(&t);
        // country 5 - works 5
        assert_eq!(explained.breakdown.sum(), 0.0);
        assert_eq!(explained.total, 0.0);

        let breakdown = FactorScores {
            budget: 0.0,
            country: 0.0,
            sector: 0.0,
            keywords: 0.0,
            tender_type: -5.0,
            status: 0.0,
        };
        assert_eq!(clamp_score(breakdown.sum()), 0.0);
    }

    #[test]
    fn test_explain_matches_calculate() {
        let engine = ScoringEngine::default();
        let samples = [
            tender(Some(9_999), "pt", "it infrastructure", Some("data"), None, None, TenderStatus::Open),
            tender(Some(75_000), "FR", "healthcare", None, Some("AI platform"), Some(TenderType::Supplies), TenderStatus::Awarded),
            tender(Some(250_000), "DE", "digital transformation", Some("digital, cloud, api, saas, platform"), Some("data analytics"), Some(TenderType::Concession), TenderStatus::Open),
        ];

        for t in &samples {
            let explained = engine.explain_score(t);
            assert_eq!(explained.total, engine.calculate_score(t));
            assert_eq!(clamp_score(explained.breakdown.sum()), explained.total);
            assert!((0.0..=100.0).contains(&explained.total));
        }
    }

    #[test]
    fn test_score_is_deterministic() {
        let engine = ScoringEngine::default();
        let t = tender(
            Some(120_000),
            "IT",
            "consulting services",
            Some("digital transformation, it"),
            Some("IT consulting services for digital transformation initiatives."),
            Some(TenderType::Services),
            TenderStatus::Open,
        );

        let first = engine.calculate_score(&t);
        let second = engine.calculate_score(&t);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_custom_config_changes_country_factor() {
        let engine = ScoringEngine::new(ScoringConfig::new(
            Some(vec!["BR".to_string()]),
            None,
            None,
        ));
        let t = tender(None, "br", "construction", None, None, None, TenderStatus::Open);

        assert_eq!(engine.factor_scores(&t).country, 20.0);
        assert_eq!(ScoringEngine::default().factor_scores(&t).country, 5.0);
    }

    #[test]
    fn test_breakdown_json_keys() {
        let engine = ScoringEngine::default();
        let t = tender(None, "ES", "software", None, None, None, TenderStatus::Open);
        let json = serde_json::to_value(engine.explain_score(&t)).unwrap();

        assert_eq!(json["total"], 45.0);
        let keys: Vec<&String> = json["breakdown"].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 6);
        for key in ["budget", "country", "sector", "keywords", "tender_type", "status"] {
            assert!(json["breakdown"].get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoringEngine>();
    }
}
