use crate::models::TenderType;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIORITY_COUNTRIES: &[&str] = &["ES", "PT", "FR", "IT", "DE", "UK"];

pub const DEFAULT_TARGET_SECTORS: &[&str] = &[
    "technology",
    "software",
    "consulting",
    "digital",
    "it",
    "telecommunications",
];

pub const DEFAULT_RELEVANT_KEYWORDS: &[&str] = &[
    "digital",
    "software",
    "cloud",
    "api",
    "saas",
    "platform",
    "data",
    "analytics",
    "ai",
    "machine learning",
    "blockchain",
    "cybersecurity",
];

pub const DEFAULT_LESS_RELEVANT_TYPES: &[TenderType] = &[TenderType::Works, TenderType::Concession];

/// 评分配置 (构造后不可变)
///
/// 每个列表在未提供或为空时回退到内置默认值。匹配时忽略大小写,
/// 构造时不做任何规范化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    priority_countries: IndexSet<String>,
    target_sectors: IndexSet<String>,
    relevant_keywords: IndexSet<String>,
    less_relevant_types: IndexSet<TenderType>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            priority_countries: to_set(DEFAULT_PRIORITY_COUNTRIES),
            target_sectors: to_set(DEFAULT_TARGET_SECTORS),
            relevant_keywords: to_set(DEFAULT_RELEVANT_KEYWORDS),
            less_relevant_types: DEFAULT_LESS_RELEVANT_TYPES.iter().copied().collect(),
        }
    }
}

impl ScoringConfig {
    pub fn new(
        priority_countries: Option<Vec<String>>,
        target_sectors: Option<Vec<String>>,
        relevant_keywords: Option<Vec<String>>,
    ) -> Self {
        Self::from_overrides(ScoringOverrides {
            priority_countries,
            target_sectors,
            relevant_keywords,
            less_relevant_types: None,
        })
    }

    pub fn from_overrides(overrides: ScoringOverrides) -> Self {
        let defaults = Self::default();
        Self {
            priority_countries: or_default(overrides.priority_countries, defaults.priority_countries),
            target_sectors: or_default(overrides.target_sectors, defaults.target_sectors),
            relevant_keywords: or_default(overrides.relevant_keywords, defaults.relevant_keywords),
            less_relevant_types: or_default(
                overrides.less_relevant_types,
                defaults.less_relevant_types,
            ),
        }
    }

    pub fn priority_countries(&self) -> &IndexSet<String> {
        &self.priority_countries
    }

    pub fn target_sectors(&self) -> &IndexSet<String> {
        &self.target_sectors
    }

    pub fn relevant_keywords(&self) -> &IndexSet<String> {
        &self.relevant_keywords
    }

    pub fn less_relevant_types(&self) -> &IndexSet<TenderType> {
        &self.less_relevant_types
    }
}

fn to_set(items: &[&str]) -> IndexSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn or_default<T: std::hash::Hash + Eq>(items: Option<Vec<T>>, default: IndexSet<T>) -> IndexSet<T> {
    match items {
        Some(items) if !items.is_empty() => items.into_iter().collect(),
        _ => default,
    }
}

/// 配置文件/环境变量中的 `scoring` 段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringOverrides {
    #[serde(default)]
    pub priority_countries: Option<Vec<String>>,
    #[serde(default)]
    pub target_sectors: Option<Vec<String>>,
    #[serde(default)]
    pub relevant_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub less_relevant_types: Option<Vec<TenderType>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.priority_countries().len(), 6);
        assert!(config.priority_countries().contains("ES"));
        assert!(config.target_sectors().contains("telecommunications"));
        assert_eq!(config.relevant_keywords().len(), 12);
        assert!(config.relevant_keywords().contains("machine learning"));
        assert!(config.less_relevant_types().contains(&TenderType::Works));
        assert!(config.less_relevant_types().contains(&TenderType::Concession));
    }

    #[test]
    fn test_empty_override_falls_back_to_default() {
        let config = ScoringConfig::new(Some(vec![]), None, Some(vec![]));
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_override_replaces_only_given_list() {
        let config = ScoringConfig::new(Some(vec!["br".to_string(), "ar".to_string()]), None, None);

        assert_eq!(
            config.priority_countries().iter().collect::<Vec<_>>(),
            vec!["br", "ar"]
        );
        assert_eq!(config.target_sectors(), ScoringConfig::default().target_sectors());
    }

    #[test]
    fn test_duplicate_terms_collapse() {
        let config = ScoringConfig::new(
            None,
            None,
            Some(vec!["cloud".to_string(), "api".to_string(), "cloud".to_string()]),
        );
        assert_eq!(config.relevant_keywords().len(), 2);
    }

    #[test]
    fn test_overrides_parse_from_json() {
        let json = r#"{"priority_countries": ["NL"], "less_relevant_types": ["works"]}"#;
        let overrides: ScoringOverrides = serde_json::from_str(json).unwrap();
        let config = ScoringConfig::from_overrides(overrides);

        assert!(config.priority_countries().contains("NL"));
        assert_eq!(config.less_relevant_types().len(), 1);
        assert!(!config.less_relevant_types().contains(&TenderType::Concession));
    }
}
