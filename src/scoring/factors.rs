//! 单项评分因子, 每个函数只读取招标的相关字段。

use crate::models::{TenderStatus, TenderType};
use bigdecimal::BigDecimal;
use indexmap::IndexSet;

pub const BUDGET_MAX: f64 = 30.0;
pub const COUNTRY_PRIORITY: f64 = 20.0;
pub const COUNTRY_OTHER: f64 = 5.0;
pub const SECTOR_TARGET: f64 = 20.0;
pub const SECTOR_OTHER: f64 = 5.0;
pub const TYPE_RELEVANT: f64 = 10.0;
pub const TYPE_PENALTY: f64 = -5.0;
pub const STATUS_OPEN: f64 = 5.0;

/// 预算档位 (下界, 分值), 从高到低, 下界包含
const BUDGET_TIERS: [(i64, f64); 4] = [
    (500_000, BUDGET_MAX),
    (100_000, 25.0),
    (50_000, 15.0),
    (10_000, 5.0),
];

/// 预算因子 (0-30), 一律按 EUR 处理
pub fn budget_points(budget: Option<&BigDecimal>) -> f64 {
    let Some(budget) = budget else {
        return 0.0;
    };

    BUDGET_TIERS
        .iter()
        .find(|(floor, _)| *budget >= BigDecimal::from(*floor))
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

/// 国家因子 (5-20)
pub fn country_points(country: &str, priority_countries: &IndexSet<String>) -> f64 {
    if priority_countries
        .iter()
        .any(|c| c.eq_ignore_ascii_case(country))
    {
        COUNTRY_PRIORITY
    } else {
        COUNTRY_OTHER
    }
}

/// 行业因子 (0-20): 任一目标词是行业的子串即命中
pub fn sector_points(sector: &str, target_sectors: &IndexSet<String>) -> f64 {
    if sector.is_empty() {
        return 0.0;
    }

    let sector = sector.to_lowercase();
    if target_sectors
        .iter()
        .any(|target| sector.contains(&target.to_lowercase()))
    {
        SECTOR_TARGET
    } else {
        SECTOR_OTHER
    }
}

/// 关键词 + 描述中出现的配置词数量, 每个词最多计一次
pub fn keyword_matches(
    keywords: Option<&str>,
    description: Option<&str>,
    relevant_keywords: &IndexSet<String>,
) -> usize {
    let mut text = String::new();
    for part in [keywords, description].into_iter().flatten() {
        if !part.is_empty() {
            text.push_str(&part.to_lowercase());
            text.push(' ');
        }
    }

    if text.is_empty() {
        return 0;
    }

    relevant_keywords
        .iter()
        .filter(|term| text.contains(&term.to_lowercase()))
        .count()
}

/// 关键词因子 (0-15)
pub fn keyword_points(
    keywords: Option<&str>,
    description: Option<&str>,
    relevant_keywords: &IndexSet<String>,
) -> f64 {
    match keyword_matches(keywords, description, relevant_keywords) {
        0 => 0.0,
        1..=2 => 5.0,
        3..=4 => 10.0,
        _ => 15.0,
    }
}

/// 合同类型因子 (-5 到 10), 先判断低相关类型
pub fn tender_type_points(
    tender_type: Option<TenderType>,
    less_relevant_types: &IndexSet<TenderType>,
) -> f64 {
    match tender_type {
        None => 0.0,
        Some(kind) if less_relevant_types.contains(&kind) => TYPE_PENALTY,
        Some(TenderType::Services | TenderType::Supplies) => TYPE_RELEVANT,
        Some(TenderType::Works | TenderType::Concession) => 0.0,
    }
}

/// 状态因子 (0-5)
pub fn status_points(status: TenderStatus) -> f64 {
    match status {
        TenderStatus::Open => STATUS_OPEN,
        TenderStatus::Closed | TenderStatus::Awarded | TenderStatus::Cancelled => 0.0,
    }
}
