use super::tender::{TenderRecord, TenderStatus, TenderType};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// 排序字段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Score,
    Budget,
    PublishedDate,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Score => "score",
            SortField::Budget => "budget",
            SortField::PublishedDate => "published_date",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// GET /tenders 查询参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderQuery {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub status: Option<TenderStatus>,
    #[serde(default)]
    pub tender_type: Option<TenderType>,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for TenderQuery {
    fn default() -> Self {
        Self {
            country: None,
            sector: None,
            status: None,
            tender_type: None,
            min_score: None,
            max_score: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl TenderQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < 1 {
            return Err(AppError::Validation("page must be >= 1".to_string()));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        for (name, bound) in [("min_score", self.min_score), ("max_score", self.max_score)] {
            if let Some(value) = bound {
                if !(0.0..=100.0).contains(&value) {
                    return Err(AppError::Validation(format!(
                        "{} must be between 0 and 100, got {}",
                        name, value
                    )));
                }
            }
        }
        Ok(())
    }

    /// 国家代码统一为大写
    pub fn country_filter(&self) -> Option<String> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
    }

    /// ILIKE 模式
    pub fn sector_pattern(&self) -> Option<String> {
        self.sector
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s))
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// 分页响应
#[derive(Debug, Clone, Serialize)]
pub struct TenderListResponse {
    pub items: Vec<TenderRecord>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}
