use crate::error::AppError;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// 招标状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenderStatus {
    #[default]
    Open,
    Closed,
    Awarded,
    Cancelled,
}

impl TenderStatus {
    pub const ALL: [TenderStatus; 4] = [
        TenderStatus::Open,
        TenderStatus::Closed,
        TenderStatus::Awarded,
        TenderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TenderStatus::Open => "open",
            TenderStatus::Closed => "closed",
            TenderStatus::Awarded => "awarded",
            TenderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown tender status: {}", s)))
    }
}

/// 合同类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenderType {
    Works,
    Supplies,
    Services,
    Concession,
}

impl TenderType {
    pub const ALL: [TenderType; 4] = [
        TenderType::Works,
        TenderType::Supplies,
        TenderType::Services,
        TenderType::Concession,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TenderType::Works => "works",
            TenderType::Supplies => "supplies",
            TenderType::Services => "services",
            TenderType::Concession => "concession",
        }
    }
}

impl fmt::Display for TenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenderType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenderType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown tender type: {}", s)))
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// 预算以 JSON 数字输出 (BigDecimal 默认序列化为字符串)
fn serialize_budget<S: Serializer>(
    budget: &Option<BigDecimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match budget.as_ref().and_then(ToPrimitive::to_f64) {
        Some(value) => serializer.serialize_f64(value),
        None => serializer.serialize_none(),
    }
}

/// 招标信息 (评分引擎的输入)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub country: String,
    pub sector: String,
    #[serde(default)]
    pub cpv_code: Option<String>,
    #[serde(default, serialize_with = "serialize_budget")]
    pub budget: Option<BigDecimal>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: TenderStatus,
    #[serde(default)]
    pub tender_type: Option<TenderType>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    /// 逗号分隔的关键词
    #[serde(default)]
    pub keywords: Option<String>,
}

impl Tender {
    /// 规范化: 国家代码统一大写 (与列表过滤一致)
    pub fn normalize(mut self) -> Self {
        self.country = self.country.trim().to_uppercase();
        self
    }

    /// 入库/评分前的边界校验
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("title", &self.title, 1, 500)?;
        check_length("country", &self.country, 2, 3)?;
        check_length("sector", &self.sector, 1, 100)?;

        if self.currency.chars().count() > 3 {
            return Err(AppError::Validation(format!(
                "currency must be at most 3 characters, got {:?}",
                self.currency
            )));
        }

        if let Some(budget) = &self.budget {
            if *budget <= BigDecimal::zero() {
                return Err(AppError::Validation(format!(
                    "budget must be greater than 0, got {}",
                    budget
                )));
            }
        }

        Ok(())
    }
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {} characters, got {}",
            field, min, max, len
        )));
    }
    Ok(())
}

/// 已入库的招标 (tenders 表)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenderRecord {
    pub id: i64,
    #[serde(flatten)]
    pub tender: Tender,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// tenders 表原始行, 枚举列以文本存储
#[derive(Debug, Clone, FromRow)]
pub struct TenderRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub country: String,
    pub sector: String,
    pub cpv_code: Option<String>,
    pub budget: Option<BigDecimal>,
    pub currency: String,
    pub status: String,
    pub tender_type: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub published_date: Option<DateTime<Utc>>,
    pub keywords: Option<String>,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TenderRow> for TenderRecord {
    type Error = AppError;

    fn try_from(row: TenderRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |err: AppError| AppError::CorruptRow(format!("tender {}: {}", id, err));
        let status = row.status.parse::<TenderStatus>().map_err(corrupt)?;
        let tender_type = row
            .tender_type
            .as_deref()
            .map(str::parse::<TenderType>)
            .transpose()
            .map_err(corrupt)?;

        Ok(TenderRecord {
            id,
            tender: Tender {
                title: row.title,
                description: row.description,
                country: row.country,
                sector: row.sector,
                cpv_code: row.cpv_code,
                budget: row.budget,
                currency: row.currency,
                status,
                tender_type,
                deadline: row.deadline,
                published_date: row.published_date,
                keywords: row.keywords,
            },
            score: row.score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
