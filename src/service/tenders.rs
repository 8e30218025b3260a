use crate::db::queries;
use crate::error::{AppError, Result};
use crate::models::{Tender, TenderListResponse, TenderQuery, TenderRecord, TenderRow};
use crate::scoring::{ScoreBreakdown, ScoringEngine};
use sqlx::PgPool;
use std::sync::Arc;

/// 招标查询/写入服务
///
/// 写入时计算分数并落库; 解释接口按当前引擎配置重新计算。
pub struct TenderService {
    pool: PgPool,
    engine: Arc<ScoringEngine>,
}

impl TenderService {
    pub fn new(pool: PgPool, engine: Arc<ScoringEngine>) -> Self {
        Self { pool, engine }
    }

    /// 过滤 + 排序 + 分页
    pub async fn list(&self, query: &TenderQuery) -> Result<TenderListResponse> {
        query.validate()?;

        let total = queries::count_tenders(&self.pool, query).await?;
        let rows = queries::list_tenders(&self.pool, query).await?;
        let items = into_records(rows)?;

        tracing::debug!(
            "Listed {} of {} tenders (page {}, size {})",
            items.len(),
            total,
            query.page,
            query.page_size
        );

        Ok(TenderListResponse {
            items,
            total,
            page: query.page,
            page_size: query.page_size,
        })
    }

    pub async fn get(&self, tender_id: i64) -> Result<TenderRecord> {
        let Some(row) = queries::get_tender(&self.pool, tender_id).await? else {
            tracing::warn!("Tender {} not found", tender_id);
            return Err(AppError::NotFound("Tender not found".to_string()));
        };
        TenderRecord::try_from(row)
    }

    /// 重新计算分项得分
    pub async fn explain(&self, tender_id: i64) -> Result<ScoreBreakdown> {
        let record = self.get(tender_id).await?;
        Ok(self.engine.explain_score(&record.tender))
    }

    /// 规范化、校验、评分并写入
    pub async fn create(&self, tender: Tender) -> Result<TenderRecord> {
        let tender = tender.normalize();
        tender.validate()?;

        let score = self.engine.calculate_score(&tender);
        let row = queries::insert_tender(&self.pool, &tender, score).await?;
        tracing::info!("Tender {} created with score {}", row.id, score);

        TenderRecord::try_from(row)
    }

    pub async fn countries(&self) -> Result<Vec<String>> {
        Ok(queries::list_countries(&self.pool).await?)
    }

    pub async fn sectors(&self) -> Result<Vec<String>> {
        Ok(queries::list_sectors(&self.pool).await?)
    }
}

fn into_records(rows: Vec<TenderRow>) -> Result<Vec<TenderRecord>> {
    rows.into_iter().map(TenderRecord::try_from).collect()
}
