use crate::models::{Tender, TenderQuery, TenderRow};
use chrono::Utc;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use std::time::Duration;

/// 批量插入的执行超时
const INSERT_TIMEOUT: Duration = Duration::from_secs(30);

const TENDER_COLUMNS: &str = "id, title, description, country, sector, cpv_code, budget, currency, \
     status, tender_type, deadline, published_date, keywords, score, created_at, updated_at";

/// 追加 WHERE 条件 (列表与计数共用)
fn push_filters(builder: &mut QueryBuilder<'static, Postgres>, query: &TenderQuery) {
    builder.push(" WHERE 1 = 1");

    if let Some(country) = query.country_filter() {
        builder.push(" AND country = ").push_bind(country);
    }
    if let Some(pattern) = query.sector_pattern() {
        builder.push(" AND sector ILIKE ").push_bind(pattern);
    }
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(tender_type) = query.tender_type {
        builder.push(" AND tender_type = ").push_bind(tender_type.as_str());
    }
    if let Some(min_score) = query.min_score {
        builder.push(" AND score >= ").push_bind(min_score);
    }
    if let Some(max_score) = query.max_score {
        builder.push(" AND score <= ").push_bind(max_score);
    }
}

/// 计数语句 (分页前的总数)
pub fn count_query(query: &TenderQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT count(*) FROM tenders");
    push_filters(&mut builder, query);
    builder
}

/// 列表语句: 过滤 + 排序 (空值置后, id 兜底保证分页稳定) + 分页
pub fn list_query(query: &TenderQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM tenders", TENDER_COLUMNS));
    push_filters(&mut builder, query);

    let order = query.sort_order.keyword();
    builder.push(format_args!(
        " ORDER BY {} {} NULLS LAST, id {}",
        query.sort_by.column(),
        order,
        order
    ));
    builder
        .push(" LIMIT ")
        .push_bind(query.limit())
        .push(" OFFSET ")
        .push_bind(query.offset());
    builder
}

/// 统计过滤后的总数 (分页前)
pub async fn count_tenders(pool: &PgPool, query: &TenderQuery) -> Result<i64, sqlx::Error> {
    count_query(query)
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await
}

/// 分页查询招标列表
pub async fn list_tenders(pool: &PgPool, query: &TenderQuery) -> Result<Vec<TenderRow>, sqlx::Error> {
    list_query(query)
        .build_query_as::<TenderRow>()
        .fetch_all(pool)
        .await
}

/// 按ID查询
pub async fn get_tender(pool: &PgPool, tender_id: i64) -> Result<Option<TenderRow>, sqlx::Error> {
    sqlx::query_as::<_, TenderRow>(&format!(
        "SELECT {} FROM tenders WHERE id = $1",
        TENDER_COLUMNS
    ))
    .bind(tender_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_countries(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT DISTINCT country FROM tenders ORDER BY country")
        .fetch_all(pool)
        .await
}

pub async fn list_sectors(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT DISTINCT sector FROM tenders ORDER BY sector")
        .fetch_all(pool)
        .await
}

/// 插入单条招标 (分数在写入时计算)
pub async fn insert_tender(
    pool: &PgPool,
    tender: &Tender,
    score: f64,
) -> Result<TenderRow, sqlx::Error> {
    sqlx::query_as::<_, TenderRow>(&format!(
        r#"
        INSERT INTO tenders (
            title, description, country, sector, cpv_code,
            budget, currency, status, tender_type,
            deadline, published_date, keywords, score
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {}
        "#,
        TENDER_COLUMNS
    ))
    .bind(&tender.title)
    .bind(tender.description.as_deref())
    .bind(&tender.country)
    .bind(&tender.sector)
    .bind(tender.cpv_code.as_deref())
    .bind(tender.budget.clone())
    .bind(&tender.currency)
    .bind(tender.status.as_str())
    .bind(tender.tender_type.map(|t| t.as_str()))
    .bind(tender.deadline)
    .bind(tender.published_date.unwrap_or_else(Utc::now))
    .bind(tender.keywords.as_deref())
    .bind(score)
    .fetch_one(pool)
    .await
}

/// 清空招标表
pub async fn delete_all(conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tenders").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

/// 批量插入已评分的招标
pub async fn insert_batch(
    conn: &mut PgConnection,
    scored: &[(Tender, f64)],
) -> Result<u64, sqlx::Error> {
    if scored.is_empty() {
        return Ok(0);
    }

    tracing::debug!("开始构建批量插入语句, {} 条记录", scored.len());
    let start_time = std::time::Instant::now();
    let now = Utc::now();

    let mut query_builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO tenders (
            title, description, country, sector, cpv_code,
            budget, currency, status, tender_type,
            deadline, published_date, keywords, score
        ) ",
    );

    query_builder.push_values(scored, |mut b, (tender, score)| {
        b.push_bind(&tender.title)
            .push_bind(tender.description.as_deref())
            .push_bind(&tender.country)
            .push_bind(&tender.sector)
            .push_bind(tender.cpv_code.as_deref())
            .push_bind(tender.budget.clone())
            .push_bind(&tender.currency)
            .push_bind(tender.status.as_str())
            .push_bind(tender.tender_type.map(|t| t.as_str()))
            .push_bind(tender.deadline)
            .push_bind(tender.published_date.unwrap_or(now))
            .push_bind(tender.keywords.as_deref())
            .push_bind(*score);
    });

    tracing::debug!("SQL构建完成, 耗时: {:?}", start_time.elapsed());

    // 添加超时控制: 30秒
    let execute_start = std::time::Instant::now();
    let execute_result = tokio::time::timeout(
        INSERT_TIMEOUT,
        query_builder.build().execute(&mut *conn),
    )
    .await;

    match execute_result {
        Ok(Ok(result)) => {
            tracing::info!(
                "✓ INSERT执行成功, 影响 {} 行, 耗时: {:?}",
                result.rows_affected(),
                execute_start.elapsed()
            );
            Ok(result.rows_affected())
        }
        Ok(Err(e)) => {
            tracing::error!(
                "✗ INSERT执行失败, 耗时: {:?}, 错误: {:?}",
                execute_start.elapsed(),
                e
            );
            Err(e)
        }
        Err(_) => {
            tracing::error!("✗ INSERT操作超时 (>{:?})!", INSERT_TIMEOUT);
            Err(insert_timeout_error())
        }
    }
}

/// 语句执行超时 (与连接池获取超时区分)
fn insert_timeout_error() -> sqlx::Error {
    sqlx::Error::Protocol(format!("insert timed out after {:?}", INSERT_TIMEOUT))
}
