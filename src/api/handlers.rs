use crate::error::AppError;
use crate::models::{Tender, TenderListResponse, TenderQuery, TenderRecord};
use crate::scoring::ScoreBreakdown;
use crate::service::TenderService;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// API 基本信息
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "OpenTender Radar API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Public procurement tenders with explainable fit scoring",
    }))
}

/// 健康检查
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// 分页列表 (过滤 + 排序)
pub async fn list_tenders(
    State(service): State<Arc<TenderService>>,
    Query(query): Query<TenderQuery>,
) -> Result<Json<TenderListResponse>, AppError> {
    Ok(Json(service.list(&query).await?))
}

pub async fn get_tender(
    State(service): State<Arc<TenderService>>,
    Path(tender_id): Path<i64>,
) -> Result<Json<TenderRecord>, AppError> {
    Ok(Json(service.get(tender_id).await?))
}

/// 分项得分 (按需重新计算)
pub async fn explain_tender(
    State(service): State<Arc<TenderService>>,
    Path(tender_id): Path<i64>,
) -> Result<Json<ScoreBreakdown>, AppError> {
    Ok(Json(service.explain(tender_id).await?))
}

/// 新建招标, 写入时计算分数
pub async fn create_tender(
    State(service): State<Arc<TenderService>>,
    Json(tender): Json<Tender>,
) -> Result<(StatusCode, Json<TenderRecord>), AppError> {
    let record = service.create(tender).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_countries(
    State(service): State<Arc<TenderService>>,
) -> Result<Json<Value>, AppError> {
    let countries = service.countries().await?;
    Ok(Json(json!({ "countries": countries })))
}

pub async fn list_sectors(
    State(service): State<Arc<TenderService>>,
) -> Result<Json<Value>, AppError> {
    let sectors = service.sectors().await?;
    Ok(Json(json!({ "sectors": sectors })))
}
