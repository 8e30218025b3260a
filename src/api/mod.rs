pub mod handlers;

pub use handlers::*;

use crate::service::TenderService;
use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

/// 允许跨域访问的前端地址 (Vite / CRA 开发服务器)
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// 跨域配置: 允许凭证, 方法和请求头按请求回显
pub fn cors_layer() -> CorsLayer {
    let origins = ALLOWED_ORIGINS.map(HeaderValue::from_static);
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// 构建路由
pub fn router(service: Arc<TenderService>) -> Router {
    let tender_routes = Router::new()
        .route("/tenders", get(list_tenders).post(create_tender))
        .route("/tenders/:tender_id", get(get_tender))
        .route("/tenders/:tender_id/score", get(explain_tender))
        .route("/countries", get(list_countries))
        .route("/sectors", get(list_sectors))
        .with_state(service);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(tender_routes)
        .layer(ServiceBuilder::new().layer(cors_layer()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringEngine;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    /// 不建立连接的路由 (仅访问无需数据库的接口)
    fn lazy_router() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/opentender_test")
            .unwrap();
        let service = Arc::new(TenderService::new(pool, Arc::new(ScoringEngine::default())));
        router(service)
    }

    #[tokio::test]
    async fn test_allowed_origin_gets_cors_headers() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();

        let response = lazy_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_preflight_mirrors_method_and_headers() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/tenders")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = lazy_router().oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "POST"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "content-type"
        );
    }

    #[tokio::test]
    async fn test_unknown_origin_is_not_allowed() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap();

        let response = lazy_router().oneshot(request).await.unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
