use opentender_radar::{api, create_pool, init_schema, AppConfig, ScoringEngine, TenderService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 评分引擎: 配置在启动时确定, 之后只读
    let engine = Arc::new(ScoringEngine::new(config.scoring_config()));
    info!(
        "Scoring engine ready: {} priority countries, {} target sectors, {} keywords",
        engine.config().priority_countries().len(),
        engine.config().target_sectors().len(),
        engine.config().relevant_keywords().len()
    );

    // 创建数据库连接池
    let pool = create_pool(&config.database).await?;
    info!("Database pool created");
    init_schema(&pool).await?;

    let service = Arc::new(TenderService::new(pool, engine));
    let app = api::router(service);

    // 启动服务器
    let addr = config.bind_addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /tenders                - filtered, sorted, paginated list");
    info!("  POST /tenders                - create (scored at write time)");
    info!("  GET  /tenders/:id            - single tender");
    info!("  GET  /tenders/:id/score      - score breakdown");
    info!("  GET  /countries, /sectors    - distinct values");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
