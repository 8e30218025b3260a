use crate::config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// 创建数据库连接池
pub async fn create_pool(database: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut connect_options = PgConnectOptions::from_str(&database.url)?;

    // 设置慢查询日志阈值为 5秒
    connect_options = connect_options.log_slow_statements(
        tracing::log::LevelFilter::Warn,
        Duration::from_secs(5),
    );

    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options)
        .await
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS tenders (
        id             BIGSERIAL PRIMARY KEY,
        title          TEXT NOT NULL,
        description    TEXT,
        country        TEXT NOT NULL,
        sector         TEXT NOT NULL,
        cpv_code       TEXT,
        budget         NUMERIC(15, 2),
        currency       TEXT NOT NULL DEFAULT 'EUR',
        status         TEXT NOT NULL DEFAULT 'open',
        tender_type    TEXT,
        deadline       TIMESTAMPTZ,
        published_date TIMESTAMPTZ DEFAULT now(),
        keywords       TEXT,
        score          DOUBLE PRECISION NOT NULL DEFAULT 0,
        created_at     TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at     TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_tenders_title ON tenders (title)",
    "CREATE INDEX IF NOT EXISTS idx_tenders_country ON tenders (country)",
    "CREATE INDEX IF NOT EXISTS idx_tenders_sector ON tenders (sector)",
    "CREATE INDEX IF NOT EXISTS idx_tenders_cpv_code ON tenders (cpv_code)",
    "CREATE INDEX IF NOT EXISTS idx_tenders_score ON tenders (score)",
];

/// 建表 (幂等)
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Schema ready ({} statements)", SCHEMA.len());
    Ok(())
}
