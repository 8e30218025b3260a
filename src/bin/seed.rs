use opentender_radar::service::{seed_database, DEFAULT_SEED_COUNT};
use opentender_radar::{create_pool, init_schema, AppConfig, ScoringEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

/// 用模拟数据填充数据库
///
/// OPENTENDER_SEED_COUNT: 生成数量 (默认 50)
/// OPENTENDER_SEED_RNG: 固定随机种子, 便于复现
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    let config = AppConfig::load()?;
    let count = env_parse("OPENTENDER_SEED_COUNT")?.unwrap_or(DEFAULT_SEED_COUNT);
    let mut rng = match env_parse::<u64>("OPENTENDER_SEED_RNG")? {
        Some(seed) => {
            info!("Using fixed RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    info!("Initializing database...");
    let pool = create_pool(&config.database).await?;
    init_schema(&pool).await?;

    let engine = ScoringEngine::new(config.scoring_config());
    let inserted = seed_database(&pool, &engine, &mut rng, count).await?;

    info!("✓ Created {} tenders with computed scores", inserted);
    Ok(())
}

fn env_parse<T>(key: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(Some(raw.trim().parse()?)),
        Err(_) => Ok(None),
    }
}
