use aviario::{
    config::AppConfig,
    db::{create_pool, ensure_schema},
    dto::products::ProductInput,
    services::product_service::ProductGateway,
};
use rust_decimal::Decimal;

const SAMPLE: &[(&str, i64, u32, i64)] = &[
    // nome, quantidade mantissa, quantidade scale, preco in cents
    ("Ração", 105, 1, 4990),
    ("Milho", 25_000, 3, 8990),
    ("Ovos", 300, 0, 1850),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 1).await?;
    ensure_schema(&pool).await?;
    let gateway = ProductGateway::new(pool);

    let existing = gateway.list().await;
    let mut inserted = 0;
    for &(nome, qty, scale, cents) in SAMPLE {
        if existing.iter().any(|p| p.nome == nome) {
            println!("Skipping {nome}: already present");
            continue;
        }
        gateway
            .insert(&ProductInput {
                nome: nome.to_string(),
                quantidade: Decimal::new(qty, scale),
                preco: Decimal::new(cents, 2),
            })
            .await?;
        inserted += 1;
    }

    gateway.close().await;
    println!("Seed completed. Inserted {inserted} products");
    Ok(())
}
