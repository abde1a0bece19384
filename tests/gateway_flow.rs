use aviario::{
    db::{DbPool, create_pool, ensure_schema},
    dto::products::ProductInput,
    services::product_service::{ProductGateway, UPDATE_FAILED_MESSAGE},
};
use rust_decimal::Decimal;

fn input(nome: &str, quantidade: Decimal, preco: Decimal) -> ProductInput {
    ProductInput {
        nome: nome.to_string(),
        quantidade,
        preco,
    }
}

// Insert, list, update and delete against a real database, checking the
// ordering and idempotency rules along the way.
#[tokio::test]
async fn crud_round_trip_against_postgres() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run gateway tests.");
            return Ok(());
        }
    };

    let pool = setup_pool(&database_url).await?;
    let gateway = ProductGateway::new(pool);

    let before = gateway.ping().await?;
    gateway
        .insert(&input("Ração", Decimal::new(105, 1), Decimal::new(499, 1)))
        .await?;
    gateway
        .insert(&input("Milho", Decimal::new(2, 0), Decimal::new(3, 0)))
        .await?;
    gateway
        .insert(&input("Ração", Decimal::new(1, 0), Decimal::new(1, 0)))
        .await?;

    let listed = gateway.list().await;
    assert_eq!(listed.len(), 3);
    assert!(
        listed.windows(2).all(|pair| pair[0].id >= pair[1].id),
        "list must be newest id first"
    );
    let racao = listed
        .iter()
        .find(|p| p.nome == "Ração" && p.quantidade == Decimal::new(105, 1))
        .expect("inserted product is listed");
    assert_eq!(racao.preco, Decimal::new(499, 1));
    assert!(racao.data_criacao >= before);

    let updated = gateway
        .update_by_id(racao.id, &input("Ração Premium", Decimal::new(12, 0), Decimal::new(5550, 2)))
        .await;
    assert!(updated.success);
    let after_update = gateway.list().await;
    let row = after_update
        .iter()
        .find(|p| p.id == racao.id)
        .expect("updated product is listed");
    assert_eq!(row.nome, "Ração Premium");
    assert_eq!(row.quantidade, Decimal::new(12, 0));
    assert_eq!(row.preco, Decimal::new(5550, 2));
    assert_eq!(row.data_criacao, racao.data_criacao);

    let deleted = gateway.delete_by_id(racao.id).await;
    assert!(deleted.success);
    assert!(gateway.list().await.iter().all(|p| p.id != racao.id));

    // Missing ids are not an error.
    let missing = gateway.delete_by_id(999_999).await;
    assert!(missing.success);
    assert_eq!(missing.message, None);
    let missing_update = gateway
        .update_by_id(999_999, &input("Nada", Decimal::ONE, Decimal::ONE))
        .await;
    assert!(missing_update.success);

    // Constraint failures come back as a failed outcome.
    let overflow = gateway
        .update_by_id(
            listed[0].id,
            &input("Grande", Decimal::new(1, 0), Decimal::new(1_000_000_000_000, 0)),
        )
        .await;
    assert!(!overflow.success);
    assert_eq!(overflow.message.as_deref(), Some(UPDATE_FAILED_MESSAGE));

    gateway.close().await;
    Ok(())
}

async fn setup_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = create_pool(database_url, 2).await?;
    ensure_schema(&pool).await?;

    // Clean table between runs
    sqlx::query("TRUNCATE TABLE produtos RESTART IDENTITY")
        .execute(&pool)
        .await?;

    Ok(pool)
}
