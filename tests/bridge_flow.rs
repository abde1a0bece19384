use std::sync::Arc;

use aviario::{
    bridge::{self, Bridge, BridgeReply, BridgeRequest, HeadlessWindow, ProductApi},
    db::{create_pool, ensure_schema},
    services::product_service::ProductGateway,
    view::{MSG_ADDED, ViewController, ViewEvent, Field},
};
use chrono::FixedOffset;

// The view drives the real dispatcher and gateway: a fire-and-forget insert
// is visible to the list request queued right after it.
#[tokio::test]
async fn view_add_goes_through_bridge_to_postgres() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run bridge tests.");
            return Ok(());
        }
    };

    let pool = create_pool(&database_url, 2).await?;
    ensure_schema(&pool).await?;
    sqlx::query("TRUNCATE TABLE produtos RESTART IDENTITY")
        .execute(&pool)
        .await?;

    let gateway = ProductGateway::new(pool);
    let window = Arc::new(HeadlessWindow::new());
    let (handle, dispatcher) = bridge::spawn(Bridge::new(gateway.clone(), window.clone()));

    let mut view = ViewController::with_timezone(handle.clone(), FixedOffset::east_opt(0).unwrap());
    for (field, value) in [
        (Field::Nome, "Ração"),
        (Field::Quantidade, "10,5"),
        (Field::Preco, "49,9"),
    ] {
        view.handle(ViewEvent::Input {
            field,
            value: value.to_string(),
        })
        .await;
    }
    view.handle(ViewEvent::Add).await;

    let state = view.state();
    assert_eq!(state.toast.as_ref().unwrap().message, MSG_ADDED);
    assert_eq!(state.produtos.len(), 1);
    assert!(state.list_html.contains("Quantidade: 10,500 kg | Preço: R$ 49,90"));
    let id = state.produtos[0].id;

    let reply = handle.dispatch(BridgeRequest::DeleteProduct { id: 999 }).await?;
    match reply {
        BridgeReply::Outcome(outcome) => assert!(outcome.success),
        other => panic!("unexpected reply {other:?}"),
    }

    let outcome = handle.delete_product(id).await?;
    assert!(outcome.success);
    assert!(handle.get_product().await?.is_empty());
    assert_eq!(window.focus_requests(), 1);

    drop(view);
    drop(handle);
    dispatcher.await?;
    assert!(gateway.list().await.is_empty());
    gateway.close().await;
    Ok(())
}
