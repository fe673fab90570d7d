//! Minimal staff terminal example
//!
//! Logs in, restores or persists the session, lists tables, builds a
//! small cart from the menu, and watches the refresh loop for a while.
//!
//! Run: ORDERQ_URL=https://staging.orderq.example/api \
//!      ORDERQ_EMAIL=waiter@example.com ORDERQ_PASSWORD=secret \
//!      cargo run --example staff_terminal

use std::sync::Arc;
use std::time::Duration;

use orderq_client::{
    submit_order, BackgroundTasks, Cart, ClientConfig, HttpClient, MenuIndex, MutationTracker,
    PollEvent, RefreshLoop, Selection, Session, SessionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let base_url =
        std::env::var("ORDERQ_URL").unwrap_or_else(|_| "http://localhost:8000/api".to_string());
    let config = ClientConfig::new(base_url).with_order_poll_interval(Duration::from_secs(2));

    let data_dir = std::env::temp_dir().join("orderq-staff-terminal");
    let store = SessionStore::new(&data_dir);

    // Restore a stored session or log in fresh
    let mut client = match store.load()? {
        Some(session) => {
            println!("Restored session for {}", session.user.email);
            HttpClient::from_session(&config, &session)
        }
        None => {
            let email = std::env::var("ORDERQ_EMAIL")?;
            let password = std::env::var("ORDERQ_PASSWORD")?;
            let mut client = config.build_http_client();
            let login = client.login(&email, &password).await?;
            println!("Logged in as {}", login.user.name);
            store.save(&Session::from_login(login))?;
            client
        }
    };

    // Tables overview
    let tables = client.tables().await?;
    for table in &tables {
        println!(
            "table {} ({:?}) pending {:.2}",
            table.name, table.status, table.pending_revenue
        );
    }

    // Build a tiny order against the first free table
    if let Some(table) = tables.iter().find(|t| !t.is_occupied()) {
        let menu = MenuIndex::build(&client.menu().await?);
        let mut cart = Cart::new();

        if let Some(item) = menu
            .categories()
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|i| i.is_orderable())
        {
            cart.add(item, Selection::default_for(item), None, 2)?;
            println!(
                "cart: {} items, total {:.2}",
                cart.item_count(),
                cart.total()
            );
            submit_order(&client, &table.code, &mut cart, &menu, None).await?;
            println!("order placed for {}", table.name);
        }
    }

    // Watch the refresh loop for a few seconds
    let tracker = MutationTracker::new();
    let mut tasks = BackgroundTasks::new();
    let refresh = RefreshLoop::new(Arc::new(client.clone()), tracker, &config);
    let mut events = refresh.spawn(&mut tasks);

    let deadline = tokio::time::sleep(Duration::from_secs(10));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            event = events.recv() => match event {
                Some(PollEvent::Orders(orders)) => println!("{} active orders", orders.len()),
                Some(PollEvent::WaiterCalls(calls)) => println!("{} waiter calls", calls.len()),
                Some(PollEvent::Notify(n)) => println!("notification: {n:?}"),
                None => break,
            },
        }
    }

    tasks.shutdown().await;
    client.logout().await;
    store.clear()?;

    Ok(())
}
