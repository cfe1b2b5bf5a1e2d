//! # Order Desk demo
//!
//! Walks one order-entry session end to end:
//! 1. Loads [`DeskConfig`] from `.env`, the environment and the command line.
//! 2. Starts the chosen backend; the in-process one is seeded with a small catalog.
//! 3. Fills a cart, hits a shortage, forces the order through.
//! 4. Prints the shortfall ledger and tomorrow's consolidation sheet.

use chrono::Utc;
use order_desk::builder::{OrderBuilder, SubmitOutcome};
use order_desk::config::{BackendKind, DeskConfig};
use order_desk::lifecycle::{setup_tracing, DeskSystem};
use order_desk::model::{
    ClientCreate, ClientId, DeliveryDay, ProductCreate, ProductId, SellerCreate, SellerId,
};
use order_desk::rest::RestBackend;
use order_desk::services::Services;
use rust_decimal::Decimal;
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = DeskConfig::load()?;
    setup_tracing(&config.log_level);

    info!(backend = ?config.backend, "Starting order desk");

    match config.backend {
        BackendKind::Memory => run_in_memory(&config).await,
        BackendKind::Rest => {
            let services = Services::from_backend(Arc::new(RestBackend::new(&config.base_url)));
            let mut builder = OrderBuilder::new(services, &config);
            builder.load().await?;
            info!(
                products = builder.search_products("").len(),
                clients = builder.search_clients("").len(),
                sellers = builder.search_sellers("").len(),
                "Connected to REST backend"
            );
            Ok(())
        }
    }
}

struct Seeded {
    client: ClientId,
    seller: SellerId,
    rice: ProductId,
    oil: ProductId,
}

async fn seed(system: &DeskSystem) -> Result<Seeded, Box<dyn Error>> {
    let rice = system
        .create_product(ProductCreate {
            code: "ARZ-01".to_string(),
            name: "Arroz Extra 5kg".to_string(),
            unit_price: Decimal::new(1000, 2),
            stock: 40,
            min_stock: 10,
            unit: "bag".to_string(),
        })
        .await?;
    let oil = system
        .create_product(ProductCreate {
            code: "ACE-01".to_string(),
            name: "Aceite Vegetal 1L".to_string(),
            unit_price: Decimal::new(890, 2),
            stock: 2,
            min_stock: 6,
            unit: "bottle".to_string(),
        })
        .await?;
    let client = system
        .create_client(ClientCreate {
            business_name: "Bodega Santa Rosa".to_string(),
            contact_name: "Rosa Quispe".to_string(),
            address: "Av. Grau 120".to_string(),
            phone: "999111222".to_string(),
            has_credit: true,
        })
        .await?;
    let seller = system
        .create_seller(SellerCreate {
            first_name: "Luis".to_string(),
            last_name: "Paredes".to_string(),
            email: "luis.paredes@example.com".to_string(),
            phone: "988000111".to_string(),
        })
        .await?;

    Ok(Seeded {
        client,
        seller,
        rice,
        oil,
    })
}

async fn run_in_memory(config: &DeskConfig) -> Result<(), Box<dyn Error>> {
    let system = DeskSystem::new(config.mailbox_size);
    let seeded = seed(&system)
        .instrument(tracing::info_span!("seeding"))
        .await?;

    let mut builder = OrderBuilder::new(system.services(), config);
    let span = tracing::info_span!("order_entry");
    async {
        builder.load().await?;
        builder.select_client(seeded.client)?;
        builder.select_seller(seeded.seller)?;
        builder.set_delivery_day(DeliveryDay::Tomorrow);
        builder.set_on_credit(true);
        builder.add_product(seeded.rice, 12)?;
        if let Some(warning) = builder.add_product(seeded.oil, 5)? {
            warn!(%warning, "Cart warning");
        }
        let totals = builder.cart().totals();
        info!(subtotal = %totals.subtotal, tax = %totals.tax, total = %totals.total, "Cart ready");

        match builder.submit().await? {
            SubmitOutcome::Submitted(confirmation) => {
                info!(order_id = %confirmation.order_id, "Order registered without shortages");
            }
            SubmitOutcome::ShortagesFound(shortages) => {
                warn!(count = shortages.len(), "Shortages found, forcing the order");
                let confirmation = builder.force_submit().await?;
                info!(
                    order_id = %confirmation.order_id,
                    delivery = %confirmation.delivery_date,
                    shortfalls = confirmation.shortfalls.len(),
                    "Forced order registered"
                );
            }
        }
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(span)
    .await?;
    drop(builder);

    for product in system.shortfalls().await? {
        info!(product = %product.name, missing = product.shortfall, "Shortfall");
    }

    let tomorrow = DeliveryDay::Tomorrow.resolve(Utc::now().date_naive());
    for row in system.consolidate(tomorrow).await? {
        info!(
            product = %row.name,
            quantity = row.total_quantity,
            orders = row.orders,
            stock = row.stock,
            "Due tomorrow"
        );
    }

    system.shutdown().await?;
    info!("Order desk demo completed");
    Ok(())
}
