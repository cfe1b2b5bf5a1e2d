use order_desk::clients::{ActorClient, ClientDirectoryClient, ProductClient, SellerDirectoryClient};
use order_desk::framework::{mock::MockClient, FrameworkError};
use order_desk::model::{
    Client, ClientCreate, ClientId, DeliveryDay, OrderCreate, OrderDraft, OrderLine, OrderTotals,
    Product, ProductId, Seller, SellerCreate, SellerId,
};
use order_desk::order_actor::{OrderContext, OrderError};
use order_desk::product_actor::{ProductActionResult, ProductError, Reservation};
use rust_decimal::Decimal;

fn client(id: u32, has_credit: bool) -> Client {
    Client::new(
        ClientId(id),
        ClientCreate {
            business_name: "Bodega Santa Rosa".to_string(),
            contact_name: "Rosa".to_string(),
            address: "Av. Grau 120".to_string(),
            phone: "999111222".to_string(),
            has_credit,
        },
    )
}

fn seller(id: u32) -> Seller {
    Seller::new(
        SellerId(id),
        SellerCreate {
            first_name: "Luis".to_string(),
            last_name: "Paredes".to_string(),
            email: "luis@example.com".to_string(),
            phone: "988000111".to_string(),
        },
    )
}

fn line(product: u32, quantity: u32) -> OrderLine {
    OrderLine {
        product_id: ProductId(product),
        code: format!("P-{product}"),
        name: format!("Product {product}"),
        quantity,
        unit_price: Decimal::ONE,
        subtotal: Decimal::from(quantity),
    }
}

fn order(lines: Vec<OrderLine>, on_credit: bool, force: bool) -> OrderCreate {
    OrderCreate {
        client_id: ClientId(1),
        seller_id: SellerId(1),
        draft: OrderDraft {
            lines,
            totals: OrderTotals::default(),
            notes: String::new(),
            on_credit,
            delivery: DeliveryDay::Today,
        },
        force,
    }
}

struct Mocks {
    clients: MockClient<Client>,
    sellers: MockClient<Seller>,
    products: MockClient<Product>,
}

impl Mocks {
    fn new() -> Self {
        Self {
            clients: MockClient::new(),
            sellers: MockClient::new(),
            products: MockClient::new(),
        }
    }

    fn context(&self) -> OrderContext {
        OrderContext {
            clients: ClientDirectoryClient::new(self.clients.client()),
            sellers: SellerDirectoryClient::new(self.sellers.client()),
            products: ProductClient::new(self.products.client()),
        }
    }

    fn verify(&self) {
        self.clients.verify();
        self.sellers.verify();
        self.products.verify();
    }
}

/// Real Order actor, mocked directories and product actor.
#[tokio::test]
async fn test_order_reserves_every_line() {
    let mut mocks = Mocks::new();
    mocks
        .clients
        .expect_get(ClientId(1))
        .return_ok(Some(client(1, false)));
    mocks.sellers.expect_get(SellerId(1)).return_ok(Some(seller(1)));
    for (id, taken) in [(1, 3), (2, 4)] {
        mocks
            .products
            .expect_action(ProductId(id))
            .return_ok(ProductActionResult::Reserve(Reservation { taken, shortfall: 0 }));
    }

    let (order_actor, orders) = order_desk::order_actor::new(8);
    let handle = tokio::spawn(order_actor.run(mocks.context()));

    let id = orders
        .create_order(order(vec![line(1, 3), line(2, 4)], false, false))
        .await
        .unwrap();
    let stored = orders.get(id).await.unwrap().unwrap();
    assert_eq!(stored.reservations.len(), 2);
    assert!(stored.shortfalls.is_empty());
    assert!(!stored.forced);

    mocks.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_line_rolls_back_earlier_reservations() {
    let mut mocks = Mocks::new();
    mocks
        .clients
        .expect_get(ClientId(1))
        .return_ok(Some(client(1, false)));
    mocks.sellers.expect_get(SellerId(1)).return_ok(Some(seller(1)));
    mocks
        .products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Reserve(Reservation {
            taken: 3,
            shortfall: 0,
        }));
    mocks
        .products
        .expect_action(ProductId(2))
        .return_err(FrameworkError::EntityError(Box::new(
            ProductError::InsufficientStock {
                name: "Product 2".to_string(),
                requested: 4,
                available: 1,
            },
        )));
    // The release of product 1's three units.
    mocks
        .products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Release(10));

    let (order_actor, orders) = order_desk::order_actor::new(8);
    let handle = tokio::spawn(order_actor.run(mocks.context()));

    let err = orders
        .create_order(order(vec![line(1, 3), line(2, 4)], false, false))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InsufficientStock {
            product_id: ProductId(2),
            name: "Product 2".to_string(),
            requested: 4,
            available: 1,
        }
    );
    assert!(orders.list().await.unwrap().is_empty());

    mocks.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_forced_order_records_shortfall() {
    let mut mocks = Mocks::new();
    mocks
        .clients
        .expect_get(ClientId(1))
        .return_ok(Some(client(1, false)));
    mocks.sellers.expect_get(SellerId(1)).return_ok(Some(seller(1)));
    mocks
        .products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Reserve(Reservation {
            taken: 2,
            shortfall: 3,
        }));

    let (order_actor, orders) = order_desk::order_actor::new(8);
    let handle = tokio::spawn(order_actor.run(mocks.context()));

    let id = orders
        .create_order(order(vec![line(1, 5)], false, true))
        .await
        .unwrap();
    let stored = orders.get(id).await.unwrap().unwrap();
    assert!(stored.forced);
    assert_eq!(stored.confirmation().shortfalls.len(), 1);
    assert_eq!(stored.shortfalls[0].deficit, 3);
    assert_eq!(stored.reservations[0].quantity, 2);

    mocks.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_parties_are_checked_before_stock() {
    let mut mocks = Mocks::new();
    // Unknown client: nothing else is asked.
    mocks.clients.expect_get(ClientId(1)).return_ok(None);
    // Credit order for a client without credit.
    mocks
        .clients
        .expect_get(ClientId(1))
        .return_ok(Some(client(1, false)));

    let (order_actor, orders) = order_desk::order_actor::new(8);
    let handle = tokio::spawn(order_actor.run(mocks.context()));

    let err = orders
        .create_order(order(vec![line(1, 1)], false, false))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::InvalidClient(ClientId(1)));

    let err = orders
        .create_order(order(vec![line(1, 1)], true, false))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::CreditNotAllowed(ClientId(1)));

    mocks.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_empty_order_is_rejected_without_calls() {
    let mocks = Mocks::new();

    let (order_actor, orders) = order_desk::order_actor::new(8);
    let handle = tokio::spawn(order_actor.run(mocks.context()));

    let err = orders
        .create_order(order(Vec::new(), false, false))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::EmptyOrder);

    mocks.verify();
    drop(orders);
    handle.await.unwrap();
}
