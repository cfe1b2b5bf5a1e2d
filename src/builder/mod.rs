//! # Order Builder
//!
//! One order-entry session: pick a client and a seller, fill a cart, check stock, submit.
//!
//! ## Flow
//!
//! 1. [`OrderBuilder::load`] fetches the catalog and both directories.
//! 2. Selections and cart edits are synchronous, apart from the lookups they need.
//! 3. [`OrderBuilder::submit`] checks the local preconditions, runs the backend's dry-run
//!    stock check and only then registers the order. Shortages stop the submission and come
//!    back as [`SubmitOutcome::ShortagesFound`].
//! 4. [`OrderBuilder::force_submit`] is the explicit override after the user has seen the
//!    shortages.
//!
//! Every failure is turned into a [`Status`] on the published [`BuilderView`] and returned
//! as a [`BuilderError`]; the session always stays usable. A failed submission leaves the
//! cart and selections exactly as they were.
//!
//! All mutating methods take `&mut self`, so one session cannot run two submissions at once.

pub mod error;
pub mod state;

pub use error::BuilderError;
pub use state::{BuilderView, Status};

use crate::cart::{Cart, CartError, StockWarning};
use crate::catalog::CachedCatalog;
use crate::config::DeskConfig;
use crate::directory::{filter_clients, filter_sellers};
use crate::model::{
    Client, ClientId, DeliveryDay, OrderConfirmation, OrderDraft, Product, ProductId, Seller,
    SellerId, StockShortage,
};
use crate::services::Services;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

const SUBMIT_FALLBACK: &str = "Could not register the order";
const VALIDATE_FALLBACK: &str = "Could not check stock";
const LOAD_FALLBACK: &str = "Could not load the catalog";

/// Result of a submission attempt that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(OrderConfirmation),
    /// Nothing was registered; the user must adjust quantities, force, or abandon.
    ShortagesFound(Vec<StockShortage>),
}

pub struct OrderBuilder {
    services: Services,
    catalog: CachedCatalog,
    clients: Vec<Client>,
    sellers: Vec<Seller>,

    cart: Cart,
    client: Option<Client>,
    seller: Option<Seller>,
    notes: String,
    on_credit: bool,
    delivery: DeliveryDay,
    pending_shortages: Vec<StockShortage>,

    success_display: Duration,
    state: Arc<watch::Sender<BuilderView>>,
}

impl OrderBuilder {
    pub fn new(services: Services, config: &DeskConfig) -> Self {
        let catalog = CachedCatalog::new(services.catalog.clone(), config.catalog_ttl());
        let (state, _) = watch::channel(BuilderView::default());
        Self {
            services,
            catalog,
            clients: Vec::new(),
            sellers: Vec::new(),
            cart: Cart::new(config.tax_policy()),
            client: None,
            seller: None,
            notes: String::new(),
            on_credit: false,
            delivery: DeliveryDay::default(),
            pending_shortages: Vec::new(),
            success_display: config.success_display(),
            state: Arc::new(state),
        }
    }

    // --- Observation ---

    pub fn subscribe(&self) -> watch::Receiver<BuilderView> {
        self.state.subscribe()
    }

    pub fn view(&self) -> BuilderView {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status.clone()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub fn selected_seller(&self) -> Option<&Seller> {
        self.seller.as_ref()
    }

    pub fn pending_shortages(&self) -> &[StockShortage] {
        &self.pending_shortages
    }

    // --- Loading & lookups ---

    /// Fetches the catalog and both directories.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), BuilderError> {
        self.set_status(Status::Loading);

        let catalog = &mut self.catalog;
        let fetched = tokio::try_join!(
            async { catalog.list_products().await.map(|p| p.len()) },
            self.services.clients.list_clients(),
            self.services.sellers.list_sellers(),
        );
        match fetched {
            Ok((products, clients, sellers)) => {
                info!(
                    products,
                    clients = clients.len(),
                    sellers = sellers.len(),
                    "Order builder loaded"
                );
                self.clients = clients;
                self.sellers = sellers;
                self.set_status(Status::Idle);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Loading failed");
                Err(self.fail(BuilderError::CatalogUnavailable(
                    e.user_message(LOAD_FALLBACK),
                )))
            }
        }
    }

    /// Drops the cached catalog and fetches it again.
    pub async fn refresh_catalog(&mut self) -> Result<(), BuilderError> {
        self.catalog.invalidate();
        self.set_status(Status::Loading);
        let fetched = self.catalog.list_products().await.map(|_| ());
        match fetched {
            Ok(()) => {
                self.set_status(Status::Idle);
                Ok(())
            }
            Err(e) => Err(self.fail(BuilderError::CatalogUnavailable(
                e.user_message(LOAD_FALLBACK),
            ))),
        }
    }

    /// In-stock products matching `term` by name or code.
    pub fn search_products(&self, term: &str) -> Vec<&Product> {
        self.catalog.search(term)
    }

    pub fn search_clients(&self, term: &str) -> Vec<&Client> {
        filter_clients(&self.clients, term)
    }

    pub fn search_sellers(&self, term: &str) -> Vec<&Seller> {
        filter_sellers(&self.sellers, term)
    }

    // --- Selections ---

    pub fn select_client(&mut self, id: ClientId) -> Result<(), BuilderError> {
        let Some(client) = self.clients.iter().find(|c| c.id == id).cloned() else {
            return Err(self.fail(BuilderError::UnknownClient(id)));
        };
        debug!(client_id = %id, "Client selected");
        self.client = Some(client);
        self.publish();
        Ok(())
    }

    pub fn clear_client(&mut self) {
        self.client = None;
        self.publish();
    }

    pub fn select_seller(&mut self, id: SellerId) -> Result<(), BuilderError> {
        let Some(seller) = self.sellers.iter().find(|s| s.id == id).cloned() else {
            return Err(self.fail(BuilderError::UnknownSeller(id)));
        };
        debug!(seller_id = %id, "Seller selected");
        self.seller = Some(seller);
        self.publish();
        Ok(())
    }

    pub fn clear_seller(&mut self) {
        self.seller = None;
        self.publish();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.publish();
    }

    pub fn set_on_credit(&mut self, on_credit: bool) {
        self.on_credit = on_credit;
        self.publish();
    }

    pub fn set_delivery_day(&mut self, delivery: DeliveryDay) {
        self.delivery = delivery;
        self.publish();
    }

    // --- Cart ---

    /// Adds a catalog product to the cart, merging with its existing line.
    ///
    /// Asking for more than the catalog reports is allowed and surfaces as a warning.
    pub fn add_product(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Option<StockWarning>, BuilderError> {
        let Some(product) = self.catalog.find(product_id).cloned() else {
            return Err(self.fail(BuilderError::UnknownProduct(product_id)));
        };
        let result = self.cart.add_line(&product, quantity);
        self.after_cart_edit(result)
    }

    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Option<StockWarning>, BuilderError> {
        let result = self.cart.set_quantity(product_id, quantity);
        self.after_cart_edit(result)
    }

    pub fn remove_product(&mut self, product_id: ProductId) {
        self.cart.remove_line(product_id);
        self.pending_shortages.clear();
        self.publish();
        self.set_status(Status::Idle);
    }

    fn after_cart_edit(
        &mut self,
        result: Result<Option<StockWarning>, CartError>,
    ) -> Result<Option<StockWarning>, BuilderError> {
        match result {
            Ok(warning) => {
                // Shortages from an earlier check no longer describe this cart.
                self.pending_shortages.clear();
                self.publish();
                let status = match &warning {
                    Some(w) => Status::Warning(w.to_string()),
                    None => Status::Idle,
                };
                self.set_status(status);
                Ok(warning)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    // --- Validation & submission ---

    /// Runs the backend's dry-run check for the whole cart.
    ///
    /// Shortages are a normal result: they are stored as pending and shown as a warning.
    #[instrument(skip(self), fields(lines = self.cart.len()))]
    pub async fn validate_stock(&mut self) -> Result<Vec<StockShortage>, BuilderError> {
        if self.cart.is_empty() {
            return Err(self.fail(BuilderError::EmptyCart));
        }
        self.set_status(Status::Loading);

        let requests = self.cart.stock_requests();
        match self.services.orders.validate_stock(&requests).await {
            Ok(shortages) => {
                self.pending_shortages = shortages.clone();
                self.publish();
                if shortages.is_empty() {
                    self.set_status(Status::Idle);
                } else {
                    warn!(count = shortages.len(), "Shortages found");
                    self.set_status(Status::Warning(self.describe_shortages(&shortages)));
                }
                Ok(shortages)
            }
            Err(e) => Err(self.fail(BuilderError::ValidationFailed(
                e.user_message(VALIDATE_FALLBACK),
            ))),
        }
    }

    /// Validates stock, then registers the order if nothing is short.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<SubmitOutcome, BuilderError> {
        self.check_ready()?;

        let shortages = self.validate_stock().await?;
        if !shortages.is_empty() {
            return Ok(SubmitOutcome::ShortagesFound(shortages));
        }

        self.register(false).await.map(SubmitOutcome::Submitted)
    }

    /// Registers the order without the client-side stock check, asking the backend to accept
    /// it despite shortages.
    #[instrument(skip(self))]
    pub async fn force_submit(&mut self) -> Result<OrderConfirmation, BuilderError> {
        self.check_ready()?;
        self.register(true).await
    }

    /// Abandons the order: empties the cart and clears every selection.
    pub fn cancel(&mut self) {
        self.reset_session();
        self.publish();
        self.set_status(Status::Idle);
    }

    fn check_ready(&mut self) -> Result<(), BuilderError> {
        let problem = match (&self.client, &self.seller) {
            (None, _) => Some(BuilderError::MissingClient),
            (_, None) => Some(BuilderError::MissingSeller),
            _ if self.cart.is_empty() => Some(BuilderError::EmptyCart),
            (Some(client), _) if self.on_credit && !client.has_credit => {
                Some(BuilderError::CreditNotAllowed)
            }
            _ => None,
        };
        match problem {
            Some(e) => Err(self.fail(e)),
            None => Ok(()),
        }
    }

    async fn register(&mut self, force: bool) -> Result<OrderConfirmation, BuilderError> {
        let (Some(client_id), Some(seller_id)) = (
            self.client.as_ref().map(|c| c.id),
            self.seller.as_ref().map(|s| s.id),
        ) else {
            return Err(self.fail(BuilderError::MissingClient));
        };
        self.set_status(Status::Loading);

        let draft = OrderDraft {
            lines: self.cart.order_lines(),
            totals: self.cart.totals(),
            notes: self.notes.clone(),
            on_credit: self.on_credit,
            delivery: self.delivery,
        };

        match self
            .services
            .orders
            .submit_order(draft, client_id, seller_id, force)
            .await
        {
            Ok(confirmation) => {
                info!(order_id = %confirmation.order_id, force, "Order submitted");
                self.reset_session();
                // Stock moved; the next search must see it.
                self.catalog.invalidate();
                if let Err(e) = self.catalog.list_products().await.map(|_| ()) {
                    warn!(error = %e, "Catalog refresh after submit failed");
                }
                self.publish();
                self.flash_success(format!("Order {} registered", confirmation.order_id));
                Ok(confirmation)
            }
            Err(e) => {
                warn!(error = %e, force, "Order submission failed");
                Err(self.fail(BuilderError::SubmissionFailed(
                    e.user_message(SUBMIT_FALLBACK),
                )))
            }
        }
    }

    // --- State plumbing ---

    fn reset_session(&mut self) {
        self.cart.reset();
        self.client = None;
        self.seller = None;
        self.notes.clear();
        self.on_credit = false;
        self.delivery = DeliveryDay::default();
        self.pending_shortages.clear();
    }

    fn describe_shortages(&self, shortages: &[StockShortage]) -> String {
        let parts: Vec<String> = shortages
            .iter()
            .map(|s| {
                let name = self
                    .cart
                    .line(s.product_id)
                    .map_or_else(|| s.product_id.to_string(), |l| l.name.clone());
                format!("{name}: requested {}, available {}", s.requested, s.available)
            })
            .collect();
        format!("Insufficient stock ({})", parts.join("; "))
    }

    /// Publishes everything except the status.
    fn publish(&self) {
        self.state.send_modify(|view| {
            view.client = self.client.clone();
            view.seller = self.seller.clone();
            view.lines = self.cart.lines().to_vec();
            view.totals = self.cart.totals();
            view.notes = self.notes.clone();
            view.on_credit = self.on_credit;
            view.delivery = self.delivery;
            view.pending_shortages = self.pending_shortages.clone();
        });
    }

    fn set_status(&self, status: Status) -> u64 {
        let mut seq = 0;
        self.state.send_modify(|view| {
            view.status = status;
            view.status_seq += 1;
            seq = view.status_seq;
        });
        seq
    }

    fn fail(&self, error: BuilderError) -> BuilderError {
        self.set_status(Status::Error(error.to_string()));
        error
    }

    /// Shows a success message, then clears it unless something replaced it meanwhile.
    fn flash_success(&self, message: String) {
        let seq = self.set_status(Status::Success(message));
        let state = Arc::clone(&self.state);
        let delay = self.success_display;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_if_modified(|view| {
                if view.status_seq != seq {
                    return false;
                }
                view.status = Status::Idle;
                view.status_seq += 1;
                true
            });
        });
    }
}
