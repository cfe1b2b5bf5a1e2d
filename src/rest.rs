//! HTTP client for the JSON back office API.
//!
//! The API speaks Spanish field names; the DTOs below map them onto [`crate::model`] and
//! never leak out of this module.

use crate::model::{
    Client, ClientId, DeliveryDay, OrderConfirmation, OrderDraft, Product, ProductId, Seller,
    SellerId, StockRequest, StockShortage,
};
use crate::services::{
    CatalogProvider, ClientDirectory, OrderSubmissionService, SellerDirectory, ServiceError,
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::{Response, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// All four services backed by one HTTP API.
#[derive(Debug, Clone)]
pub struct RestBackend {
    base_url: String,
    http: reqwest::Client,
}

impl RestBackend {
    /// `base_url` is the API root, e.g. `http://localhost:8080/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let response = self.http.get(self.url(path)).send().await?;
        read_json(response).await
    }

    async fn post_json<B, T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(path))
            .query(query)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        ServiceError::Unavailable(e.to_string())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        warn!(%status, "Backend refused request");
        return Err(rejection(status, &text));
    }
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ServiceError::Unavailable(format!("unreadable response: {e}")))
}

/// Pulls `message` out of an error body such as `{"message": "Stock insuficiente"}`.
fn rejection(status: StatusCode, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());
    debug!(%status, ?message, "Rejection body parsed");
    ServiceError::Rejected { message }
}

fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductoDto {
    id: u32,
    codigo: String,
    nombre: String,
    precio: Decimal,
    #[serde(default)]
    stock_actual: i64,
    #[serde(default)]
    stock_minimo: i64,
    #[serde(default)]
    unidad_medida: Option<String>,
}

impl From<ProductoDto> for Product {
    fn from(dto: ProductoDto) -> Self {
        Product {
            id: ProductId(dto.id),
            code: dto.codigo,
            name: dto.nombre,
            unit_price: dto.precio,
            stock: clamp_count(dto.stock_actual),
            min_stock: clamp_count(dto.stock_minimo),
            unit: dto.unidad_medida.unwrap_or_default(),
            shortfall: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClienteDto {
    id: u32,
    nombre_negocio: String,
    #[serde(default)]
    nombre_contacto: Option<String>,
    #[serde(default)]
    direccion: Option<String>,
    #[serde(default)]
    telefono: Option<String>,
    #[serde(default)]
    tiene_credito: bool,
}

impl From<ClienteDto> for Client {
    fn from(dto: ClienteDto) -> Self {
        Client {
            id: ClientId(dto.id),
            business_name: dto.nombre_negocio,
            contact_name: dto.nombre_contacto.unwrap_or_default(),
            address: dto.direccion.unwrap_or_default(),
            phone: dto.telefono.unwrap_or_default(),
            has_credit: dto.tiene_credito,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VendedorDto {
    id: u32,
    nombre: String,
    #[serde(default)]
    apellido: Option<String>,
    #[serde(default)]
    correo: Option<String>,
    #[serde(default)]
    telefono: Option<String>,
}

impl From<VendedorDto> for Seller {
    fn from(dto: VendedorDto) -> Self {
        Seller {
            id: SellerId(dto.id),
            first_name: dto.nombre,
            last_name: dto.apellido.unwrap_or_default(),
            email: dto.correo.unwrap_or_default(),
            phone: dto.telefono.unwrap_or_default(),
        }
    }
}

/// One entry of the stock check, both ways. The backend fills in the last two fields.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPedidoDto {
    producto_id: u32,
    cantidad_solicitada: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stock_actual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cantidad_faltante: Option<i64>,
}

impl From<&StockRequest> for ItemPedidoDto {
    fn from(request: &StockRequest) -> Self {
        Self {
            producto_id: request.product_id.0,
            cantidad_solicitada: request.quantity,
            stock_actual: None,
            cantidad_faltante: None,
        }
    }
}

impl ItemPedidoDto {
    /// `None` unless the backend reports a positive deficit.
    fn shortage(&self) -> Option<StockShortage> {
        let requested = self.cantidad_solicitada;
        let available = match (self.stock_actual, self.cantidad_faltante) {
            (Some(stock), _) => clamp_count(stock),
            (None, Some(missing)) => requested.saturating_sub(clamp_count(missing)),
            (None, None) => return None,
        };
        StockShortage::check(ProductId(self.producto_id), requested, available)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PedidoRequest {
    detalles: Vec<DetalleDto>,
    a_credito: bool,
    observaciones: String,
    subtotal: Decimal,
    igv: Decimal,
    total: Decimal,
}

#[derive(Debug, Serialize)]
struct DetalleDto {
    producto: ProductoRef,
    cantidad: u32,
    subtotal: Decimal,
}

#[derive(Debug, Serialize)]
struct ProductoRef {
    id: u32,
}

impl From<&OrderDraft> for PedidoRequest {
    fn from(draft: &OrderDraft) -> Self {
        Self {
            detalles: draft
                .lines
                .iter()
                .map(|line| DetalleDto {
                    producto: ProductoRef {
                        id: line.product_id.0,
                    },
                    cantidad: line.quantity,
                    subtotal: line.subtotal,
                })
                .collect(),
            a_credito: draft.on_credit,
            observaciones: draft.notes.clone(),
            subtotal: draft.totals.subtotal,
            igv: draft.totals.tax,
            total: draft.totals.total,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PedidoResponse {
    id: u32,
    #[serde(default)]
    fecha: Option<NaiveDate>,
}

fn tipo_fecha(delivery: DeliveryDay) -> &'static str {
    match delivery {
        DeliveryDay::Today => "HOY",
        DeliveryDay::Tomorrow => "MANANA",
        DeliveryDay::DayAfterTomorrow => "PASADO_MANANA",
    }
}

// --- Service implementations ---

#[async_trait]
impl CatalogProvider for RestBackend {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let products: Vec<ProductoDto> = self.get_json("productos/all").await?;
        Ok(products.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ClientDirectory for RestBackend {
    #[instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError> {
        let clients: Vec<ClienteDto> = self.get_json("clientes").await?;
        Ok(clients.into_iter().map(Client::from).collect())
    }
}

#[async_trait]
impl SellerDirectory for RestBackend {
    #[instrument(skip(self))]
    async fn list_sellers(&self) -> Result<Vec<Seller>, ServiceError> {
        let sellers: Vec<VendedorDto> = self.get_json("vendedores").await?;
        Ok(sellers.into_iter().map(Seller::from).collect())
    }
}

#[async_trait]
impl OrderSubmissionService for RestBackend {
    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn validate_stock(
        &self,
        items: &[StockRequest],
    ) -> Result<Vec<StockShortage>, ServiceError> {
        let body: Vec<ItemPedidoDto> = items.iter().map(ItemPedidoDto::from).collect();
        let report: Vec<ItemPedidoDto> = self
            .post_json("pedidos/validar-pedido", &[], &body)
            .await?;
        Ok(report.iter().filter_map(ItemPedidoDto::shortage).collect())
    }

    #[instrument(skip(self, draft), fields(lines = draft.lines.len()))]
    async fn submit_order(
        &self,
        draft: OrderDraft,
        client_id: ClientId,
        seller_id: SellerId,
        force: bool,
    ) -> Result<OrderConfirmation, ServiceError> {
        let path = format!("pedidos/registrar/{}/{}", client_id.0, seller_id.0);
        let query = [
            ("forzar", force.to_string()),
            ("tipoFecha", tipo_fecha(draft.delivery).to_string()),
        ];
        let created: PedidoResponse = self
            .post_json(&path, &query, &PedidoRequest::from(&draft))
            .await?;

        let created_at = Utc::now();
        Ok(OrderConfirmation {
            order_id: created.id.into(),
            created_at,
            delivery_date: created
                .fecha
                .unwrap_or_else(|| draft.delivery.resolve(created_at.date_naive())),
            shortfalls: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderLine, OrderTotals};
    use serde_json::json;

    #[test]
    fn test_product_wire_names_map_to_model() {
        let dto: ProductoDto = serde_json::from_value(json!({
            "id": 7,
            "codigo": "ARZ-01",
            "nombre": "Arroz Extra",
            "precio": 4.5,
            "stockActual": -3,
            "stockMinimo": 10,
            "unidadMedida": "kg",
            "estado": "ACTIVO"
        }))
        .unwrap();

        let product = Product::from(dto);
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.unit_price, Decimal::new(45, 1));
        assert_eq!(product.stock, 0);
        assert_eq!(product.min_stock, 10);
        assert_eq!(product.unit, "kg");
    }

    #[test]
    fn test_client_and_seller_tolerate_missing_fields() {
        let client: ClienteDto = serde_json::from_value(json!({
            "id": 3,
            "nombreNegocio": "Bodega Rosa",
            "tieneCredito": true
        }))
        .unwrap();
        let client = Client::from(client);
        assert!(client.has_credit);
        assert!(client.contact_name.is_empty());

        let seller: VendedorDto =
            serde_json::from_value(json!({ "id": 2, "nombre": "Luis", "rol": "VENDEDOR" }))
                .unwrap();
        assert_eq!(Seller::from(seller).display_name(), "Luis");
    }

    #[test]
    fn test_stock_request_serializes_without_report_fields() {
        let request = StockRequest {
            product_id: ProductId(5),
            quantity: 4,
        };
        let body = serde_json::to_value(ItemPedidoDto::from(&request)).unwrap();
        assert_eq!(body, json!({ "productoId": 5, "cantidadSolicitada": 4 }));
    }

    #[test]
    fn test_validation_report_keeps_only_shortages() {
        let report: Vec<ItemPedidoDto> = serde_json::from_value(json!([
            { "productoId": 1, "cantidadSolicitada": 5, "stockActual": 2, "cantidadFaltante": 3 },
            { "productoId": 2, "cantidadSolicitada": 1, "stockActual": 9, "cantidadFaltante": 0 },
            { "productoId": 3, "cantidadSolicitada": 4, "cantidadFaltante": 1 }
        ]))
        .unwrap();

        let shortages: Vec<_> = report.iter().filter_map(ItemPedidoDto::shortage).collect();
        assert_eq!(
            shortages,
            vec![
                StockShortage {
                    product_id: ProductId(1),
                    requested: 5,
                    available: 2,
                    deficit: 3,
                },
                StockShortage {
                    product_id: ProductId(3),
                    requested: 4,
                    available: 3,
                    deficit: 1,
                },
            ]
        );
    }

    #[test]
    fn test_order_body_uses_wire_names() {
        let draft = OrderDraft {
            lines: vec![OrderLine {
                product_id: ProductId(1),
                code: "A".to_string(),
                name: "Product A".to_string(),
                quantity: 3,
                unit_price: Decimal::new(1000, 2),
                subtotal: Decimal::new(3000, 2),
            }],
            totals: OrderTotals {
                subtotal: Decimal::new(3000, 2),
                tax: Decimal::new(540, 2),
                total: Decimal::new(3540, 2),
            },
            notes: "Back door".to_string(),
            on_credit: true,
            delivery: DeliveryDay::Tomorrow,
        };

        let body = serde_json::to_value(PedidoRequest::from(&draft)).unwrap();
        assert_eq!(body["aCredito"], json!(true));
        assert_eq!(body["observaciones"], json!("Back door"));
        assert_eq!(body["detalles"][0]["producto"]["id"], json!(1));
        assert_eq!(body["detalles"][0]["cantidad"], json!(3));
        assert_eq!(tipo_fecha(draft.delivery), "MANANA");
    }

    #[test]
    fn test_rejection_carries_backend_message() {
        let err = rejection(StatusCode::CONFLICT, r#"{"message":"Stock insuficiente"}"#);
        assert_eq!(err.user_message("fallback"), "Stock insuficiente");

        for body in ["", "<html>502</html>", r#"{"message":"  "}"#, r#"{"error":"x"}"#] {
            let err = rejection(StatusCode::BAD_GATEWAY, body);
            assert_eq!(err, ServiceError::Rejected { message: None });
        }
    }

    #[test]
    fn test_url_joins_without_double_slashes() {
        let backend = RestBackend::new("http://localhost:8080/api/");
        assert_eq!(
            backend.url("/pedidos/validar-pedido"),
            "http://localhost:8080/api/pedidos/validar-pedido"
        );
    }
}
