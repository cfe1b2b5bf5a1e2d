//! Clients for the Client and Seller actors.

use crate::clients::actor_client::{recover_entity_error, ActorClient};
use crate::directory_actor::DirectoryError;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{
    Client, ClientCreate, ClientId, ClientUpdate, Seller, SellerCreate, SellerId, SellerUpdate,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

fn map_directory_error(e: FrameworkError) -> DirectoryError {
    recover_entity_error(
        e,
        DirectoryError::NotFound,
        DirectoryError::ActorCommunicationError,
    )
}

#[derive(Clone)]
pub struct ClientDirectoryClient {
    inner: ResourceClient<Client>,
}

impl ClientDirectoryClient {
    pub fn new(inner: ResourceClient<Client>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self), fields(business_name = %params.business_name))]
    pub async fn create_client(&self, params: ClientCreate) -> Result<ClientId, DirectoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_client(
        &self,
        id: ClientId,
        update: ClientUpdate,
    ) -> Result<Client, DirectoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Client> for ClientDirectoryClient {
    type Error = DirectoryError;

    fn inner(&self) -> &ResourceClient<Client> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        map_directory_error(e)
    }
}

#[derive(Clone)]
pub struct SellerDirectoryClient {
    inner: ResourceClient<Seller>,
}

impl SellerDirectoryClient {
    pub fn new(inner: ResourceClient<Seller>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self), fields(last_name = %params.last_name))]
    pub async fn create_seller(&self, params: SellerCreate) -> Result<SellerId, DirectoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_seller(
        &self,
        id: SellerId,
        update: SellerUpdate,
    ) -> Result<Seller, DirectoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Seller> for SellerDirectoryClient {
    type Error = DirectoryError;

    fn inner(&self) -> &ResourceClient<Seller> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        map_directory_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    #[tokio::test]
    async fn test_list_clients_through_mock() {
        let mut mock = MockClient::<Client>::new();
        let rosa = Client::new(
            ClientId(1),
            ClientCreate {
                business_name: "Minimarket Rosita".to_string(),
                contact_name: "Rosa".to_string(),
                address: "Av. Grau 120".to_string(),
                phone: String::new(),
                has_credit: true,
            },
        );
        mock.expect_list().return_ok(vec![rosa.clone()]);
        mock.expect_get(ClientId(2)).return_ok(None);

        let clients = ClientDirectoryClient::new(mock.client());
        assert_eq!(clients.list().await.unwrap(), vec![rosa]);
        assert_eq!(clients.get(ClientId(2)).await.unwrap(), None);

        mock.verify();
    }

    #[tokio::test]
    async fn test_seller_create_validation_error_is_typed() {
        let mut mock = MockClient::<Seller>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                DirectoryError::MissingField("last_name"),
            )));

        let sellers = SellerDirectoryClient::new(mock.client());
        let result = sellers
            .create_seller(SellerCreate {
                first_name: "Ana".to_string(),
                last_name: String::new(),
                email: String::new(),
                phone: String::new(),
            })
            .await;

        assert_eq!(result, Err(DirectoryError::MissingField("last_name")));
        mock.verify();
    }
}
