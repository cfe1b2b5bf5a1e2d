//! Lookups that back the client and seller pickers.

use crate::model::{Client, Seller};

/// Clients whose business or contact name contains `term`, ignoring case.
pub fn filter_clients<'a>(clients: &'a [Client], term: &str) -> Vec<&'a Client> {
    clients.iter().filter(|c| c.matches(term)).collect()
}

/// Sellers whose first or last name contains `term`, ignoring case.
pub fn filter_sellers<'a>(sellers: &'a [Seller], term: &str) -> Vec<&'a Seller> {
    sellers.iter().filter(|s| s.matches(term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientCreate, ClientId, SellerCreate, SellerId};

    fn clients() -> Vec<Client> {
        [
            ("Bodega Don Lucho", "Luis Quispe"),
            ("Minimarket Rosita", "Rosa Flores"),
            ("Comercial Andina", "Pedro Luque"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (business, contact))| {
            Client::new(
                ClientId(i as u32 + 1),
                ClientCreate {
                    business_name: business.to_string(),
                    contact_name: contact.to_string(),
                    address: String::new(),
                    phone: String::new(),
                    has_credit: false,
                },
            )
        })
        .collect()
    }

    #[test]
    fn test_client_filter_matches_either_name() {
        let clients = clients();

        let by_business: Vec<_> = filter_clients(&clients, "ROSITA").iter().map(|c| c.id).collect();
        assert_eq!(by_business, vec![ClientId(2)]);

        let by_contact: Vec<_> = filter_clients(&clients, "lu").iter().map(|c| c.id).collect();
        assert_eq!(by_contact, vec![ClientId(1), ClientId(3)]);

        assert_eq!(filter_clients(&clients, "").len(), 3);
        assert!(filter_clients(&clients, "zzz").is_empty());
    }

    #[test]
    fn test_seller_filter_matches_first_or_last_name() {
        let sellers = vec![
            Seller::new(
                SellerId(1),
                SellerCreate {
                    first_name: "Ana".to_string(),
                    last_name: "Torres".to_string(),
                    email: "ana@example.com".to_string(),
                    phone: String::new(),
                },
            ),
            Seller::new(
                SellerId(2),
                SellerCreate {
                    first_name: "Jorge".to_string(),
                    last_name: "Anaya".to_string(),
                    email: "jorge@example.com".to_string(),
                    phone: String::new(),
                },
            ),
        ];

        let ids: Vec<_> = filter_sellers(&sellers, " ana ").iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SellerId(1), SellerId(2)]);

        let ids: Vec<_> = filter_sellers(&sellers, "torres").iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SellerId(1)]);
    }
}
