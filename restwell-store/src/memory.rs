//! In-memory repository implementations. Used by the API integration tests
//! and for running the server without a database.

use async_trait::async_trait;
use restwell_booking::models::{Booking, BookingRepository};
use restwell_core::credential::{Credential, CredentialRepository};
use restwell_listing::place::{ListingRepository, Place};
use restwell_listing::search::matches_query;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryCredentialRepository {
    records: RwLock<HashMap<Uuid, Credential>>,
}

impl MemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepository {
    async fn insert(
        &self,
        credential: &Credential,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.records
            .write()
            .await
            .insert(credential.id, credential.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, Box<dyn std::error::Error + Send + Sync>> {
        // Case-sensitive exact match, same as the SQL repository.
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Credential>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.records.read().await.get(&id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryListingRepository {
    records: RwLock<HashMap<Uuid, Place>>,
}

impl MemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for MemoryListingRepository {
    async fn insert(
        &self,
        place: &Place,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.records.write().await.insert(place.id, place.clone());
        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Place>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn list_by_owner(
        &self,
        owner: Uuid,
    ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        place: &Place,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.records.write().await.insert(place.id, place.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.records.write().await.remove(&id);
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
    ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|p| matches_query(p, query))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryBookingRepository {
    records: RwLock<HashMap<Uuid, Booking>>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn insert(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.records
            .write()
            .await
            .insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_for_holder(
        &self,
        holder: Uuid,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|b| b.holder == holder)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restwell_listing::place::PlaceFields;

    #[tokio::test]
    async fn test_listing_round_trip() {
        let repo = MemoryListingRepository::new();
        let owner = Uuid::new_v4();
        let place = Place::new(
            owner,
            PlaceFields {
                title: "Forest lodge".to_string(),
                address: "12 Seaside Avenue".to_string(),
                photos: vec!["photo_1.jpg".to_string()],
                description: "near the dunes".to_string(),
                perks: vec!["sauna".to_string()],
                extra_info: "no pets".to_string(),
                check_in: "15:00".to_string(),
                check_out: "11:00".to_string(),
                max_guests: 4,
                price: 1000,
            },
        );

        repo.insert(&place).await.unwrap();
        let fetched = repo.get(place.id).await.unwrap().unwrap();

        assert_eq!(fetched.title, place.title);
        assert_eq!(fetched.photos, place.photos);
        assert_eq!(fetched.perks, place.perks);
        assert_eq!(fetched.price, place.price);
        assert_eq!(fetched.owner, owner);
    }

    #[tokio::test]
    async fn test_search_scopes_to_matching_listing() {
        let repo = MemoryListingRepository::new();
        for (title, address) in [
            ("Forest lodge", "12 Seaside Avenue"),
            ("City flat", "3 Market Street"),
        ] {
            let place = Place::new(
                Uuid::new_v4(),
                PlaceFields {
                    title: title.to_string(),
                    address: address.to_string(),
                    photos: Vec::new(),
                    description: String::new(),
                    perks: Vec::new(),
                    extra_info: String::new(),
                    check_in: String::new(),
                    check_out: String::new(),
                    max_guests: 2,
                    price: 500,
                },
            );
            repo.insert(&place).await.unwrap();
        }

        let hits = repo.search("seaside").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Forest lodge");

        assert!(repo.search("volcano").await.unwrap().is_empty());
    }
}
