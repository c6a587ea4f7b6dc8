use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable place. `owner` is fixed at creation; every other field may be
/// replaced by the owner through [`Place::apply`]. Serialized camelCase to
/// keep the wire format the browser client already speaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub address: String,
    /// Photo filenames under the uploads directory, in display order.
    pub photos: Vec<String>,
    pub description: String,
    /// Perk tags, e.g. "wifi", "parking".
    pub perks: Vec<String>,
    pub extra_info: String,
    /// Check-in/check-out times of day as entered by the owner ("14:00").
    pub check_in: String,
    pub check_out: String,
    pub max_guests: i32,
    /// Nightly price in whole currency units.
    pub price: i32,
}

/// The mutable fields of a listing, as submitted on create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceFields {
    pub title: String,
    pub address: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub extra_info: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(default = "default_max_guests")]
    pub max_guests: i32,
    #[serde(default)]
    pub price: i32,
}

fn default_max_guests() -> i32 {
    1
}

impl Place {
    pub fn new(owner: Uuid, fields: PlaceFields) -> Self {
        let mut place = Self {
            id: Uuid::new_v4(),
            owner,
            title: String::new(),
            address: String::new(),
            photos: Vec::new(),
            description: String::new(),
            perks: Vec::new(),
            extra_info: String::new(),
            check_in: String::new(),
            check_out: String::new(),
            max_guests: 1,
            price: 0,
        };
        place.apply(fields);
        place
    }

    /// Replace the mutable fields in place. `id` and `owner` are untouched.
    pub fn apply(&mut self, fields: PlaceFields) {
        self.title = fields.title;
        self.address = fields.address;
        self.photos = fields.photos;
        self.description = fields.description;
        self.perks = fields.perks;
        self.extra_info = fields.extra_info;
        self.check_in = fields.check_in;
        self.check_out = fields.check_out;
        self.max_guests = fields.max_guests;
        self.price = fields.price;
    }
}

/// Repository trait for listing persistence.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn insert(
        &self,
        place: &Place,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Place>, Box<dyn std::error::Error + Send + Sync>>;

    /// Unpaginated full scan; acceptable only at prototype scale.
    async fn list_all(&self) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_by_owner(
        &self,
        owner: Uuid,
    ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update(
        &self,
        place: &Place,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete(&self, id: Uuid) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Case-insensitive substring match over title, address and description.
    async fn search(
        &self,
        query: &str,
    ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> PlaceFields {
        PlaceFields {
            title: title.to_string(),
            address: "1 Shore Rd".to_string(),
            photos: vec!["photo_1.jpg".to_string()],
            description: "quiet".to_string(),
            perks: vec!["wifi".to_string()],
            extra_info: String::new(),
            check_in: "14:00".to_string(),
            check_out: "11:00".to_string(),
            max_guests: 4,
            price: 1000,
        }
    }

    #[test]
    fn test_apply_keeps_identity() {
        let owner = Uuid::new_v4();
        let mut place = Place::new(owner, fields("Cabin"));
        let id = place.id;

        place.apply(fields("Renamed cabin"));

        assert_eq!(place.id, id);
        assert_eq!(place.owner, owner);
        assert_eq!(place.title, "Renamed cabin");
    }

    #[test]
    fn test_fields_defaults_on_sparse_body() {
        let json = r#"{"title": "Cabin", "address": "1 Shore Rd"}"#;
        let fields: PlaceFields = serde_json::from_str(json).unwrap();

        assert_eq!(fields.max_guests, 1);
        assert_eq!(fields.price, 0);
        assert!(fields.photos.is_empty());
    }
}
