use async_trait::async_trait;
use restwell_listing::place::{ListingRepository, Place};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PlaceRow {
    id: Uuid,
    owner: Uuid,
    title: String,
    address: String,
    photos: Vec<String>,
    description: String,
    perks: Vec<String>,
    extra_info: String,
    check_in: String,
    check_out: String,
    max_guests: i32,
    price: i32,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Place {
            id: row.id,
            owner: row.owner,
            title: row.title,
            address: row.address,
            photos: row.photos,
            description: row.description,
            perks: row.perks,
            extra_info: row.extra_info,
            check_in: row.check_in,
            check_out: row.check_out,
            max_guests: row.max_guests,
            price: row.price,
        }
    }
}

const PLACE_COLUMNS: &str = "id, owner, title, address, photos, description, perks, extra_info, check_in, check_out, max_guests, price";

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn insert(
        &self,
        place: &Place,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO places (id, owner, title, address, photos, description, perks, extra_info, check_in, check_out, max_guests, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(place.id)
        .bind(place.owner)
        .bind(&place.title)
        .bind(&place.address)
        .bind(&place.photos)
        .bind(&place.description)
        .bind(&place.perks)
        .bind(&place.extra_info)
        .bind(&place.check_in)
        .bind(&place.check_out)
        .bind(place.max_guests)
        .bind(place.price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Place>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {} FROM places WHERE id = $1",
            PLACE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Place::from))
    }

    async fn list_all(&self) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!("SELECT {} FROM places", PLACE_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Place::from).collect())
    }

    async fn list_by_owner(
        &self,
        owner: Uuid,
    ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {} FROM places WHERE owner = $1",
            PLACE_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Place::from).collect())
    }

    async fn update(
        &self,
        place: &Place,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Full replacement of the mutable fields; owner is never touched.
        sqlx::query(
            r#"
            UPDATE places
            SET title = $2, address = $3, photos = $4, description = $5, perks = $6,
                extra_info = $7, check_in = $8, check_out = $9, max_guests = $10, price = $11
            WHERE id = $1
            "#,
        )
        .bind(place.id)
        .bind(&place.title)
        .bind(&place.address)
        .bind(&place.photos)
        .bind(&place.description)
        .bind(&place.perks)
        .bind(&place.extra_info)
        .bind(&place.check_in)
        .bind(&place.check_out)
        .bind(place.max_guests)
        .bind(place.price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn search(
        &self,
        query: &str,
    ) -> Result<Vec<Place>, Box<dyn std::error::Error + Send + Sync>> {
        // Substring scan via ILIKE, matching the in-memory filter semantics.
        let pattern = format!("%{}%", query);
        let rows = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {} FROM places WHERE title ILIKE $1 OR address ILIKE $1 OR description ILIKE $1",
            PLACE_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Place::from).collect())
    }
}
