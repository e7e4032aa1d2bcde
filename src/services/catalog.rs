//! Catalog orchestration: browse, search, detail, create, update, and
//! soft-delete.
//!
//! Reads exclude soft-deleted sneakers everywhere; updates intentionally
//! do not, so a deleted record stays editable. The browse listing is
//! memoized under a single cache key for a fixed window and is not
//! invalidated by mutations; it goes stale until the window elapses.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::AuthUser;
use crate::cache::{self, keys, CacheBackend};
use crate::db::DbPool;
use crate::entities::sneaker::RelatedSneakers;
use crate::entities::{brand, sneaker, sneaker_link};
use crate::errors::ServiceError;
use crate::media::{self, ImageUpload};
use crate::services::filters::SneakerFilter;

/// Sneaker summary used in listings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SneakerCard {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub designer: Option<String>,
    pub year_released: i32,
    pub primary_image: Option<String>,
}

impl From<sneaker::Model> for SneakerCard {
    fn from(model: sneaker::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            summary: model.summary,
            designer: model.designer,
            year_released: model.year_released,
            primary_image: model.primary_image,
        }
    }
}

/// A brand with its active sneakers, as served by the browse listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BrandListing {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub country: Option<String>,
    pub year_founded: Option<i32>,
    pub sneakers: Vec<SneakerCard>,
}

/// Search result row: a sneaker with its brand name, when it has one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchItem {
    #[serde(flatten)]
    pub sneaker: SneakerCard,
    pub brand_id: Option<Uuid>,
    pub brand_name: Option<String>,
}

/// Full detail for one sneaker.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SneakerDetail {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub designer: Option<String>,
    pub year_released: i32,
    pub primary_image: Option<String>,
    pub brand: Option<BrandRef>,
    pub related_sneakers: Vec<SneakerCard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandRef {
    pub id: Uuid,
    pub name: String,
}

/// Input for create and update operations.
#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
pub struct SneakerInput {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Summary must be between 1 and 200 characters"))]
    pub summary: String,

    #[validate(length(max = 150, message = "Designer cannot exceed 150 characters"))]
    pub designer: Option<String>,

    #[validate(custom = "crate::validators::validate_catalog_year")]
    pub year_released: i32,

    pub brand_id: Option<Uuid>,

    #[serde(default)]
    pub related_sneaker_ids: Vec<Uuid>,

    pub primary_image: Option<ImageUpload>,
}

/// Orchestrates catalog reads and capability-gated mutations.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
    cache: Arc<dyn CacheBackend>,
    media_root: PathBuf,
    listing_ttl: Duration,
}

impl CatalogService {
    pub fn new(
        db: Arc<DbPool>,
        cache: Arc<dyn CacheBackend>,
        media_root: PathBuf,
        listing_ttl: Duration,
    ) -> Self {
        Self {
            db,
            cache,
            media_root,
            listing_ttl,
        }
    }

    /// Brands that have at least one active sneaker, each annotated with
    /// its active sneakers; both levels sorted by name.
    ///
    /// Served from the cache when present; otherwise computed, stored for
    /// the listing window, and returned.
    #[instrument(skip(self))]
    pub async fn browse(&self) -> Result<Vec<BrandListing>, ServiceError> {
        match cache::get_json::<Vec<BrandListing>>(self.cache.as_ref(), keys::BRAND_LISTING).await {
            Ok(Some(listing)) => return Ok(listing),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Listing cache read failed; querying storage"),
        }

        let listing = self.compute_brand_listing().await?;

        if let Err(e) = cache::set_json(
            self.cache.as_ref(),
            keys::BRAND_LISTING,
            &listing,
            self.listing_ttl,
        )
        .await
        {
            warn!(error = %e, "Failed to populate listing cache");
        }

        Ok(listing)
    }

    async fn compute_brand_listing(&self) -> Result<Vec<BrandListing>, ServiceError> {
        let rows = brand::Entity::find()
            .find_with_related(sneaker::Entity)
            .filter(sneaker::Column::Deleted.eq(false))
            .order_by_asc(sneaker::Column::Name)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when computing brand listing");
                ServiceError::Database(e)
            })?;

        // The relation query orders by the brand key to build its groups,
        // which takes precedence over any appended brand ordering; the
        // name order is applied to the consolidated rows instead.
        let mut listing: Vec<BrandListing> = rows
            .into_iter()
            .filter(|(_, sneakers)| !sneakers.is_empty())
            .map(|(brand, sneakers)| BrandListing {
                id: brand.id,
                name: brand.name,
                description: brand.description,
                country: brand.country,
                year_founded: brand.year_founded,
                sneakers: sneakers.into_iter().map(SneakerCard::from).collect(),
            })
            .collect();
        listing.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listing)
    }

    /// Non-deleted sneakers matching the filter, sorted by name.
    #[instrument(skip(self, filter))]
    pub async fn search(&self, filter: &SneakerFilter) -> Result<Vec<SearchItem>, ServiceError> {
        let rows = sneaker::Entity::find()
            .find_also_related(brand::Entity)
            .filter(sneaker::Column::Deleted.eq(false))
            .filter(filter.condition())
            .order_by_asc(sneaker::Column::Name)
            .distinct()
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when searching sneakers");
                ServiceError::Database(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(sneaker, brand)| SearchItem {
                sneaker: SneakerCard::from(sneaker),
                brand_id: brand.as_ref().map(|b| b.id),
                brand_name: brand.map(|b| b.name),
            })
            .collect())
    }

    /// One non-deleted sneaker with its brand and active related
    /// sneakers. Soft-deleted records answer not-found.
    #[instrument(skip(self))]
    pub async fn get_detail(&self, id: Uuid) -> Result<SneakerDetail, ServiceError> {
        let sneaker = sneaker::Entity::find_by_id(id)
            .filter(sneaker::Column::Deleted.eq(false))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sneaker {} not found", id)))?;

        let brand = match sneaker.brand_id {
            Some(_) => sneaker
                .find_related(brand::Entity)
                .one(&*self.db)
                .await?
                .map(|b| BrandRef { id: b.id, name: b.name }),
            None => None,
        };

        let related = sneaker
            .find_linked(RelatedSneakers)
            .filter(sneaker::Column::Deleted.eq(false))
            .order_by_asc(sneaker::Column::Name)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(SneakerCard::from)
            .collect();

        Ok(SneakerDetail {
            id: sneaker.id,
            name: sneaker.name,
            summary: sneaker.summary,
            designer: sneaker.designer,
            year_released: sneaker.year_released,
            primary_image: sneaker.primary_image,
            brand,
            related_sneakers: related,
            created_at: sneaker.created_at,
            updated_at: sneaker.updated_at,
        })
    }

    /// Load a sneaker for editing. Soft-deleted records remain editable,
    /// so no `deleted` restriction applies here.
    #[instrument(skip(self))]
    pub async fn get_editable(&self, id: Uuid) -> Result<sneaker::Model, ServiceError> {
        sneaker::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sneaker {} not found", id)))
    }

    /// Create a new sneaker on behalf of `actor`.
    ///
    /// All input (including the image payload) is validated before
    /// anything is persisted; a validation failure writes nothing.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(
        &self,
        input: SneakerInput,
        actor: &AuthUser,
    ) -> Result<sneaker::Model, ServiceError> {
        input.validate()?;
        self.check_brand_exists(input.brand_id).await?;
        let related_ids = self.check_related_ids(None, &input.related_sneaker_ids).await?;
        if let Some(upload) = &input.primary_image {
            upload.validate_and_decode()?;
        }

        let primary_image = match &input.primary_image {
            Some(upload) => Some(media::store_image(&self.media_root, &input.name, upload).await?),
            None => None,
        };

        let sneaker_id = Uuid::new_v4();
        let model = sneaker::ActiveModel {
            id: Set(sneaker_id),
            name: Set(input.name.clone()),
            summary: Set(input.summary),
            designer: Set(input.designer),
            year_released: Set(input.year_released),
            brand_id: Set(input.brand_id),
            primary_image: Set(primary_image),
            created_by: Set(Some(actor.user_id)),
            last_updated_by: Set(None),
            deleted: Set(false),
            deleted_at: Set(None),
            deleted_by: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(Some(Utc::now())),
        };

        let txn = self.db.begin().await?;
        let created = model.insert(&txn).await.map_err(|e| {
            error!(error = %e, name = %input.name, "Failed to create sneaker");
            ServiceError::Database(e)
        })?;
        Self::replace_links(&txn, sneaker_id, &related_ids).await?;
        txn.commit().await?;

        info!(sneaker_id = %created.id, name = %created.name, "Sneaker created");
        Ok(created)
    }

    /// Update a sneaker on behalf of `actor`. Soft-deleted records are
    /// editable; the deleted flag itself is untouched by updates.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: SneakerInput,
        actor: &AuthUser,
    ) -> Result<sneaker::Model, ServiceError> {
        input.validate()?;
        let existing = self.get_editable(id).await?;
        self.check_brand_exists(input.brand_id).await?;
        let related_ids = self.check_related_ids(Some(id), &input.related_sneaker_ids).await?;
        if let Some(upload) = &input.primary_image {
            upload.validate_and_decode()?;
        }

        let primary_image = match &input.primary_image {
            Some(upload) => Some(media::store_image(&self.media_root, &input.name, upload).await?),
            None => existing.primary_image.clone(),
        };

        let mut model: sneaker::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.summary = Set(input.summary);
        model.designer = Set(input.designer);
        model.year_released = Set(input.year_released);
        model.brand_id = Set(input.brand_id);
        model.primary_image = Set(primary_image);
        model.last_updated_by = Set(Some(actor.user_id));

        let txn = self.db.begin().await?;
        let updated = model.update(&txn).await.map_err(|e| {
            error!(sneaker_id = %id, error = %e, "Failed to update sneaker");
            ServiceError::Database(e)
        })?;
        Self::replace_links(&txn, id, &related_ids).await?;
        txn.commit().await?;

        info!(sneaker_id = %updated.id, "Sneaker updated");
        Ok(updated)
    }

    /// Soft-delete a sneaker on behalf of `actor`.
    ///
    /// Repeat invocations are idempotent in effect: the flag stays true
    /// and the audit fields take the latest actor and time. Persistence
    /// failures are reported as a failure result naming the sneaker, not
    /// raised as a crash.
    #[instrument(skip(self))]
    pub async fn soft_delete(
        &self,
        id: Uuid,
        actor: &AuthUser,
    ) -> Result<sneaker::Model, ServiceError> {
        let existing = self.get_editable(id).await?;
        let name = existing.name.clone();

        let mut model: sneaker::ActiveModel = existing.into();
        model.deleted = Set(true);
        model.deleted_at = Set(Some(Utc::now()));
        model.deleted_by = Set(Some(actor.user_id));

        let deleted = model.update(&*self.db).await.map_err(|e| {
            error!(sneaker_id = %id, error = %e, "Failed to soft-delete sneaker");
            ServiceError::Storage(format!("Failed to delete sneaker '{}' ({})", name, id))
        })?;

        info!(sneaker_id = %id, deleted_by = %actor.user_id, "Sneaker soft-deleted");
        Ok(deleted)
    }

    /// All brands ordered by name, for form choices and the v1 mirror.
    pub async fn list_brands(&self) -> Result<Vec<brand::Model>, ServiceError> {
        Ok(brand::Entity::find()
            .order_by_asc(brand::Column::Name)
            .all(&*self.db)
            .await?)
    }

    async fn check_brand_exists(&self, brand_id: Option<Uuid>) -> Result<(), ServiceError> {
        let Some(brand_id) = brand_id else {
            return Ok(());
        };
        let exists = brand::Entity::find_by_id(brand_id).one(&*self.db).await?.is_some();
        if exists {
            Ok(())
        } else {
            Err(field_error("brand_id", "unknown_brand", "Unknown brand"))
        }
    }

    /// Dedupe related ids, reject self-references and unknown sneakers.
    async fn check_related_ids(
        &self,
        own_id: Option<Uuid>,
        related_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ServiceError> {
        let ids: BTreeSet<Uuid> = related_ids.iter().copied().collect();

        if let Some(own) = own_id {
            if ids.contains(&own) {
                return Err(field_error(
                    "related_sneaker_ids",
                    "self_reference",
                    "A sneaker cannot be related to itself",
                ));
            }
        }

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = sneaker::Entity::find()
            .filter(sneaker::Column::Id.is_in(ids.iter().copied().collect::<Vec<_>>()))
            .count(&*self.db)
            .await?;

        if found as usize != ids.len() {
            return Err(field_error(
                "related_sneaker_ids",
                "unknown_sneaker",
                "Unknown related sneaker",
            ));
        }

        Ok(ids.into_iter().collect())
    }

    /// Rewrites the symmetric link rows for one sneaker: both directions
    /// of every pair are stored, matching how the association reads back.
    /// Runs on the caller's transaction so the row write and its link
    /// rewrite land or fail together.
    async fn replace_links<C>(
        conn: &C,
        sneaker_id: Uuid,
        related_ids: &[Uuid],
    ) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        sneaker_link::Entity::delete_many()
            .filter(
                sneaker_link::Column::SneakerId
                    .eq(sneaker_id)
                    .or(sneaker_link::Column::RelatedSneakerId.eq(sneaker_id)),
            )
            .exec(conn)
            .await?;

        if related_ids.is_empty() {
            return Ok(());
        }

        let mut rows = Vec::with_capacity(related_ids.len() * 2);
        for related_id in related_ids {
            rows.push(sneaker_link::ActiveModel {
                sneaker_id: Set(sneaker_id),
                related_sneaker_id: Set(*related_id),
            });
            rows.push(sneaker_link::ActiveModel {
                sneaker_id: Set(*related_id),
                related_sneaker_id: Set(sneaker_id),
            });
        }

        sneaker_link::Entity::insert_many(rows).exec(conn).await?;
        Ok(())
    }
}

fn field_error(field: &'static str, code: &'static str, message: &'static str) -> ServiceError {
    let mut errors = ValidationErrors::new();
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    errors.add(field, err);
    errors.into()
}
