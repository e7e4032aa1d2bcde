//! Translates user-supplied query parameters into a predicate over the
//! sneaker store.
//!
//! Structured filters (`brand`, `designer`, `year_released`) match
//! exactly; `search` adds an OR'd case-insensitive substring match across
//! sneaker name, designer, and brand name. A value that fails coercion
//! (a non-integer year, a malformed brand id) drops that one filter
//! rather than failing the query. The set of filters actually applied is
//! reported back for display.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::{brand, sneaker};

/// Raw query parameters as they arrive on `/query`.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct SneakerFilterParams {
    /// Brand id, exact match
    pub brand: Option<String>,
    /// Designer name, exact match
    pub designer: Option<String>,
    /// Release year, exact match
    pub year_released: Option<String>,
    /// Free-text search across name, designer, and brand name
    pub search: Option<String>,
}

/// A filter that was non-empty and actually applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActiveFilter {
    pub label: String,
    pub value: String,
}

/// Parsed filter set.
#[derive(Clone, Debug, Default)]
pub struct SneakerFilter {
    brand: Option<Uuid>,
    designer: Option<String>,
    year_released: Option<i32>,
    search: Option<String>,
    active: Vec<ActiveFilter>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SneakerFilter {
    /// Coerces raw parameters, dropping any filter whose value fails
    /// coercion, and records the filters that survived.
    pub fn parse(params: &SneakerFilterParams) -> Self {
        let mut filter = Self::default();

        if let Some(raw) = non_empty(&params.brand) {
            if let Ok(id) = Uuid::parse_str(raw) {
                filter.brand = Some(id);
                filter.active.push(ActiveFilter {
                    label: "brand".to_string(),
                    value: raw.to_string(),
                });
            }
        }

        if let Some(designer) = non_empty(&params.designer) {
            filter.designer = Some(designer.to_string());
            filter.active.push(ActiveFilter {
                label: "designer".to_string(),
                value: designer.to_string(),
            });
        }

        if let Some(raw) = non_empty(&params.year_released) {
            if let Ok(year) = raw.parse::<i32>() {
                filter.year_released = Some(year);
                filter.active.push(ActiveFilter {
                    label: "year released".to_string(),
                    value: raw.to_string(),
                });
            }
        }

        if let Some(search) = non_empty(&params.search) {
            filter.search = Some(search.to_string());
            filter.active.push(ActiveFilter {
                label: "search".to_string(),
                value: search.to_string(),
            });
        }

        filter
    }

    /// Predicate over sneakers joined with their brand. The caller is
    /// responsible for restricting to non-deleted rows.
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(brand_id) = self.brand {
            cond = cond.add(sneaker::Column::BrandId.eq(brand_id));
        }
        if let Some(designer) = &self.designer {
            cond = cond.add(sneaker::Column::Designer.eq(designer.clone()));
        }
        if let Some(year) = self.year_released {
            cond = cond.add(sneaker::Column::YearReleased.eq(year));
        }
        if let Some(search) = &self.search {
            let pattern = icontains_pattern(search);
            cond = cond.add(
                Condition::any()
                    .add(icontains((sneaker::Entity, sneaker::Column::Name), &pattern))
                    .add(icontains((sneaker::Entity, sneaker::Column::Designer), &pattern))
                    .add(icontains((brand::Entity, brand::Column::Name), &pattern)),
            );
        }

        cond
    }

    /// The filters that were non-empty and survived coercion.
    pub fn active_filters(&self) -> &[ActiveFilter] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Case-insensitive substring match, portable across backends: both the
/// column and the pattern are lowercased before LIKE, and the escape
/// character is declared explicitly since not every backend defaults to
/// backslash.
fn icontains<C>(col: C, pattern: &str) -> sea_orm::sea_query::SimpleExpr
where
    C: sea_orm::sea_query::IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}

fn icontains_pattern(search: &str) -> String {
    let escaped = search
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
