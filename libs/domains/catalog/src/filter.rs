//! Filter compiler
//!
//! Turns the optional criteria of a [`ProductFilter`] into one composed
//! predicate over the products-with-category select, and parses the
//! "field,direction" sort token.

use sea_orm::{ColumnTrait, Condition};
use tracing::warn;

use crate::entity::{category, product};
use crate::models::{ProductFilter, SortDirection, SortField};

/// Compile the present criteria into an accumulated conjunction.
///
/// Each absent slot contributes nothing, so an empty filter yields an empty
/// condition that matches everything. The caller applies the same condition
/// to both the count and the page fetch.
pub fn compile(criteria: &ProductFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(names) = &criteria.categories {
        if !names.is_empty() {
            condition = condition.add(category::Column::Name.is_in(names.clone()));
        }
    }

    if let Some(min_price) = criteria.min_price {
        condition = condition.add(product::Column::Price.gte(min_price));
    }

    if let Some(max_price) = criteria.max_price {
        condition = condition.add(product::Column::Price.lte(max_price));
    }

    condition
}

/// Parse a "field,direction" sort token.
///
/// Wrong arity, an unknown field, or an unknown direction all degrade to
/// `None` with a warning; a bad sort token must never fail the query.
pub fn parse_sort(token: &str) -> Option<(SortField, SortDirection)> {
    let mut parts = token.split(',');
    let (Some(field), Some(direction), None) = (parts.next(), parts.next(), parts.next()) else {
        warn!(token, "Ignoring malformed sort expression");
        return None;
    };

    match (
        field.trim().parse::<SortField>(),
        direction.trim().parse::<SortDirection>(),
    ) {
        (Ok(field), Ok(direction)) => Some((field, direction)),
        _ => {
            warn!(token, "Ignoring malformed sort expression");
            None
        }
    }
}
