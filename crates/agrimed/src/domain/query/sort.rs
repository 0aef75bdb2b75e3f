//! Sorting of listing results

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::entities::MedicineListing;

/// Sortable listing field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Price,
    Name,
    Views,
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::CreatedAt => write!(f, "createdAt"),
            SortField::UpdatedAt => write!(f, "updatedAt"),
            SortField::Price => write!(f, "price"),
            SortField::Name => write!(f, "name"),
            SortField::Views => write!(f, "views"),
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "createdat" | "created_at" => Ok(SortField::CreatedAt),
            "updatedat" | "updated_at" => Ok(SortField::UpdatedAt),
            "price" => Ok(SortField::Price),
            "name" => Ok(SortField::Name),
            "views" => Ok(SortField::Views),
            _ => Err(format!(
                "sortBy must be one of: createdAt, updatedAt, price, name, views (got {})",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("sortOrder must be one of: asc, desc (got {})", s)),
        }
    }
}

/// Ordering applied before the page window. Ties are broken by ascending id so
/// repeated queries return identical pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl SortSpec {
    pub fn new(sort_by: SortField, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
        }
    }

    /// Most recently created first
    pub fn newest_first() -> Self {
        Self::default()
    }

    pub fn compare(&self, a: &MedicineListing, b: &MedicineListing) -> Ordering {
        let primary = match self.sort_by {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Views => a.views.cmp(&b.views),
        };
        let primary = match self.sort_order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::copper_fungicide;
    use super::*;

    #[test]
    fn test_parse_sort_params() {
        assert_eq!("createdAt".parse::<SortField>(), Ok(SortField::CreatedAt));
        assert_eq!("PRICE".parse::<SortField>(), Ok(SortField::Price));
        assert!("rating".parse::<SortField>().is_err());
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_default_is_newest_first() {
        let spec = SortSpec::default();
        assert_eq!(spec.sort_by, SortField::CreatedAt);
        assert_eq!(spec.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_compare_by_price_both_directions() {
        let cheap = copper_fungicide();
        let mut pricey = copper_fungicide();
        pricey.price = 99.0;

        let asc = SortSpec::new(SortField::Price, SortOrder::Asc);
        assert_eq!(asc.compare(&cheap, &pricey), Ordering::Less);
        let desc = SortSpec::new(SortField::Price, SortOrder::Desc);
        assert_eq!(desc.compare(&cheap, &pricey), Ordering::Greater);
    }

    #[test]
    fn test_name_order_ignores_case() {
        let mut apple = copper_fungicide();
        apple.name = "apple scab spray".to_string();
        let mut banana = copper_fungicide();
        banana.name = "Banana wilt guard".to_string();

        let asc = SortSpec::new(SortField::Name, SortOrder::Asc);
        assert_eq!(asc.compare(&apple, &banana), Ordering::Less);
        let desc = SortSpec::new(SortField::Name, SortOrder::Desc);
        assert_eq!(desc.compare(&apple, &banana), Ordering::Greater);

        let mut shouting = apple.clone();
        shouting.name = "APPLE SCAB SPRAY".to_string();
        shouting.id = uuid::Uuid::new_v4();
        assert_eq!(asc.compare(&apple, &shouting), apple.id.cmp(&shouting.id));
    }

    #[test]
    fn test_ties_break_on_id() {
        let a = copper_fungicide();
        let mut b = a.clone();
        b.id = uuid::Uuid::new_v4();
        let spec = SortSpec::new(SortField::Price, SortOrder::Desc);
        assert_eq!(spec.compare(&a, &b), a.id.cmp(&b.id));
    }
}
