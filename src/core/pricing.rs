//! Discount pricing and category grouping for the price list.
//!
//! A [`Catalog`] is built once per session and is read-only afterwards.

use crate::domain::model::{CategoryGroup, PricedService, ServiceRecord};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_range;
use serde::Serialize;
use std::collections::HashMap;

const CATALOG_SOURCE_NAME: &str = "price list";

/// Largest accepted base price; keeps every price and any realistic total
/// well inside `u64`.
pub const MAX_BASE_PRICE: f64 = u32::MAX as f64;

/// Grouping and lookup key: trimmed and case-folded.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Whole-unit price after discount, rounded half away from zero.
///
/// Never exceeds `base_price`: a fractional base that would round up is
/// clamped to its floor.
pub fn discounted_price(base_price: f64, discount_rate: f64) -> u64 {
    let rounded = (base_price * (1.0 - discount_rate)).round();
    rounded.min(base_price.floor()).max(0.0) as u64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    groups: Vec<CategoryGroup>,
    discount_rate: f64,
}

impl Catalog {
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn services(&self) -> impl Iterator<Item = &PricedService> {
        self.groups.iter().flat_map(|g| g.services.iter())
    }

    pub fn len(&self) -> usize {
        self.services().count()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// First service whose name matches, ignoring case and surrounding space.
    pub fn find(&self, service_name: &str) -> Option<&PricedService> {
        let wanted = normalize_key(service_name);
        self.services()
            .find(|s| normalize_key(&s.service_name) == wanted)
    }

    /// Groups restricted to one category (`None` or `"all"` keeps every group)
    /// and to services whose name contains `term`. Groups left empty are dropped.
    pub fn filter(&self, category: Option<&str>, term: Option<&str>) -> Vec<CategoryGroup> {
        let category = category
            .map(normalize_key)
            .filter(|c| !c.is_empty() && c != "all");
        let term = term.map(normalize_key).filter(|t| !t.is_empty());

        self.groups
            .iter()
            .filter(|g| category.as_ref().map_or(true, |c| &g.key == c))
            .filter_map(|g| {
                let services: Vec<PricedService> = g
                    .services
                    .iter()
                    .filter(|s| {
                        term.as_ref()
                            .map_or(true, |t| s.service_name.to_lowercase().contains(t.as_str()))
                    })
                    .cloned()
                    .collect();
                if services.is_empty() {
                    None
                } else {
                    Some(CategoryGroup {
                        key: g.key.clone(),
                        label: g.label.clone(),
                        services,
                    })
                }
            })
            .collect()
    }
}

pub fn build_catalog(records: Vec<ServiceRecord>, discount_rate: f64) -> Result<Catalog> {
    validate_range("discount_rate", discount_rate, 0.0, 1.0)?;

    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    // Selections are keyed by service name, so a name may appear only once.
    let mut seen: HashMap<String, String> = HashMap::new();

    for (row, record) in records.into_iter().enumerate() {
        let label = record.category.trim();
        let service_name = record.service_name.trim();

        if label.is_empty() || service_name.is_empty() {
            return Err(BookingError::catalog_load(
                CATALOG_SOURCE_NAME,
                format!("record {} has an empty category or service name", row + 1),
            ));
        }
        if !record.base_price.is_finite()
            || record.base_price < 0.0
            || record.base_price > MAX_BASE_PRICE
        {
            return Err(BookingError::catalog_load(
                CATALOG_SOURCE_NAME,
                format!(
                    "record {} ({}) has invalid price {}",
                    row + 1,
                    service_name,
                    record.base_price
                ),
            ));
        }

        let key = normalize_key(label);
        if let Some(first_category) = seen.get(&normalize_key(service_name)) {
            return Err(BookingError::catalog_load(
                CATALOG_SOURCE_NAME,
                format!(
                    "duplicate service '{}' in category '{}' (already listed under '{}')",
                    service_name, label, first_category
                ),
            ));
        }
        seen.insert(normalize_key(service_name), label.to_string());

        let priced = PricedService {
            category: label.to_string(),
            service_name: service_name.to_string(),
            base_price: record.base_price,
            discounted_price: discounted_price(record.base_price, discount_rate),
        };
        tracing::debug!(
            "Priced {} / {}: {} -> {}",
            priced.category,
            priced.service_name,
            priced.base_price,
            priced.discounted_price
        );

        let idx = *group_index.entry(key.clone()).or_insert_with(|| {
            groups.push(CategoryGroup {
                key,
                label: label.to_string(),
                services: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].services.push(priced);
    }

    Ok(Catalog {
        groups,
        discount_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, service: &str, price: f64) -> ServiceRecord {
        ServiceRecord {
            category: category.to_string(),
            service_name: service.to_string(),
            base_price: price,
        }
    }

    fn sample() -> Vec<ServiceRecord> {
        vec![
            record("Hair", "Haircut", 100.0),
            record(" Face ", "Facial", 200.0),
            record("hair", "Hair Color", 250.0),
            record("Nails", "Manicure", 55.0),
        ]
    }

    #[test]
    fn test_discounted_price_example() {
        assert_eq!(discounted_price(100.0, 0.10), 90);
    }

    #[test]
    fn test_discounted_price_rounds_half_up() {
        // 55 * 0.9 = 49.5
        assert_eq!(discounted_price(55.0, 0.10), 50);
        // 45 * 0.9 = 40.5
        assert_eq!(discounted_price(45.0, 0.10), 41);
        assert_eq!(discounted_price(33.0, 0.15), 28);
    }

    #[test]
    fn test_discounted_price_bounds() {
        for base in [0.0, 0.4, 0.6, 1.0, 9.5, 99.5, 100.0, 1234.56] {
            for step in 0..=20 {
                let rate = step as f64 / 20.0;
                let price = discounted_price(base, rate);
                assert!(
                    (price as f64) <= base,
                    "base {} rate {} gave {}",
                    base,
                    rate,
                    price
                );
            }
        }
        assert_eq!(discounted_price(200.0, 1.0), 0);
        assert_eq!(discounted_price(200.0, 0.0), 200);
        assert_eq!(discounted_price(0.6, 0.0), 0);
    }

    #[test]
    fn test_build_catalog_groups_in_first_seen_order() {
        let catalog = build_catalog(sample(), 0.10).unwrap();
        let labels: Vec<&str> = catalog.groups().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Hair", "Face", "Nails"]);

        let hair = &catalog.groups()[0];
        assert_eq!(hair.key, "hair");
        let names: Vec<&str> = hair.services.iter().map(|s| s.service_name.as_str()).collect();
        assert_eq!(names, vec!["Haircut", "Hair Color"]);
        assert_eq!(hair.services[1].base_price, 250.0);
        assert_eq!(hair.services[1].discounted_price, 225);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_build_catalog_is_deterministic() {
        let first = build_catalog(sample(), 0.10).unwrap();
        let second = build_catalog(sample(), 0.10).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_catalog_rejects_out_of_range_rate() {
        assert!(matches!(
            build_catalog(sample(), 1.5),
            Err(BookingError::InvalidConfigValueError { .. })
        ));
        assert!(build_catalog(sample(), -0.01).is_err());
    }

    #[test]
    fn test_build_catalog_rejects_duplicates() {
        let mut records = sample();
        records.push(record("HAIR ", " haircut", 80.0));
        let err = build_catalog(records, 0.10).unwrap_err();
        assert!(matches!(err, BookingError::CatalogLoadError { .. }));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_build_catalog_rejects_same_name_in_other_category() {
        let records = vec![record("Hair", "Wash", 20.0), record("Nails", " wash", 15.0)];
        let err = build_catalog(records, 0.0).unwrap_err();
        assert!(matches!(err, BookingError::CatalogLoadError { .. }));
        assert!(err.to_string().contains("already listed under 'Hair'"));
    }

    #[test]
    fn test_build_catalog_rejects_oversized_price() {
        for price in [1e19, 1e25, MAX_BASE_PRICE + 1.0] {
            let records = vec![record("Hair", "Haircut", price)];
            assert!(
                matches!(
                    build_catalog(records, 0.0),
                    Err(BookingError::CatalogLoadError { .. })
                ),
                "price {} was accepted",
                price
            );
        }

        let records = vec![record("Hair", "Haircut", MAX_BASE_PRICE)];
        let catalog = build_catalog(records, 0.0).unwrap();
        assert_eq!(catalog.find("Haircut").unwrap().discounted_price, u32::MAX as u64);
    }

    #[test]
    fn test_build_catalog_rejects_negative_price() {
        let records = vec![record("Hair", "Haircut", -1.0)];
        assert!(matches!(
            build_catalog(records, 0.1),
            Err(BookingError::CatalogLoadError { .. })
        ));
    }

    #[test]
    fn test_find_ignores_case() {
        let catalog = build_catalog(sample(), 0.10).unwrap();
        let facial = catalog.find("  FACIAL").unwrap();
        assert_eq!(facial.discounted_price, 180);
        assert!(catalog.find("Pedicure").is_none());
    }

    #[test]
    fn test_filter_by_category_and_term() {
        let catalog = build_catalog(sample(), 0.10).unwrap();

        assert_eq!(catalog.filter(None, None).len(), 3);
        assert_eq!(catalog.filter(Some("all"), None).len(), 3);

        let hair = catalog.filter(Some("HAIR"), None);
        assert_eq!(hair.len(), 1);
        assert_eq!(hair[0].services.len(), 2);

        let color = catalog.filter(None, Some("color"));
        assert_eq!(color.len(), 1);
        assert_eq!(color[0].services[0].service_name, "Hair Color");

        assert!(catalog.filter(Some("nails"), Some("facial")).is_empty());
    }
}
