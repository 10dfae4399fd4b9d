use std::collections::BTreeMap;

use crate::models::{CatalogItem, ItemId};

/// Read-only view of the item catalog. The catalog is owned by an external
/// collaborator; the core only resolves ids against it, so tests can inject
/// whatever inventory a scenario needs.
pub trait Catalog: Send + Sync {
    fn item(&self, id: &str) -> Option<CatalogItem>;
    fn items(&self) -> BTreeMap<ItemId, CatalogItem>;
}

pub struct InMemoryCatalog {
    items: BTreeMap<ItemId, CatalogItem>,
}

impl InMemoryCatalog {
    pub fn new(items: BTreeMap<ItemId, CatalogItem>) -> Self {
        Self { items }
    }

    /// The U-Store sample inventory used for local development.
    pub fn with_sample_items() -> Self {
        let entries = [
            ("1", "Coke", 109, "drinks"),
            ("2", "Diet Coke", 129, "drinks"),
            ("3", "Tropicana Orange Juice", 89, "drinks"),
            ("4", "Lay's Potato Chips", 159, "food"),
            ("5", "Snickers Bar", 99, "food"),
            ("6", "Notebook", 249, "other"),
        ];
        let items = entries
            .into_iter()
            .map(|(id, name, price_cents, category)| {
                (
                    id.to_string(),
                    CatalogItem {
                        name: name.to_string(),
                        price_cents,
                        category: category.to_string(),
                    },
                )
            })
            .collect();
        Self { items }
    }
}

impl Catalog for InMemoryCatalog {
    fn item(&self, id: &str) -> Option<CatalogItem> {
        self.items.get(id).cloned()
    }

    fn items(&self) -> BTreeMap<ItemId, CatalogItem> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_resolves_items() {
        let catalog = InMemoryCatalog::with_sample_items();
        let coke = catalog.item("1").expect("sample item");
        assert_eq!(coke.name, "Coke");
        assert_eq!(coke.price_cents, 109);
        assert!(catalog.item("999").is_none());
    }
}
