// src/models/product.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Unidade de medida do catálogo. O front usa isso para decidir o passo
// de quantidade (sqft anda de 20 em 20, o resto de 1 em 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Each,
    Sqft,
    Gallon,
}

impl Unit {
    /// Quantidade inicial quando o item entra na paleta.
    pub fn default_qty(self) -> f64 {
        match self {
            Unit::Sqft => 20.0,
            Unit::Each | Unit::Gallon => 1.0,
        }
    }
}

// --- CATÁLOGO (dados de referência, imutáveis) ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductItem {
    #[schema(example = "CNT-QTZ-CALA")]
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub unit: Unit,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<ProductItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductCatalog {
    pub categories: Vec<ProductCategory>,
}

// --- SELEÇÃO DO CLIENTE ---

// Um produto do catálogo + a quantidade escolhida. Os campos do produto
// vêm inline no payload (mesmo formato do catálogo), então repetimos aqui.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SelectedProduct {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub unit: Unit,
    pub image: String,

    #[validate(range(min = 0.0, message = "qty must be non-negative"))]
    #[schema(example = 20.0)]
    pub qty: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_qty_depends_on_unit() {
        assert_eq!(Unit::Sqft.default_qty(), 20.0);
        assert_eq!(Unit::Each.default_qty(), 1.0);
        assert_eq!(Unit::Gallon.default_qty(), 1.0);
    }

    #[test]
    fn bundled_catalog_parses() {
        let raw = include_str!("../../data/products.json");
        let catalog: ProductCatalog = serde_json::from_str(raw).unwrap();
        assert!(!catalog.categories.is_empty());
        for cat in &catalog.categories {
            assert!(!cat.items.is_empty(), "categoria vazia: {}", cat.id);
        }
    }

    #[test]
    fn unit_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Unit::Sqft).unwrap(), "\"sqft\"");
        let u: Unit = serde_json::from_str("\"gallon\"").unwrap();
        assert_eq!(u, Unit::Gallon);
    }
}
