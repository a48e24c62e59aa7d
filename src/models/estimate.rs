// src/models/estimate.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::product::SelectedProduct;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProjectType {
    Kitchen,
    Bathroom,
    Basement,
    Exterior,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::Kitchen,
        ProjectType::Bathroom,
        ProjectType::Basement,
        ProjectType::Exterior,
        ProjectType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Kitchen => "Kitchen",
            ProjectType::Bathroom => "Bathroom",
            ProjectType::Basement => "Basement",
            ProjectType::Exterior => "Exterior",
            ProjectType::Other => "Other",
        }
    }
}

// Conversão usada pelo sqlx (coluna TEXT -> enum tipado)
impl TryFrom<String> for ProjectType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Kitchen" => Ok(ProjectType::Kitchen),
            "Bathroom" => Ok(ProjectType::Bathroom),
            "Basement" => Ok(ProjectType::Basement),
            "Exterior" => Ok(ProjectType::Exterior),
            "Other" => Ok(ProjectType::Other),
            other => Err(format!("project_type desconhecido: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Quality {
    Good,
    #[default]
    Better,
    Best,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Good => "Good",
            Quality::Better => "Better",
            Quality::Best => "Best",
        }
    }

    /// Multiplicador aplicado sobre a taxa-base por sqft.
    pub fn multiplier(self) -> f64 {
        match self {
            Quality::Good => 0.9,
            Quality::Better => 1.0,
            Quality::Best => 1.15,
        }
    }
}

impl TryFrom<String> for Quality {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Good" => Ok(Quality::Good),
            "Better" => Ok(Quality::Better),
            "Best" => Ok(Quality::Best),
            other => Err(format!("quality desconhecida: {other}")),
        }
    }
}

// --- REQUISIÇÃO ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub project_type: ProjectType,

    #[validate(range(min = 1.0, max = 10000.0, message = "roomSizeSqft must be between 1 and 10000"))]
    #[schema(example = 160.0)]
    pub room_size_sqft: f64,

    #[serde(default)]
    pub quality: Quality,

    #[serde(default)]
    #[validate(nested)]
    pub selected_products: Vec<SelectedProduct>,
}

// --- RESPOSTA (imutável depois de calculada) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    #[schema(example = "Demo & protection")]
    pub label: String,
    /// Custo em dólares inteiros (arredondado para exibição).
    #[schema(example = 3264)]
    pub cost: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EstimateRange {
    pub low: i64,
    pub high: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub items: Vec<LineItem>,
    pub subtotal: i64,
    #[schema(example = 0.35)]
    pub markup_rate: f64,
    /// Total arredondado para a centena mais próxima.
    pub total: i64,
    pub range: EstimateRange,
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate as _;

    fn req(sqft: f64) -> EstimateRequest {
        EstimateRequest {
            project_type: ProjectType::Kitchen,
            room_size_sqft: sqft,
            quality: Quality::Better,
            selected_products: vec![],
        }
    }

    #[test]
    fn room_size_bounds_are_inclusive() {
        assert!(req(1.0).validate().is_ok());
        assert!(req(10000.0).validate().is_ok());
        assert!(req(0.5).validate().is_err());
        assert!(req(10001.0).validate().is_err());
    }

    #[test]
    fn quality_defaults_to_better() {
        let parsed: EstimateRequest =
            serde_json::from_str(r#"{"projectType":"Kitchen","roomSizeSqft":100}"#).unwrap();
        assert_eq!(parsed.quality, Quality::Better);
        assert!(parsed.selected_products.is_empty());
    }

    #[test]
    fn negative_qty_is_rejected() {
        let parsed: EstimateRequest = serde_json::from_str(
            r#"{"projectType":"Bathroom","roomSizeSqft":60,"selectedProducts":[
                {"sku":"X","name":"x","brand":"b","price":10.0,"unit":"each","image":"","qty":-1.0}
            ]}"#,
        )
        .unwrap();
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn project_type_round_trips_through_text() {
        for pt in ProjectType::ALL {
            assert_eq!(ProjectType::try_from(pt.as_str().to_owned()).unwrap(), pt);
        }
        assert!(ProjectType::try_from("Garage".to_owned()).is_err());
    }
}
