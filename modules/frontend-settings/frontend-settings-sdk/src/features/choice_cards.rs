use serde::{Deserialize, Serialize};

use super::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    Contribution,
    SupporterPlus,
    TierThree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceCard {
    pub product: ProductType,
    pub label: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Choice cards: the product picker embedded in epics and banners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceCardsVariant {
    pub name: String,
    #[serde(default)]
    pub choice_cards: Vec<ChoiceCard>,
}

impl Variant for ChoiceCardsVariant {
    fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            choice_cards: vec![
                ChoiceCard {
                    product: ProductType::Contribution,
                    label: "Support once".to_owned(),
                    benefits: Vec::new(),
                    is_default: false,
                },
                ChoiceCard {
                    product: ProductType::SupporterPlus,
                    label: "All-access digital".to_owned(),
                    benefits: Vec::new(),
                    is_default: true,
                },
            ],
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
