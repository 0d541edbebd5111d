use serde::{Deserialize, Serialize};

use super::Variant;
use super::choice_cards::ProductType;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NudgeCopy {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nudge {
    pub nudge_copy: NudgeCopy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thank_you_copy: Option<NudgeCopy>,
    /// Product the reader is nudged towards.
    pub nudge_to_product: ProductType,
}

/// Checkout nudge: an upsell shown on the checkout page.
///
/// A variant without a nudge is the control arm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutNudgeVariant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nudge: Option<Nudge>,
}

impl Variant for CheckoutNudgeVariant {
    fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nudge: None,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
