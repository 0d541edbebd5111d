use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionType {
    OneOff,
    Monthly,
    Annual,
}

/// Amount choices offered for one contribution type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountValues {
    pub amounts: Vec<u32>,
    pub default_amount: u32,
    #[serde(default)]
    pub hide_choose_your_amount: bool,
}

/// Amounts selector: preset amounts per contribution type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountsVariant {
    pub name: String,
    pub default_contribution_type: ContributionType,
    #[serde(default)]
    pub display_contribution_type: Vec<ContributionType>,
    #[serde(default)]
    pub amounts_card_data: BTreeMap<ContributionType, AmountValues>,
}

impl Variant for AmountsVariant {
    fn with_name(name: impl Into<String>) -> Self {
        let card = |amounts: Vec<u32>, default_amount| AmountValues {
            amounts,
            default_amount,
            hide_choose_your_amount: false,
        };

        Self {
            name: name.into(),
            default_contribution_type: ContributionType::Monthly,
            display_contribution_type: vec![
                ContributionType::OneOff,
                ContributionType::Monthly,
                ContributionType::Annual,
            ],
            amounts_card_data: BTreeMap::from([
                (ContributionType::OneOff, card(vec![30, 60, 120, 240], 60)),
                (ContributionType::Monthly, card(vec![5, 10, 20], 10)),
                (ContributionType::Annual, card(vec![60, 120, 240], 120)),
            ]),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_data_is_keyed_by_contribution_type() {
        let variant = AmountsVariant::with_name("control");
        let json = serde_json::to_value(&variant).unwrap();

        assert_eq!(json["defaultContributionType"], "MONTHLY");
        assert_eq!(json["amountsCardData"]["ONE_OFF"]["defaultAmount"], 60);

        let parsed: AmountsVariant = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, variant);
    }
}
