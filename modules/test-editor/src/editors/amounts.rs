use frontend_settings_sdk::Test;
use frontend_settings_sdk::features::AmountsVariant;

use super::{TestEditor, report_common, variant_field};
use crate::validation::ValidationAggregator;

#[derive(Debug, Clone, Copy, Default)]
pub struct AmountsEditor;

impl TestEditor<AmountsVariant> for AmountsEditor {
    fn report_validity(&self, test: &Test<AmountsVariant>, validation: &mut ValidationAggregator) {
        report_common(test, validation);
        for variant in &test.variants {
            let displayed = &variant.display_contribution_type;
            validation.set_validation_status_for_field(
                variant_field(&variant.name, "displayContributionType"),
                !displayed.is_empty() && displayed.contains(&variant.default_contribution_type),
            );
            // only displayed contribution types need amounts
            let cards_ok = displayed.iter().all(|kind| {
                variant.amounts_card_data.get(kind).is_some_and(|card| {
                    !card.amounts.is_empty() && card.amounts.contains(&card.default_amount)
                })
            });
            validation.set_validation_status_for_field(
                variant_field(&variant.name, "amountsCardData"),
                cards_ok,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontend_settings_sdk::Variant as _;
    use frontend_settings_sdk::features::ContributionType;

    fn test_with(variant: AmountsVariant) -> Test<AmountsVariant> {
        let mut test = Test::draft("AMOUNTS", None);
        test.variants.push(variant);
        test
    }

    #[test]
    fn default_amounts_are_valid() {
        let test = test_with(AmountsVariant::with_name("control"));
        let mut validation = ValidationAggregator::new();

        AmountsEditor.report_validity(&test, &mut validation);

        assert!(validation.is_valid());
    }

    #[test]
    fn default_amount_must_be_offered() {
        let mut variant = AmountsVariant::with_name("control");
        if let Some(card) = variant.amounts_card_data.get_mut(&ContributionType::Monthly) {
            card.default_amount = 7;
        }
        let mut validation = ValidationAggregator::new();

        AmountsEditor.report_validity(&test_with(variant), &mut validation);

        assert_eq!(
            validation.invalid_fields(),
            vec!["variants.control.amountsCardData"]
        );
    }

    #[test]
    fn default_contribution_type_must_be_displayed() {
        let mut variant = AmountsVariant::with_name("control");
        variant.display_contribution_type = vec![ContributionType::OneOff];
        let mut validation = ValidationAggregator::new();

        AmountsEditor.report_validity(&test_with(variant), &mut validation);

        assert_eq!(
            validation.invalid_fields(),
            vec!["variants.control.displayContributionType"]
        );
    }
}
