use frontend_settings_sdk::Test;
use frontend_settings_sdk::features::ChoiceCardsVariant;

use super::{TestEditor, not_blank, report_common, variant_field};
use crate::validation::ValidationAggregator;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceCardsEditor;

impl TestEditor<ChoiceCardsVariant> for ChoiceCardsEditor {
    fn report_validity(
        &self,
        test: &Test<ChoiceCardsVariant>,
        validation: &mut ValidationAggregator,
    ) {
        report_common(test, validation);
        for variant in &test.variants {
            let cards = &variant.choice_cards;
            // exactly one card is preselected
            validation.set_validation_status_for_field(
                variant_field(&variant.name, "choiceCards"),
                !cards.is_empty() && cards.iter().filter(|c| c.is_default).count() == 1,
            );
            validation.set_validation_status_for_field(
                variant_field(&variant.name, "choiceCards.label"),
                cards.iter().all(|c| not_blank(&c.label)),
            );
        }
    }
}
