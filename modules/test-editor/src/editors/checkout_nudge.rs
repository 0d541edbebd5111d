use frontend_settings_sdk::Test;
use frontend_settings_sdk::features::CheckoutNudgeVariant;

use super::{TestEditor, not_blank, report_common, variant_field};
use crate::validation::ValidationAggregator;

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutNudgeEditor;

impl TestEditor<CheckoutNudgeVariant> for CheckoutNudgeEditor {
    fn report_validity(
        &self,
        test: &Test<CheckoutNudgeVariant>,
        validation: &mut ValidationAggregator,
    ) {
        report_common(test, validation);
        for variant in &test.variants {
            let (heading_ok, thank_you_ok) = match &variant.nudge {
                None => (true, true),
                Some(nudge) => (
                    not_blank(&nudge.nudge_copy.heading),
                    nudge
                        .thank_you_copy
                        .as_ref()
                        .is_none_or(|copy| not_blank(&copy.heading)),
                ),
            };
            validation.set_validation_status_for_field(
                variant_field(&variant.name, "nudge.nudgeCopy.heading"),
                heading_ok,
            );
            validation.set_validation_status_for_field(
                variant_field(&variant.name, "nudge.thankYouCopy.heading"),
                thank_you_ok,
            );
        }
    }
}
