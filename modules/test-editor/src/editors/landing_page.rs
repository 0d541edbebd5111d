use frontend_settings_sdk::Test;
use frontend_settings_sdk::features::LandingPageVariant;

use super::{TestEditor, not_blank, report_common, variant_field};
use crate::validation::ValidationAggregator;

#[derive(Debug, Clone, Copy, Default)]
pub struct LandingPageEditor;

impl TestEditor<LandingPageVariant> for LandingPageEditor {
    fn report_validity(
        &self,
        test: &Test<LandingPageVariant>,
        validation: &mut ValidationAggregator,
    ) {
        report_common(test, validation);
        for variant in &test.variants {
            validation.set_validation_status_for_field(
                variant_field(&variant.name, "copy.heading"),
                not_blank(&variant.copy.heading),
            );
            validation.set_validation_status_for_field(
                variant_field(&variant.name, "copy.subheading"),
                not_blank(&variant.copy.subheading),
            );
        }
    }
}
