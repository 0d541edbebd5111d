use frontend_settings_sdk::Test;
use frontend_settings_sdk::features::BannerVariant;

use super::{TestEditor, is_valid_ticker, not_blank, report_common, report_cta, variant_field};
use crate::validation::ValidationAggregator;

#[derive(Debug, Clone, Copy, Default)]
pub struct BannerEditor;

impl TestEditor<BannerVariant> for BannerEditor {
    fn report_validity(&self, test: &Test<BannerVariant>, validation: &mut ValidationAggregator) {
        report_common(test, validation);
        for variant in &test.variants {
            let name = variant.name.as_str();
            // heading is optional, but not blank when given
            validation.set_validation_status_for_field(
                variant_field(name, "heading"),
                variant.heading.as_deref().is_none_or(not_blank),
            );
            validation.set_validation_status_for_field(
                variant_field(name, "paragraphs"),
                !variant.paragraphs.is_empty() && variant.paragraphs.iter().all(|p| not_blank(p)),
            );
            report_cta(validation, name, "cta", variant.cta.as_ref());
            report_cta(validation, name, "secondaryCta", variant.secondary_cta.as_ref());
            validation.set_validation_status_for_field(
                variant_field(name, "tickerSettings"),
                variant.ticker_settings.as_ref().is_none_or(is_valid_ticker),
            );
        }
    }
}
