use frontend_settings_sdk::Test;
use frontend_settings_sdk::features::EpicVariant;

use super::{TestEditor, is_valid_ticker, not_blank, report_common, report_cta, variant_field};
use crate::validation::ValidationAggregator;

/// Epics and liveblog epics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpicEditor;

impl TestEditor<EpicVariant> for EpicEditor {
    fn report_validity(&self, test: &Test<EpicVariant>, validation: &mut ValidationAggregator) {
        report_common(test, validation);
        for variant in &test.variants {
            let name = variant.name.as_str();
            validation.set_validation_status_for_field(
                variant_field(name, "heading"),
                not_blank(&variant.heading),
            );
            validation.set_validation_status_for_field(
                variant_field(name, "paragraphs"),
                variant.paragraphs.iter().all(|p| not_blank(p)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use frontend_settings_sdk::Variant as _;

    #[test]
    fn empty_heading_is_invalid() {
        let mut test = Test::draft("2025-01-01_MY_TEST", None);
        test.variants.push(EpicVariant::with_name("control"));
        let mut validation = ValidationAggregator::new();

        EpicEditor.report_validity(&test, &mut validation);
        assert_eq!(validation.invalid_fields(), vec!["variants.control.heading"]);

        test.variants[0].heading = "Hello".to_owned();
        EpicEditor.report_validity(&test, &mut validation);
        assert!(validation.is_valid());
    }

    #[test]
    fn blank_paragraph_is_invalid() {
        let mut variant = EpicVariant::with_name("v1");
        variant.heading = "Hi".to_owned();
        variant.paragraphs = vec!["First".to_owned(), String::new()];
        let mut test = Test::draft("T", None);
        test.variants.push(variant);
        let mut validation = ValidationAggregator::new();

        EpicEditor.report_validity(&test, &mut validation);

        assert_eq!(validation.invalid_fields(), vec!["variants.v1.paragraphs"]);
    }
}
