//! Per-feature test editors.
//!
//! An editor owns the field rules of one test shape. Its only duty towards
//! the shell is to report the validity of every field it knows about.

use frontend_settings_sdk::Test;
use frontend_settings_sdk::features::{Cta, Methodology, TickerSettings, Variant};
use url::Url;

use crate::validation::ValidationAggregator;

mod amounts;
mod banner;
mod checkout_nudge;
mod choice_cards;
mod epic;
mod landing_page;

pub use amounts::AmountsEditor;
pub use banner::BannerEditor;
pub use checkout_nudge::CheckoutNudgeEditor;
pub use choice_cards::ChoiceCardsEditor;
pub use epic::EpicEditor;
pub use landing_page::LandingPageEditor;

pub trait TestEditor<V: Variant>: Send + Sync {
    /// Report every field of `test` to `validation`.
    fn report_validity(&self, test: &Test<V>, validation: &mut ValidationAggregator);
}

/// Validation key of a field of one variant: `variants.<variant>.<field>`.
#[must_use]
pub fn variant_field(variant: &str, field: &str) -> String {
    format!("variants.{variant}.{field}")
}

/// Rules shared by every test shape.
pub(crate) fn report_common<V: Variant>(test: &Test<V>, validation: &mut ValidationAggregator) {
    validation.set_validation_status_for_field(
        "variants",
        !(test.is_live() && test.variants.is_empty()),
    );
    validation.set_validation_status_for_field(
        "methodologies",
        !test.methodologies.is_empty()
            && test.methodologies.iter().all(|m| match m {
                Methodology::EpsilonGreedyBandit { epsilon } => (0.0..=1.0).contains(epsilon),
                Methodology::AbTest | Methodology::Roulette => true,
            }),
    );
}

pub(crate) fn not_blank(text: &str) -> bool {
    !text.trim().is_empty()
}

pub(crate) fn is_valid_cta(cta: &Cta) -> bool {
    not_blank(&cta.text) && Url::parse(&cta.base_url).is_ok_and(|u| u.has_host())
}

pub(crate) fn is_valid_ticker(ticker: &TickerSettings) -> bool {
    not_blank(&ticker.name) && not_blank(&ticker.copy.count_label)
}

pub(crate) fn report_cta(
    validation: &mut ValidationAggregator,
    variant: &str,
    field: &str,
    cta: Option<&Cta>,
) {
    validation.set_validation_status_for_field(
        variant_field(variant, field),
        cta.is_none_or(is_valid_cta),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontend_settings_sdk::TestStatus;
    use frontend_settings_sdk::features::EpicVariant;

    #[test]
    fn live_test_needs_a_variant() {
        let mut test = Test::<EpicVariant>::draft("T", None);
        let mut validation = ValidationAggregator::new();

        report_common(&test, &mut validation);
        assert!(validation.is_valid());

        test.status = TestStatus::Live;
        report_common(&test, &mut validation);
        assert_eq!(validation.invalid_fields(), vec!["variants"]);
    }

    #[test]
    fn bandit_epsilon_must_be_a_probability() {
        let mut test = Test::<EpicVariant>::draft("T", None);
        test.methodologies = vec![Methodology::EpsilonGreedyBandit { epsilon: 1.5 }];
        let mut validation = ValidationAggregator::new();

        report_common(&test, &mut validation);

        assert_eq!(validation.invalid_fields(), vec!["methodologies"]);
    }

    #[test]
    fn cta_needs_text_and_absolute_url() {
        let good = Cta {
            text: "Support us".to_owned(),
            base_url: "https://support.example.com/contribute".to_owned(),
        };
        assert!(is_valid_cta(&good));
        assert!(!is_valid_cta(&Cta {
            text: " ".to_owned(),
            ..good.clone()
        }));
        assert!(!is_valid_cta(&Cta {
            base_url: "/contribute".to_owned(),
            ..good
        }));
    }
}
