//! Lookup table of settings documents and their statically known shapes.
//!
//! Every document is addressed by a [`SettingsType`]. Test-bearing documents
//! are additionally bound to their test shape through [`TestsResource`], so
//! that call sites work with typed tests rather than raw JSON.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::features::{
    AmountsVariant, BannerVariant, CheckoutNudgeVariant, ChoiceCardsVariant, EpicVariant,
    LandingPageVariant, Test, Variant,
};
use crate::models::TestList;

/// Named settings documents held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingsType {
    EpicTests,
    LiveblogEpicTests,
    BannerTests,
    LandingPageTests,
    CheckoutNudgeTests,
    ChoiceCardsTests,
    AmountsTests,
    ChannelSwitches,
}

impl SettingsType {
    pub const ALL: [SettingsType; 8] = [
        SettingsType::EpicTests,
        SettingsType::LiveblogEpicTests,
        SettingsType::BannerTests,
        SettingsType::LandingPageTests,
        SettingsType::CheckoutNudgeTests,
        SettingsType::ChoiceCardsTests,
        SettingsType::AmountsTests,
        SettingsType::ChannelSwitches,
    ];

    /// Path segment under `/frontend-settings/`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SettingsType::EpicTests => "epicTests",
            SettingsType::LiveblogEpicTests => "liveblogEpicTests",
            SettingsType::BannerTests => "bannerTests",
            SettingsType::LandingPageTests => "landingPageTests",
            SettingsType::CheckoutNudgeTests => "checkoutNudgeTests",
            SettingsType::ChoiceCardsTests => "choiceCardsTests",
            SettingsType::AmountsTests => "amountsTests",
            SettingsType::ChannelSwitches => "channelSwitches",
        }
    }

    #[must_use]
    pub fn holds_tests(self) -> bool {
        self != SettingsType::ChannelSwitches
    }

    /// Value of a document that has never been saved.
    #[must_use]
    pub fn empty_value(self) -> Value {
        if self.holds_tests() {
            serde_json::json!({ "tests": [] })
        } else {
            Value::Object(serde_json::Map::new())
        }
    }

    /// Check that `value` has the shape bound to this settings type.
    ///
    /// # Errors
    /// Returns the deserialization error describing the first mismatch.
    pub fn validate_value(self, value: &Value) -> Result<(), serde_json::Error> {
        match self {
            SettingsType::EpicTests => check::<EpicTests>(value),
            SettingsType::LiveblogEpicTests => check::<LiveblogEpicTests>(value),
            SettingsType::BannerTests => check::<BannerTests>(value),
            SettingsType::LandingPageTests => check::<LandingPageTests>(value),
            SettingsType::CheckoutNudgeTests => check::<CheckoutNudgeTests>(value),
            SettingsType::ChoiceCardsTests => check::<ChoiceCardsTests>(value),
            SettingsType::AmountsTests => check::<AmountsTests>(value),
            SettingsType::ChannelSwitches => check::<ChannelSwitches>(value),
        }
    }

    /// Check a single archived test against the test shape of this type.
    ///
    /// # Errors
    /// Returns the deserialization error, or a custom error for types that
    /// hold no tests.
    pub fn validate_test(self, test: &Value) -> Result<(), serde_json::Error> {
        fn one<R: TestsResource>(test: &Value) -> Result<(), serde_json::Error> {
            Test::<R::Variant>::deserialize(test).map(drop)
        }

        match self {
            SettingsType::EpicTests => one::<EpicTests>(test),
            SettingsType::LiveblogEpicTests => one::<LiveblogEpicTests>(test),
            SettingsType::BannerTests => one::<BannerTests>(test),
            SettingsType::LandingPageTests => one::<LandingPageTests>(test),
            SettingsType::CheckoutNudgeTests => one::<CheckoutNudgeTests>(test),
            SettingsType::ChoiceCardsTests => one::<ChoiceCardsTests>(test),
            SettingsType::AmountsTests => one::<AmountsTests>(test),
            SettingsType::ChannelSwitches => Err(serde::de::Error::custom(
                "channelSwitches does not hold tests",
            )),
        }
    }
}

fn check<R: SettingsResource>(value: &Value) -> Result<(), serde_json::Error> {
    R::Value::deserialize(value).map(drop)
}

impl fmt::Display for SettingsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown settings type '{0}'")]
pub struct UnknownSettingsType(pub String);

impl FromStr for SettingsType {
    type Err = UnknownSettingsType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingsType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownSettingsType(s.to_owned()))
    }
}

/// Static binding of a settings document to its value shape.
pub trait SettingsResource: Send + Sync + 'static {
    const SETTINGS_TYPE: SettingsType;

    type Value: Clone
        + fmt::Debug
        + PartialEq
        + Default
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
}

/// A settings document whose value is a `TestList<Test<Self::Variant>>`.
pub trait TestsResource: SettingsResource {
    type Variant: Variant;
}

macro_rules! tests_resource {
    ($(#[$meta:meta])* $name:ident, $settings_type:ident, $variant:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl SettingsResource for $name {
            const SETTINGS_TYPE: SettingsType = SettingsType::$settings_type;
            type Value = TestList<Test<$variant>>;
        }

        impl TestsResource for $name {
            type Variant = $variant;
        }
    };
}

tests_resource!(
    /// Article epics.
    EpicTests,
    EpicTests,
    EpicVariant
);
tests_resource!(
    /// Epics shown inside liveblogs; same shape as article epics.
    LiveblogEpicTests,
    LiveblogEpicTests,
    EpicVariant
);
tests_resource!(BannerTests, BannerTests, BannerVariant);
tests_resource!(LandingPageTests, LandingPageTests, LandingPageVariant);
tests_resource!(CheckoutNudgeTests, CheckoutNudgeTests, CheckoutNudgeVariant);
tests_resource!(ChoiceCardsTests, ChoiceCardsTests, ChoiceCardsVariant);
tests_resource!(AmountsTests, AmountsTests, AmountsVariant);

/// Channel on/off switches: a flat map of switch name to enabled flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelSwitches;

impl SettingsResource for ChannelSwitches {
    const SETTINGS_TYPE: SettingsType = SettingsType::ChannelSwitches;
    type Value = BTreeMap<String, bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_segments_round_trip_through_from_str() {
        for settings_type in SettingsType::ALL {
            let parsed: SettingsType = settings_type.as_str().parse().unwrap();
            assert_eq!(parsed, settings_type);
        }
        assert!("headerTests".parse::<SettingsType>().is_err());
    }

    #[test]
    fn serde_name_matches_path_segment() {
        for settings_type in SettingsType::ALL {
            let json = serde_json::to_value(settings_type).unwrap();
            assert_eq!(json, json!(settings_type.as_str()));
        }
    }

    #[test]
    fn empty_values_validate_against_their_own_shape() {
        for settings_type in SettingsType::ALL {
            assert!(
                settings_type
                    .validate_value(&settings_type.empty_value())
                    .is_ok(),
                "{settings_type} empty value should be valid"
            );
        }
    }

    #[test]
    fn validate_value_rejects_foreign_variant_shape() {
        let epic_doc = json!({
            "tests": [{
                "name": "T",
                "status": "Live",
                "variants": [{"name": "control", "heading": "Hi"}]
            }]
        });
        assert!(SettingsType::EpicTests.validate_value(&epic_doc).is_ok());
        // amounts variants require a default contribution type
        assert!(SettingsType::AmountsTests.validate_value(&epic_doc).is_err());
    }

    #[test]
    fn channel_switches_hold_no_tests() {
        assert!(!SettingsType::ChannelSwitches.holds_tests());
        assert!(
            SettingsType::ChannelSwitches
                .validate_value(&json!({"enableEpics": true}))
                .is_ok()
        );
        assert!(
            SettingsType::ChannelSwitches
                .validate_test(&json!({"name": "T", "status": "Draft"}))
                .is_err()
        );
    }

    #[test]
    fn resources_are_bound_to_their_settings_type() {
        assert_eq!(EpicTests::SETTINGS_TYPE, SettingsType::EpicTests);
        assert_eq!(AmountsTests::SETTINGS_TYPE, SettingsType::AmountsTests);
        assert_eq!(ChannelSwitches::SETTINGS_TYPE, SettingsType::ChannelSwitches);
    }
}
