//! Test and variant shapes shared by every test-bearing settings type.
//!
//! A [`Test`] carries the common configuration (name, status, targeting,
//! methodologies); the feature-specific part lives in its variants.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod amounts;
pub mod banner;
pub mod checkout_nudge;
pub mod choice_cards;
pub mod epic;
pub mod landing_page;

pub use amounts::{AmountValues, AmountsVariant, ContributionType};
pub use banner::{BannerTemplate, BannerVariant};
pub use checkout_nudge::{CheckoutNudgeVariant, Nudge, NudgeCopy};
pub use choice_cards::{ChoiceCard, ChoiceCardsVariant, ProductType};
pub use epic::EpicVariant;
pub use landing_page::{LandingPageCopy, LandingPageVariant};

/// Behaviour every feature-specific variant shape provides.
pub trait Variant:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Build a fresh variant with default copy.
    fn with_name(name: impl Into<String>) -> Self;

    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TestStatus {
    Live,
    #[default]
    Draft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    GBPCountries,
    UnitedStates,
    AUDCountries,
    EURCountries,
    International,
    NZDCountries,
    Canada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserCohort {
    AllExistingSupporters,
    AllNonSupporters,
    #[default]
    Everyone,
    PostAskPauseSingleContributors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceType {
    Mobile,
    Desktop,
    #[default]
    All,
}

/// How traffic is split between variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum Methodology {
    #[serde(rename = "ABTest")]
    AbTest,
    EpsilonGreedyBandit { epsilon: f64 },
    Roulette,
}

/// Call to action button.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cta {
    pub text: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickerCountType {
    #[serde(rename = "money")]
    Money,
    #[serde(rename = "people")]
    People,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickerEndType {
    #[serde(rename = "unlimited")]
    Unlimited,
    #[serde(rename = "hardstop")]
    Hardstop,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerCopy {
    pub count_label: String,
    pub goal_reached_primary: String,
    pub goal_reached_secondary: String,
}

/// Progress ticker shown above the copy of epics and banners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSettings {
    pub end_type: TickerEndType,
    pub count_type: TickerCountType,
    pub currency_symbol: String,
    pub copy: TickerCopy,
    /// Name of the campaign whose totals feed the ticker.
    pub name: String,
}

/// A named A/B test over variants of type `V`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test<V> {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub status: TestStatus,
    #[serde(default = "Vec::new")]
    pub variants: Vec<V>,
    #[serde(default)]
    pub locations: Vec<Region>,
    #[serde(default)]
    pub user_cohort: UserCohort,
    #[serde(default)]
    pub device_type: DeviceType,
    #[serde(default = "default_methodologies")]
    pub methodologies: Vec<Methodology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
}

fn default_methodologies() -> Vec<Methodology> {
    vec![Methodology::AbTest]
}

impl<V: Variant> Test<V> {
    /// A new draft test with no variants and a plain A/B methodology.
    #[must_use]
    pub fn draft(name: impl Into<String>, nickname: Option<String>) -> Self {
        Self {
            name: name.into(),
            nickname,
            status: TestStatus::Draft,
            variants: Vec::new(),
            locations: Vec::new(),
            user_cohort: UserCohort::default(),
            device_type: DeviceType::default(),
            methodologies: default_methodologies(),
            campaign_name: None,
        }
    }

    /// Copy of this test under a new name. Copies always start as drafts.
    #[must_use]
    pub fn copy_as(&self, name: impl Into<String>, nickname: Option<String>) -> Self {
        Self {
            name: name.into(),
            nickname,
            status: TestStatus::Draft,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.status == TestStatus::Live
    }

    #[must_use]
    pub fn variant(&self, name: &str) -> Option<&V> {
        self.variants.iter().find(|v| v.name() == name)
    }

    pub fn variant_mut(&mut self, name: &str) -> Option<&mut V> {
        self.variants.iter_mut().find(|v| v.name() == name)
    }

    #[must_use]
    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(Variant::name).collect()
    }
}
