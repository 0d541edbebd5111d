use serde::{Deserialize, Serialize};

use super::{Cta, TickerSettings, Variant};

/// Visual design of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BannerTemplate {
    #[default]
    ContributionsBanner,
    GuardianWeeklyBanner,
    SignInPromptBanner,
    EnvironmentBanner,
}

/// Banner: the sticky appeal pinned to the bottom of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerVariant {
    pub name: String,
    #[serde(default)]
    pub template: BannerTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Cta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_cta: Option<Cta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker_settings: Option<TickerSettings>,
}

impl Variant for BannerVariant {
    fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: BannerTemplate::default(),
            heading: None,
            paragraphs: Vec::new(),
            highlighted_text: None,
            cta: None,
            secondary_cta: None,
            ticker_settings: None,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
