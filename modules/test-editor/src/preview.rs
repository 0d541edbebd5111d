//! Preview links that force a variant on the live site.

use frontend_settings_sdk::SettingsType;
use serde::{Deserialize, Serialize};
use url::Url;

/// Deployment stage the console runs in; selects the site to preview on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    #[default]
    Dev,
    Code,
    Prod,
}

impl Stage {
    #[must_use]
    pub fn site_url(self) -> &'static str {
        match self {
            Stage::Dev => "https://m.thegulocal.com",
            Stage::Code => "https://m.code.dev-theguardian.com",
            Stage::Prod => "https://www.theguardian.com",
        }
    }
}

/// Page a variant of `settings_type` is previewed on, and the query key that
/// forces it. `None` for documents without tests.
fn preview_target(settings_type: SettingsType) -> Option<(&'static str, &'static str)> {
    match settings_type {
        SettingsType::EpicTests => Some(("/world/preview-article", "force-epic")),
        SettingsType::LiveblogEpicTests => Some(("/world/live/preview-liveblog", "force-epic")),
        SettingsType::BannerTests => Some(("/uk", "force-banner")),
        SettingsType::LandingPageTests => Some(("/contribute", "force-landing-page")),
        SettingsType::CheckoutNudgeTests => Some(("/checkout", "force-checkout-nudge")),
        SettingsType::ChoiceCardsTests => Some(("/world/preview-article", "force-choice-cards")),
        SettingsType::AmountsTests => Some(("/contribute", "force-amounts")),
        SettingsType::ChannelSwitches => None,
    }
}

/// Link that shows `variant` of `test` on the site of `stage`.
#[must_use]
pub fn preview_url(
    stage: Stage,
    settings_type: SettingsType,
    test: &str,
    variant: &str,
) -> Option<Url> {
    let (path, key) = preview_target(settings_type)?;
    let mut url = Url::parse(stage.site_url()).ok()?.join(path).ok()?;
    url.query_pairs_mut()
        .append_pair(key, &format!("{test}:{variant}"));
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epic_preview_forces_test_and_variant() {
        let url = preview_url(Stage::Prod, SettingsType::EpicTests, "MY_TEST", "control").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.theguardian.com/world/preview-article?force-epic=MY_TEST%3Acontrol"
        );
    }

    #[test]
    fn stage_selects_the_site() {
        let url = preview_url(Stage::Code, SettingsType::BannerTests, "B", "v1").unwrap();
        assert_eq!(url.host_str(), Some("m.code.dev-theguardian.com"));
        assert_eq!(url.path(), "/uk");
    }

    #[test]
    fn channel_switches_have_no_preview() {
        assert!(preview_url(Stage::Dev, SettingsType::ChannelSwitches, "x", "y").is_none());
    }

    #[test]
    fn stage_uses_uppercase_names() {
        let stage: Stage = serde_json::from_str("\"CODE\"").unwrap();
        assert_eq!(stage, Stage::Code);
    }
}
