use serde::{Deserialize, Serialize};

use super::{Cta, TickerSettings, Variant};

/// Epic: the appeal shown at the end of article bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicVariant {
    pub name: String,
    #[serde(default)]
    pub heading: String,
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
    #[serde(default)]
    pub show_choice_cards: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Variant for EpicVariant {
    fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heading: String::new(),
            paragraphs: Vec::new(),
            highlighted_text: None,
            cta: None,
            secondary_cta: None,
            ticker_settings: None,
            show_choice_cards: false,
            image_url: None,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
