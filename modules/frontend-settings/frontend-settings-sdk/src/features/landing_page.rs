use serde::{Deserialize, Serialize};

use super::Variant;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageCopy {
    pub heading: String,
    pub subheading: String,
}

/// Support landing page copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageVariant {
    pub name: String,
    #[serde(default)]
    pub copy: LandingPageCopy,
}

impl Variant for LandingPageVariant {
    fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            copy: LandingPageCopy::default(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
