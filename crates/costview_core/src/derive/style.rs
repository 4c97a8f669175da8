//! Colour and tone lookup for provider and environment badges.

use serde::Serialize;

/// Colour used for providers without a dedicated brand colour.
pub const DEFAULT_PROVIDER_COLOR: &str = "#757575";

/// Known cloud providers. Names match exactly as the backend sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
    Other,
}

impl CloudProvider {
    pub fn from_name(name: &str) -> Self {
        match name {
            "AWS" => Self::Aws,
            "Azure" => Self::Azure,
            "GCP" => Self::Gcp,
            _ => Self::Other,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Aws => "#FF9900",
            Self::Azure => "#0078D4",
            Self::Gcp => "#4285F4",
            Self::Other => DEFAULT_PROVIDER_COLOR,
        }
    }
}

/// Deployment environments, matched without regard to case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentEnvironment {
    Production,
    Staging,
    Development,
    Other,
}

impl DeploymentEnvironment {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => Self::Other,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Production => Tone::Error,
            Self::Staging => Tone::Warning,
            Self::Development => Tone::Info,
            Self::Other => Tone::Default,
        }
    }
}

/// Semantic badge tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Error,
    Warning,
    Info,
    Default,
}

/// Which lookup table a value goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Provider,
    Environment,
}

/// Result of a style lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StyleToken {
    /// Hex colour
    Color(&'static str),
    Tone(Tone),
}

pub fn color_for(value: &str, dimension: Dimension) -> StyleToken {
    match dimension {
        Dimension::Provider => StyleToken::Color(CloudProvider::from_name(value).color()),
        Dimension::Environment => StyleToken::Tone(DeploymentEnvironment::from_name(value).tone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_colors() {
        assert_eq!(color_for("AWS", Dimension::Provider), StyleToken::Color("#FF9900"));
        assert_eq!(color_for("Azure", Dimension::Provider), StyleToken::Color("#0078D4"));
        assert_eq!(color_for("GCP", Dimension::Provider), StyleToken::Color("#4285F4"));
    }

    #[test]
    fn test_unknown_provider_is_gray() {
        assert_eq!(
            color_for("Oracle", Dimension::Provider),
            StyleToken::Color(DEFAULT_PROVIDER_COLOR)
        );
        // Provider lookup is exact.
        assert_eq!(
            color_for("aws", Dimension::Provider),
            StyleToken::Color(DEFAULT_PROVIDER_COLOR)
        );
    }

    #[test]
    fn test_environment_tones_ignore_case() {
        assert_eq!(color_for("Production", Dimension::Environment), StyleToken::Tone(Tone::Error));
        assert_eq!(color_for("STAGING", Dimension::Environment), StyleToken::Tone(Tone::Warning));
        assert_eq!(color_for("development", Dimension::Environment), StyleToken::Tone(Tone::Info));
        assert_eq!(color_for("qa", Dimension::Environment), StyleToken::Tone(Tone::Default));
        assert_eq!(color_for("", Dimension::Environment), StyleToken::Tone(Tone::Default));
    }

    #[test]
    fn test_style_token_serializes_flat() {
        assert_eq!(
            serde_json::to_string(&StyleToken::Color("#FF9900")).unwrap(),
            r##""#FF9900""##
        );
        assert_eq!(
            serde_json::to_string(&StyleToken::Tone(Tone::Warning)).unwrap(),
            r#""warning""#
        );
    }
}
