use common::Environment;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

#[derive(Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_environment")]
    pub environment: Environment,
    pub listen_addr: String,
    /// Base URL of the external inference service.
    pub inference_url: String,
    pub inference_api_key: String,
    /// Model identifier used when the upload does not specify one.
    pub default_model: String,
    pub nms_threshold: f32,
    /// When set, the overlay artifact gets box annotations drawn on top of
    /// the original; otherwise it is an unannotated copy.
    pub annotate_overlay: bool,
    /// Directory run artifacts are written beneath.
    pub artifact_root: PathBuf,
    /// Public URL path artifacts are served under.
    pub public_base: String,
    /// TTF font for label tags; tags are drawn without text when unset.
    pub font_path: Option<PathBuf>,
    /// OTLP collector endpoint; telemetry export is enabled only when set.
    pub otlp_endpoint: Option<String>,
}

fn deserialize_environment<'de, D>(deserializer: D) -> Result<Environment, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Environment::try_from(s).map_err(serde::de::Error::custom)
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("environment", "development")?
        .set_default("listen_addr", "0.0.0.0:8080")?
        .set_default("inference_url", "https://serverless.roboflow.com")?
        .set_default("inference_api_key", "")?
        .set_default("default_model", "floor-plans-zeb7z/8")?
        .set_default("nms_threshold", 0.5)?
        .set_default("annotate_overlay", false)?
        .set_default("artifact_root", "./data")?
        .set_default("public_base", "/runs")?
        .add_source(
            config::Environment::with_prefix("GATEWAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize::<Config>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize() {
        let config = get_configuration().expect("defaults must produce a valid config");
        assert_eq!(config.nms_threshold, 0.5);
        assert!(!config.annotate_overlay);
        assert!(config.font_path.is_none());
        assert_eq!(config.public_base, "/runs");
    }
}
