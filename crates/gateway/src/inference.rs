use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use detection::RawPrediction;
use serde::Deserialize;
use std::time::Duration;

/// The external inference collaborator: image bytes and a model identifier
/// in, raw detection records out. Implementations are opaque to the pipeline;
/// only the record shape matters.
pub trait InferenceClient: Send + Sync {
    fn infer(&self, image: &[u8], model_id: &str) -> anyhow::Result<Vec<RawPrediction>>;
}

/// Response envelope of the hosted detection API. Older deployments used
/// `preds` instead of `predictions`.
#[derive(Deserialize)]
struct InferenceResponse {
    #[serde(default)]
    predictions: Option<Vec<RawPrediction>>,
    #[serde(default)]
    preds: Option<Vec<RawPrediction>>,
}

/// HTTP implementation speaking the hosted API's protocol: the image is
/// posted base64-encoded as a form body, with the API key as a query
/// parameter. Blocking by design; the gateway calls it from a blocking task.
pub struct HttpInferenceClient {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl HttpInferenceClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(60))
            .build();
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            agent,
        }
    }
}

impl InferenceClient for HttpInferenceClient {
    fn infer(&self, image: &[u8], model_id: &str) -> anyhow::Result<Vec<RawPrediction>> {
        let url = format!(
            "{}/{}?api_key={}",
            self.base_url.trim_end_matches('/'),
            model_id,
            self.api_key
        );
        let body = BASE64.encode(image);

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/x-www-form-urlencoded")
            .send_string(&body);

        match response {
            Ok(resp) => {
                let parsed: InferenceResponse = resp.into_json()?;
                Ok(parsed.predictions.or(parsed.preds).unwrap_or_default())
            }
            Err(ureq::Error::Status(code, resp)) => {
                let text = resp.into_string().unwrap_or_default();
                anyhow::bail!("inference service returned {code}: {text}")
            }
            Err(e) => Err(e.into()),
        }
    }
}
