use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use visionbox_core::inference::{ModelCatalog, Prediction, RawImage};
use visionbox_core::{InferenceService, VisionError, VisionResult};

/// REST client for the VisionBox inference service.
pub struct HttpInferenceService {
    base_url: String,
    client: Client,
}

impl HttpInferenceService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{base_url}/{path}", base_url = self.base_url)
    }
}

/// Turns a non-2xx answer into a transport error carrying status and body.
async fn ensure_success(response: Response) -> VisionResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(VisionError::Transport(format!("{status}: {text}")))
}

#[async_trait(?Send)]
impl InferenceService for HttpInferenceService {
    async fn list_models(&self) -> VisionResult<ModelCatalog> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .send()
            .await
            .map_err(|e| VisionError::Transport(format!("model list request failed: {e}")))?;

        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| VisionError::InvalidResponse(format!("failed to parse model list: {e}")))
    }

    async fn predict(&self, image: &RawImage) -> VisionResult<Prediction> {
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.filename.clone());
        if let Some(mime) = image.content_type() {
            part = part
                .mime_str(mime)
                .map_err(|e| VisionError::Transport(format!("invalid content type {mime}: {e}")))?;
        }
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("predict"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                VisionError::Transport(format!("predict request for {} failed: {e}", image.filename))
            })?;

        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| VisionError::InvalidResponse(format!("failed to parse prediction: {e}")))
    }

    async fn set_model(&self, model_id: &str) -> VisionResult<()> {
        let response = self
            .client
            .post(self.endpoint("set-model"))
            .query(&[("model_name", model_id)])
            .send()
            .await
            .map_err(|e| VisionError::Transport(format!("set-model request failed: {e}")))?;

        ensure_success(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use visionbox_core::inference::ModelDescriptor;
    use warp::http::StatusCode;
    use warp::hyper::body::Bytes;
    use warp::Filter;

    /// Starts a stand-in inference service on an ephemeral port.
    ///
    /// `/predict` fails for files whose name starts with `fail`, and
    /// `/set-model` rejects the id `broken`.
    fn spawn_mock_service() -> String {
        let models = warp::path("models").and(warp::get()).map(|| {
            warp::reply::json(&json!({
                "models": ["model1", {"id": "model2", "label": "Bottles"}],
                "current_model": "model1"
            }))
        });

        let predict = warp::path("predict")
            .and(warp::post())
            .and(warp::body::bytes())
            .map(|body: Bytes| {
                let body = String::from_utf8_lossy(&body).to_string();
                if !body.contains("name=\"file\"") || body.contains("filename=\"fail") {
                    return warp::reply::with_status(
                        warp::reply::json(&json!({"detail": "inference failed"})),
                        StatusCode::INTERNAL_SERVER_ERROR,
                    );
                }
                let class = if body.contains("image/png") { "box" } else { "bottle" };
                warp::reply::with_status(
                    warp::reply::json(&json!({
                        "detections": [{"class": class, "confidence": 0.88, "bbox": [0, 0, 10, 10]}],
                        "timestamp": "server-side",
                        "image_size": [640, 480]
                    })),
                    StatusCode::OK,
                )
            });

        let set_model = warp::path("set-model")
            .and(warp::post())
            .and(warp::query::<HashMap<String, String>>())
            .map(|query: HashMap<String, String>| {
                match query.get("model_name").map(String::as_str) {
                    Some("broken") | None => warp::reply::with_status(
                        warp::reply::json(&json!({"detail": "unknown model"})),
                        StatusCode::BAD_REQUEST,
                    ),
                    Some(name) => warp::reply::with_status(
                        warp::reply::json(&json!({"message": format!("switched to {name}")})),
                        StatusCode::OK,
                    ),
                }
            });

        let routes = models.or(predict).or(set_model);
        let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn lists_models() {
        let service = HttpInferenceService::new(spawn_mock_service());
        let catalog = service.list_models().await.unwrap();
        assert_eq!(catalog.models.len(), 2);
        assert_eq!(
            catalog.models[1],
            ModelDescriptor::Described {
                id: "model2".into(),
                label: Some("Bottles".into()),
            }
        );
        assert_eq!(catalog.current_model.as_deref(), Some("model1"));
    }

    #[tokio::test]
    async fn predict_sends_single_file_field() {
        let service = HttpInferenceService::new(spawn_mock_service());
        let prediction = service
            .predict(&RawImage::new("shelf.png", vec![137, 80, 78, 71]))
            .await
            .unwrap();

        assert_eq!(prediction.detections.len(), 1);
        assert_eq!(prediction.detections[0].class, "box");
        assert_eq!(prediction.detections[0].extra["confidence"], 0.88);
        assert_eq!(prediction.extra["timestamp"], "server-side");
    }

    #[tokio::test]
    async fn server_error_becomes_transport_error() {
        let service = HttpInferenceService::new(spawn_mock_service());
        let err = service
            .predict(&RawImage::new("fail.jpg", vec![1, 2, 3]))
            .await
            .unwrap_err();

        match err {
            VisionError::Transport(message) => assert!(message.contains("500")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn set_model_passes_query_parameter() {
        let service = HttpInferenceService::new(spawn_mock_service());
        service.set_model("model2").await.unwrap();
        assert!(service.set_model("broken").await.is_err());
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let service = HttpInferenceService::new("http://127.0.0.1:9");
        assert!(matches!(
            service.list_models().await,
            Err(VisionError::Transport(_))
        ));
    }
}
