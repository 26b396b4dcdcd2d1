//! Async vision inference client.
//!
//! Model-agnostic HTTP client for OpenAI-compatible chat-completion servers
//! (vLLM, Ollama, LM Studio). Ships the prompt plus exactly six tile renders
//! and hands back the model's raw text answer; parsing happens downstream.

use crate::core::config::VisionConfig;
use crate::core::error::{Result, VisionError};
use crate::vision::prompt::EdgePrompt;
use crate::vision::report::excerpt;
use base64::Engine;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Images per request: one per hex edge.
pub const EXPECTED_VIEW_COUNT: usize = 6;

/// Fixed sampling temperature; edge classification should be near-deterministic.
pub const CLASSIFY_TEMPERATURE: f32 = 0.1;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Async client for the vision endpoint.
pub struct VisionClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl VisionClient {
    pub fn new(config: &VisionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Send the prompt plus exactly six edge images and return the raw text
    /// answer.
    ///
    /// The whole request lives under one wall-clock timeout; expiry drops
    /// the in-flight request and surfaces as `Timeout`, distinct from every
    /// transport fault.
    pub async fn classify(&self, prompt: &EdgePrompt, images: &[String]) -> Result<String> {
        self.validate(images)?;

        let request = self.build_request(prompt, images);
        let url = format!("{}/v1/chat/completions", self.endpoint);
        tracing::debug!(model = %self.model, %url, "sending classification request");

        match tokio::time::timeout(self.timeout, self.execute(&url, &request)).await {
            Ok(result) => result,
            Err(_) => Err(VisionError::Timeout(self.timeout.as_secs())),
        }
    }

    /// Input checks that must fail before any network activity.
    fn validate(&self, images: &[String]) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(VisionError::Validation(
                "inference endpoint is not configured".into(),
            ));
        }
        if self.model.is_empty() {
            return Err(VisionError::Validation(
                "model identifier is not configured".into(),
            ));
        }
        if images.len() != EXPECTED_VIEW_COUNT {
            return Err(VisionError::Validation(format!(
                "expected {} edge images, got {}",
                EXPECTED_VIEW_COUNT,
                images.len()
            )));
        }
        Ok(())
    }

    fn build_request(&self, prompt: &EdgePrompt, images: &[String]) -> ChatCompletionRequest {
        let mut content = vec![ContentPart::Text {
            text: prompt.user.clone(),
        }];
        for image in images {
            content.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: to_data_url(image),
                },
            });
        }

        ChatCompletionRequest {
            model: self.model.clone(),
            temperature: CLASSIFY_TEMPERATURE,
            messages: vec![
                ChatMessage::System {
                    content: prompt.system.clone(),
                },
                ChatMessage::User { content },
            ],
        }
    }

    async fn execute(&self, url: &str, request: &ChatCompletionRequest) -> Result<String> {
        let mut builder = self.client.post(url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(VisionError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| VisionError::Parse {
                message: format!("malformed completion envelope: {}", e),
                excerpt: excerpt(&body),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| VisionError::Parse {
                message: "completion contained no message content".into(),
                excerpt: excerpt(&body),
            })
    }

    /// Check if the inference server is reachable.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/v1/models", self.endpoint);
        self.client
            .get(&url)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

fn transport_error(e: reqwest::Error) -> VisionError {
    VisionError::Transport {
        status: e.status().map(|s| s.as_u16()).unwrap_or(0),
        body: e.to_string(),
    }
}

/// Prefix raw base64 PNG data so it embeds as a data URL. Inputs that are
/// already data URLs pass through untouched.
pub fn to_data_url(image: &str) -> String {
    if image.starts_with("data:") {
        image.to_string()
    } else {
        format!("{}{}", DATA_URL_PREFIX, image)
    }
}

/// Encode a captured frame as base64 PNG data (no data-URL prefix).
pub fn encode_png_base64(image: &RgbaImage) -> Result<String> {
    let mut png = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageOutputFormat::Png,
        )
        .map_err(|e| VisionError::Render(format!("failed to encode PNG: {}", e)))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}

// OpenAI-compatible vision request format
#[derive(Serialize, Debug)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "role", rename_all = "lowercase")]
enum ChatMessage {
    System { content: String },
    User { content: Vec<ContentPart> },
}

#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Debug)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::prompt::{build_edge_prompt, TileContext};

    fn test_client() -> VisionClient {
        VisionClient::new(&VisionConfig::new("http://127.0.0.1:9", "test-vlm"))
    }

    fn fake_images(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("AAAA{}", i)).collect()
    }

    #[test]
    fn test_to_data_url_prefixes_raw_base64() {
        assert_eq!(
            to_data_url("iVBORw0KGgo="),
            "data:image/png;base64,iVBORw0KGgo="
        );
    }

    #[test]
    fn test_to_data_url_passes_through_existing() {
        let url = "data:image/jpeg;base64,/9j/4AAQ";
        assert_eq!(to_data_url(url), url);
    }

    #[test]
    fn test_request_shape_matches_wire_format() {
        let client = test_client();
        let prompt = build_edge_prompt(&TileContext::default());
        let request = client.build_request(&prompt, &fake_images(6));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "test-vlm");
        assert!((json["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");

        let content = json["messages"][1]["content"].as_array().unwrap();
        assert_eq!(content.len(), 7); // one text part + six images
        assert_eq!(content[0]["type"], "text");
        for part in &content[1..] {
            assert_eq!(part["type"], "image_url");
            let url = part["image_url"]["url"].as_str().unwrap();
            assert!(url.starts_with("data:image/png;base64,"));
        }
    }

    #[test]
    fn test_image_order_preserved_in_request() {
        let client = test_client();
        let prompt = build_edge_prompt(&TileContext::default());
        let request = client.build_request(&prompt, &fake_images(6));

        let json = serde_json::to_value(&request).unwrap();
        let content = json["messages"][1]["content"].as_array().unwrap();
        for (i, part) in content[1..].iter().enumerate() {
            let url = part["image_url"]["url"].as_str().unwrap();
            assert!(url.ends_with(&format!("AAAA{}", i)));
        }
    }

    #[tokio::test]
    async fn test_wrong_image_count_fails_before_network() {
        let client = test_client();
        let prompt = build_edge_prompt(&TileContext::default());

        for count in [0, 5, 7] {
            let err = client
                .classify(&prompt, &fake_images(count))
                .await
                .unwrap_err();
            assert!(
                matches!(err, VisionError::Validation(_)),
                "count {} should be a validation error, got {:?}",
                count,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_missing_model_fails_before_network() {
        let client = VisionClient::new(&VisionConfig::new("http://127.0.0.1:9", ""));
        let prompt = build_edge_prompt(&TileContext::default());
        let err = client.classify(&prompt, &fake_images(6)).await.unwrap_err();
        assert!(matches!(err, VisionError::Validation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_surfaces_as_timeout_error() {
        let mut config = VisionConfig::new("http://127.0.0.1:9", "test-vlm");
        config.timeout_secs = 0; // expire before the connect can resolve
        let client = VisionClient::new(&config);
        let prompt = build_edge_prompt(&TileContext::default());

        let err = client.classify(&prompt, &fake_images(6)).await.unwrap_err();
        assert!(matches!(err, VisionError::Timeout(0)), "got {:?}", err);
    }

    #[test]
    fn test_encode_png_base64_roundtrip() {
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([10, 200, 30, 255]));
        let encoded = encode_png_base64(&image).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        // PNG magic header
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
