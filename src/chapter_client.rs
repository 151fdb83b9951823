use crate::configuration::Settings;
use crate::error::{ConsoleError, Result};
use crate::models::{ChapterRecord, ChapterView, Located, NewChapter};
use crate::normalize::{chapter_from_fields, normalize, Normalized};
use log::{debug, info, warn};
use serde_json::Value;
use url::Url;

const CHAPTERS_PATH: &str = "api/chapters";

/// Talks to the chapter store. Calls are not serialized: two loads may be in flight at once.
pub struct ChapterClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout_ms: u64,
    default_cover: String,
}

impl ChapterClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut base = settings.base_url()?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(CHAPTERS_PATH)?;
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(ConsoleError::Transport)?;

        Ok(Self {
            http,
            endpoint,
            timeout_ms: settings.request_timeout_ms,
            default_cover: settings.default_cover_image.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transport(&self, err: reqwest::Error) -> ConsoleError {
        ConsoleError::from_reqwest(err, self.timeout_ms)
    }

    /// `GET /api/chapters`, returning the raw JSON body.
    pub async fn fetch(&self) -> Result<Value> {
        debug!("GET {}", self.endpoint);
        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport(e))?;
        if !status.is_success() {
            return Err(ConsoleError::Status {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn load(&self) -> Result<Normalized> {
        let body = self.fetch().await?;
        Ok(normalize(&body, &self.default_cover))
    }

    /// Loads the chapter list for display. Never fails: problems end up in the returned view.
    pub async fn load_view(&self) -> ChapterView {
        match self.load().await {
            Ok(normalized) => {
                let view = ChapterView::from_normalized(normalized);
                info!("Loaded {} chapters", view.records().len());
                view
            }
            Err(ConsoleError::Decode(e)) => {
                warn!("Chapter response is not JSON: {}", e);
                ChapterView::Empty
            }
            Err(e) => ChapterView::from_error(&e),
        }
    }

    /// `POST /api/chapters`. The form is validated locally before anything is sent.
    pub async fn create(&self, chapter: &NewChapter) -> Result<ChapterRecord> {
        chapter.validate().map_err(ConsoleError::Validation)?;

        info!(
            "Creating chapter {} \"{}\"",
            chapter.chapter_number, chapter.title_en
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(chapter)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport(e))?;
        if !status.is_success() {
            let message = error_message(&body, status);
            warn!("Chapter creation rejected ({}): {}", status, message);
            return Err(ConsoleError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        let created = match value.get("data") {
            Some(Value::Object(_)) => &value["data"],
            _ => &value,
        };
        match created {
            Value::Object(fields) => Ok(chapter_from_fields(fields, &self.default_cover)),
            other => Err(ConsoleError::UnexpectedShape(format!(
                "expected the created chapter, got {}",
                other
            ))),
        }
    }

    /// Creates a chapter, reloads the list and reports where the new chapter sits in it.
    pub async fn create_and_locate(&self, chapter: &NewChapter) -> Result<Located> {
        let record = self.create(chapter).await?;
        let view = self.load_view().await;
        let located = Located::new(record, view);
        debug!("New chapter is at position {:?}", located.position);
        Ok(located)
    }
}

fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
