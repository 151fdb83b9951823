use serde::{Deserialize, Serialize};

pub const DEFAULT_COVER_IMAGE: &str = "/static/images/default-cover.png";

#[derive(clap::ValueEnum, Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

/// A string carried in both display languages.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Localized {
    pub zh: String,
    pub en: String,
}

impl Localized {
    pub fn new(zh: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            zh: zh.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Zh => &self.zh,
            Language::En => &self.en,
        }
    }
}

/// A chapter as displayed by the console, rebuilt from the server payload on every load.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ChapterRecord {
    pub id: Option<String>,
    pub ordinal: i64,
    pub title: Localized,
    pub description: Localized,
    pub cover_image: String,
    pub updated_at: Option<String>,
    pub is_published: Option<bool>,
}

/// Body of `POST /api/chapters`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewChapter {
    pub chapter_number: i64,
    pub title_zh: String,
    pub title_en: String,
    pub description_zh: String,
    pub description_en: String,
    pub is_published: bool,
    pub order_index: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl NewChapter {
    pub fn new(chapter_number: i64, title_zh: impl Into<String>, title_en: impl Into<String>) -> Self {
        Self {
            chapter_number,
            title_zh: title_zh.into(),
            title_en: title_en.into(),
            description_zh: String::new(),
            description_en: String::new(),
            is_published: false,
            order_index: chapter_number,
            cover_image: None,
        }
    }

    /// Checks the form the way the creation dialog does before anything is sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.chapter_number < 1 {
            return Err(format!(
                "chapter number must be at least 1, got {}",
                self.chapter_number
            ));
        }
        if self.title_zh.trim().is_empty() {
            return Err("Chinese title is required".into());
        }
        if self.title_en.trim().is_empty() {
            return Err("English title is required".into());
        }
        Ok(())
    }
}
