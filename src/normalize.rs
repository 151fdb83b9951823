//! Turns whatever the chapter endpoint returned into an ordered list of [`ChapterRecord`]s.
//!
//! The backend has shipped several response envelopes over time, so the known ones are tried
//! first, in priority order, and a shallow breadth-first search over object properties is used
//! as a last resort. Field names are just as unstable and are resolved through alias lists.

use crate::models::{ChapterRecord, Localized};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::fmt;

/// How deep the fallback search descends into nested objects.
pub const MAX_SEARCH_DEPTH: usize = 3;

const ID_KEYS: &[&str] = &["id", "chapter_id", "_id", "uuid"];
const ORDINAL_KEYS: &[&str] = &["chapter_number", "order_index", "number", "order"];
const TITLE_ZH_KEYS: &[&str] = &["title_zh", "titleZh", "title_cn", "title"];
const TITLE_EN_KEYS: &[&str] = &["title_en", "titleEn", "title_english", "title"];
const DESCRIPTION_ZH_KEYS: &[&str] = &["description_zh", "descriptionZh", "desc_zh", "description"];
const DESCRIPTION_EN_KEYS: &[&str] = &["description_en", "descriptionEn", "desc_en", "description"];
const COVER_KEYS: &[&str] = &["cover_image", "coverImage", "cover", "image_url"];
const UPDATED_KEYS: &[&str] = &["updated_at", "updatedAt", "last_updated", "modified_at"];
const PUBLISHED_KEYS: &[&str] = &["is_published", "published"];

pub const UNTITLED_ZH: &str = "未命名章节";
pub const UNTITLED_EN: &str = "Untitled chapter";

/// Where the chapter array was found in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    BareArray,
    Data,
    DataChapters,
    Chapters,
    CodeData,
    CodeDataChapters,
    /// Found by the fallback search, at the given property depth.
    Nested(usize),
}

impl Envelope {
    /// Priority order. `CodeData` and `CodeDataChapters` bodies also match `Data` and
    /// `DataChapters`, so `locate_array` never reports them; only `extract` checks the code.
    const KNOWN: [Envelope; 6] = [
        Envelope::BareArray,
        Envelope::Data,
        Envelope::DataChapters,
        Envelope::Chapters,
        Envelope::CodeData,
        Envelope::CodeDataChapters,
    ];

    fn extract(self, value: &Value) -> Option<&Vec<Value>> {
        match self {
            Envelope::BareArray => value.as_array(),
            Envelope::Data => value.get("data")?.as_array(),
            Envelope::DataChapters => value.get("data")?.get("chapters")?.as_array(),
            Envelope::Chapters => value.get("chapters")?.as_array(),
            Envelope::CodeData if is_ok_code(value) => value.get("data")?.as_array(),
            Envelope::CodeDataChapters if is_ok_code(value) => {
                value.get("data")?.get("chapters")?.as_array()
            }
            _ => None,
        }
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Envelope::BareArray => write!(f, "[...]"),
            Envelope::Data => write!(f, "{{data: [...]}}"),
            Envelope::DataChapters => write!(f, "{{data: {{chapters: [...]}}}}"),
            Envelope::Chapters => write!(f, "{{chapters: [...]}}"),
            Envelope::CodeData => write!(f, "{{code: 200, data: [...]}}"),
            Envelope::CodeDataChapters => write!(f, "{{code: 200, data: {{chapters: [...]}}}}"),
            Envelope::Nested(depth) => write!(f, "nested array at depth {}", depth),
        }
    }
}

fn is_ok_code(value: &Value) -> bool {
    value.get("code").and_then(Value::as_i64) == Some(200)
}

/// Why a response produced no chapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoData {
    /// No array anywhere within reach.
    NoArray,
    /// An array was found but held no chapter objects.
    EmptyArray(Envelope),
}

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoData::NoArray => write!(f, "response contains no chapter array"),
            NoData::EmptyArray(envelope) => write!(f, "chapter array in {} is empty", envelope),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Chapters {
        envelope: Envelope,
        records: Vec<ChapterRecord>,
    },
    NoData(NoData),
}

/// Finds the chapter array, trying the known envelopes before searching nested objects.
pub fn locate_array(value: &Value) -> Option<(Envelope, &Vec<Value>)> {
    Envelope::KNOWN
        .iter()
        .find_map(|shape| shape.extract(value).map(|array| (*shape, array)))
        .or_else(|| {
            find_nested_array(value, MAX_SEARCH_DEPTH)
                .map(|(depth, array)| (Envelope::Nested(depth), array))
        })
}

/// Breadth-first search for the first array-valued property, in document order.
/// The root's own properties are depth 1. Arrays are never descended into.
pub fn find_nested_array(value: &Value, max_depth: usize) -> Option<(usize, &Vec<Value>)> {
    let mut queue: VecDeque<(usize, &Map<String, Value>)> = VecDeque::new();
    if let Value::Object(root) = value {
        queue.push_back((1, root));
    }

    while let Some((depth, object)) = queue.pop_front() {
        if depth > max_depth {
            continue;
        }
        for (key, child) in object {
            match child {
                Value::Array(array) => {
                    debug!("Found array under \"{}\" at depth {}", key, depth);
                    return Some((depth, array));
                }
                Value::Object(inner) => queue.push_back((depth + 1, inner)),
                _ => {}
            }
        }
    }
    None
}

pub fn normalize(value: &Value, default_cover: &str) -> Normalized {
    let (envelope, array) = match locate_array(value) {
        Some(found) => found,
        None => return Normalized::NoData(NoData::NoArray),
    };
    debug!("Chapter array matched {} with {} entries", envelope, array.len());

    let mut records: Vec<ChapterRecord> = array
        .iter()
        .filter_map(|item| match item {
            Value::Object(fields) => Some(chapter_from_fields(fields, default_cover)),
            other => {
                warn!("Skipping non-object chapter entry: {}", other);
                None
            }
        })
        .collect();

    if records.is_empty() {
        return Normalized::NoData(NoData::EmptyArray(envelope));
    }

    // sort_by_key is stable, ties keep server order
    records.sort_by_key(|r| r.ordinal);
    Normalized::Chapters { envelope, records }
}

/// Builds a record from one chapter object, falling back to defaults for missing fields.
pub fn chapter_from_fields(fields: &Map<String, Value>, default_cover: &str) -> ChapterRecord {
    ChapterRecord {
        id: first_text(fields, ID_KEYS),
        ordinal: first_integer(fields, ORDINAL_KEYS).unwrap_or(0),
        title: Localized::new(
            first_text(fields, TITLE_ZH_KEYS).unwrap_or_else(|| UNTITLED_ZH.into()),
            first_text(fields, TITLE_EN_KEYS).unwrap_or_else(|| UNTITLED_EN.into()),
        ),
        description: Localized::new(
            first_text(fields, DESCRIPTION_ZH_KEYS).unwrap_or_default(),
            first_text(fields, DESCRIPTION_EN_KEYS).unwrap_or_default(),
        ),
        cover_image: first_text(fields, COVER_KEYS).unwrap_or_else(|| default_cover.into()),
        updated_at: first_text(fields, UPDATED_KEYS),
        is_published: first_bool(fields, PUBLISHED_KEYS),
    }
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn first_integer(fields: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn first_bool(fields: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    })
}
