//! Plain-text chapter cards.

use crate::models::{ChapterRecord, ChapterView, Language};
pub fn card(record: &ChapterRecord, lang: Language) -> String {
    let mut out = String::new();
    let heading = match lang {
        Language::Zh => format!("第 {} 章", record.ordinal),
        Language::En => format!("Chapter {}", record.ordinal),
    };
    out.push_str(&format!("[{}] {}", heading, record.title.get(lang)));
    if record.is_published == Some(false) {
        out.push_str(match lang {
            Language::Zh => " (草稿)",
            Language::En => " (draft)",
        });
    }
    out.push('\n');

    let description = record.description.get(lang);
    if !description.is_empty() {
        out.push_str(&format!("    {}\n", description));
    }
    out.push_str(&format!("    cover: {}\n", record.cover_image));
    if let Some(updated) = &record.updated_at {
        let label = match lang {
            Language::Zh => "更新于",
            Language::En => "updated",
        };
        out.push_str(&format!("    {}: {}\n", label, updated));
    }
    out
}

pub fn view(view: &ChapterView, lang: Language) -> String {
    match view {
        ChapterView::Cards(records) => records.iter().map(|r| card(r, lang)).collect(),
        ChapterView::Empty => empty_state(lang).to_string() + "\n",
        ChapterView::Failed(message) => {
            let prefix = match lang {
                Language::Zh => "加载章节失败",
                Language::En => "Failed to load chapters",
            };
            format!("{}\n{}: {}\n", empty_state(lang), prefix, message)
        }
    }
}

fn empty_state(lang: Language) -> &'static str {
    match lang {
        Language::Zh => "暂无章节，请先创建第一个章节。",
        Language::En => "No chapters yet. Create the first one to get started.",
    }
}
