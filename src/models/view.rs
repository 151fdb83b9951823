use crate::error::ConsoleError;
use crate::models::ChapterRecord;
use crate::normalize::{NoData, Normalized};
use log::{error, info, warn};

/// What the chapter list should show after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterView {
    Cards(Vec<ChapterRecord>),
    Empty,
    Failed(String),
}

impl ChapterView {
    pub fn from_normalized(normalized: Normalized) -> Self {
        match normalized {
            Normalized::Chapters { records, .. } => ChapterView::Cards(records),
            Normalized::NoData(reason) => {
                match reason {
                    NoData::NoArray => warn!("Unrecognized chapter response: {}", reason),
                    NoData::EmptyArray(_) => info!("No chapters: {}", reason),
                }
                ChapterView::Empty
            }
        }
    }

    pub fn from_error(err: &ConsoleError) -> Self {
        error!("Failed to load chapters: {}", err);
        ChapterView::Failed(err.to_string())
    }

    pub fn records(&self) -> &[ChapterRecord] {
        match self {
            ChapterView::Cards(records) => records,
            _ => &[],
        }
    }
}

/// A freshly created chapter and where it landed in the reloaded list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub record: ChapterRecord,
    pub position: Option<usize>,
    pub view: ChapterView,
}

impl Located {
    pub fn new(record: ChapterRecord, view: ChapterView) -> Self {
        let records = view.records();
        let position = record
            .id
            .as_ref()
            .and_then(|id| records.iter().position(|r| r.id.as_ref() == Some(id)))
            .or_else(|| records.iter().position(|r| r.ordinal == record.ordinal));
        Self {
            record,
            position,
            view,
        }
    }
}
