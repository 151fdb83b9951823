pub mod chapter;
pub mod cli;
pub mod view;

pub use chapter::{ChapterRecord, Language, Localized, NewChapter, DEFAULT_COVER_IMAGE};
pub use cli::{Cli, Command};
pub use view::{ChapterView, Located};
