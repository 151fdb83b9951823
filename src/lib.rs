pub mod chapter_client;
pub mod configuration;
pub mod error;
pub mod models;
pub mod normalize;
pub mod render;
pub mod run;

pub use chapter_client::ChapterClient;
pub use configuration::Settings;
pub use error::ConsoleError;
pub use models::{ChapterRecord, ChapterView, Cli, NewChapter};
pub use run::run;
