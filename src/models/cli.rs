use crate::models::{Language, NewChapter};
use clap::Parser;
use std::path::PathBuf;

#[derive(clap::Parser)]
#[command(name = "chapter-console", about = "Admin console for the chapter store")]
pub struct Cli {
    #[arg(short, long, default_value = "console.toml")]
    pub config_file: String,

    /// Display language, overrides the configured one
    #[arg(short, long, value_enum, global = true)]
    pub lang: Option<Language>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand)]
pub enum Command {
    /// Load chapters from the store and print them as cards
    List,
    /// Create a chapter, then show where it landed in the list
    Create(CreateArgs),
    /// Run the response normalizer on a saved JSON response
    Inspect { file: PathBuf },
}

#[derive(clap::Args)]
pub struct CreateArgs {
    #[arg(short, long)]
    pub number: i64,
    #[arg(long)]
    pub title_zh: String,
    #[arg(long)]
    pub title_en: String,
    #[arg(long, default_value = "")]
    pub description_zh: String,
    #[arg(long, default_value = "")]
    pub description_en: String,
    /// Defaults to the chapter number
    #[arg(long)]
    pub order_index: Option<i64>,
    #[arg(long)]
    pub cover_image: Option<String>,
    #[arg(long)]
    pub publish: bool,
}

impl CreateArgs {
    pub fn into_new_chapter(self) -> NewChapter {
        NewChapter {
            chapter_number: self.number,
            title_zh: self.title_zh,
            title_en: self.title_en,
            description_zh: self.description_zh,
            description_en: self.description_en,
            is_published: self.publish,
            order_index: self.order_index.unwrap_or(self.number),
            cover_image: self.cover_image,
        }
    }
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
