use crate::chapter_client::ChapterClient;
use crate::configuration::Settings;
use crate::models::{ChapterView, Cli, Command, Language, NewChapter};
use crate::normalize::{locate_array, normalize};
use crate::render;
use anyhow::Context;
use log::{debug, info};
use std::fs;
use std::path::Path;

pub async fn run(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    let lang = cli.lang.unwrap_or(settings.language);
    debug!("Settings {:?}", settings);

    match cli.command {
        Command::List => list(&settings, lang).await,
        Command::Create(args) => create(&settings, args.into_new_chapter(), lang).await,
        Command::Inspect { file } => inspect(&file, &settings, lang),
    }
}

async fn list(settings: &Settings, lang: Language) -> anyhow::Result<()> {
    let client = ChapterClient::new(settings)?;
    info!("Loading chapters from {}", client.endpoint());

    let view = client.load_view().await;
    print!("{}", render::view(&view, lang));
    Ok(())
}

async fn create(settings: &Settings, chapter: NewChapter, lang: Language) -> anyhow::Result<()> {
    let client = ChapterClient::new(settings)?;
    let located = client
        .create_and_locate(&chapter)
        .await
        .with_context(|| format!("Unable to create chapter {}", chapter.chapter_number))?;

    print!("{}", render::card(&located.record, lang));
    match (located.position, &located.view) {
        (Some(position), view) => {
            println!("position {} of {}", position + 1, view.records().len())
        }
        (None, ChapterView::Failed(message)) => {
            println!("created, but the list could not be reloaded: {}", message)
        }
        (None, _) => println!("created, but not yet visible in the list"),
    }
    Ok(())
}

fn inspect(file: &Path, settings: &Settings, lang: Language) -> anyhow::Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Unable to read {}", file.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    match locate_array(&body) {
        Some((envelope, array)) => println!("shape: {} ({} entries)", envelope, array.len()),
        None => println!("shape: unrecognized"),
    }
    let view = ChapterView::from_normalized(normalize(&body, &settings.default_cover_image));
    print!("{}", render::view(&view, lang));
    Ok(())
}
