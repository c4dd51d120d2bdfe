//! fabrica-admin: headless API command-line client.

mod args;

use std::io::{self, Write as _};
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;

use fabrica::types::{BlogDraft, Language, LocaleDraft, LocalePatch, PublishState, RawFile};
use fabrica::{ApiClient, ApiError, ProgressFn, Settings, SyncStore};

use args::{BlogsCmd, Cli, Commands, LinesCmd, LocalesCmd, ProjectsCmd};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Settings(#[from] fabrica::config::SettingsError),
    #[error(transparent)]
    Telemetry(#[from] fabrica::telemetry::TelemetryError),
    #[error("could not read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = Settings::load()?;
    fabrica::telemetry::init(&settings.logging)?;

    let client = match &cli.base_url {
        Some(base) => ApiClient::from_base_url(base)?,
        None => ApiClient::new(&settings.api)?,
    };
    let store = SyncStore::new(Arc::new(client), settings.cache);

    match cli.command {
        Commands::Blogs { action } => blogs(&store, action).await?,
        Commands::Projects { action } => projects(&store, action).await?,
        Commands::Lines { action } => lines(&store, action).await?,
        Commands::Locales { action } => locales(&store, action).await?,
        Commands::Upload { files } => upload(&store, &files).await?,
    }

    Ok(())
}

async fn blogs(store: &SyncStore, cmd: BlogsCmd) -> Result<(), CliError> {
    match cmd {
        BlogsCmd::List => print_json(&store.blogs().list().await?),
        BlogsCmd::Get { id } => print_json(&store.blogs().get(id).await?),
        BlogsCmd::Create {
            title,
            slug,
            body_file,
        } => {
            let content_html = read_text(&body_file)?;
            let draft = BlogDraft {
                title,
                slug,
                content_html,
                feature_image_id: None,
                media_ids: Vec::new(),
                state: PublishState::Draft,
            };
            print_json(&store.blogs().create(draft).await?)
        }
        BlogsCmd::Delete { id } => {
            store.blogs().delete(id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

async fn projects(store: &SyncStore, cmd: ProjectsCmd) -> Result<(), CliError> {
    match cmd {
        ProjectsCmd::List => print_json(&store.projects().list().await?),
        ProjectsCmd::Get { id } => print_json(&store.projects().get(id).await?),
        ProjectsCmd::Delete { id } => {
            store.projects().delete(id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

async fn lines(store: &SyncStore, cmd: LinesCmd) -> Result<(), CliError> {
    match cmd {
        LinesCmd::List => print_json(&store.production_lines().list().await?),
        LinesCmd::Published => print_json(&store.production_lines().published().await?),
        LinesCmd::Get { id } => print_json(&store.production_lines().get(id).await?),
        LinesCmd::Publish { id } => {
            print_json(&store.production_lines().set_published(id, true).await?)
        }
        LinesCmd::Unpublish { id } => {
            print_json(&store.production_lines().set_published(id, false).await?)
        }
        LinesCmd::Delete { id } => {
            store.production_lines().delete(id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

async fn locales(store: &SyncStore, cmd: LocalesCmd) -> Result<(), CliError> {
    match cmd {
        LocalesCmd::List { lang } => print_json(&store.locales().list(lang).await?),
        LocalesCmd::Get { key } => print_json(&store.locales().get(&key).await?),
        LocalesCmd::Translations { lang } => {
            print_json(&store.locales().translations(lang).await?)
        }
        LocalesCmd::Set { key, lang, text } => {
            let entry = match store.locales().get(&key).await {
                Ok(_) => {
                    store
                        .locales()
                        .update(&key, &LocalePatch::set(lang, text))
                        .await?
                }
                Err(err) if err.is_not_found() => {
                    let mut draft = LocaleDraft {
                        key,
                        en: None,
                        ar: None,
                    };
                    match lang {
                        Language::En => draft.en = Some(text),
                        Language::Ar => draft.ar = Some(text),
                    }
                    store.locales().create(&draft).await?
                }
                Err(err) => return Err(err.into()),
            };
            print_json(&entry)
        }
        LocalesCmd::Delete { key } => {
            store.locales().delete(&key).await?;
            println!("deleted {key}");
            Ok(())
        }
    }
}

async fn upload(store: &SyncStore, paths: &[std::path::PathBuf]) -> Result<(), CliError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = std::fs::read(path).map_err(|source| CliError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        files.push(RawFile::new(name, bytes));
    }

    let progress: ProgressFn = Arc::new(|pct| {
        eprint!("\ruploading {pct:>3}%");
        let _ = io::stderr().flush();
    });
    let media = store
        .client()
        .uploads()
        .upload_many(files, Some(progress))
        .await?;
    eprintln!();
    print_json(&media)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}
