//! Command-line surface for `fabrica-admin`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use fabrica::types::Language;

#[derive(Parser, Debug)]
#[command(name = "fabrica-admin", version, about = "Fabrica content API CLI", long_about = None)]
pub struct Cli {
    /// API base URL override, e.g. <https://api.example.com>
    #[arg(long, env = "FABRICA_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Blog post management
    Blogs {
        #[command(subcommand)]
        action: BlogsCmd,
    },
    /// Project portfolio management
    Projects {
        #[command(subcommand)]
        action: ProjectsCmd,
    },
    /// Production-line catalog management
    Lines {
        #[command(subcommand)]
        action: LinesCmd,
    },
    /// Translation key management
    Locales {
        #[command(subcommand)]
        action: LocalesCmd,
    },
    /// Media uploads with progress reporting
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BlogsCmd {
    /// List all posts
    List,
    /// Get a post by id
    Get { id: Uuid },
    /// Create a post; the slug is derived from the title when omitted
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: Option<String>,
        /// Markdown body file
        #[arg(long)]
        body_file: PathBuf,
    },
    /// Delete a post
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCmd {
    /// List all projects
    List,
    /// Get a project by id
    Get { id: Uuid },
    /// Delete a project
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum LinesCmd {
    /// List every line, published or not
    List,
    /// List the public catalog view
    Published,
    /// Get a line by id
    Get { id: Uuid },
    /// Make a line visible in the public catalog
    Publish { id: Uuid },
    /// Remove a line from the public catalog
    Unpublish { id: Uuid },
    /// Delete a line
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum LocalesCmd {
    /// List translation keys, optionally only those with text in one language
    List {
        #[arg(long, value_parser = parse_language)]
        lang: Option<Language>,
    },
    /// Get one key
    Get { key: String },
    /// Dump the flat key to text map for a language
    Translations {
        #[arg(value_parser = parse_language)]
        lang: Language,
    },
    /// Create or overwrite a key's text in one language
    Set {
        key: String,
        #[arg(value_parser = parse_language)]
        lang: Language,
        text: String,
    },
    /// Delete a key in every language
    Delete { key: String },
}

pub fn parse_language(raw: &str) -> Result<Language, String> {
    match raw.to_ascii_lowercase().as_str() {
        "en" => Ok(Language::En),
        "ar" => Ok(Language::Ar),
        other => Err(format!("unknown language {other:?} (expected en or ar)")),
    }
}
