//! Command-line tool for inspecting link configuration and link records.
//!
//! Uses the same registry configuration as the library (see
//! `linkable::config`), so it shows exactly what editors would be offered.
//!
//! # Usage
//!
//! ```bash
//! # List link types (optionally restricted)
//! cargo run --bin linkctl -- types --allow URL,Email
//!
//! # List styles
//! cargo run --bin linkctl -- styles
//!
//! # Validate link records stored as JSON
//! cargo run --bin linkctl -- validate links.json
//!
//! # Save, resolve and render link records against a set of files/pages
//! cargo run --bin linkctl -- resolve links.json --entities entities.json
//!
//! # Build a link interactively
//! cargo run --bin linkctl -- new
//! ```
//!
//! Link files hold one link object or an array of them, using the record
//! field names (`Type`, `URL`, `Email`, `FileID`, ...). Entity files hold an
//! array of `{"kind": "File", "id": 1, "link": "/assets/a.pdf"}` objects.

use linkable::application::hooks::LinkHooks;
use linkable::application::services::{
    LinkRenderer, LinkResolver, LinkService, LinkValidator, SaveOutcome,
};
use linkable::config::{self, Config};
use linkable::domain::entities::{Link, LinkType, LinkUrl, RelatedEntity};
use linkable::domain::registry::TypeRegistry;
use linkable::infrastructure::memory::{InMemoryEntityStore, InMemoryLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CLI tool for link records.
#[derive(Parser)]
#[command(name = "linkctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered link types
    Types {
        /// Comma-separated type keys to restrict the list to
        #[arg(short, long, value_delimiter = ',')]
        allow: Vec<String>,
    },

    /// List registered styles
    Styles,

    /// Validate link records from a JSON file
    Validate {
        /// File with one link or an array of links
        file: PathBuf,
    },

    /// Save, resolve and render link records from a JSON file
    Resolve {
        /// File with one link or an array of links
        file: PathBuf,

        /// File with an array of referenced files/pages/records
        #[arg(short, long)]
        entities: Option<PathBuf>,
    },

    /// Build a link interactively and print it as JSON
    New,
}

/// One link or many, as found in a links file.
#[derive(Deserialize)]
#[serde(untagged)]
enum LinkFile {
    Many(Vec<Link>),
    One(Box<Link>),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    init_tracing(&config);
    config.print_summary();

    let registry = config
        .build_registry()?
        .install()
        .context("Failed to install link type registry")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Types { allow } => list_types(&registry, allow)?,
        Commands::Styles => list_styles(&registry),
        Commands::Validate { file } => validate_links(registry, &file)?,
        Commands::Resolve { file, entities } => {
            resolve_links(registry, &file, entities.as_deref()).await?
        }
        Commands::New => new_link(registry)?,
    }

    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn list_types(registry: &TypeRegistry, allow: Vec<String>) -> Result<()> {
    let subset = (!allow.is_empty()).then_some(allow);
    let types = registry
        .i18n_types(subset.as_deref())
        .context("Failed to list link types")?;

    println!("{}", "Link types".bright_blue().bold());
    for (key, label) in types {
        let kind = if registry.is_reference_type(&key.parse::<LinkType>()?) {
            "reference".yellow()
        } else {
            "field".green()
        };
        println!("  {:<12} {:<28} {}", key.cyan(), label, kind);
    }

    Ok(())
}

fn list_styles(registry: &TypeRegistry) {
    let styles = registry.i18n_styles();

    println!("{}", "Link styles".bright_blue().bold());
    if styles.is_empty() {
        println!("  {}", "(none registered)".dimmed());
    }
    for (key, label) in styles {
        println!("  {:<12} {}", key.cyan(), label);
    }
}

fn validate_links(registry: Arc<TypeRegistry>, file: &Path) -> Result<()> {
    let links = read_links(file)?;
    let validator = LinkValidator::new(registry, Arc::new(LinkHooks::new()));

    let mut failed = 0;
    for (index, link) in links.iter().enumerate() {
        let result = validator.validate(link);
        let name = describe(index, link);
        match result.message {
            None => println!("{} {}", "✓".green(), name),
            Some(message) => {
                failed += 1;
                println!("{} {}: {}", "✗".red(), name, message.red());
            }
        }
    }

    println!();
    println!(
        "{} checked, {} failed",
        links.len().to_string().bold(),
        failed.to_string().bold()
    );

    if failed > 0 {
        anyhow::bail!("{failed} link(s) failed validation");
    }
    Ok(())
}

async fn resolve_links(
    registry: Arc<TypeRegistry>,
    file: &Path,
    entities: Option<&Path>,
) -> Result<()> {
    let links = read_links(file)?;
    let store = match entities {
        Some(path) => InMemoryEntityStore::from_entities(read_entities(path)?),
        None => InMemoryEntityStore::new(),
    };

    let hooks = Arc::new(LinkHooks::new());
    let validator = Arc::new(LinkValidator::new(registry.clone(), hooks.clone()));
    let resolver = Arc::new(LinkResolver::new(registry, Arc::new(store), hooks));
    let service = LinkService::new(
        Arc::new(InMemoryLinkRepository::new()),
        validator,
        resolver.clone(),
    );
    let renderer = LinkRenderer::new(resolver.clone());

    for (index, mut link) in links.into_iter().enumerate() {
        let name = describe(index, &link);
        // Stored ids from the file are not meaningful in a fresh store.
        link.id = None;

        let link = match service.save(link).await? {
            SaveOutcome::Saved(link) => link,
            SaveOutcome::Rejected(result) => {
                println!(
                    "{} {}: {}",
                    "✗".red(),
                    name,
                    result.message.unwrap_or_default().red()
                );
                continue;
            }
        };

        let url = resolver.resolve_url(&link).await?;
        let url_text = match &url {
            LinkUrl::Url(u) => u.to_string(),
            LinkUrl::Placeholder(message) => message.yellow().to_string(),
            LinkUrl::Broken => "(broken reference)".red().to_string(),
            LinkUrl::Unset => "(not set)".dimmed().to_string(),
        };

        println!("{} {}", "▸".bright_blue(), name.bold());
        println!("  Title:     {}", link.title.as_deref().unwrap_or_default().cyan());
        println!(
            "  Type:      {}",
            resolver.link_type_label(&link).unwrap_or_default()
        );
        println!("  URL:       {}", url_text);
        println!("  Classes:   {}", resolver.css_classes(&link).join(" "));
        println!(
            "  Target:    {}",
            resolver.target_attribute(&link).unwrap_or("-")
        );
        match resolver.render_template_candidates(&link) {
            Ok(templates) => println!("  Templates: {}", templates.join(", ")),
            Err(e) => println!("  Templates: {}", e.to_string().red()),
        }
        match renderer.render(&link).await {
            Ok(html) => println!("  HTML:      {}", html.trim_end().bright_white()),
            Err(e) => println!("  HTML:      {}", e.to_string().red()),
        }
        println!();
    }

    Ok(())
}

fn new_link(registry: Arc<TypeRegistry>) -> Result<()> {
    println!("{}", "🔗 New link".bright_blue().bold());
    println!();

    let types = registry.i18n_types(None)?;
    let labels: Vec<&str> = types.iter().map(|(_, label)| label.as_str()).collect();
    let choice = Select::new()
        .with_prompt("Type")
        .items(&labels)
        .default(0)
        .interact()?;
    let link_type: LinkType = types[choice].0.parse()?;

    let mut link = Link::new(link_type.clone());
    match &link_type {
        LinkType::Url => link.url = Some(prompt("URL")?),
        LinkType::Email => link.email = Some(prompt("Email address")?),
        LinkType::Phone => link.phone = Some(prompt("Phone number")?),
        LinkType::File => link.file_id = Some(prompt_id("File ID")?),
        LinkType::SiteTree => link.site_tree_id = Some(prompt_id("Page ID")?),
        LinkType::Custom(kind) if registry.is_reference_type(&link_type) => {
            let id = prompt_id(&format!("{kind} ID"))?;
            link.references.insert(kind.clone(), id);
        }
        LinkType::Custom(_) => {}
    }

    let title: String = Input::new()
        .with_prompt("Title (blank to derive)")
        .allow_empty(true)
        .interact_text()?;
    link.title = (!title.trim().is_empty()).then_some(title);

    let styles = registry.i18n_styles();
    if !styles.is_empty() {
        let mut options = vec!["Default".to_string()];
        options.extend(styles.iter().map(|(_, label)| label.clone()));
        let choice = Select::new()
            .with_prompt("Style")
            .items(&options)
            .default(0)
            .interact()?;
        link.style = choice.checked_sub(1).map(|i| styles[i].0.clone());
    }

    link.open_in_new_window = Confirm::new()
        .with_prompt("Open link in a new window?")
        .default(false)
        .interact()?;

    let validator = LinkValidator::new(registry, Arc::new(LinkHooks::new()));
    let result = validator.validate(&link);

    println!();
    if let Some(message) = result.message {
        println!("{} {}", "⚠️ ".yellow(), message.yellow());
    } else {
        println!("{}", "✅ Link is valid".green().bold());
    }
    println!("{}", serde_json::to_string_pretty(&link)?);

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    Ok(Input::new().with_prompt(label).interact_text()?)
}

fn prompt_id(label: &str) -> Result<i64> {
    Ok(Input::<i64>::new().with_prompt(label).interact_text()?)
}

fn read_links(path: &Path) -> Result<Vec<Link>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: LinkFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse links in {}", path.display()))?;
    Ok(match file {
        LinkFile::Many(links) => links,
        LinkFile::One(link) => vec![*link],
    })
}

fn read_entities(path: &Path) -> Result<Vec<RelatedEntity>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse entities in {}", path.display()))
}

/// Short label for a link in command output.
fn describe(index: usize, link: &Link) -> String {
    match link.title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => format!("#{} {} ({})", index + 1, title, link.link_type),
        None => format!("#{} ({})", index + 1, link.link_type),
    }
}
