//! Argument parsing, configuration resolution and text rendering for the
//! `vitrine` binary.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use vitrine_api::{ApiConfig, Session};
use vitrine_types::RefScope;
use vitrine_view::{Expander, ImageCollectionView, PrimaryFilter, SortKey, TreeRow};

#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Browse and manage categories and images of a Vitrine catalog")]
pub struct Cli {
    /// JSON file with `base_url`, `timeout_secs` and `user_agent`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "VITRINE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the category tree
    Categories {
        /// Open every category that has subcategories
        #[arg(long)]
        expand_all: bool,
    },
    /// List one page of images
    Images {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = vitrine_types::DEFAULT_PAGE_LIMIT)]
        limit: u64,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Case-insensitive substring of the public id
        #[arg(long, default_value = "")]
        search: String,
        /// createdAt, publicId or primary
        #[arg(long, default_value_t = SortKey::CreatedAt)]
        sort: SortKey,
        /// all, primary or secondary
        #[arg(long, default_value_t = PrimaryFilter::All)]
        filter: PrimaryFilter,
    },
    /// Make an image the primary image of its entity
    SetPrimary {
        id: String,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Delete an image
    DeleteImage {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Create a category
    CategoryCreate {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Parent category id; omit for a root category
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename or re-describe a category
    CategoryUpdate {
        id: String,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a category
    CategoryDelete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

/// Owning entity filter shared by the image commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Owning model name, e.g. `Product`
    #[arg(long)]
    pub ref_model: Option<String>,
    /// Owning entity id
    #[arg(long)]
    pub ref_id: Option<String>,
}

impl ScopeArgs {
    /// Both flags or neither.
    pub fn to_scope(&self) -> Result<Option<RefScope>> {
        match (&self.ref_model, &self.ref_id) {
            (Some(model), Some(id)) => Ok(Some(RefScope::new(model.as_str(), id.as_str()))),
            (None, None) => Ok(None),
            _ => bail!("--ref-model and --ref-id must be given together"),
        }
    }
}

/// Loads the config file if given, then applies the `--base-url` override.
pub fn resolve_config(path: Option<&Path>, base_url: Option<&str>) -> Result<ApiConfig> {
    let mut config = match path {
        Some(path) => ApiConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ApiConfig::default(),
    };
    if let Some(url) = base_url {
        config.base_url = url.to_string();
    }
    config.validate().context("invalid backend configuration")?;
    Ok(config)
}

/// An empty token counts as no token.
pub fn session_for(token: Option<&str>) -> Session {
    match token.map(str::trim).filter(|t| !t.is_empty()) {
        Some(token) => Session::with_token(token),
        None => Session::anonymous(),
    }
}

/// Asks a yes/no question; anything but `y`/`yes` is a no.
pub fn ask(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if write!(output, "{prompt} [y/N] ").and_then(|()| output.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// One line per row, indented by depth.
pub fn render_tree(rows: &[TreeRow]) -> String {
    if rows.is_empty() {
        return "No categories.\n".to_string();
    }
    let mut out = String::new();
    for row in rows {
        let marker = match row.expander {
            Expander::Leaf => ' ',
            Expander::Collapsed => '+',
            Expander::Expanded => '-',
        };
        out.push_str(&"  ".repeat(row.depth));
        out.push(marker);
        out.push(' ');
        out.push_str(&row.name);
        out.push_str(&format!("  ({})", row.id));
        if let Some(description) = &row.description {
            out.push_str(&format!(": {description}"));
        }
        out.push('\n');
    }
    out
}

/// The filtered image table, the page footer and the error banner.
pub fn render_images(view: &ImageCollectionView) -> String {
    let mut out = String::new();
    if let Some(message) = view.error() {
        out.push_str(&format!("error: {message}\n"));
    }
    let visible = view.visible();
    if visible.is_empty() {
        out.push_str("No images.\n");
    } else {
        out.push_str(&format!(
            "  {:<26} {:<32} {:<10} {}\n",
            "ID", "PUBLIC ID", "CREATED", "OWNER"
        ));
        for record in &visible {
            out.push_str(&format!(
                "{} {:<26} {:<32} {:<10} {}\n",
                if record.primary { '*' } else { ' ' },
                record.id,
                record.public_id,
                record.created_at.format("%Y-%m-%d"),
                record.scope(),
            ));
        }
    }
    let pagination = view.pagination();
    out.push_str(&format!(
        "{}  (page {} of {})\n",
        view.summary(),
        pagination.page,
        pagination.total_pages.max(1)
    ));
    out
}
