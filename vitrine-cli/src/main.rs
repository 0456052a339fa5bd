//! Vitrine catalog command-line client
//!
//! Usage:
//!   vitrine --base-url https://cms.example.com/api categories --expand-all
//!   vitrine images --ref-model Product --ref-id 42 --sort primary
//!   VITRINE_TOKEN=... vitrine delete-image 65f0c2
//!
//! Log output goes to stderr; listings go to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::sync::Arc;
use tracing::{Level, debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vitrine_api::{CatalogApi, HttpCatalogApi};
use vitrine_cli::{Cli, Command, ask, render_images, render_tree, resolve_config, session_for};
use vitrine_types::{CategoryDraft, CategoryId, ImageId};
use vitrine_view::{
    CategoryActions, CategoryTreeView, FilterState, GalleryConfig, ImageGallery, ViewError,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();
    FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = resolve_config(cli.config.as_deref(), cli.base_url.as_deref())?;
    let session = session_for(cli.token.as_deref());
    debug!(base_url = %config.base_url, authenticated = session.is_authenticated(), "client configured");
    let api: Arc<dyn CatalogApi> = Arc::new(HttpCatalogApi::new(config, session)?);

    match cli.command {
        Command::Categories { expand_all } => {
            let forest = api.list_categories().await.context("fetching categories")?;
            let mut tree = CategoryTreeView::new(forest, CategoryActions::new());
            if expand_all {
                tree.expand_all();
            }
            print!("{}", render_tree(&tree.visible_rows()));
        }
        Command::Images {
            page,
            limit,
            scope,
            search,
            sort,
            filter,
        } => {
            let mut gallery = ImageGallery::new(api, GalleryConfig::default());
            gallery
                .fetch_page(page, limit, scope.to_scope()?)
                .await
                .context("listing images")?;
            gallery
                .view_mut()
                .set_filter(FilterState::new(search, sort, filter));
            print!("{}", render_images(gallery.view()));
        }
        Command::SetPrimary { id, scope } => {
            let mut gallery = open_gallery(api, scope.to_scope()?).await?;
            let id = ImageId::new(id);
            gallery
                .set_primary(&id)
                .await
                .with_context(|| format!("setting {id} as primary"))?;
            info!(image = %id, "primary image set");
            print!("{}", render_images(gallery.view()));
        }
        Command::DeleteImage { id, yes, scope } => {
            let mut gallery = open_gallery(api, scope.to_scope()?).await?;
            let id = ImageId::new(id);
            let confirm =
                |prompt: &str| yes || ask(prompt, &mut io::stdin().lock(), &mut io::stdout());
            match gallery.delete(&id, &confirm).await {
                Ok(()) => print!("{}", render_images(gallery.view())),
                Err(ViewError::ConfirmationDeclined) => println!("Cancelled."),
                Err(e) => return Err(e).with_context(|| format!("deleting image {id}")),
            }
        }
        Command::CategoryCreate {
            name,
            description,
            parent,
        } => {
            let mut draft = CategoryDraft::new(name);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            if let Some(parent) = parent {
                draft = draft.under(parent);
            }
            let node = api.create_category(&draft).await.context("creating category")?;
            println!("Created category {} ({})", node.name, node.id);
        }
        Command::CategoryUpdate {
            id,
            name,
            description,
        } => {
            let mut draft = CategoryDraft::new(name);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            let node = api
                .update_category(&CategoryId::new(id), &draft)
                .await
                .context("updating category")?;
            println!("Updated category {} ({})", node.name, node.id);
        }
        Command::CategoryDelete { id, yes } => {
            let id = CategoryId::new(id);
            let prompt = format!("Delete category {id}? This cannot be undone.");
            if !yes && !ask(&prompt, &mut io::stdin().lock(), &mut io::stdout()) {
                println!("Cancelled.");
                return Ok(());
            }
            api.delete_category(&id)
                .await
                .with_context(|| format!("deleting category {id}"))?;
            println!("Deleted category {id}");
        }
    }

    Ok(())
}

/// A gallery with its first page loaded, so mutations can find their record.
async fn open_gallery(
    api: Arc<dyn CatalogApi>,
    scope: Option<vitrine_types::RefScope>,
) -> Result<ImageGallery> {
    let mut gallery = ImageGallery::new(
        api,
        GalleryConfig {
            scope,
            ..Default::default()
        },
    );
    gallery.fetch().await.context("listing images")?;
    Ok(gallery)
}
