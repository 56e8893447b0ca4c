//! Command implementations.

use std::path::Path;

use anyhow::{Context, bail};
use blockmark_application::ports::DocumentRepository;
use blockmark_application::{GenerateBlockContent, RenderDocument, resolve_variables};
use blockmark_domain::{Document, Settings, UnknownTokenPolicy};
use blockmark_infrastructure::{FileDocumentRepository, GeminiContentGenerator, SettingsRepository};

use crate::cli::{Cli, Command};

/// Runs the parsed command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings_repo = cli
        .settings
        .map_or_else(SettingsRepository::new, SettingsRepository::at);
    let settings = settings_repo
        .load()
        .await
        .context("failed to load settings")?;
    let repo = FileDocumentRepository::new();

    match cli.command {
        Command::New { path, force } => new_document(&repo, &path, force).await,
        Command::Render {
            path,
            output,
            unknown_tokens,
        } => render(&repo, &settings, &path, output.as_deref(), unknown_tokens).await,
        Command::Variables { path } => variables(&repo, &path).await,
        Command::Generate {
            path,
            block,
            api_key,
        } => generate(&repo, &settings, &path, &block, api_key).await,
    }
}

async fn load(repo: &FileDocumentRepository, path: &Path) -> anyhow::Result<Document> {
    repo.load(path)
        .await
        .with_context(|| format!("could not load {}", path.display()))
}

async fn new_document(
    repo: &FileDocumentRepository,
    path: &Path,
    force: bool,
) -> anyhow::Result<()> {
    let exists = tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("could not check {}", path.display()))?;
    if exists && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    repo.save(path, &Document::sample()).await?;
    tracing::info!(path = %path.display(), "wrote sample document");
    Ok(())
}

async fn render(
    repo: &FileDocumentRepository,
    settings: &Settings,
    path: &Path,
    output: Option<&Path>,
    unknown_tokens: Option<UnknownTokenPolicy>,
) -> anyhow::Result<()> {
    let document = load(repo, path).await?;

    let mut render_settings = settings.render;
    if let Some(policy) = unknown_tokens {
        render_settings.unknown_tokens = policy;
    }

    let rendered = RenderDocument::new(render_settings).execute(&document);
    for key in &rendered.resolution.unresolvable {
        tracing::warn!(variable = %key, "variable could not be resolved");
    }

    match output {
        Some(out) => {
            tokio::fs::write(out, &rendered.markdown)
                .await
                .with_context(|| format!("could not write {}", out.display()))?;
            tracing::info!(path = %out.display(), "wrote rendered markdown");
        }
        None => println!("{}", rendered.markdown),
    }
    Ok(())
}

async fn variables(repo: &FileDocumentRepository, path: &Path) -> anyhow::Result<()> {
    let document = load(repo, path).await?;
    let resolution = resolve_variables(&document.variables);

    for (key, value) in resolution.iter() {
        println!("{key} = {value}");
    }
    if !resolution.is_complete() {
        eprintln!(
            "circular or unresolvable: {}",
            resolution.unresolvable.join(", ")
        );
    }
    Ok(())
}

async fn generate(
    repo: &FileDocumentRepository,
    settings: &Settings,
    path: &Path,
    block_id: &str,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let api_key = api_key
        .or_else(|| std::env::var("API_KEY").ok())
        .context("no API key: set BLOCKMARK_API_KEY or API_KEY")?;
    let generator = GeminiContentGenerator::new(settings.generator.clone(), api_key)?;

    let mut document = load(repo, path).await?;
    let output = GenerateBlockContent::new(generator)
        .execute(&mut document, block_id)
        .await?;
    repo.save(path, &document).await?;

    if output.fell_back {
        tracing::warn!(block = %output.block_id, "generation failed, fallback text written");
    } else {
        tracing::info!(block = %output.block_id, bytes = output.content.len(), "block updated");
    }
    Ok(())
}
