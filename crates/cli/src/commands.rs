//! Command implementations
//!
//! Each command builds what it needs from a [`Context`] and reports through
//! [`crate::output`]. Writes go through [`TaxonomyCache::apply`], so what is
//! printed afterwards is the tree the server returned.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use edutalks_client::{
    ApiClient, Applied, ClientConfig, Credentials, Mutation, SessionStore, TaxonomyCache,
};
use edutalks_core::{FileId, PortalError, Role, SectionId, TabId, Validatable, next_position};
use edutalks_taxonomy::{
    SectionIndex, SectionInput, TabInput, compose_routes,
    ensure_section_slug_available, ensure_tab_slug_available, suggest_slug,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::output;
use crate::{Cli, Commands, SectionCommands, TabCommands};

/// Everything a command needs
pub struct Context {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub store: SessionStore,
    pub json: bool,
}

impl Context {
    /// Layer command-line overrides on top of the loaded configuration
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = ClientConfig::load().context("loading client configuration")?;
        if let Some(url) = &cli.api_url {
            config.base_url = url.trim().to_string();
        }
        if let Some(path) = &cli.session_file {
            config.session_path = path.clone();
        }
        if let Some(secs) = cli.timeout {
            config.timeout_secs = secs;
        }
        config.validate()?;

        let store = SessionStore::load(config.session_path.clone());
        let client = ApiClient::new(&config, store.auth())?;
        debug!(base_url = %client.base_url(), "client ready");

        Ok(Self {
            config,
            client,
            store,
            json: cli.json,
        })
    }

    fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print the tree after a write, or a one-line summary.
    ///
    /// The write already happened when this runs; a failed re-read only
    /// earns a warning.
    fn report(&self, summary: &str, applied: &Applied) -> anyhow::Result<()> {
        if let Some(err) = applied.refresh_error() {
            output::warning(&format!(
                "{summary}, but the tree could not be re-read: {}",
                err.user_message()
            ));
        }
        match (self.json, applied.tree()) {
            (true, Some(tree)) => self.print_json(tree.as_ref()),
            (true, None) => self.print_json(&serde_json::json!({
                "applied": summary,
                "tree": null,
            })),
            (false, _) => {
                output::success(summary);
                Ok(())
            }
        }
    }
}

/// Run one parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut ctx = Context::from_cli(&cli)?;

    match cli.command {
        Commands::Tree => tree(&ctx).await,
        Commands::Routes { role } => routes(&ctx, role).await,
        Commands::Files { section } => files(&ctx, section.map(SectionId)).await,
        Commands::Tabs { command } => tabs(&ctx, command).await,
        Commands::Sections { command } => sections(&ctx, command).await,
        Commands::Download { id, output } => download(&ctx, FileId(id), output).await,
        Commands::Login {
            token,
            username,
            role,
            display_name,
        } => login(&mut ctx, token, username, role, display_name),
        Commands::Logout => logout(&mut ctx),
        Commands::Whoami => whoami(&ctx),
    }
}

// ============================================================================
// Inspection
// ============================================================================

async fn tree(ctx: &Context) -> anyhow::Result<()> {
    let tree = ctx.client.fetch_tree().await?;
    if ctx.json {
        return ctx.print_json(&tree);
    }
    print!("{}", output::render_tree(&tree));
    Ok(())
}

async fn routes(ctx: &Context, role: Option<String>) -> anyhow::Result<()> {
    let role = match role {
        Some(role) => Role::from(role),
        None => ctx.store.session().role.clone(),
    };
    let tree = ctx.client.fetch_tree().await?;
    let routes = compose_routes(&tree, &role);
    info!(%role, routes = routes.len(), "composed routes");

    if ctx.json {
        return ctx.print_json(&output::routes_json(&routes));
    }
    print!("{}", output::render_routes(&routes));
    Ok(())
}

async fn files(ctx: &Context, section: Option<SectionId>) -> anyhow::Result<()> {
    let records = ctx.client.list_files().await?;
    let index = SectionIndex::build(records);

    if let Some(section) = section {
        let files = index.files_for(section);
        if ctx.json {
            return ctx.print_json(&files);
        }
        print!("{}", output::render_file_list(files));
        return Ok(());
    }

    let tree = ctx.client.fetch_tree().await?;
    if ctx.json {
        let mut all: Vec<_> = index
            .section_ids()
            .into_iter()
            .flat_map(|id| index.files_for(id).to_vec())
            .collect();
        all.extend(index.unassigned().iter().cloned());
        return ctx.print_json(&all);
    }
    print!("{}", output::render_files(&tree, &index));
    Ok(())
}

// ============================================================================
// Tabs
// ============================================================================

async fn tabs(ctx: &Context, command: TabCommands) -> anyhow::Result<()> {
    let cache = TaxonomyCache::new();
    let tree = cache.read(&ctx.client).await?;

    let mutation = match command {
        TabCommands::Create {
            title,
            slug,
            position,
            inactive,
        } => {
            let input = TabInput {
                slug: slug.unwrap_or_else(|| suggest_slug(&title)),
                position: position.unwrap_or_else(|| next_position(tree.tabs())),
                title: title.trim().to_string(),
                is_active: !inactive,
            };
            input.validate()?;
            ensure_tab_slug_available(&tree, &input.slug, None)?;
            Mutation::CreateTab(input)
        }
        TabCommands::Update {
            id,
            title,
            slug,
            position,
            active,
        } => {
            let id = TabId(id);
            let node = tree
                .node(id)
                .ok_or_else(|| PortalError::TabNotFound(id.to_string()))?;
            let mut input = TabInput::from_tab(&node.tab);
            if let Some(title) = title {
                input.title = title.trim().to_string();
            }
            if let Some(slug) = slug {
                input.slug = slug.trim().to_string();
            }
            if let Some(position) = position {
                input.position = position;
            }
            if let Some(active) = active {
                input.is_active = active;
            }
            input.validate()?;
            ensure_tab_slug_available(&tree, &input.slug, Some(id))?;
            Mutation::UpdateTab(id, input)
        }
        TabCommands::Delete { id, yes } => {
            let id = TabId(id);
            let node = tree
                .node(id)
                .ok_or_else(|| PortalError::TabNotFound(id.to_string()))?;
            if !yes {
                bail!(
                    "refusing to delete tab '{}' ({} sections) without --yes",
                    node.tab.title,
                    node.sections.len()
                );
            }
            Mutation::DeleteTab(id)
        }
    };

    let applied = cache.apply(&ctx.client, &mutation).await?;
    ctx.report(&mutation.summary(), &applied)
}

// ============================================================================
// Sections
// ============================================================================

async fn sections(ctx: &Context, command: SectionCommands) -> anyhow::Result<()> {
    let cache = TaxonomyCache::new();
    let tree = cache.read(&ctx.client).await?;

    let mutation = match command {
        SectionCommands::Create {
            tab,
            title,
            slug,
            description,
            position,
            inactive,
        } => {
            let tab = TabId(tab);
            let node = tree
                .node(tab)
                .ok_or_else(|| PortalError::TabNotFound(tab.to_string()))?;
            let input = SectionInput {
                tab_id: tab,
                slug: slug.unwrap_or_else(|| suggest_slug(&title)),
                position: position.unwrap_or_else(|| {
                    next_position(node.sections.iter().map(|entry| &entry.section))
                }),
                title: title.trim().to_string(),
                description: description.filter(|d| !d.trim().is_empty()),
                is_active: !inactive,
            };
            input.validate()?;
            ensure_section_slug_available(&tree, tab, &input.slug, None)?;
            Mutation::CreateSection(input)
        }
        SectionCommands::Update {
            id,
            title,
            slug,
            description,
            position,
            active,
        } => {
            let id = SectionId(id);
            let (tab, entry) = tree
                .find_section(id)
                .ok_or_else(|| PortalError::SectionNotFound(id.to_string()))?;
            let mut input = SectionInput::from_section(tab, &entry.section);
            if let Some(title) = title {
                input.title = title.trim().to_string();
            }
            if let Some(slug) = slug {
                input.slug = slug.trim().to_string();
            }
            if let Some(description) = description {
                input.description = Some(description).filter(|d| !d.trim().is_empty());
            }
            if let Some(position) = position {
                input.position = position;
            }
            if let Some(active) = active {
                input.is_active = active;
            }
            input.validate()?;
            ensure_section_slug_available(&tree, tab, &input.slug, Some(id))?;
            Mutation::UpdateSection(id, input)
        }
        SectionCommands::Delete { id, yes } => {
            let id = SectionId(id);
            let (_, entry) = tree
                .find_section(id)
                .ok_or_else(|| PortalError::SectionNotFound(id.to_string()))?;
            if !yes {
                bail!(
                    "refusing to delete section '{}' ({} documents) without --yes",
                    entry.section.title,
                    entry.docs_count
                );
            }
            Mutation::DeleteSection(id)
        }
    };

    let applied = cache.apply(&ctx.client, &mutation).await?;
    ctx.report(&mutation.summary(), &applied)
}

// ============================================================================
// Files
// ============================================================================

async fn download(ctx: &Context, id: FileId, output: Option<PathBuf>) -> anyhow::Result<()> {
    let download = ctx.client.download_file(id).await?;
    let target = match output {
        Some(path) => path,
        None => PathBuf::from(default_file_name(download.filename.as_deref(), id)),
    };

    std::fs::write(&target, &download.bytes)
        .with_context(|| format!("writing {}", target.display()))?;
    info!(file_id = %id, bytes = download.len(), "saved download");
    output::success(&format!(
        "Saved {} ({} bytes)",
        target.display(),
        download.len()
    ));
    Ok(())
}

/// Last path component of the server's name, or `file-{id}`
fn default_file_name(server_name: Option<&str>, id: FileId) -> String {
    server_name
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("file-{id}"))
}

// ============================================================================
// Session
// ============================================================================

fn login(
    ctx: &mut Context,
    token: String,
    username: String,
    role: String,
    display_name: Option<String>,
) -> anyhow::Result<()> {
    if token.trim().is_empty() {
        bail!("access token must not be empty");
    }
    let mut credentials = Credentials::new(token.trim(), Role::from(role), username.trim());
    if let Some(name) = display_name.filter(|n| !n.trim().is_empty()) {
        credentials = credentials.with_display_name(name.trim());
    }
    ctx.store.login(credentials)?;
    output::success(&format!(
        "Signed in; session stored at {}",
        ctx.config.session_path.display()
    ));
    Ok(())
}

fn logout(ctx: &mut Context) -> anyhow::Result<()> {
    ctx.store.logout()?;
    output::success("Signed out");
    Ok(())
}

fn whoami(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.store.session();
    if ctx.json {
        return ctx.print_json(&output::session_json(session));
    }
    println!("{}", output::render_session(session));
    Ok(())
}
