//! Context setup and dispatch.
//!
//! 1. **Argument Parsing**: clap turns the shell arguments into [`Commands`]
//! 2. **Logging**: a `tracing` subscriber writing to stderr
//! 3. **Context Setup**: config, data directory and a `NotesApi<FileStore>`
//! 4. **Dispatch**: one handler per command, each returning the text to print

use super::render;
use super::setup::{Cli, Commands, FolderCommands, ThemeAction};
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use mdnotesapp::api::NotesApi;
use mdnotesapp::config::{default_config_path, NotesConfig};
use mdnotesapp::markdown::render_with_theme;
use mdnotesapp::model::{sorted_by_recent, Document, Folder};
use mdnotesapp::slug::{find_document_by_url, normalize_slug};
use mdnotesapp::store::fs::FileStore;
use mdnotesapp::theme::ThemeName;
use std::path::Path;

type Api = NotesApi<FileStore>;

const LOG_ENV: &str = "MDNOTES_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut api = create_api(&cli)?;
    let output = dispatch(&mut api, cli.command)?;
    print!("{}", output);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var(LOG_ENV).unwrap_or_else(|_| "warn".into())
    };
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn create_api(cli: &Cli) -> Result<Api> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = NotesConfig::load(Some(&config_path))
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config.data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), config = %config_path.display(), "opening store");

    Ok(NotesApi::with_config(FileStore::new(data_dir), config))
}

fn dispatch(api: &mut Api, command: Commands) -> Result<String> {
    match command {
        Commands::New {
            title,
            folder,
            cover,
        } => handle_new(api, &title.join(" "), folder.as_deref(), cover),
        Commands::List {
            folder,
            root,
            favorites,
        } => handle_list(api, folder.as_deref(), root, favorites),
        Commands::Show { reference } => {
            Ok(ensure_newline(resolve_document(api, &reference)?.content))
        }
        Commands::Render { reference, theme } => {
            let doc = resolve_document(api, &reference)?;
            let theme = match theme {
                Some(theme) => theme.into(),
                None => api.theme_preference()?,
            };
            Ok(ensure_newline(render_with_theme(&doc.content, theme)))
        }
        Commands::Save { reference, file } => handle_save(api, &reference, file.as_deref()),
        Commands::Rename { reference, title } => {
            let doc = resolve_document(api, &reference)?;
            let (renamed, version) = api.rename_document(&doc.id, &title.join(" "))?;
            Ok(render::success(&format!(
                "Renamed to \"{}\" (v{})",
                renamed.title, version.version_number
            )))
        }
        Commands::Delete { reference } => {
            let doc = resolve_document(api, &reference)?;
            api.delete_document(&doc.id)?;
            Ok(render::success(&format!("Deleted \"{}\"", doc.title)))
        }
        Commands::Move { reference, folder } => {
            let doc = resolve_document(api, &reference)?;
            let target = folder
                .as_deref()
                .map(|name| resolve_folder(api, name))
                .transpose()?;
            api.move_document_to_folder(&doc.id, target.as_ref().map(|f| f.id.as_str()))?;
            let place = target
                .map(|f| format!("\"{}\"", f.name))
                .unwrap_or_else(|| "the root".to_string());
            Ok(render::success(&format!("Moved \"{}\" to {}", doc.title, place)))
        }
        Commands::Fav { reference } => {
            let doc = resolve_document(api, &reference)?;
            let message = if api.toggle_favorite(&doc.id)? {
                format!("Added \"{}\" to favorites", doc.title)
            } else {
                format!("Removed \"{}\" from favorites", doc.title)
            };
            Ok(render::success(&message))
        }
        Commands::Folder { action } => handle_folder(api, action),
        Commands::Versions { reference } => {
            let doc = resolve_document(api, &reference)?;
            Ok(render::version_list(&api.get_versions(&doc.id)?, Utc::now()))
        }
        Commands::Restore { version_id } => {
            let (doc, version) = api.restore_document(&version_id)?;
            Ok(render::success(&format!(
                "Restored \"{}\" (recorded as v{})",
                doc.title, version.version_number
            )))
        }
        Commands::Prune { reference, keep } => {
            let doc = resolve_document(api, &reference)?;
            let removed = match keep {
                Some(keep) => api.prune_old_versions(&doc.id, keep)?,
                None => api.prune_versions(&doc.id)?,
            };
            Ok(render::success(&format!("Pruned {} version(s)", removed)))
        }
        Commands::History { reference } => {
            let doc = resolve_document(api, &reference)?;
            Ok(ensure_newline(api.export_version_history(&doc.id)?))
        }
        Commands::Stats { reference } => {
            let doc = resolve_document(api, &reference)?;
            Ok(render::stats(&api.get_document_stats(&doc.id)?))
        }
        Commands::Diff { from, to } => {
            let comparison = api
                .compare_versions(&from, &to)?
                .ok_or_else(|| anyhow!("Version not found: {} or {}", from, to))?;
            Ok(render::comparison(&comparison))
        }
        Commands::Theme { action } => handle_theme(api, action),
        Commands::Slug { text } => Ok(format!("{}\n", normalize_slug(&text.join(" ")))),
    }
}

fn handle_new(
    api: &mut Api,
    title: &str,
    folder: Option<&str>,
    cover: Option<String>,
) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        bail!("Title cannot be empty");
    }
    let folder_id = folder
        .map(|name| resolve_folder(api, name))
        .transpose()?
        .map(|f| f.id);
    let doc = api.create_document(title, cover, folder_id)?;
    Ok(format!("{}\n", doc.id))
}

fn handle_list(api: &Api, folder: Option<&str>, root: bool, favorites: bool) -> Result<String> {
    let docs = if let Some(name) = folder {
        let folder = resolve_folder(api, name)?;
        api.get_documents_by_folder(&folder.id)?
    } else if root {
        api.get_root_documents()?
    } else if favorites {
        api.favorite_documents()?
    } else {
        api.get_all_documents()?
    };

    Ok(render::document_list(
        &sorted_by_recent(docs),
        &api.favorites()?,
        &api.get_all_folders()?,
        Utc::now(),
    ))
}

fn handle_save(api: &mut Api, reference: &str, file: Option<&Path>) -> Result<String> {
    let doc = resolve_document(api, reference)?;
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?,
    };

    let (saved, version) = api.save_with_version(&doc.id, &content)?;
    Ok(render::success(&format!(
        "Saved \"{}\" (v{})",
        saved.title, version.version_number
    )))
}

fn handle_folder(api: &mut Api, action: FolderCommands) -> Result<String> {
    match action {
        FolderCommands::New { name } => {
            let name = name.join(" ");
            if name.trim().is_empty() {
                bail!("Folder name cannot be empty");
            }
            let folder = api.create_folder(name.trim())?;
            Ok(format!("{}\n", folder.id))
        }
        FolderCommands::List => {
            let docs = api.get_all_documents()?;
            let rows: Vec<(Folder, usize)> = api
                .get_all_folders()?
                .into_iter()
                .map(|folder| {
                    let count = docs
                        .iter()
                        .filter(|d| d.folder_id.as_deref() == Some(folder.id.as_str()))
                        .count();
                    (folder, count)
                })
                .collect();
            Ok(render::folder_list(&rows))
        }
        FolderCommands::Rename { folder, name } => {
            let folder = resolve_folder(api, &folder)?;
            let name = name.join(" ");
            if name.trim().is_empty() {
                bail!("Folder name cannot be empty");
            }
            api.rename_folder(&folder.id, name.trim())?;
            Ok(render::success(&format!(
                "Renamed folder \"{}\" to \"{}\"",
                folder.name,
                name.trim()
            )))
        }
        FolderCommands::Delete { folder } => {
            let folder = resolve_folder(api, &folder)?;
            api.delete_folder(&folder.id)?;
            Ok(render::success(&format!("Deleted folder \"{}\"", folder.name)))
        }
    }
}

fn handle_theme(api: &mut Api, action: Option<ThemeAction>) -> Result<String> {
    let theme = match action {
        None => api.theme_preference()?,
        Some(ThemeAction::Toggle) => api.toggle_theme()?,
        Some(ThemeAction::Light) => set_theme(api, ThemeName::Light)?,
        Some(ThemeAction::Dark) => set_theme(api, ThemeName::Dark)?,
    };
    Ok(format!("{}\n", theme))
}

fn set_theme(api: &mut Api, theme: ThemeName) -> Result<ThemeName> {
    api.save_theme_preference(theme)?;
    Ok(theme)
}

/// Finds a document by id or title slug, the same lookup the URL fragment uses.
fn resolve_document(api: &Api, reference: &str) -> Result<Document> {
    let docs = api.get_all_documents()?;
    find_document_by_url(reference, &docs)
        .cloned()
        .ok_or_else(|| anyhow!("Document not found: {}", reference))
}

/// Folders resolve by exact id first, then by case-insensitive name.
fn resolve_folder(api: &Api, reference: &str) -> Result<Folder> {
    let folders = api.get_all_folders()?;
    if let Some(folder) = folders.iter().find(|f| f.id == reference) {
        return Ok(folder.clone());
    }
    let mut by_name = folders
        .into_iter()
        .filter(|f| f.name.eq_ignore_ascii_case(reference.trim()));
    match (by_name.next(), by_name.next()) {
        (Some(folder), None) => Ok(folder),
        (Some(_), Some(_)) => bail!("Folder name is ambiguous, use its id: {}", reference),
        (None, _) => bail!("Folder not found: {}", reference),
    }
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn api() -> (TempDir, Api) {
        let dir = TempDir::new().unwrap();
        let api = NotesApi::new(FileStore::new(dir.path().to_path_buf()));
        (dir, api)
    }

    #[test]
    fn test_resolve_document_by_slug_and_id() {
        let (_dir, mut api) = api();
        let doc = api.create_document("Meeting Notes", None, None).unwrap();

        assert_eq!(resolve_document(&api, "meeting-notes").unwrap().id, doc.id);
        assert_eq!(resolve_document(&api, &doc.id).unwrap().id, doc.id);
        assert!(resolve_document(&api, "nothing-here").is_err());
    }

    #[test]
    fn test_resolve_folder_by_id_and_name() {
        let (_dir, mut api) = api();
        let work = api.create_folder("Work").unwrap();

        assert_eq!(resolve_folder(&api, &work.id).unwrap().id, work.id);
        assert_eq!(resolve_folder(&api, "work").unwrap().id, work.id);
        assert!(resolve_folder(&api, "home").is_err());

        api.create_folder("WORK").unwrap();
        let err = resolve_folder(&api, "Work").unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn test_new_rejects_blank_title() {
        let (_dir, mut api) = api();
        assert!(handle_new(&mut api, "   ", None, None).is_err());
        assert!(api.get_all_documents().unwrap().is_empty());
    }

    #[test]
    fn test_folder_list_counts_documents() {
        let (_dir, mut api) = api();
        let work = api.create_folder("Work").unwrap();
        api.create_document("A", None, Some(work.id.clone())).unwrap();
        api.create_document("B", None, Some(work.id)).unwrap();
        api.create_document("C", None, None).unwrap();

        console::set_colors_enabled(false);
        let out = handle_folder(&mut api, FolderCommands::List).unwrap();
        assert!(out.contains("Work (2 documents)"));
    }

    #[test]
    fn test_theme_set_and_toggle() {
        let (_dir, mut api) = api();
        assert_eq!(handle_theme(&mut api, None).unwrap(), "light\n");
        assert_eq!(
            handle_theme(&mut api, Some(ThemeAction::Dark)).unwrap(),
            "dark\n"
        );
        assert_eq!(
            handle_theme(&mut api, Some(ThemeAction::Toggle)).unwrap(),
            "light\n"
        );
    }

    #[test]
    fn test_ensure_newline() {
        assert_eq!(ensure_newline("a".to_string()), "a\n");
        assert_eq!(ensure_newline("a\n".to_string()), "a\n");
    }
}
