mod cli;
mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tidyfs_core::{default_config_root, Engine, ProjectUpdate, SearchQuery};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Command, FavCommand, Opts, ProjectCommand, RecentCommand, TagCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tidyfs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opts = Opts::parse();
    let root = opts.config.clone().unwrap_or_else(default_config_root);
    let engine = Engine::open(root);
    tracing::debug!("config root {}", engine.root().display());

    let engine = run(engine, opts.command).await?;

    if !engine.files().history().is_empty() {
        print!("{}", report::history(engine.files().history().newest_first()));
    }
    Ok(())
}

/// Runs `job` against the engine on the blocking pool and hands the engine back.
async fn blocking<T, F>(mut engine: Engine, job: F) -> anyhow::Result<(Engine, T)>
where
    F: FnOnce(&mut Engine) -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(move || {
        let out = job(&mut engine);
        (engine, out)
    });
    handle.await.context("worker thread panicked")
}

async fn run(engine: Engine, command: Command) -> anyhow::Result<Engine> {
    match command {
        Command::Dupes { root, prune, trash } => {
            let (engine, groups) = blocking(engine, move |e| e.find_duplicates(&root)).await?;
            let groups = groups?;
            print!("{}", report::duplicates(&groups));
            if !prune {
                return Ok(engine);
            }
            let extras: Vec<PathBuf> = groups
                .iter()
                .flat_map(|g| g.paths.iter().skip(1).cloned())
                .collect();
            let total = extras.len();
            let (engine, done) =
                blocking(engine, move |e| e.files_mut().batch_delete(&extras, trash)).await?;
            println!("pruned {done}/{total}");
            Ok(engine)
        }
        Command::Usage { path, depth } => {
            let depth = depth.unwrap_or(engine.settings().usage.default_depth);
            let (engine, node) = blocking(engine, move |e| e.analyze_usage(&path, depth)).await?;
            print!("{}", report::usage(&node));
            Ok(engine)
        }
        Command::Size { path } => {
            let (engine, size) = blocking(engine, move |e| e.folder_size(&path)).await?;
            println!("{} ({size} bytes)", report::human_size(size));
            Ok(engine)
        }
        Command::Large { root, min_size } => {
            let (engine, files) =
                blocking(engine, move |e| e.find_large_files(&root, min_size)).await?;
            print!("{}", report::large_files(&files));
            Ok(engine)
        }
        Command::Search {
            root,
            text,
            case_sensitive,
            content,
            extensions,
        } => {
            let mut query = SearchQuery::new(text)
                .case_sensitive(case_sensitive)
                .search_content(content);
            if !extensions.is_empty() {
                query = query.extensions(extensions);
            }
            let (engine, hits) = blocking(engine, move |e| {
                e.search(&root, query).collect::<Vec<PathBuf>>()
            })
            .await?;
            for hit in &hits {
                println!("{}", hit.display());
            }
            tracing::info!("{} match(es)", hits.len());
            Ok(engine)
        }
        Command::Info { path, json } => {
            let (engine, entry) = blocking(engine, move |e| e.files().file_info(&path)).await?;
            let entry = entry?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                print!("{}", report::file_info(&entry));
            }
            Ok(engine)
        }
        Command::Mkdir { path } => {
            let mut engine = engine;
            engine.files_mut().create_folder(&path)?;
            Ok(engine)
        }
        Command::Rename {
            pattern,
            start,
            files,
        } => {
            let total = files.len();
            let (engine, done) = blocking(engine, move |e| {
                e.files_mut().batch_rename(&files, &pattern, start)
            })
            .await?;
            println!("renamed {done}/{total}");
            Ok(engine)
        }
        Command::Mv { to, files } => {
            let total = files.len();
            let (engine, done) =
                blocking(engine, move |e| e.files_mut().batch_move(&files, &to)).await?;
            println!("moved {done}/{total}");
            Ok(engine)
        }
        Command::Cp { to, files } => {
            let total = files.len();
            let (engine, done) =
                blocking(engine, move |e| e.files_mut().batch_copy(&files, &to)).await?;
            println!("copied {done}/{total}");
            Ok(engine)
        }
        Command::Rm { trash, files } => {
            let total = files.len();
            let (engine, done) =
                blocking(engine, move |e| e.files_mut().batch_delete(&files, trash)).await?;
            println!("deleted {done}/{total}");
            Ok(engine)
        }
        Command::Open { path } => {
            engine.files().open_file(&path)?;
            engine.store().add_recent(&path)?;
            Ok(engine)
        }
        Command::Fav(cmd) => {
            favorites(&engine, cmd)?;
            Ok(engine)
        }
        Command::Recent(cmd) => {
            recent(&engine, cmd)?;
            Ok(engine)
        }
        Command::Tag(cmd) => {
            tags(&engine, cmd)?;
            Ok(engine)
        }
        Command::Project(cmd) => {
            projects(&engine, cmd)?;
            Ok(engine)
        }
    }
}

fn favorites(engine: &Engine, cmd: FavCommand) -> anyhow::Result<()> {
    let store = engine.store();
    match cmd {
        FavCommand::Add { path, name } => store.add_favorite(&path, name.as_deref())?,
        FavCommand::Remove { path } => store.remove_favorite(&path)?,
        FavCommand::List => {
            for fav in store.favorites() {
                println!("{:<20} {}", fav.name, fav.path.display());
            }
        }
    }
    Ok(())
}

fn recent(engine: &Engine, cmd: RecentCommand) -> anyhow::Result<()> {
    let store = engine.store();
    match cmd {
        RecentCommand::Add { path } => store.add_recent(&path)?,
        RecentCommand::Clear => store.clear_recent()?,
        RecentCommand::List => {
            for entry in store.recent() {
                println!(
                    "{}  {}",
                    entry.accessed.format("%Y-%m-%d %H:%M"),
                    entry.path.display()
                );
            }
        }
    }
    Ok(())
}

fn tags(engine: &Engine, cmd: TagCommand) -> anyhow::Result<()> {
    let store = engine.store();
    match cmd {
        TagCommand::Add { path, tag } => store.add_tag(&path, &tag)?,
        TagCommand::Remove { path, tag } => store.remove_tag(&path, &tag)?,
        TagCommand::List { path: Some(path) } => println!("{}", store.tags_for(&path).join(", ")),
        TagCommand::List { path: None } => {
            for (path, tags) in store.all_tags().iter() {
                println!("{}: {}", path.display(), tags.join(", "));
            }
        }
        TagCommand::Find { tag } => {
            for path in store.search_by_tag(&tag) {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn projects(engine: &Engine, cmd: ProjectCommand) -> anyhow::Result<()> {
    let store = engine.store();
    match cmd {
        ProjectCommand::Add { name, path } => {
            let project = store.create_project(&name, &path)?;
            println!("{} -> {}", project.name, project.path.display());
        }
        ProjectCommand::Show { name } => {
            let project = store
                .project(&name)
                .with_context(|| format!("no project named {name}"))?;
            println!("name:          {}", project.name);
            println!("path:          {}", project.path.display());
            println!("created:       {}", project.created.format("%Y-%m-%d %H:%M"));
            println!("last modified: {}", project.last_modified.format("%Y-%m-%d %H:%M"));
        }
        ProjectCommand::List => {
            for project in store.projects() {
                println!("{:<20} {}", project.name, project.path.display());
            }
        }
        ProjectCommand::Update { name, rename, path } => {
            let update = ProjectUpdate { name: rename, path };
            if !store.update_project(&name, &update)? {
                anyhow::bail!("cannot update project {name}: unknown or name taken");
            }
        }
        ProjectCommand::Remove { name } => store.delete_project(&name)?,
    }
    Ok(())
}
