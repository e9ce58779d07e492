use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tidyfs", version, about = "Organise, analyse and deduplicate directory trees")]
pub struct Opts {
    /// Configuration root holding config.toml and the annotation stores.
    #[arg(long, global = true, env = "TIDYFS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List groups of files with identical content
    Dupes {
        root: PathBuf,
        /// Remove every copy except the first one of each group
        #[arg(long)]
        prune: bool,
        /// Send pruned copies to the trash instead of deleting them
        #[arg(long, requires = "prune")]
        trash: bool,
    },
    /// Disk usage tree
    Usage {
        path: PathBuf,
        /// Levels to descend (defaults to the configured depth)
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// Total bytes below a folder
    Size { path: PathBuf },
    /// Files at or above a size threshold, largest first
    Large {
        root: PathBuf,
        /// Threshold in bytes (defaults to the configured threshold)
        #[arg(long)]
        min_size: Option<u64>,
    },
    /// Search by name and optionally by content
    Search {
        root: PathBuf,
        text: String,
        #[arg(short = 's', long)]
        case_sensitive: bool,
        /// Also look inside text files
        #[arg(short, long)]
        content: bool,
        /// Restrict to these extensions (repeatable)
        #[arg(short, long = "ext")]
        extensions: Vec<String>,
    },
    /// Details of a single file or folder
    Info {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Create a folder and any missing parents
    Mkdir { path: PathBuf },
    /// Rename files with a pattern using {n}, {name} and {ext}
    Rename {
        #[arg(short, long)]
        pattern: String,
        #[arg(long, default_value_t = 1)]
        start: usize,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Move files into a folder
    Mv {
        #[arg(short, long)]
        to: PathBuf,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Copy files into a folder
    Cp {
        #[arg(short, long)]
        to: PathBuf,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete files or folders
    Rm {
        #[arg(long)]
        trash: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Open a file with the platform default application
    Open { path: PathBuf },
    #[command(subcommand)]
    Fav(FavCommand),
    #[command(subcommand)]
    Recent(RecentCommand),
    #[command(subcommand)]
    Tag(TagCommand),
    #[command(subcommand)]
    Project(ProjectCommand),
}

/// Manage favorite locations
#[derive(Debug, Subcommand)]
pub enum FavCommand {
    Add {
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    Remove { path: PathBuf },
    List,
}

/// Manage recently visited locations
#[derive(Debug, Subcommand)]
pub enum RecentCommand {
    Add { path: PathBuf },
    List,
    Clear,
}

/// Manage free-form tags
#[derive(Debug, Subcommand)]
pub enum TagCommand {
    Add { path: PathBuf, tag: String },
    Remove { path: PathBuf, tag: String },
    /// Tags of one path, or every tagged path
    List { path: Option<PathBuf> },
    /// Paths carrying a tag
    Find { tag: String },
}

/// Manage named organisation projects
#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    Add { name: String, path: PathBuf },
    Show { name: String },
    List,
    Update {
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        path: Option<PathBuf>,
    },
    Remove { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Opts::command().debug_assert();
    }

    #[test]
    fn parses_batch_rename() {
        let opts = Opts::try_parse_from([
            "tidyfs", "rename", "-p", "Photo_{n}", "a.jpg", "b.jpg",
        ])
        .unwrap();
        match opts.command {
            Command::Rename { pattern, start, files } => {
                assert_eq!(pattern, "Photo_{n}");
                assert_eq!(start, 1);
                assert_eq!(files, vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn repeated_ext_flags_collect() {
        let opts =
            Opts::try_parse_from(["tidyfs", "search", ".", "report", "-e", "txt", "-e", ".md"])
                .unwrap();
        match opts.command {
            Command::Search { extensions, .. } => assert_eq!(extensions, vec!["txt", ".md"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn trash_without_prune_is_rejected() {
        assert!(Opts::try_parse_from(["tidyfs", "dupes", ".", "--trash"]).is_err());
    }

    #[test]
    fn parses_project_update() {
        let opts = Opts::try_parse_from([
            "tidyfs", "project", "update", "photos", "--path", "/mnt/photos",
        ])
        .unwrap();
        match opts.command {
            Command::Project(ProjectCommand::Update { name, rename, path }) => {
                assert_eq!(name, "photos");
                assert_eq!(rename, None);
                assert_eq!(path, Some(PathBuf::from("/mnt/photos")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rm_requires_files() {
        assert!(Opts::try_parse_from(["tidyfs", "rm"]).is_err());
    }
}
