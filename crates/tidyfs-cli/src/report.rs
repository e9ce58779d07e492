//! Plain-text rendering of engine results.

use std::fmt::Write;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tidyfs_core::analyze::total_wasted;
use tidyfs_core::{DuplicateGroup, FileEntry, HistoryRecord, LargeFile, OperationKind, UsageNode};

/// Formats a byte count with binary units (`1.5 KiB`).
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn duplicates(groups: &[DuplicateGroup]) -> String {
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        let _ = writeln!(
            out,
            "#{} {} x {} ({})",
            i + 1,
            group.paths.len(),
            human_size(group.size),
            &group.fingerprint.as_str()[..group.fingerprint.as_str().len().min(12)]
        );
        for path in &group.paths {
            let _ = writeln!(out, "  {}", path.display());
        }
    }
    let _ = writeln!(
        out,
        "{} group(s), {} reclaimable",
        groups.len(),
        human_size(total_wasted(groups))
    );
    out
}

pub fn usage(node: &UsageNode) -> String {
    let mut out = String::new();
    usage_line(&mut out, node, 0);
    out
}

fn usage_line(out: &mut String, node: &UsageNode, indent: usize) {
    let _ = writeln!(
        out,
        "{:indent$}{:>10}  {} ({} files, {} folders)",
        "",
        human_size(node.size),
        node.path.display(),
        node.file_count,
        node.folder_count,
        indent = indent * 2
    );
    let mut children: Vec<&UsageNode> = node.children.iter().collect();
    children.sort_by(|a, b| b.size.cmp(&a.size));
    for child in children {
        usage_line(out, child, indent + 1);
    }
}

pub fn large_files(files: &[LargeFile]) -> String {
    let mut out = String::new();
    for file in files {
        let _ = writeln!(out, "{:>10}  {}", human_size(file.size), file.path.display());
    }
    out
}

fn timestamp(time: Option<SystemTime>) -> String {
    time.map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn file_info(entry: &FileEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "name:        {}", entry.name());
    let _ = writeln!(out, "path:        {}", entry.path().display());
    let kind = if entry.is_dir() { "directory" } else { "file" };
    let _ = writeln!(out, "kind:        {kind}");
    let _ = writeln!(out, "size:        {}", human_size(entry.size()));
    let _ = writeln!(out, "created:     {}", timestamp(entry.created()));
    let _ = writeln!(out, "modified:    {}", timestamp(entry.modified()));
    let _ = writeln!(out, "accessed:    {}", timestamp(entry.accessed()));
    if let Some(ext) = entry.extension() {
        let _ = writeln!(out, "extension:   {ext}");
    }
    if let Some(mode) = entry.permissions() {
        let _ = writeln!(out, "permissions: {mode:o}");
    }
    if let Some(fp) = entry.fingerprint() {
        let _ = writeln!(out, "fingerprint: {fp}");
    }
    out
}

fn verb(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::CreateFolder => "created",
        OperationKind::Rename => "renamed",
        OperationKind::Move => "moved",
        OperationKind::Copy => "copied",
        OperationKind::Delete => "deleted",
        OperationKind::Trash => "trashed",
    }
}

pub fn history<'a>(records: impl Iterator<Item = &'a HistoryRecord>) -> String {
    let mut out = String::new();
    for record in records {
        let _ = write!(
            out,
            "{} {} {}",
            record.timestamp.format("%H:%M:%S"),
            verb(record.kind),
            record.source.display()
        );
        if let Some(dest) = &record.destination {
            let _ = write!(out, " -> {}", dest.display());
        }
        out.push('\n');
    }
    out
}
