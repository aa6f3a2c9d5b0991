use crate::log::LOG_FILE_NAME;
use crate::namer::synthesize;
use crate::resolver::{resolve, FileEntry};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling plan construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Descend into subdirectories. When false only the root's immediate
    /// files are considered.
    pub recursive: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self { recursive: true }
    }
}

/// A planned unit of work: move `source` to `destination`. Advisory until
/// executed; afterwards it persists only as a log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// An ordered rename plan over one directory tree. Building a plan never
/// touches the filesystem beyond reading it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub root: PathBuf,
    pub created_at: String,
    pub operations: Vec<RenameOperation>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Walk `root` and produce a rename plan.
///
/// Traversal is sorted by file name so repeated dry runs over an unchanged
/// tree yield identical plans. Each directory's reservation set is seeded
/// with its current filenames before any name is synthesized, so a proposed
/// name can never collide with a pre-existing file that has not been renamed
/// yet. The log file is never part of a plan.
pub fn build_plan(root: &Path, options: &PlanOptions) -> Result<Plan> {
    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let mut reserved: BTreeMap<PathBuf, HashSet<String>> = BTreeMap::new();
    let mut operations = Vec::new();

    for entry in walker.into_iter().filter_map(std::result::Result::ok) {
        // Symlinks pointing at files are renamed like files (the link moves,
        // not its target); symlinked directories are not descended into.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file || entry.file_name() == LOG_FILE_NAME {
            continue;
        }

        let path = entry.path();
        let parent = path.parent().unwrap_or(root).to_path_buf();
        let used_names = reserved
            .entry(parent.clone())
            .or_insert_with(|| current_filenames(&parent));

        let file = FileEntry::snapshot(path);
        let timestamp = resolve(&file);
        let new_name = synthesize(timestamp, file.extension.as_deref(), used_names);

        operations.push(RenameOperation {
            source: path.to_path_buf(),
            destination: parent.join(new_name),
        });
    }

    Ok(Plan {
        root: root.to_path_buf(),
        created_at: chrono::Local::now().to_rfc3339(),
        operations,
    })
}

/// Names currently occupying a directory, used to seed its reservation set.
fn current_filenames(dir: &Path) -> HashSet<String> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(std::result::Result::ok)
                .filter(|e| e.path().is_file())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}
