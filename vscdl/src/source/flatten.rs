//! Source tree flattening

use tracing::debug;
use vercel_models::FileNode;

/// Kind of a flattened entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File { uid: String },
    Directory,
}

/// A path-qualified node of the source tree.
///
/// `path` starts with the destination root name that replaced the tree's
/// own root, e.g. `out/sub/b.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    path: String,
    pub kind: EntryKind,
    root_len: usize,
}

impl FlatEntry {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path below the destination root, e.g. `sub/b.txt`
    pub fn relative_path(&self) -> &str {
        &self.path[self.root_len + 1..]
    }

    pub fn uid(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { uid } => Some(uid),
            EntryKind::Directory => None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Flatten the tree below `root` into path-qualified entries.
///
/// All direct children of a node are emitted before any of their
/// descendants, so a directory always precedes everything inside it.
/// `root` itself is not emitted; its name is replaced by `destination_root`.
/// Nodes that are neither files nor directories are dropped.
pub fn flatten(root: &FileNode, destination_root: &str) -> Vec<FlatEntry> {
    let mut entries = Vec::with_capacity(root.descendant_count());
    flatten_into(root, destination_root, destination_root.len(), &mut entries);
    entries
}

fn flatten_into(node: &FileNode, qualified: &str, root_len: usize, out: &mut Vec<FlatEntry>) {
    let mut directories = Vec::new();

    for child in node.children() {
        let path = format!("{}/{}", qualified, child.name());
        let kind = match child {
            FileNode::File { uid, .. } => EntryKind::File { uid: uid.clone() },
            FileNode::Directory { .. } => {
                directories.push((child, path.clone()));
                EntryKind::Directory
            }
            FileNode::Other { kind, .. } => {
                debug!("Skipping {} node {}", kind, path);
                continue;
            }
        };
        out.push(FlatEntry {
            path,
            kind,
            root_len,
        });
    }

    for (directory, path) in directories {
        flatten_into(directory, &path, root_len, out);
    }
}
