//! Deployment file tree models

use std::fmt;

use serde::{Deserialize, Serialize};

/// One node of a deployment's file tree, as returned by
/// `GET /v7/deployments/{id}/files`
///
/// Only `File` carries a content uid and only `Directory` carries children.
/// Node kinds that have no downloadable source (`lambda`, `middleware`,
/// `symlink`, `invalid`, ...) decode to `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFileNode")]
pub enum FileNode {
    File { name: String, uid: String },
    Directory { name: String, children: Vec<FileNode> },
    Other { name: String, kind: String },
}

impl FileNode {
    pub fn file(name: impl Into<String>, uid: impl Into<String>) -> Self {
        FileNode::File {
            name: name.into(),
            uid: uid.into(),
        }
    }

    pub fn directory(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        FileNode::Directory {
            name: name.into(),
            children,
        }
    }

    /// The node's own path segment
    pub fn name(&self) -> &str {
        match self {
            FileNode::File { name, .. }
            | FileNode::Directory { name, .. }
            | FileNode::Other { name, .. } => name,
        }
    }

    /// Children of a directory; empty for every other kind
    pub fn children(&self) -> &[FileNode] {
        match self {
            FileNode::Directory { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FileNode::Directory { .. })
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children()
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Error raised when a wire node cannot be typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNodeError(String);

impl fmt::Display for FileNodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FileNodeError {}

#[derive(Deserialize)]
struct RawFileNode {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    children: Option<Vec<FileNode>>,
}

impl TryFrom<RawFileNode> for FileNode {
    type Error = FileNodeError;

    fn try_from(raw: RawFileNode) -> Result<Self, Self::Error> {
        // The tree root is sent without a type
        let kind = match raw.kind.as_deref() {
            Some(kind) => kind.to_string(),
            None if raw.uid.is_some() => "file".to_string(),
            None => "directory".to_string(),
        };

        match kind.as_str() {
            "file" => {
                let uid = raw
                    .uid
                    .ok_or_else(|| FileNodeError(format!("file node `{}` has no uid", raw.name)))?;
                Ok(FileNode::File {
                    name: raw.name,
                    uid,
                })
            }
            "directory" => Ok(FileNode::Directory {
                name: raw.name,
                children: raw.children.unwrap_or_default(),
            }),
            _ => Ok(FileNode::Other {
                name: raw.name,
                kind,
            }),
        }
    }
}

/// Base64 envelope some API modes use for file content: `{"data": "<base64>"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedFileContent {
    pub data: String,
}
