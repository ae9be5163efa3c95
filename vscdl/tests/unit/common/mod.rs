//! Shared test fixtures

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use vercel_models::{Deployment, DeploymentSummary, FileNode, ReadyState};
use vscdl::errors::FetchError;
use vscdl::source::SourceApi;

/// In-memory provider that records every call it receives
#[derive(Default)]
pub struct FakeApi {
    /// domain -> deployment
    pub domains: HashMap<String, Deployment>,
    /// project name -> deployments, newest first
    pub projects: HashMap<String, Vec<DeploymentSummary>>,
    /// deployment id -> top-level nodes
    pub trees: HashMap<String, Vec<FileNode>>,
    /// uid -> content
    pub files: HashMap<String, Vec<u8>>,
    /// uids whose download fails before writing anything
    pub failing: HashSet<String>,
    /// uids whose download fails after writing part of the content
    pub failing_midway: HashSet<String>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: &str, id: &str) -> Self {
        self.domains.insert(
            domain.to_string(),
            Deployment {
                id: id.to_string(),
                name: None,
                url: Some(domain.to_string()),
                ready_state: Some(ReadyState::Ready),
                created_at: None,
            },
        );
        self
    }

    pub fn with_project(mut self, name: &str, deployments: &[(&str, ReadyState)]) -> Self {
        let summaries = deployments
            .iter()
            .map(|(uid, state)| DeploymentSummary {
                uid: uid.to_string(),
                name: Some(name.to_string()),
                url: None,
                ready_state: Some(*state),
                legacy_state: None,
                created: Some(1_700_000_000_000),
            })
            .collect();
        self.projects.insert(name.to_string(), summaries);
        self
    }

    pub fn with_tree(mut self, deployment_id: &str, nodes: Vec<FileNode>) -> Self {
        self.trees.insert(deployment_id.to_string(), nodes);
        self
    }

    pub fn with_file(mut self, uid: &str, content: &[u8]) -> Self {
        self.files.insert(uid.to_string(), content.to_vec());
        self
    }

    pub fn failing(mut self, uid: &str) -> Self {
        self.failing.insert(uid.to_string());
        self
    }

    pub fn failing_midway(mut self, uid: &str) -> Self {
        self.failing_midway.insert(uid.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn download_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with("download "))
            .count()
    }

    /// Most downloads that were running at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn not_found(what: &str) -> FetchError {
    FetchError::ApiError {
        status: 404,
        code: Some("not_found".to_string()),
        message: format!("{} not found", what),
    }
}

fn connection_reset() -> FetchError {
    FetchError::IoError(io::Error::new(
        io::ErrorKind::ConnectionReset,
        "connection reset by peer",
    ))
}

#[async_trait]
impl SourceApi for FakeApi {
    async fn deployment(&self, id_or_url: &str) -> Result<Deployment, FetchError> {
        self.record(format!("deployment {}", id_or_url));
        self.domains
            .get(id_or_url)
            .cloned()
            .ok_or_else(|| not_found(id_or_url))
    }

    async fn project_deployments(
        &self,
        project: &str,
        limit: u32,
    ) -> Result<Vec<DeploymentSummary>, FetchError> {
        self.record(format!("project {} limit={}", project, limit));
        self.projects
            .get(project)
            .map(|d| d.iter().take(limit as usize).cloned().collect())
            .ok_or_else(|| not_found(project))
    }

    async fn file_tree(&self, deployment_id: &str) -> Result<Vec<FileNode>, FetchError> {
        self.record(format!("files {}", deployment_id));
        self.trees
            .get(deployment_id)
            .cloned()
            .ok_or_else(|| not_found(deployment_id))
    }

    async fn download_file(
        &self,
        deployment_id: &str,
        uid: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, FetchError> {
        self.record(format!("download {} {}", deployment_id, uid));
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        let result = self.serve(uid, writer).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl FakeApi {
    async fn serve(
        &self,
        uid: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, FetchError> {
        // Let sibling downloads interleave
        tokio::task::yield_now().await;

        if self.failing.contains(uid) {
            return Err(connection_reset());
        }
        let content = self.files.get(uid).ok_or_else(|| not_found(uid))?;
        if self.failing_midway.contains(uid) {
            writer.write_all(&content[..content.len() / 2]).await?;
            return Err(connection_reset());
        }
        writer.write_all(content).await?;
        Ok(content.len() as u64)
    }
}

/// The source tree used across tests:
///
/// ```text
/// src/
///   a.txt        (u1)
///   sub/
///     b.txt      (u2)
/// ```
pub fn sample_tree() -> FileNode {
    FileNode::directory(
        "src",
        vec![
            FileNode::file("a.txt", "u1"),
            FileNode::directory("sub", vec![FileNode::file("b.txt", "u2")]),
        ],
    )
}

/// Every file below `root`, as (relative path, content), sorted
pub fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let relative = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            if path.is_dir() {
                out.push((format!("{}/", relative), Vec::new()));
                walk(root, &path, out);
            } else {
                out.push((relative, std::fs::read(&path).unwrap()));
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
