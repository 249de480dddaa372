//! Materialization service
//!
//! Walks an outline depth-first and writes it to disk:
//! - nodes with children become directories holding an index document,
//! - leaves become single documents next to their siblings,
//! - with empty folders enabled, a leaf becomes a directory as well when one
//!   of its siblings has children, so siblings stay uniform.
//!
//! Every run aborts on the first error; nothing is retried or skipped.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use generational_arena::Index;
use tracing::{debug, info, instrument, warn};

use crate::application::document::render_document;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{sanitize_name, DomainError, NodeId, Outline, OutlineNode, SanitizePolicy};
use crate::infrastructure::traits::FileSystem;
use crate::util::path::ensure_within;

/// Knobs for turning an outline into files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeOptions {
    pub policy: SanitizePolicy,
    pub max_name_length: usize,
    pub allow_empty_folders: bool,
    /// Document extension without the dot
    pub doc_extension: String,
    /// File stem of the document inside a directory
    pub index_name: String,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl MaterializeOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            policy: settings.sanitize_policy,
            max_name_length: settings.max_name_length,
            allow_empty_folders: settings.allow_empty_folders,
            doc_extension: settings.doc_extension.clone(),
            index_name: settings.index_name.clone(),
        }
    }
}

/// Node id to output path. A path, once assigned, is never replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap(BTreeMap<NodeId, PathBuf>);

impl PathMap {
    fn assign(&mut self, id: NodeId, path: PathBuf) -> ApplicationResult<()> {
        if self.0.contains_key(&id) {
            return Err(ApplicationError::Internal(format!(
                "path already assigned for node {}",
                id
            )));
        }
        self.0.insert(id, path);
        Ok(())
    }

    pub fn get(&self, id: &NodeId) -> Option<&Path> {
        self.0.get(id).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Path)> {
        self.0.iter().map(|(id, path)| (id, path.as_path()))
    }
}

/// Result of materializing an outline.
#[derive(Debug, Clone, Default)]
pub struct MaterializeOutput {
    /// Resolved path per node id; the root maps to the output base
    pub paths: PathMap,
    /// Directories created, in traversal order
    pub directories: Vec<PathBuf>,
    /// Documents written, in traversal order
    pub documents: Vec<PathBuf>,
}

/// Service that writes an outline tree to the filesystem.
pub struct MaterializeService {
    fs: Arc<dyn FileSystem>,
    options: MaterializeOptions,
}

impl MaterializeService {
    /// Create a new materialize service.
    pub fn new(fs: Arc<dyn FileSystem>, options: MaterializeOptions) -> Self {
        Self { fs, options }
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// Write `outline` below `base`, creating `base` if needed.
    #[instrument(level = "debug", skip(self, outline, base), fields(base = %base.display()))]
    pub fn materialize(&self, outline: &Outline, base: &Path) -> ApplicationResult<MaterializeOutput> {
        info!(
            "materializing {} nodes into {}",
            outline.len(),
            base.display()
        );
        self.fs
            .create_dir_all(base)
            .with_path_context("create output directory", base)?;

        let mut output = MaterializeOutput::default();
        output.paths.assign(NodeId::root(), base.to_path_buf())?;
        self.create_children(outline, outline.root(), base, &mut output)?;

        info!(
            "wrote {} documents, {} directories",
            output.documents.len(),
            output.directories.len()
        );
        Ok(output)
    }

    fn create_children(
        &self,
        outline: &Outline,
        parent_idx: Index,
        parent_path: &Path,
        output: &mut MaterializeOutput,
    ) -> ApplicationResult<()> {
        let sibling_has_children = outline
            .children(parent_idx)
            .any(|(_, sibling)| sibling.has_children());

        for (idx, node) in outline.children(parent_idx) {
            let resolved = self.resolve_path(node, parent_path)?;
            output
                .paths
                .assign(node.data.id.clone(), resolved.clone())?;

            if node.has_children() {
                self.write_directory(node, &resolved, output)?;
                self.create_children(outline, idx, &resolved, output)?;
            } else if self.options.allow_empty_folders && sibling_has_children {
                self.write_directory(node, &resolved, output)?;
            } else {
                let document = self.document_path(&resolved);
                self.write_document(node, &document, output)?;
            }
        }
        Ok(())
    }

    /// Sanitized, contained, collision-free path for `node` below `parent`.
    fn resolve_path(&self, node: &OutlineNode, parent: &Path) -> ApplicationResult<PathBuf> {
        let name = match sanitize_name(
            &node.data.content,
            self.options.max_name_length,
            self.options.policy,
        ) {
            Ok(name) => name,
            Err(DomainError::SanitizationDegenerate { name }) => {
                let fallback = format!("node-{}", node.data.id.short());
                warn!(
                    "line {}: {:?} has no usable characters, using {}",
                    node.data.line_number, name, fallback
                );
                fallback
            }
            Err(e) => return Err(e.into()),
        };

        let desired = ensure_within(&parent.join(&name), parent)?;
        if !self.is_taken(&desired) {
            return Ok(desired);
        }

        let suffixed_name = format!("{}_{}", name, node.data.id.short());
        let suffixed = ensure_within(&parent.join(&suffixed_name), parent)?;
        debug!(
            "collision at {}, using {}",
            desired.display(),
            suffixed.display()
        );
        if self.is_taken(&suffixed) {
            warn!(
                "{} exists as well, its content will be overwritten",
                suffixed.display()
            );
        }
        Ok(suffixed)
    }

    /// A name is taken if either its directory or its document exists.
    fn is_taken(&self, path: &Path) -> bool {
        self.fs.exists(path) || self.fs.exists(&self.document_path(path))
    }

    /// `path` with the document extension appended (not replaced).
    fn document_path(&self, path: &Path) -> PathBuf {
        let mut file_name = OsString::from(path.as_os_str());
        file_name.push(".");
        file_name.push(&self.options.doc_extension);
        PathBuf::from(file_name)
    }

    fn write_directory(
        &self,
        node: &OutlineNode,
        dir: &Path,
        output: &mut MaterializeOutput,
    ) -> ApplicationResult<()> {
        self.fs
            .create_dir_all(dir)
            .with_path_context("create directory", dir)?;
        output.directories.push(dir.to_path_buf());

        let index = dir.join(format!(
            "{}.{}",
            self.options.index_name, self.options.doc_extension
        ));
        self.write_document(node, &index, output)
    }

    fn write_document(
        &self,
        node: &OutlineNode,
        path: &Path,
        output: &mut MaterializeOutput,
    ) -> ApplicationResult<()> {
        let content = render_document(node.data.title(), &node.body_lines);
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &content)
            .with_path_context("write document", path)?;
        debug!("wrote {}", path.display());
        output.documents.push(path.to_path_buf());
        Ok(())
    }
}
