//! Outline loading service
//!
//! Reads an outline file through the filesystem seam and parses it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Outline, OutlineParser};
use crate::infrastructure::traits::FileSystem;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Service for reading and parsing outline files.
pub struct OutlineService {
    fs: Arc<dyn FileSystem>,
}

impl OutlineService {
    /// Create a new outline service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read `input` and parse it into an outline tree.
    ///
    /// Parse errors are returned before anything is written anywhere.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, input: &Path, max_name_length: usize) -> ApplicationResult<Outline> {
        if !self.fs.exists(input) {
            return Err(ApplicationError::InputNotFound(input.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(input)
            .with_path_context("read outline", input)?;
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&content);

        let outline = OutlineParser::new(max_name_length).parse(content)?;
        debug!(
            "load: {} nodes, depth {} from {}",
            outline.len(),
            outline.depth(),
            input.display()
        );
        Ok(outline)
    }
}
