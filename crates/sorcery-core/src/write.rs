/*
 * write.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Writes the root file back out with a reference to its flattened map.
 */

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use sorcery_mapping::SourceMapDocument;
use sorcery_runtime::{ContentProvider, NativeProvider};

use crate::chain::Chain;
use crate::error::{ChainError, ChainResult};
use crate::flatten::FlattenOptions;
use crate::paths;
use crate::reference::{self, CommentStyle};

/// Options for [`Chain::write`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Directory the map's `sources` are relative to. Defaults to the
    /// destination's directory.
    pub base: Option<PathBuf>,
    /// Reference the map by its absolute path instead of its file name.
    pub absolute_path: bool,
    /// Embed the map in the reference comment as a `data:` URI and skip the
    /// `.map` file.
    pub inline: bool,
    /// Embed original sources in `sourcesContent`.
    pub include_content: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            base: None,
            absolute_path: false,
            inline: false,
            include_content: true,
        }
    }
}

/// Everything a write produces, before it touches disk.
#[derive(Debug, Clone)]
pub struct WriteOutput {
    /// Where the content goes.
    pub path: PathBuf,
    /// Root content with the new reference comment.
    pub content: String,
    /// The flattened map.
    pub map: SourceMapDocument,
    /// Where the map goes; `None` when it is inlined.
    pub map_path: Option<PathBuf>,
}

impl WriteOutput {
    /// Write the content, then the map.
    pub async fn persist(&self, provider: &dyn ContentProvider) -> ChainResult<()> {
        provider.write(&self.path, self.content.as_bytes()).await?;
        if let Some(map_path) = &self.map_path {
            let json = self.map.to_json().map_err(|e| {
                ChainError::from_mapping(map_path.display().to_string(), e)
            })?;
            provider.write(map_path, json.as_bytes()).await?;
        }
        tracing::info!(path = %self.path.display(), "wrote file and source map");
        Ok(())
    }
}

/// `path` with `.map` appended to its full file name.
fn map_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".map");
    PathBuf::from(name)
}

impl Chain {
    /// Compute what [`Chain::write`] would write.
    ///
    /// `dest` defaults to the root's own path; a relative `dest` resolves
    /// against the working directory.
    pub fn render_output(
        &self,
        dest: Option<&Path>,
        options: &WriteOptions,
    ) -> ChainResult<WriteOutput> {
        let root = self.root();
        let path = match dest {
            Some(dest) => paths::absolutize(self.cwd(), dest),
            None => root.path().to_path_buf(),
        };
        let base = match &options.base {
            Some(base) => paths::absolutize(self.cwd(), base),
            None => paths::parent_dir(&path).to_path_buf(),
        };

        let mut map = self.flatten_with(&FlattenOptions {
            base: Some(base),
            include_content: options.include_content,
        })?;
        map.file = Some(paths::file_name(&path));

        let map_path = map_path_for(&path);
        let url = if options.inline {
            map.to_data_url().map_err(|e| {
                ChainError::from_mapping(format!("inline map of {}", path.display()), e)
            })?
        } else if options.absolute_path {
            paths::to_slash(&map_path)
        } else {
            paths::file_name(&map_path)
        };

        let content = format!(
            "{}{}",
            reference::strip(root.content()),
            CommentStyle::for_path(&path).render(&url)
        );

        Ok(WriteOutput {
            path,
            content,
            map,
            map_path: (!options.inline).then_some(map_path),
        })
    }

    /// Write the root file and its flattened map, blocking until done.
    ///
    /// Uses the provider the chain was built with, unless that provider needs
    /// an async runtime (a chain from [`crate::load`]); then the files are
    /// written with a [`NativeProvider`].
    pub fn write(&self, dest: Option<&Path>, options: &WriteOptions) -> ChainResult<()> {
        let output = self.render_output(dest, options)?;
        if self.provider().requires_runtime() {
            pollster::block_on(output.persist(&NativeProvider::new()))
        } else {
            pollster::block_on(output.persist(self.provider().as_ref()))
        }
    }

    /// Write the root file and its flattened map.
    pub async fn write_async(&self, dest: Option<&Path>, options: &WriteOptions) -> ChainResult<()> {
        let output = self.render_output(dest, options)?;
        output.persist(self.provider().as_ref()).await
    }
}
