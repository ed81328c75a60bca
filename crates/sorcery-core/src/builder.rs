/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Builds a Chain by following map references from a root file.
 *
 * Resolution is a single async algorithm over a ContentProvider. Each file's
 * map is located (override, then reference comment), decoded, and every
 * source it lists is resolved concurrently with its siblings. The resulting
 * tree is then interned into the chain's arena.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use sorcery_mapping::{MappingTable, SourceMapDocument};
use sorcery_runtime::{ContentProvider, NativeProvider, ProviderError, TokioProvider};

use crate::chain::{Chain, Resolution, ResolvedFile};
use crate::error::{ChainError, ChainResult};
use crate::paths;
use crate::reference::{self, MapReference};

/// Content and maps supplied up front instead of being read.
///
/// Relative keys are resolved against the provider's working directory.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// File path to text. Takes priority over disk and embedded content.
    pub content: HashMap<PathBuf, String>,
    /// File path to the map describing that file. Takes priority over any
    /// reference comment in the file.
    pub sourcemaps: HashMap<PathBuf, SourceMapDocument>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.content.insert(path.into(), text.into());
        self
    }

    pub fn with_sourcemap(mut self, path: impl Into<PathBuf>, map: SourceMapDocument) -> Self {
        self.sourcemaps.insert(path.into(), map);
        self
    }
}

/// Builds chains through a content provider.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use sorcery_core::{BuildOptions, ChainBuilder};
/// use sorcery_runtime::NativeProvider;
///
/// let builder = ChainBuilder::new(Arc::new(NativeProvider::new()))
///     .with_options(BuildOptions::new());
/// let chain = pollster::block_on(builder.build("dist/app.min.js")).unwrap();
/// println!("{:?}", chain.trace(1, 0));
/// ```
pub struct ChainBuilder {
    provider: Arc<dyn ContentProvider>,
    options: BuildOptions,
}

impl ChainBuilder {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        ChainBuilder {
            provider,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the chain rooted at the file at `root`.
    pub async fn build(&self, root: impl AsRef<Path>) -> ChainResult<Chain> {
        let cwd = self.provider.cwd()?;
        let resolver = Resolver::new(self, &cwd);
        let path = paths::absolutize(&cwd, root.as_ref());
        tracing::debug!(root = %path.display(), "building chain");

        let content = match resolver.content.get(&path) {
            Some(text) => (*text).to_string(),
            None => self.provider.read_string(&path).await?,
        };
        let tree = resolver.resolve_file(path, content, &[]).await?;
        Ok(Chain::from_tree(tree, Arc::clone(&self.provider), cwd))
    }

    /// Build a chain whose root is `content` rather than a file.
    ///
    /// The root is identified as `<anonymous>` in the working directory, so a
    /// relative reference comment resolves against the working directory.
    pub async fn build_content(&self, content: impl Into<String>) -> ChainResult<Chain> {
        let cwd = self.provider.cwd()?;
        let resolver = Resolver::new(self, &cwd);
        let path = cwd.join(paths::ANONYMOUS);
        tracing::debug!("building chain from in-memory content");

        let tree = resolver.resolve_file(path, content.into(), &[]).await?;
        Ok(Chain::from_tree(tree, Arc::clone(&self.provider), cwd))
    }
}

/// Load a chain with non-blocking file access.
///
/// Must run inside a tokio runtime.
pub async fn load(path: impl AsRef<Path>, options: BuildOptions) -> ChainResult<Chain> {
    ChainBuilder::new(Arc::new(TokioProvider::new()))
        .with_options(options)
        .build(path)
        .await
}

/// Load a chain with blocking file access.
pub fn load_sync(path: impl AsRef<Path>, options: BuildOptions) -> ChainResult<Chain> {
    let builder = ChainBuilder::new(Arc::new(NativeProvider::new())).with_options(options);
    pollster::block_on(builder.build(path))
}

/// A map ready to be followed: its table and the directory its sources are
/// relative to.
struct LoadedMap {
    table: MappingTable,
    source_dir: PathBuf,
}

/// State for one build: the provider plus overrides keyed by absolute path.
struct Resolver<'a> {
    provider: &'a dyn ContentProvider,
    content: HashMap<PathBuf, &'a str>,
    sourcemaps: HashMap<PathBuf, &'a SourceMapDocument>,
}

impl<'a> Resolver<'a> {
    fn new(builder: &'a ChainBuilder, cwd: &Path) -> Self {
        let content = builder
            .options
            .content
            .iter()
            .map(|(path, text)| (paths::absolutize(cwd, path), text.as_str()))
            .collect();
        let sourcemaps = builder
            .options
            .sourcemaps
            .iter()
            .map(|(path, map)| (paths::absolutize(cwd, path), map))
            .collect();
        Resolver {
            provider: builder.provider.as_ref(),
            content,
            sourcemaps,
        }
    }

    /// Text of a file: override, then embedded content, then the provider.
    ///
    /// `None` when the file does not exist or is not text.
    async fn load_content(
        &self,
        path: &Path,
        embedded: Option<&str>,
    ) -> ChainResult<Option<String>> {
        if let Some(text) = self.content.get(path) {
            return Ok(Some((*text).to_string()));
        }
        if let Some(text) = embedded {
            return Ok(Some(text.to_string()));
        }
        match self.provider.read_string(path).await {
            Ok(text) => Ok(Some(text)),
            Err(ProviderError::NotFound { .. } | ProviderError::InvalidUtf8 { .. }) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    /// Resolve the map of `path`, if it has one.
    async fn load_map(&self, path: &Path, content: &str) -> ChainResult<Option<LoadedMap>> {
        let file_dir = paths::parent_dir(path);

        let (document, map_dir) = if let Some(map) = self.sourcemaps.get(path) {
            ((*map).clone(), file_dir.to_path_buf())
        } else {
            match reference::locate(content) {
                None => return Ok(None),
                Some(MapReference::Inline(url)) => {
                    let document = SourceMapDocument::from_data_url(&url).map_err(|e| {
                        ChainError::from_mapping(format!("inline map of {}", path.display()), e)
                    })?;
                    (document, file_dir.to_path_buf())
                }
                Some(MapReference::File(target)) => {
                    let map_path = paths::absolutize(file_dir, &target);
                    tracing::trace!(map = %map_path.display(), "reading source map");
                    let text = match self.content.get(&map_path) {
                        Some(text) => (*text).to_string(),
                        None => self.provider.read_string(&map_path).await?,
                    };
                    let document = SourceMapDocument::from_json(&text).map_err(|e| {
                        ChainError::from_mapping(map_path.display().to_string(), e)
                    })?;
                    (document, paths::parent_dir(&map_path).to_path_buf())
                }
            }
        };

        let table = MappingTable::from_document(&document)
            .map_err(|e| ChainError::from_mapping(path.display().to_string(), e))?;
        let source_dir = match document.source_root.as_deref() {
            Some(root) if !root.is_empty() => paths::absolutize(&map_dir, Path::new(root)),
            _ => map_dir,
        };
        Ok(Some(LoadedMap { table, source_dir }))
    }

    /// Resolve a file whose content is known, then its sources.
    ///
    /// `ancestors` holds the files above this one on the current branch.
    fn resolve_file<'r>(
        &'r self,
        path: PathBuf,
        content: String,
        ancestors: &'r [PathBuf],
    ) -> BoxFuture<'r, ChainResult<ResolvedFile>> {
        async move {
            let Some(map) = self.load_map(&path, &content).await? else {
                tracing::trace!(path = %path.display(), "no source map, original source");
                return Ok(ResolvedFile {
                    path,
                    content,
                    table: None,
                    children: Vec::new(),
                });
            };
            tracing::debug!(
                path = %path.display(),
                sources = map.table.sources().len(),
                "resolving sources"
            );

            let mut lineage = ancestors.to_vec();
            lineage.push(path.clone());

            let pending = (0..map.table.sources().len())
                .map(|index| self.resolve_source(&map, index as u32, &lineage));
            let children = join_all(pending)
                .await
                .into_iter()
                .collect::<ChainResult<Vec<_>>>()?;

            Ok(ResolvedFile {
                path,
                content,
                table: Some(map.table),
                children,
            })
        }
        .boxed()
    }

    async fn resolve_source(
        &self,
        map: &LoadedMap,
        index: u32,
        lineage: &[PathBuf],
    ) -> ChainResult<Resolution> {
        let source = map.table.source(index).unwrap_or_default();
        if source.trim().is_empty() {
            return Ok(Resolution::NotApplicable);
        }

        let path = paths::absolutize(&map.source_dir, Path::new(source));
        if lineage.contains(&path) {
            tracing::debug!(path = %path.display(), "cycle in source map chain, not following");
            return Ok(Resolution::Ancestor(path));
        }

        match self
            .load_content(&path, map.table.source_content(index))
            .await?
        {
            Some(content) => {
                let file = self.resolve_file(path, content, lineage).await?;
                Ok(Resolution::File(Box::new(file)))
            }
            None => {
                tracing::warn!(path = %path.display(), "source file not found");
                Ok(Resolution::Unresolved(path))
            }
        }
    }
}
