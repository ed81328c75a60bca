/*
 * tests/common/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * On-disk fixtures for chain tests.
 */

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sorcery_core::SourceMapDocument;
use sorcery_mapping::{Segment, encode};
use tempfile::TempDir;

pub const HELLOWORLD_COFFEE: &str = "message = \"hi\"\nconsole.log message\n";

pub const HELLOWORLD_JS: &str = "(function() {
  var message;

  message = \"hi\";

  console.log(message);

}).call(this);
";

/// `log` starts at column 31.
pub const HELLOWORLD_MIN_JS: &str = "(function(){var m=\"hi\";console.log(m)}).call(this);";

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

pub fn map_doc(
    file: &str,
    sources: &[&str],
    sources_content: Option<Vec<Option<&str>>>,
    names: &[&str],
    lines: &[Vec<Segment>],
) -> SourceMapDocument {
    SourceMapDocument {
        version: 3,
        file: Some(file.to_string()),
        source_root: None,
        sources: sources.iter().map(|s| s.to_string()).collect(),
        sources_content: sources_content
            .map(|content| content.into_iter().map(|c| c.map(str::to_string)).collect()),
        names: names.iter().map(|s| s.to_string()).collect(),
        mappings: encode(lines).unwrap(),
    }
}

/// Map from `helloworld.js` to `helloworld.coffee`, no names.
pub fn coffee_map() -> SourceMapDocument {
    map_doc(
        "helloworld.js",
        &["helloworld.coffee"],
        None,
        &[],
        &[
            vec![Segment::mapped(0, 0, 0, 0)],
            vec![Segment::mapped(2, 0, 0, 0)],
            vec![],
            vec![Segment::mapped(2, 0, 0, 0), Segment::mapped(12, 0, 0, 10)],
            vec![],
            vec![
                Segment::mapped(2, 0, 1, 0),
                Segment::mapped(10, 0, 1, 8),
                Segment::mapped(14, 0, 1, 12),
            ],
            vec![],
            vec![Segment::mapped(0, 0, 0, 0)],
        ],
    )
}

/// Map from `helloworld.min.js` to `helloworld.js`, with names.
pub fn min_map() -> SourceMapDocument {
    map_doc(
        "helloworld.min.js",
        &["helloworld.js"],
        None,
        &["message", "console", "log"],
        &[vec![
            Segment::mapped(0, 0, 0, 0),
            Segment::mapped(12, 0, 1, 2),
            Segment::mapped(16, 0, 3, 2).with_name(0),
            Segment::mapped(18, 0, 3, 12),
            Segment::mapped(23, 0, 5, 2).with_name(1),
            Segment::mapped(31, 0, 5, 10).with_name(2),
            Segment::mapped(35, 0, 5, 14).with_name(0),
            Segment::mapped(38, 0, 7, 0),
        ]],
    )
}

/// coffee -> js -> min.js, each file referencing its map by comment.
pub struct Helloworld {
    pub dir: TempDir,
}

impl Helloworld {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write_file(root, "src/helloworld.coffee", HELLOWORLD_COFFEE);
        write_file(
            root,
            "src/helloworld.js",
            &format!("{}//# sourceMappingURL=helloworld.js.map\n", HELLOWORLD_JS),
        );
        write_file(
            root,
            "src/helloworld.js.map",
            &coffee_map().to_json().unwrap(),
        );
        write_file(
            root,
            "src/helloworld.min.js",
            &format!(
                "{}\n//# sourceMappingURL=helloworld.min.js.map",
                HELLOWORLD_MIN_JS
            ),
        );
        write_file(root, "src/helloworld.min.js.map", &min_map().to_json().unwrap());
        Helloworld { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn minified(&self) -> PathBuf {
        self.path("src/helloworld.min.js")
    }
}
