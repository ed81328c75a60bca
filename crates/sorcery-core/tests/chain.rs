/*
 * tests/chain.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Loading, tracing and flattening chains from disk.
 */

mod common;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::*;
use pretty_assertions::assert_eq;
use sorcery_core::{
    BuildOptions, ChainBuilder, ChainError, ChildRef, FlattenOptions, Location, SourceMapDocument,
    load, load_sync,
};
use sorcery_mapping::{MappingTable, Segment};
use sorcery_runtime::MemoryProvider;
use tempfile::TempDir;

const EXAMPLE_MAPPINGS: &str = "AAAA;AAAA,MAAA,MAAA;;AAAA,EAAA,MAAA,GAAS,EAAA,GAAK,CAAd,CAAA;;AAAA,EACA,OAAO,CAAC,GAAR,CAAa,gBAAA,GAAe,MAA5B,CADA,CAAA;AAAA";

#[test]
fn test_original_source_has_no_trace() {
    let fixture = Helloworld::new();
    let chain = load_sync(fixture.path("src/helloworld.coffee"), BuildOptions::default()).unwrap();

    assert!(chain.is_original_source());
    assert_eq!(chain.trace(1, 0), None);
    assert_eq!(chain.trace(2, 8), None);
}

#[test]
fn test_follows_mapping_to_origin() {
    let fixture = Helloworld::new();
    let chain = load_sync(fixture.minified(), BuildOptions::default()).unwrap();

    assert_eq!(
        chain.trace(1, 31),
        Some(Location {
            source: fixture.path("src/helloworld.coffee"),
            line: 2,
            column: 8,
            name: Some("log".to_string()),
        })
    );
    assert_eq!(chain.nodes().count(), 3);
}

#[test]
fn test_single_hop_matches_decoded_segment() {
    let fixture = Helloworld::new();
    let chain = load_sync(fixture.path("src/helloworld.js"), BuildOptions::default()).unwrap();
    let table = MappingTable::from_document(&coffee_map()).unwrap();

    for (line, column) in [(1, 0), (4, 3), (4, 12), (6, 11), (8, 5)] {
        let segment = table.lookup(line, column).unwrap();
        let original = segment.original.unwrap();
        let location = chain.trace(line, column).unwrap();
        assert_eq!(location.source, fixture.path("src/helloworld.coffee"));
        assert_eq!(location.line, original.line + 1);
        assert_eq!(location.column, original.column);
        assert_eq!(location.name, None);
    }
}

#[test]
fn test_content_and_sourcemap_overrides() {
    let provider = MemoryProvider::new().with_cwd("/project");
    let map = SourceMapDocument {
        version: 3,
        file: None,
        source_root: None,
        sources: vec!["example.coffee".to_string()],
        sources_content: Some(vec![None]),
        names: vec![],
        mappings: EXAMPLE_MAPPINGS.to_string(),
    };
    let options = BuildOptions::new()
        .with_content(
            "example.js",
            "(function() {\n  var answer;\n\n  answer = 40 + 2;\n\n  console.log(\"the answer is \" + answer);\n\n}).call(this);",
        )
        .with_content(
            "example.coffee",
            "answer = 40 + 2\nconsole.log \"the answer is #{answer}\"",
        )
        .with_sourcemap("example.js", map);

    let chain = pollster::block_on(
        ChainBuilder::new(Arc::new(provider))
            .with_options(options)
            .build("example.js"),
    )
    .unwrap();

    assert_eq!(
        chain.trace(6, 10),
        Some(Location {
            source: PathBuf::from("/project/example.coffee"),
            line: 2,
            column: 8,
            name: None,
        })
    );
}

#[test]
fn test_inline_map_and_sources_content() {
    let dir = TempDir::new().unwrap();
    let app = "import { a } from './a';\nconsole.log(a);\n";
    let map = map_doc(
        "app.esperanto.js",
        &["app.js"],
        Some(vec![Some(app)]),
        &[],
        &[
            vec![Segment::mapped(0, 0, 0, 0)],
            vec![],
            vec![],
            vec![Segment::mapped(0, 0, 1, 0), Segment::mapped(8, 0, 1, 8)],
        ],
    );
    let generated = format!(
        "(function () {{\n\t'use strict';\n\n\tconsole.log(a);\n}});\n//# sourceMappingURL={}\n",
        map.to_data_url().unwrap()
    );
    let root = write_file(dir.path(), "app.esperanto.js", &generated);

    let chain = load_sync(&root, BuildOptions::default()).unwrap();
    let location = chain.trace(4, 8).unwrap();
    assert!(location.source.ends_with("app.js"));
    assert_eq!((location.line, location.column, location.name), (2, 8, None));

    // app.js never existed on disk
    assert!(!dir.path().join("app.js").exists());
    let flattened = chain.flatten().unwrap();
    assert_eq!(flattened.sources_content, Some(vec![Some(app.to_string())]));
}

#[test]
fn test_css_block_comment() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "styles.less",
        "@color: red;\n\n.a {\n  .b {\n  color: @color;\n  }\n}\n",
    );
    write_file(
        dir.path(),
        "styles.css.map",
        &map_doc(
            "styles.css",
            &["styles.less"],
            None,
            &[],
            &[vec![Segment::mapped(0, 0, 2, 0), Segment::mapped(7, 0, 4, 2)]],
        )
        .to_json()
        .unwrap(),
    );
    let css = write_file(
        dir.path(),
        "styles.css",
        ".a .b {color: red;}\n/*# sourceMappingURL=styles.css.map */",
    );

    let chain = load_sync(&css, BuildOptions::default()).unwrap();
    assert_eq!(
        chain.trace(1, 8),
        Some(Location {
            source: dir.path().join("styles.less"),
            line: 5,
            column: 2,
            name: None,
        })
    );
}

#[test]
fn test_reference_with_spaces() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "src/file with spaces.js", "var a = 1;\nconsole.log(a);\n");
    write_file(
        dir.path(),
        "tmp/file with spaces.esperanto.js.map",
        &map_doc(
            "file with spaces.esperanto.js",
            &["../src/file with spaces.js"],
            None,
            &[],
            &[vec![], vec![], vec![], vec![Segment::mapped(8, 0, 1, 8)]],
        )
        .to_json()
        .unwrap(),
    );
    let root = write_file(
        dir.path(),
        "tmp/file with spaces.esperanto.js",
        "(function(){\n'use strict';\nvar a = 1;\nconsole.log(a);\n})();\n//# sourceMappingURL=file%20with%20spaces.esperanto.js.map\n",
    );

    let chain = load_sync(&root, BuildOptions::default()).unwrap();
    let location = chain.trace(4, 8).unwrap();
    assert_eq!(location.source, dir.path().join("src/file with spaces.js"));
    assert_eq!((location.line, location.column), (2, 8));

    let flattened = chain.flatten_with(&FlattenOptions {
        base: Some(dir.path().join("src")),
        include_content: true,
    })
    .unwrap();
    assert_eq!(flattened.file.as_deref(), Some("file with spaces.esperanto.js"));
    assert_eq!(flattened.sources, vec!["file with spaces.js"]);
}

#[test]
fn test_flatten_helloworld() {
    let fixture = Helloworld::new();
    let chain = load_sync(fixture.minified(), BuildOptions::default()).unwrap();
    let map = chain.flatten().unwrap();

    assert_eq!(map.version, 3);
    assert_eq!(map.file.as_deref(), Some("helloworld.min.js"));
    assert_eq!(map.sources, vec!["helloworld.coffee"]);
    assert_eq!(
        map.sources_content,
        Some(vec![Some(HELLOWORLD_COFFEE.to_string())])
    );

    let table = MappingTable::from_document(&map).unwrap();
    let segment = table.lookup(1, 31).unwrap();
    let original = segment.original.unwrap();
    assert_eq!((original.line, original.column), (1, 8));
    assert_eq!(table.name(original.name_index.unwrap()), Some("log"));
}

#[test]
fn test_flatten_matches_trace_everywhere() {
    let fixture = Helloworld::new();
    let chain = load_sync(fixture.minified(), BuildOptions::default()).unwrap();
    let table = MappingTable::from_document(&chain.flatten().unwrap()).unwrap();
    let base = fixture.path("src");

    for column in 0..HELLOWORLD_MIN_JS.len() as u32 {
        let traced = chain.trace(1, column);
        let flattened = table.lookup(1, column).and_then(|segment| {
            let original = segment.original?;
            Some(Location {
                source: base.join(table.source(original.source_index)?),
                line: original.line + 1,
                column: original.column,
                name: original
                    .name_index
                    .and_then(|index| table.name(index))
                    .map(str::to_string),
            })
        });
        assert_eq!(traced, flattened, "column {}", column);
    }
}

#[test]
fn test_missing_source_is_unresolved() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "out.js.map",
        &map_doc(
            "out.js",
            &["missing.ts"],
            None,
            &[],
            &[vec![Segment::mapped(0, 0, 3, 1)]],
        )
        .to_json()
        .unwrap(),
    );
    let root = write_file(dir.path(), "out.js", "x\n//# sourceMappingURL=out.js.map");

    let chain = load_sync(&root, BuildOptions::default()).unwrap();
    assert_eq!(
        chain.root().children(),
        &[ChildRef::Unresolved(dir.path().join("missing.ts"))]
    );
    let location = chain.trace(1, 0).unwrap();
    assert_eq!((location.line, location.column), (4, 1));
    assert_eq!(chain.flatten().unwrap().sources_content, Some(vec![None]));
}

#[test]
fn test_build_errors() {
    let dir = TempDir::new().unwrap();
    let missing_map = write_file(dir.path(), "a.js", "//# sourceMappingURL=a.js.map");
    write_file(dir.path(), "b.js.map", "[1, 2");
    let bad_map = write_file(dir.path(), "b.js", "//# sourceMappingURL=b.js.map");

    assert!(matches!(
        load_sync(dir.path().join("nothing.js"), BuildOptions::default()),
        Err(ChainError::NotFound { .. })
    ));
    assert!(matches!(
        load_sync(&missing_map, BuildOptions::default()),
        Err(ChainError::NotFound { ref path }) if path == &dir.path().join("a.js.map")
    ));
    assert!(matches!(
        load_sync(&bad_map, BuildOptions::default()),
        Err(ChainError::InvalidSourceMap { .. })
    ));
}

#[test]
fn test_line_only_bundle_map() {
    // bundle.js maps whole lines of app.js (column 0 segments only), the way
    // browserify does; app.js carries a column-level map to app.ts
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "app.ts", "let a = 1;\nconsole.log(a);\n");
    write_file(
        dir.path(),
        "app.js.map",
        &map_doc(
            "app.js",
            &["app.ts"],
            None,
            &[],
            &[
                vec![Segment::mapped(0, 0, 0, 0), Segment::mapped(4, 0, 0, 4)],
                vec![Segment::mapped(0, 0, 1, 0), Segment::mapped(8, 0, 1, 8)],
            ],
        )
        .to_json()
        .unwrap(),
    );
    write_file(
        dir.path(),
        "app.js",
        "var a = 1;\nconsole.log(a);\n//# sourceMappingURL=app.js.map\n",
    );
    write_file(
        dir.path(),
        "bundle.js.map",
        &map_doc(
            "bundle.js",
            &["app.js"],
            None,
            &[],
            &[
                vec![],
                vec![Segment::mapped(0, 0, 0, 0)],
                vec![Segment::mapped(0, 0, 1, 0)],
            ],
        )
        .to_json()
        .unwrap(),
    );
    let bundle = write_file(
        dir.path(),
        "bundle.js",
        "(function(){\nvar a = 1;\nconsole.log(a);\n})();\n//# sourceMappingURL=bundle.js.map\n",
    );

    let chain = load_sync(&bundle, BuildOptions::default()).unwrap();

    // the column inside the bundle line is lost; the segment's column 0 is
    // what gets followed into app.js
    let location = chain.trace(3, 12).unwrap();
    assert_eq!(location.source, dir.path().join("app.ts"));
    assert_eq!((location.line, location.column), (2, 0));

    let location = chain.trace(2, 5).unwrap();
    assert_eq!(location.source, dir.path().join("app.ts"));
    assert_eq!((location.line, location.column), (1, 0));

    let flattened = chain.flatten().unwrap();
    assert_eq!(flattened.sources, vec!["app.ts"]);
    let table = MappingTable::from_document(&flattened).unwrap();
    let original = table.lookup(3, 12).unwrap().original.unwrap();
    assert_eq!((original.line, original.column), (1, 0));
}

#[test]
fn test_cycle_between_files() {
    let dir = TempDir::new().unwrap();
    for (name, other) in [("a.js", "b.js"), ("b.js", "a.js")] {
        write_file(
            dir.path(),
            &format!("{}.map", name),
            &map_doc(name, &[other], None, &[], &[vec![Segment::mapped(0, 0, 0, 2)]])
                .to_json()
                .unwrap(),
        );
        write_file(
            dir.path(),
            name,
            &format!("x\n//# sourceMappingURL={}.map", name),
        );
    }

    let chain = load_sync(dir.path().join("a.js"), BuildOptions::default()).unwrap();
    let location = chain.trace(1, 0).unwrap();
    assert_eq!(location.source, dir.path().join("a.js"));
    assert_eq!(chain.flatten().unwrap().sources, vec!["a.js"]);
}

#[test]
fn test_relative_paths_in_memory() {
    let provider = MemoryProvider::new().with_cwd("/repo");
    provider
        .add_file("/repo/dist/out.js", "o()\n//# sourceMappingURL=out.js.map")
        .add_file(
            "/repo/dist/out.js.map",
            map_doc("out.js", &["../src/in.js"], None, &[], &[vec![Segment::mapped(0, 0, 0, 0)]])
                .to_json()
                .unwrap(),
        )
        .add_file("/repo/src/in.js", "i()");

    let chain = pollster::block_on(ChainBuilder::new(Arc::new(provider)).build("dist/out.js")).unwrap();
    assert_eq!(chain.root().path(), Path::new("/repo/dist/out.js"));
    assert_eq!(
        chain.trace(1, 1).map(|location| location.source),
        Some(PathBuf::from("/repo/src/in.js"))
    );
}

#[tokio::test]
async fn test_async_load() {
    let fixture = Helloworld::new();
    let chain = load(fixture.minified(), BuildOptions::default()).await.unwrap();
    let location = chain.trace(1, 31).unwrap();
    assert_eq!(location.source, fixture.path("src/helloworld.coffee"));
    assert_eq!(location.name.as_deref(), Some("log"));
}
