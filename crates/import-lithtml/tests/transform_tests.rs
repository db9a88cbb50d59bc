//! Integration tests for the plugin transform

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use import_lithtml::{
    CatalogCache, ImportLitHtml, PluginOptions, SourceMap, StaticDirectiveSource,
};

const ROOT: &str = "/project";
const ID: &str = "/project/example.html";

/// Helper to build a plugin over a fixed directive listing
fn plugin(options: PluginOptions, files: &[&str]) -> ImportLitHtml {
    ImportLitHtml::with_source(options, ROOT, StaticDirectiveSource::new(files.to_vec()))
        .expect("plugin construction failed")
}

/// Expected module text for `code` behind the given import block
fn wrapped(import_block: &str, base: &str, code: &str) -> String {
    format!(
        "{}\n\n{} export default function() {{ return html`{}`; }}",
        import_block, base, code
    )
}

/// Helper to create `node_modules/lit-html/directives` with the given files
fn directive_dir(root: &Path, files: &[&str]) {
    let dir = root.join("node_modules/lit-html/directives");
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), "export {};").unwrap();
    }
}

#[test]
fn test_plain_template() {
    let code = "<div></div>";
    let output = plugin(PluginOptions::new().cache(false), &[])
        .transform(code, ID)
        .expect("module should be transformed");

    assert_eq!(
        output.code,
        "\n\nimport { html } from 'lit'; export default function() { return html`<div></div>`; }"
    );
    assert_eq!(output.map, SourceMap { mappings: String::new() });
}

#[test]
fn test_nothing_is_imported_from_lit() {
    let code = "<div>${user ? '<button>DELETE</button>' : nothing } </div>";
    let output = plugin(PluginOptions::new().cache(false), &[])
        .transform(code, ID)
        .unwrap();

    assert_eq!(
        output.code,
        wrapped("", "import { html, nothing } from 'lit';", code)
    );
}

#[test]
fn test_unmatched_id_is_skipped() {
    let output = plugin(PluginOptions::new().cache(false), &[]).transform("<div></div>", "/project/example.js");
    assert!(output.is_none());
}

#[test]
fn test_excluded_id_is_skipped() {
    let options = PluginOptions::new().exclude("exclude.html").cache(false);
    let plugin = plugin(options, &[]);
    assert!(plugin.transform("<div></div>", "/project/exclude.html").is_none());
    assert!(plugin.transform("<div></div>", ID).is_some());
}

#[test]
fn test_explicit_directives() {
    let code = "<div class=${ifDefined(this.someVar)}> ${unsafeHTML(this.message)} </div>";
    let options = PluginOptions::new()
        .directives(["ifDefined", "unsafeHTML"])
        .include("**/*.html")
        .exclude("exclude.html")
        .cache(false);
    let files = ["if-defined.js", "repeat.js", "when.js", "unsafe-html.js"];

    let output = plugin(options, &files).transform(code, ID).unwrap();

    assert_eq!(
        output.code,
        wrapped(
            "import { ifDefined } from 'lit-html/directives/if-defined.js';\n\
             import { unsafeHTML } from 'lit-html/directives/unsafe-html.js';",
            "import { html } from 'lit';",
            code
        )
    );
}

#[test]
fn test_explicit_directives_only_if_used() {
    let code = "<div> ${unsafeHTML(this.message)} </div>";
    let options = PluginOptions::new()
        .directives(["ifDefined", "unsafeHTML"])
        .cache(false);
    let files = ["if-defined.js", "repeat.js", "when.js", "unsafe-html.js"];

    let output = plugin(options, &files).transform(code, ID).unwrap();

    assert_eq!(
        output.code,
        wrapped(
            "import { unsafeHTML } from 'lit-html/directives/unsafe-html.js';",
            "import { html } from 'lit';",
            code
        )
    );
}

#[test]
fn test_all_directives_only_if_used() {
    let code = "<div class=${classMap(this.someVar)} attr=${ifDefined(this.someVar}>${unsafeHTML(this.message)} </div>";
    let files = ["if-defined.js", "unsafe-html.js", "class-map.js", "repeat.js"];

    let output = plugin(PluginOptions::new().cache(false), &files)
        .transform(code, ID)
        .unwrap();

    assert_eq!(
        output.code,
        wrapped(
            "import { ifDefined } from 'lit-html/directives/if-defined.js';\n\
             import { unsafeHTML } from 'lit-html/directives/unsafe-html.js';\n\
             import { classMap } from 'lit-html/directives/class-map.js';",
            "import { html } from 'lit';",
            code
        )
    );
}

#[test]
fn test_cached_transform_is_idempotent() {
    let code = "<ul>${repeat(items, (i) => i)}</ul>";
    let plugin = plugin(PluginOptions::new(), &["repeat.js", "when.js"]);

    let first = plugin.transform(code, ID).unwrap();
    let second = plugin.transform(code, ID).unwrap();

    assert_eq!(first, second);
    assert!(first.code.starts_with("import { repeat } from 'lit-html/directives/repeat.js';\n\n"));
}

#[test]
fn test_shared_cache_serves_first_catalog() {
    let cache = Arc::new(CatalogCache::new());
    let first = plugin(PluginOptions::new(), &["repeat.js"]).with_cache(Arc::clone(&cache));
    let second = plugin(PluginOptions::new(), &["when.js"]).with_cache(Arc::clone(&cache));

    first.transform("<p></p>", ID).unwrap();
    let output = second
        .transform("${repeat(a, b)} ${when(c, d, e)}", ID)
        .unwrap();

    assert!(output.code.contains("import { repeat }"));
    assert!(!output.code.contains("import { when }"));
}

#[test]
fn test_concurrent_transforms() {
    let plugin = Arc::new(plugin(
        PluginOptions::new(),
        &["if-defined.js", "repeat.js", "unsafe-html.js"],
    ));
    let code = "${repeat(rows, (r) => unsafeHTML(r))}";

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let plugin = Arc::clone(&plugin);
            thread::spawn(move || plugin.transform(code, ID).unwrap().code)
        })
        .collect();
    let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(outputs.iter().all(|o| o == &outputs[0]));
    assert_eq!(plugin.cache().get().map(|c| c.len()), Some(3));
}

#[test]
fn test_directives_read_from_node_modules() {
    let temp = tempfile::tempdir().unwrap();
    directive_dir(
        temp.path(),
        &[
            "when.js",
            "when.d.ts",
            "class-map.js",
            "class-map.js.map",
            "private-async-helpers.js",
        ],
    );

    let plugin = ImportLitHtml::with_root(PluginOptions::new().cache(false), temp.path()).unwrap();
    let id = temp.path().join("views/card.html");
    let output = plugin
        .transform("${when(ok, a, b)} ${classMap(c)}", &id.to_string_lossy())
        .unwrap();

    // Listing is sorted by file name
    assert!(output.code.starts_with(
        "import { classMap } from 'lit-html/directives/class-map.js';\n\
         import { when } from 'lit-html/directives/when.js';\n\n"
    ));
    assert!(!output.code.contains("private-async-helpers"));
}

#[test]
fn test_missing_node_modules_degrades_to_base_import() {
    let temp = tempfile::tempdir().unwrap();

    let plugin = ImportLitHtml::with_root(PluginOptions::new(), temp.path()).unwrap();
    let id = temp.path().join("card.html");
    let output = plugin
        .transform("${ifDefined(x)}", &id.to_string_lossy())
        .unwrap();

    assert_eq!(
        output.code,
        wrapped("", "import { html } from 'lit';", "${ifDefined(x)}")
    );
}

#[test]
fn test_options_from_json() {
    let options = PluginOptions::from_json(
        r#"{ "include": ["**/*.tpl.html"], "directives": ["repeat"], "cache": false }"#,
    )
    .unwrap();
    let plugin = plugin(options, &["repeat.js", "when.js"]);

    assert!(plugin.transform("<p></p>", "/project/a.html").is_none());
    let output = plugin
        .transform("${repeat(a, b)} ${when(c, d, e)}", "/project/a.tpl.html")
        .unwrap();
    assert!(output.code.starts_with("import { repeat } from 'lit-html/directives/repeat.js';\n\n"));
}
