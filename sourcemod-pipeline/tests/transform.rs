//! End-to-end tests for the modify goal's pipeline.

use std::{fs, path::Path};

use sourcemod_core::SourceUnit;
use sourcemod_pipeline::{
    DiscoveredFile, Error, Filter, Loaded, ReplacementRule, TransformPipeline, Transformer,
    discover,
};
use tempfile::TempDir;

/// Marks accepted units by appending a comment to the header.
struct Marker {
    accept: &'static str,
}

impl Transformer for Marker {
    fn can_transform(&self, unit: &SourceUnit) -> bool {
        unit.name().contains(self.accept)
    }

    fn transform(&mut self, unit: &mut SourceUnit) -> eyre::Result<()> {
        unit.set_header(format!("// marked\n{}", unit.header()));
        Ok(())
    }
}

/// Moves units to another namespace, which the pipeline must undo.
struct Relocate;

impl Transformer for Relocate {
    fn can_transform(&self, _unit: &SourceUnit) -> bool {
        true
    }

    fn transform(&mut self, unit: &mut SourceUnit) -> eyre::Result<()> {
        unit.set_namespace("moved.elsewhere");
        Ok(())
    }
}

struct Failing;

impl Transformer for Failing {
    fn can_transform(&self, _unit: &SourceUnit) -> bool {
        true
    }

    fn transform(&mut self, _unit: &mut SourceUnit) -> eyre::Result<()> {
        eyre::bail!("refusing to transform")
    }
}

fn loaded(name: &str, module: impl Transformer + 'static) -> Loaded<dyn Transformer> {
    Loaded {
        name: name.to_string(),
        module: Box::new(module),
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sources(root: &Path) -> Vec<DiscoveredFile> {
    let filter = Filter::new(["**/*.java"], Vec::<String>::new(), true).unwrap();
    let mut files = discover(&[root.to_path_buf()], &filter);
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    files
}

const FOO: &str = "package a.b;\n\npublic class Foo {\n    Foo self() { return new Foo(); }\n    FooBar other;\n}\n";

#[test]
fn test_rename_rewrites_self_references() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "a/b/Foo.java", FOO);

    let outcome = TransformPipeline::new()
        .transformers(vec![loaded("noop", Marker { accept: "Nothing" })])
        .rules(vec![ReplacementRule::literal("Foo", "Bar")])
        .run(&sources(input.path()), output.path())
        .unwrap();

    assert_eq!(outcome.renamed, 1);
    assert_eq!(outcome.transformed, 0);
    assert!(!output.path().join("a/b/Foo.java").exists());

    let text = fs::read_to_string(output.path().join("a/b/Bar.java")).unwrap();
    insta::assert_snapshot!(text, @r"
    package a.b;

    public class Bar {
        Bar self() { return new Bar(); }
        FooBar other;
    }
    ");
}

#[test]
fn test_regex_rule_renames_capture_group() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(
        input.path(),
        "x/ThingImpl.java",
        "package x;\n\npublic class ThingImpl {\n}\n",
    );

    TransformPipeline::new()
        .transformers(vec![loaded("noop", Marker { accept: "Nothing" })])
        .rules(vec![ReplacementRule::regex(r"\w+(Impl)\.java", "X").unwrap()])
        .run(&sources(input.path()), output.path())
        .unwrap();

    let text = fs::read_to_string(output.path().join("x/ThingX.java")).unwrap();
    assert!(text.contains("public class ThingX {"));
}

#[test]
fn test_copy_unmodified_toggle() {
    let input = TempDir::new().unwrap();
    write(input.path(), "a/Plain.java", "package a;\n\nclass Plain {}\n");
    write(input.path(), "a/Target.java", "package a;\n\nclass Target {}\n");
    let files = sources(input.path());

    let copying = TempDir::new().unwrap();
    let outcome = TransformPipeline::new()
        .transformers(vec![loaded("marker", Marker { accept: "Target" })])
        .run(&files, copying.path())
        .unwrap();
    assert_eq!(outcome.transformed, 1);
    assert_eq!(outcome.copied.len(), 1);
    assert_eq!(
        fs::read_to_string(copying.path().join("a/Plain.java")).unwrap(),
        "package a;\n\nclass Plain {}\n"
    );
    assert!(
        fs::read_to_string(copying.path().join("a/Target.java"))
            .unwrap()
            .contains("// marked\nclass Target")
    );

    let skipping = TempDir::new().unwrap();
    let outcome = TransformPipeline::new()
        .transformers(vec![loaded("marker", Marker { accept: "Target" })])
        .copy_unmodified(false)
        .run(&files, skipping.path())
        .unwrap();
    assert!(outcome.copied.is_empty());
    assert!(!skipping.path().join("a/Plain.java").exists());
    assert!(skipping.path().join("a/Target.java").exists());
}

#[test]
fn test_no_transformers_copies_verbatim_without_renaming() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "a/b/Foo.java", "not even parsable");

    let outcome = TransformPipeline::new()
        .rules(vec![ReplacementRule::literal("Foo", "Bar")])
        .run(&sources(input.path()), output.path())
        .unwrap();

    assert_eq!(outcome.renamed, 0);
    assert_eq!(
        fs::read_to_string(output.path().join("a/b/Foo.java")).unwrap(),
        "not even parsable"
    );
}

#[test]
fn test_namespace_is_restored_after_transformers() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "a/b/Foo.java", FOO);

    TransformPipeline::new()
        .transformers(vec![loaded("relocate", Relocate)])
        .run(&sources(input.path()), output.path())
        .unwrap();

    let text = fs::read_to_string(output.path().join("a/b/Foo.java")).unwrap();
    assert!(text.starts_with("package a.b;"));
    assert!(!output.path().join("moved").exists());
}

#[test]
fn test_transformer_failure_aborts_run() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "a/b/Foo.java", FOO);

    let err = TransformPipeline::new()
        .transformers(vec![loaded("failing", Failing)])
        .run(&sources(input.path()), output.path())
        .unwrap_err();

    assert!(matches!(err, Error::ModuleFailed { ref name, .. } if name == "failing"));
}

#[test]
fn test_unparsable_source_is_fatal() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "Broken.java", "// nothing declared here\n");

    let err = TransformPipeline::new()
        .transformers(vec![loaded("relocate", Relocate)])
        .run(&sources(input.path()), output.path())
        .unwrap_err();

    assert!(matches!(err, Error::Parse { ref path, .. } if path == "Broken.java"));
}

#[test]
fn test_write_failure_is_recorded_and_run_continues() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "a/One.java", "package a;\n\nclass One {}\n");
    write(input.path(), "b/Two.java", "package b;\n\nclass Two {}\n");
    // A file where the output directory for `a/` should go.
    fs::write(output.path().join("a"), "").unwrap();

    let outcome = TransformPipeline::new()
        .transformers(vec![loaded("relocate", Relocate)])
        .run(&sources(input.path()), output.path())
        .unwrap();

    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.written.len(), 1);
    assert!(output.path().join("b/Two.java").exists());
}

#[test]
fn test_no_transformers_without_copying_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "a/b/Foo.java", FOO);

    let outcome = TransformPipeline::new()
        .copy_unmodified(false)
        .run(&sources(input.path()), output.path())
        .unwrap();

    assert!(outcome.written.is_empty());
    assert!(outcome.copied.is_empty());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_package_info_passes_through() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "a/b/Foo.java", FOO);
    write(
        input.path(),
        "a/b/package-info.java",
        "/** Docs. */\npackage a.b;\n",
    );

    let outcome = TransformPipeline::new()
        .transformers(vec![loaded("marker", Marker { accept: "Nothing" })])
        .run(&sources(input.path()), output.path())
        .unwrap();

    assert_eq!(outcome.transformed, 0);
    assert_eq!(outcome.copied.len(), 2);
    assert_eq!(
        fs::read_to_string(output.path().join("a/b/package-info.java")).unwrap(),
        "/** Docs. */\npackage a.b;\n"
    );
}
