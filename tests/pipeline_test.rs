//! End-to-end tests of the generator over fixture projects and inline modules

use colorto::cli::utils::Project;
use colorto::{
    Accessibility, ColorToGenerator, Compilation, Config, ConfigurationError, Error,
    ModuleMetadata, OutputWriter, Stage, TypeDeclaration, TypeKind, fixture_project,
};
use std::fs;
use tempfile::TempDir;

fn maui_app() -> (Project, Compilation) {
    let project = Project::open(Some(&fixture_project("maui-app")), &[]).unwrap();
    let compilation = project.load_compilation().unwrap();
    (project, compilation)
}

fn names(units: &[String]) -> Vec<&str> {
    units.iter().map(String::as_str).collect()
}

#[test]
fn test_fixture_project_units() {
    let (project, compilation) = maui_app();
    let mut generator = ColorToGenerator::new(project.config.clone()).unwrap();

    let run = generator.run(&compilation).unwrap();

    assert_eq!(
        names(&run.units),
        vec![
            "InternalTagTextColorTo.g.shared.cs",
            "StatusLabelTextColorTo.g.shared.cs",
            "LabelTextColorTo.g.shared.cs",
            "ButtonTextColorTo.g.shared.cs",
            "InputViewTextColorTo.g.shared.cs",
            "EntryTextColorTo.g.shared.cs",
            "EditorTextColorTo.g.shared.cs",
        ]
    );

    let status = &run.descriptors[1];
    assert_eq!(status.access_modifier, "public");
    assert_eq!(status.generic_arguments, "<TStatus>");
    assert_eq!(status.generic_constraints, "where TStatus : struct, Enum");

    assert_eq!(run.descriptors[0].access_modifier, "internal");
    assert!(run.descriptors[2..]
        .iter()
        .all(|descriptor| descriptor.access_modifier == "internal"));

    // FancyLabel inherits Label's extension
    assert!(!run.units.iter().any(|unit| unit.starts_with("FancyLabel")));

    // GlowText implements an interface nobody references
    assert_eq!(run.diagnostics.len(), 1);
    assert_eq!(run.diagnostics[0].subject, "MauiApp.Controls.GlowText");
}

#[test]
fn test_generated_source_for_generic_type() {
    let (project, compilation) = maui_app();
    let mut generator = ColorToGenerator::new(project.config.clone()).unwrap();
    let run = generator.run(&compilation).unwrap();

    let unit = generator
        .emitter()
        .unit(&run.descriptors[1].identity())
        .unwrap();

    assert!(unit.source.contains("namespace MauiApp.Controls;"));
    assert!(unit
        .source
        .contains("public static partial class ColorAnimationExtensions_StatusLabel"));
    assert!(unit.source.contains(
        "TextColorTo<TStatus>(this global::MauiApp.Controls.StatusLabel<TStatus> element,"
    ));
    assert!(unit.source.contains("\t\twhere TStatus : struct, Enum\n"));
}

#[test]
fn test_descendant_of_library_type_is_not_generated() {
    let config = Config {
        text_style_interface: "Lib.ITextStyle".to_string(),
        animatable_interface: "Lib.IAnimatable".to_string(),
        library_module: "Lib".to_string(),
        ..Config::default()
    };
    let library = ModuleMetadata::new(
        "Lib",
        vec![
            TypeDeclaration::new("Lib", "ITextStyle", TypeKind::Interface)
                .with_accessibility(Accessibility::Public),
            TypeDeclaration::new("Lib", "IAnimatable", TypeKind::Interface)
                .with_accessibility(Accessibility::Public),
            TypeDeclaration::new("Lib", "LibBase", TypeKind::Class)
                .with_accessibility(Accessibility::Public)
                .with_bases(["Lib.ITextStyle", "Lib.IAnimatable"]),
        ],
    );
    let compilation = Compilation::new()
        .with_source(
            "Foo.cs",
            "using Lib;\nnamespace App;\npublic class Foo : LibBase {}\npublic class Bar : Foo {}\n",
        )
        .with_reference(library);

    let mut generator = ColorToGenerator::new(config).unwrap();
    let run = generator.run(&compilation).unwrap();

    let generated: Vec<String> = run.descriptors.iter().map(|d| d.identity().to_string()).collect();
    assert_eq!(generated, vec!["Lib.LibBase"]);
}

#[test]
fn test_library_reference_must_be_unique() {
    let (project, compilation) = maui_app();
    let controls = compilation
        .references()
        .iter()
        .find(|module| module.name == "Microsoft.Maui.Controls")
        .cloned()
        .unwrap();

    let mut duplicated = compilation.clone();
    duplicated.add_reference(controls.clone());

    let mut generator = ColorToGenerator::new(project.config.clone()).unwrap();
    let err = generator.run(&duplicated).unwrap_err();
    assert!(matches!(
        err,
        Error::Misconfigured(ConfigurationError::AmbiguousLibraryReference { count: 2, .. })
    ));
    assert!(generator.emitter().is_empty());

    // The capability interfaces still resolve when the library is known
    // under another name, so only the library lookup fails
    let mut renamed = Compilation::new();
    for source in compilation.sources() {
        renamed.add_source(source.path.clone(), source.text.clone());
    }
    for module in compilation.references() {
        let mut module = module.clone();
        if module.name == "Microsoft.Maui.Controls" {
            module.name = "Microsoft.Maui.Controls.Compat".to_string();
        }
        renamed.add_reference(module);
    }

    let err = generator.run(&renamed).unwrap_err();
    assert!(matches!(
        err,
        Error::Misconfigured(ConfigurationError::LibraryNotReferenced { .. })
    ));
    assert!(generator.emitter().is_empty());
}

#[test]
fn test_unchanged_input_renders_nothing() {
    let (project, compilation) = maui_app();
    let mut generator = ColorToGenerator::new(project.config.clone()).unwrap();

    let first = generator.run(&compilation).unwrap();
    let renders = generator.emitter().render_count();
    let second = generator.run(&compilation).unwrap();

    assert_eq!(first.descriptors, second.descriptors);
    assert_eq!(generator.emitter().render_count(), renders);
    assert!(second.rendered.is_empty());
    assert_eq!(second.reused.len(), second.units.len());
    assert_eq!(second.cache.total_misses(), 0);
}

#[test]
fn test_editing_one_type_rerenders_only_it() {
    let (project, mut compilation) = maui_app();
    let mut generator = ColorToGenerator::new(project.config.clone()).unwrap();
    generator.run(&compilation).unwrap();

    let path = std::path::PathBuf::from("Controls/InternalTag.cs");
    let text = compilation
        .sources()
        .iter()
        .find(|source| source.path == path)
        .unwrap()
        .text
        .replace("sealed class InternalTag", "public sealed class InternalTag");
    compilation.add_source(path, text);

    let run = generator.run(&compilation).unwrap();

    assert_eq!(names(&run.rendered), vec!["InternalTagTextColorTo.g.shared.cs"]);
    assert_eq!(run.descriptors[0].access_modifier, "public");
    assert_eq!(run.cache.misses_for(Stage::Parse), 1);
    assert_eq!(run.cache.misses_for(Stage::LibraryIndex), 0);
    assert_eq!(run.cache.misses_for(Stage::Project), 1);
}

#[test]
fn test_output_survives_a_new_process() {
    let (project, compilation) = maui_app();
    let output = TempDir::new().unwrap();
    let writer = OutputWriter::new(output.path());

    let mut first = ColorToGenerator::new(project.config.clone()).unwrap();
    let run = first.run(&compilation).unwrap();
    let summary = writer.write(&run, first.emitter()).unwrap();
    assert_eq!(summary.written.len(), 7);
    assert!(output.path().join(".colorto-manifest.json").exists());

    // A fresh generator adopts the units on disk instead of rendering them
    let mut second = ColorToGenerator::new(project.config.clone()).unwrap();
    assert_eq!(writer.restore(second.emitter_mut()).unwrap(), 7);
    let run = second.run(&compilation).unwrap();
    let summary = writer.write(&run, second.emitter()).unwrap();

    assert_eq!(second.emitter().render_count(), 0);
    assert!(summary.written.is_empty());
    assert!(summary.deleted.is_empty());
}

#[test]
fn test_removed_type_deletes_its_unit() {
    let (project, mut compilation) = maui_app();
    let output = TempDir::new().unwrap();
    let writer = OutputWriter::new(output.path());
    let mut generator = ColorToGenerator::new(project.config.clone()).unwrap();

    let run = generator.run(&compilation).unwrap();
    writer.write(&run, generator.emitter()).unwrap();
    let unit = output.path().join("InternalTagTextColorTo.g.shared.cs");
    assert!(unit.exists());

    compilation.remove_source(std::path::Path::new("Controls/InternalTag.cs"));
    let run = generator.run(&compilation).unwrap();
    let summary = writer.write(&run, generator.emitter()).unwrap();

    assert_eq!(names(&run.removed), vec!["InternalTagTextColorTo.g.shared.cs"]);
    assert_eq!(summary.deleted, vec![unit.clone()]);
    assert!(!unit.exists());

    let manifest = fs::read_to_string(output.path().join(".colorto-manifest.json")).unwrap();
    assert!(!manifest.contains("InternalTag"));
}
