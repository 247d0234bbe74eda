use crate::{
    error::{Error, Result},
    parser::declaration_collector::{DeclarationCollector, ParsedSource},
};
use std::path::Path;
use tree_sitter::Parser;

pub struct CSharpParser {
    parser: Parser,
}

impl CSharpParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }

    /// Namespace-level type declarations and global usings of one source file
    pub fn parse_source(&mut self, source: &str, file_path: &Path) -> Result<ParsedSource> {
        let tree = self.parse(source)?;
        if tree.root_node().has_error() {
            tracing::debug!(
                "{} has syntax errors, keeping recovered declarations",
                file_path.display()
            );
        }
        DeclarationCollector::new().collect(&tree, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Accessibility, TypeDeclaration, TypeKind};
    use std::path::PathBuf;

    fn parsed(source: &str) -> ParsedSource {
        let mut parser = CSharpParser::new().unwrap();
        parser
            .parse_source(source, &PathBuf::from("Test.cs"))
            .unwrap()
    }

    fn declarations(source: &str) -> Vec<TypeDeclaration> {
        parsed(source).declarations
    }

    #[test]
    fn test_parser_creation() {
        assert!(CSharpParser::new().is_ok());
    }

    #[test]
    fn test_parse_empty_source() {
        assert!(declarations("").is_empty());
    }

    #[test]
    fn test_block_scoped_namespace() {
        let source = r#"
using Microsoft.Maui.Controls;

namespace MyApp.Controls
{
    public class FancyLabel : Label
    {
    }

    class Helper
    {
    }
}
"#;
        let decls = declarations(source);
        assert_eq!(decls.len(), 2);

        let fancy = &decls[0];
        assert_eq!(fancy.namespace, "MyApp.Controls");
        assert_eq!(fancy.name, "FancyLabel");
        assert_eq!(fancy.kind, TypeKind::Class);
        assert_eq!(fancy.accessibility, Some(Accessibility::Public));
        assert_eq!(fancy.bases, vec!["Label".to_string()]);
        assert_eq!(fancy.usings, vec!["Microsoft.Maui.Controls".to_string()]);

        let helper = &decls[1];
        assert_eq!(helper.accessibility, None);
        assert!(helper.bases.is_empty());
    }

    #[test]
    fn test_file_scoped_namespace() {
        let source = r#"
namespace MyApp;

internal sealed class Badge : Microsoft.Maui.Controls.Label, IDisposable
{
    public void Dispose() { }
}
"#;
        let decls = declarations(source);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].namespace, "MyApp");
        assert_eq!(decls[0].accessibility, Some(Accessibility::Internal));
        assert_eq!(
            decls[0].bases,
            vec![
                "Microsoft.Maui.Controls.Label".to_string(),
                "IDisposable".to_string()
            ]
        );
    }

    #[test]
    fn test_nested_namespaces_compose() {
        let source = r#"
namespace Outer
{
    namespace Inner
    {
        public interface IGlow : ITextStyle { }
    }
}
"#;
        let decls = declarations(source);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].namespace, "Outer.Inner");
        assert_eq!(decls[0].kind, TypeKind::Interface);
        assert_eq!(decls[0].bases, vec!["ITextStyle".to_string()]);
    }

    #[test]
    fn test_generic_parameters_and_constraints() {
        let source = r#"
namespace MyApp;

public partial class TypedLabel<TValue, TKey> : Label
    where TValue : class,   new()
    where TKey : notnull
{
}
"#;
        let decls = declarations(source);
        assert_eq!(decls.len(), 1);

        let typed = &decls[0];
        assert!(typed.is_partial);
        assert_eq!(typed.generic_parameters, vec!["TValue", "TKey"]);
        assert_eq!(
            typed.generic_constraints,
            vec![
                "where TValue : class, new()".to_string(),
                "where TKey : notnull".to_string()
            ]
        );
    }

    #[test]
    fn test_nested_classes_are_not_collected() {
        let source = r#"
namespace MyApp;

public class Outer : Label
{
    public class Inner : Label { }
}
"#;
        let decls = declarations(source);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Outer");
    }

    #[test]
    fn test_invalid_syntax_keeps_recovered_declarations() {
        let source = r#"
namespace MyApp;

public class Good : Label { }

public class Broken : Label { void M( { }
"#;
        let decls = declarations(source);
        assert!(decls.iter().any(|d| d.name == "Good"));
    }

    #[test]
    fn test_global_usings_are_kept_apart() {
        let source = r#"
global using Microsoft.Maui;
global using global::Microsoft.Maui.Controls;
using global::Microsoft.Maui.Graphics;

namespace MyApp;

public class Badge : View, ITextStyle { }
"#;
        let parsed = parsed(source);
        assert_eq!(
            parsed.global_usings,
            vec!["Microsoft.Maui".to_string(), "Microsoft.Maui.Controls".to_string()]
        );
        assert_eq!(parsed.declarations.len(), 1);
        assert_eq!(
            parsed.declarations[0].usings,
            vec!["Microsoft.Maui.Graphics".to_string()]
        );
    }

    #[test]
    fn test_file_with_only_global_usings() {
        let parsed = parsed("global using Microsoft.Maui;\nglobal using Microsoft.Maui.Controls;\n");
        assert!(parsed.declarations.is_empty());
        assert_eq!(parsed.global_usings.len(), 2);
    }
}
