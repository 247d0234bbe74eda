use super::utils::{child_of_kind, node_text, using_directive};
use crate::{
    error::Result,
    types::{Accessibility, TypeDeclaration, TypeKind},
    utils::text::collapse_whitespace,
};
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "internal",
    "protected",
    "private",
    "partial",
    "static",
    "sealed",
    "abstract",
    "unsafe",
    "new",
    "file",
];

/// What one source file contributes to the program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSource {
    /// Namespace-level declarations, each carrying the file's own usings
    pub declarations: Vec<TypeDeclaration>,
    /// Namespaces of `global using` directives, in scope for every file
    pub global_usings: Vec<String>,
}

/// Walks a C# syntax tree and collects namespace-level type declarations.
///
/// Types nested inside other types are not collected.
pub struct DeclarationCollector {
    usings: Vec<String>,
    global_usings: Vec<String>,
}

impl Default for DeclarationCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationCollector {
    pub fn new() -> Self {
        Self {
            usings: Vec::new(),
            global_usings: Vec::new(),
        }
    }

    pub fn collect(&mut self, tree: &Tree, source: &str) -> Result<ParsedSource> {
        let root = tree.root_node();
        self.usings.clear();
        self.global_usings.clear();
        self.collect_usings(&root, source)?;

        let mut declarations = Vec::new();
        self.visit_container(&root, source, "", &mut declarations)?;

        for declaration in &mut declarations {
            declaration.usings = self.usings.clone();
        }

        Ok(ParsedSource {
            declarations,
            global_usings: self.global_usings.clone(),
        })
    }

    fn collect_usings(&mut self, node: &Node, source: &str) -> Result<()> {
        if node.kind() == "using_directive" {
            if let Some(directive) = using_directive(node_text(node, source)?) {
                let scope = if directive.global {
                    &mut self.global_usings
                } else {
                    &mut self.usings
                };
                if !scope.contains(&directive.namespace) {
                    scope.push(directive.namespace);
                }
            }
            return Ok(());
        }

        // Usings never appear inside type bodies
        if is_type_declaration(node.kind()) {
            return Ok(());
        }

        for child in node.children(&mut node.walk()) {
            self.collect_usings(&child, source)?;
        }

        Ok(())
    }

    /// Visit the members of a compilation unit, namespace body or error node.
    ///
    /// A file-scoped namespace applies to every sibling that follows it.
    fn visit_container(
        &self,
        node: &Node,
        source: &str,
        namespace: &str,
        declarations: &mut Vec<TypeDeclaration>,
    ) -> Result<()> {
        let mut current = namespace.to_string();

        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "file_scoped_namespace_declaration" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        current = join_namespace(namespace, node_text(&name, source)?);
                    }
                    self.visit_container(&child, source, &current, declarations)?;
                }
                "namespace_declaration" => {
                    self.visit_namespace(&child, source, &current, declarations)?;
                }
                "declaration_list" | "ERROR" => {
                    self.visit_container(&child, source, &current, declarations)?;
                }
                kind if is_type_declaration(kind) => {
                    if let Some(declaration) = self.handle_type(&child, source, &current)? {
                        declarations.push(declaration);
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn visit_namespace(
        &self,
        node: &Node,
        source: &str,
        parent: &str,
        declarations: &mut Vec<TypeDeclaration>,
    ) -> Result<()> {
        let namespace = match node.child_by_field_name("name") {
            Some(name) => join_namespace(parent, node_text(&name, source)?),
            None => parent.to_string(),
        };

        let body = node
            .child_by_field_name("body")
            .or_else(|| child_of_kind(node, "declaration_list"));

        if let Some(body) = body {
            self.visit_container(&body, source, &namespace, declarations)?;
        }

        Ok(())
    }

    fn handle_type(
        &self,
        node: &Node,
        source: &str,
        namespace: &str,
    ) -> Result<Option<TypeDeclaration>> {
        let kind = match node.kind() {
            "class_declaration" => TypeKind::Class,
            "interface_declaration" => TypeKind::Interface,
            _ => TypeKind::Struct,
        };

        let Some(name_node) = node.child_by_field_name("name") else {
            tracing::debug!("Skipping {} without a name", node.kind());
            return Ok(None);
        };
        let name = node_text(&name_node, source)?.to_string();

        let mut modifiers = Vec::new();
        let mut generic_parameters = Vec::new();
        let mut generic_constraints = Vec::new();
        let mut bases = Vec::new();

        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "modifier" => modifiers.push(node_text(&child, source)?.trim().to_string()),
                keyword if MODIFIER_KEYWORDS.contains(&keyword) => {
                    modifiers.push(keyword.to_string())
                }
                "type_parameter_list" => {
                    generic_parameters = self.type_parameters(&child, source)?;
                }
                "base_list" => {
                    bases = self.base_entries(&child, source)?;
                }
                "type_parameter_constraints_clause" => {
                    generic_constraints.push(collapse_whitespace(node_text(&child, source)?));
                }
                _ => {}
            }
        }

        let mut declaration = TypeDeclaration::new(namespace, name, kind)
            .with_bases(bases)
            .with_generics(generic_parameters, generic_constraints);
        declaration.accessibility = Accessibility::from_modifiers(modifiers.iter().map(String::as_str));
        declaration.is_partial = modifiers.iter().any(|m| m == "partial");

        tracing::debug!(
            "Collected {:?} {} with {} base entries",
            declaration.kind,
            declaration.identity(),
            declaration.bases.len()
        );

        Ok(Some(declaration))
    }

    fn type_parameters(&self, list: &Node, source: &str) -> Result<Vec<String>> {
        let mut parameters = Vec::new();
        for parameter in list.named_children(&mut list.walk()) {
            if parameter.kind() != "type_parameter" {
                continue;
            }
            let name = match parameter.child_by_field_name("name") {
                Some(name) => node_text(&name, source)?,
                None => node_text(&parameter, source)?,
            };
            parameters.push(name.trim().to_string());
        }
        Ok(parameters)
    }

    fn base_entries(&self, list: &Node, source: &str) -> Result<Vec<String>> {
        let mut bases = Vec::new();
        for entry in list.named_children(&mut list.walk()) {
            let type_node = match entry.kind() {
                "argument_list" | "comment" => continue,
                "primary_constructor_base_type" => match entry.named_child(0) {
                    Some(inner) => inner,
                    None => continue,
                },
                _ => entry,
            };
            bases.push(collapse_whitespace(node_text(&type_node, source)?));
        }
        Ok(bases)
    }
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration" | "interface_declaration" | "struct_declaration"
    )
}

fn join_namespace(parent: &str, name: &str) -> String {
    let name: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    if parent.is_empty() {
        name
    } else {
        format!("{parent}.{name}")
    }
}
