use super::resolver::lookup_order;
use crate::types::{ModuleMetadata, TypeDeclaration, TypeIdentity, TypeKind};
use std::collections::{HashMap, HashSet};

/// One type in the graph with its resolved edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub declaration: TypeDeclaration,
    /// Declaring module
    pub module: String,
    pub from_program: bool,
    pub base: Option<TypeIdentity>,
    /// Directly declared interfaces, in declaration order
    pub interfaces: Vec<TypeIdentity>,
    /// Base entries that did not resolve to any known type
    pub unresolved: Vec<String>,
}

impl TypeNode {
    fn new(declaration: TypeDeclaration, module: &str, from_program: bool) -> Self {
        Self {
            declaration,
            module: module.to_string(),
            from_program,
            base: None,
            interfaces: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    pub fn identity(&self) -> TypeIdentity {
        self.declaration.identity()
    }

    pub fn kind(&self) -> TypeKind {
        self.declaration.kind
    }
}

/// Immutable snapshot of every type known to a compilation
#[derive(Debug, Clone, Default)]
pub struct DeclarationGraph {
    nodes: Vec<TypeNode>,
    index: HashMap<TypeIdentity, usize>,
    /// Namespaces of `global using` directives, in scope for every program type
    global_usings: Vec<String>,
}

impl DeclarationGraph {
    /// Build the graph from the program's declarations and its referenced modules.
    ///
    /// Referenced modules are inserted first, so the library view of the graph
    /// never depends on the program. Partial program declarations of one
    /// identity merge into a single node. When an identity is defined twice
    /// across modules the first definition wins.
    pub fn build(
        program_module: &str,
        program: &[TypeDeclaration],
        references: &[ModuleMetadata],
    ) -> Self {
        Self::build_with_global_usings(program_module, program, &[], references)
    }

    /// Like [`DeclarationGraph::build`], with namespaces imported by the
    /// program's `global using` directives added to the lookup scope of every
    /// program declaration
    pub fn build_with_global_usings(
        program_module: &str,
        program: &[TypeDeclaration],
        global_usings: &[String],
        references: &[ModuleMetadata],
    ) -> Self {
        let mut graph = Self {
            global_usings: global_usings.to_vec(),
            ..Self::default()
        };

        for module in references {
            for declaration in &module.types {
                let identity = declaration.identity();
                if let Some(&existing) = graph.index.get(&identity) {
                    tracing::warn!(
                        "{} from module '{}' is already defined by '{}', ignoring",
                        identity,
                        module.name,
                        graph.nodes[existing].module
                    );
                    continue;
                }
                graph.push(TypeNode::new(declaration.clone(), &module.name, false));
            }
        }

        for declaration in program {
            graph.insert_program(program_module, declaration);
        }

        graph.resolve_edges();

        tracing::debug!(
            "Built declaration graph with {} types ({} from the program)",
            graph.nodes.len(),
            graph.nodes.iter().filter(|n| n.from_program).count()
        );

        graph
    }

    fn insert_program(&mut self, program_module: &str, declaration: &TypeDeclaration) {
        let identity = declaration.identity();
        let Some(&existing) = self.index.get(&identity) else {
            self.push(TypeNode::new(declaration.clone(), program_module, true));
            return;
        };

        if !self.nodes[existing].from_program {
            tracing::warn!(
                "{} is already defined by referenced module '{}', ignoring the program's declaration",
                identity,
                self.nodes[existing].module
            );
            return;
        }

        let merged = &mut self.nodes[existing].declaration;
        if !(merged.is_partial && declaration.is_partial) {
            tracing::warn!("{} is declared more than once without 'partial'", identity);
        }
        for base in &declaration.bases {
            if !merged.bases.contains(base) {
                merged.bases.push(base.clone());
            }
        }
        if merged.accessibility.is_none() {
            merged.accessibility = declaration.accessibility;
        }
        if merged.generic_constraints.is_empty() {
            merged.generic_constraints = declaration.generic_constraints.clone();
        }
        for using in &declaration.usings {
            if !merged.usings.contains(using) {
                merged.usings.push(using.clone());
            }
        }
    }

    fn push(&mut self, node: TypeNode) {
        self.index.insert(node.identity(), self.nodes.len());
        self.nodes.push(node);
    }

    fn resolve_edges(&mut self) {
        for position in 0..self.nodes.len() {
            let (base, interfaces, unresolved) = self.resolve_node(&self.nodes[position]);
            let node = &mut self.nodes[position];
            node.base = base;
            node.interfaces = interfaces;
            node.unresolved = unresolved;
        }
    }

    fn resolve_node(
        &self,
        node: &TypeNode,
    ) -> (Option<TypeIdentity>, Vec<TypeIdentity>, Vec<String>) {
        let own = node.identity();
        let mut base = None;
        let mut interfaces = Vec::new();
        let mut unresolved = Vec::new();

        let mut usings = node.declaration.usings.clone();
        if node.from_program {
            for global in &self.global_usings {
                if !usings.contains(global) {
                    usings.push(global.clone());
                }
            }
        }

        for entry in &node.declaration.bases {
            let target = lookup_order(entry, &node.declaration.namespace, &usings)
                .into_iter()
                .filter(|candidate| candidate != &own)
                .find_map(|candidate| self.index.get(&candidate).map(|&i| &self.nodes[i]));

            let Some(target) = target else {
                unresolved.push(entry.clone());
                continue;
            };

            match (node.kind(), target.kind()) {
                (_, TypeKind::Interface) => {
                    let identity = target.identity();
                    if !interfaces.contains(&identity) {
                        interfaces.push(identity);
                    }
                }
                (TypeKind::Class, TypeKind::Class) if base.is_none() => {
                    base = Some(target.identity());
                }
                _ => {
                    tracing::debug!(
                        "Ignoring base entry '{}' of {}: not a valid base for a {:?}",
                        entry,
                        own,
                        node.kind()
                    );
                }
            }
        }

        (base, interfaces, unresolved)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, identity: &TypeIdentity) -> Option<&TypeNode> {
        self.index.get(identity).map(|&i| &self.nodes[i])
    }

    /// Find a type by its fully qualified metadata name
    pub fn lookup(&self, metadata_name: &str) -> Option<&TypeNode> {
        self.node(&TypeIdentity::from_metadata_name(metadata_name))
    }

    /// Types declared by the program, in declaration order
    pub fn program_types(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter().filter(|node| node.from_program)
    }

    /// Types declared by the named referenced module, in metadata order
    pub fn module_types<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a TypeNode> + 'a {
        self.nodes
            .iter()
            .filter(move |node| !node.from_program && node.module == module)
    }

    /// Base chain from the immediate base to the root
    pub fn ancestors(&self, identity: &TypeIdentity) -> Vec<TypeIdentity> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([identity.clone()]);
        let mut current = self.node(identity).and_then(|node| node.base.clone());

        while let Some(base) = current {
            if !seen.insert(base.clone()) {
                tracing::warn!("Circular base chain detected at {}", base);
                break;
            }
            current = self.node(&base).and_then(|node| node.base.clone());
            chain.push(base);
        }

        chain
    }

    /// Every interface reachable from a type through its base chain and
    /// super-interfaces, in discovery order
    pub fn all_interfaces(&self, identity: &TypeIdentity) -> Vec<TypeIdentity> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![identity.clone()];
        let mut visited = HashSet::new();

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(node) = self.node(&current) else {
                continue;
            };

            for interface in &node.interfaces {
                if seen.insert(interface.clone()) {
                    found.push(interface.clone());
                }
            }

            // Interfaces are expanded before the base so discovery order
            // follows declaration order
            if let Some(base) = &node.base {
                stack.push(base.clone());
            }
            for interface in node.interfaces.iter().rev() {
                stack.push(interface.clone());
            }
        }

        found
    }

    /// `true` when the type reaches every one of `interfaces`
    pub fn implements_all(&self, identity: &TypeIdentity, interfaces: &[TypeIdentity]) -> bool {
        let all = self.all_interfaces(identity);
        interfaces.iter().all(|interface| all.contains(interface))
    }

    /// Base entries that failed to resolve on the type itself or on anything
    /// it inherits from
    pub fn unresolved_references(&self, identity: &TypeIdentity) -> Vec<String> {
        let mut unresolved = Vec::new();
        let mut stack = vec![identity.clone()];
        let mut visited = HashSet::new();

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(node) = self.node(&current) else {
                continue;
            };
            for entry in &node.unresolved {
                unresolved.push(format!("{entry} (in {current})"));
            }
            stack.extend(node.base.iter().cloned());
            stack.extend(node.interfaces.iter().cloned());
        }

        unresolved
    }

    pub fn is_fully_resolved(&self, identity: &TypeIdentity) -> bool {
        self.unresolved_references(identity).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Accessibility;

    fn interface(namespace: &str, name: &str) -> TypeDeclaration {
        TypeDeclaration::new(namespace, name, TypeKind::Interface)
            .with_accessibility(Accessibility::Public)
    }

    fn class(namespace: &str, name: &str, bases: &[&str]) -> TypeDeclaration {
        TypeDeclaration::new(namespace, name, TypeKind::Class)
            .with_accessibility(Accessibility::Public)
            .with_bases(bases.iter().copied())
    }

    fn library() -> Vec<ModuleMetadata> {
        vec![
            ModuleMetadata::new(
                "Microsoft.Maui",
                vec![
                    interface("Microsoft.Maui", "ITextStyle"),
                    interface("Microsoft.Maui", "IView"),
                ],
            ),
            ModuleMetadata::new(
                "Microsoft.Maui.Controls",
                vec![
                    interface("Microsoft.Maui.Controls", "IAnimatable"),
                    class(
                        "Microsoft.Maui.Controls",
                        "View",
                        &["Microsoft.Maui.Controls.IAnimatable", "Microsoft.Maui.IView"],
                    ),
                    class(
                        "Microsoft.Maui.Controls",
                        "Label",
                        &["Microsoft.Maui.Controls.View", "Microsoft.Maui.ITextStyle"],
                    ),
                ],
            ),
        ]
    }

    #[test]
    fn test_transitive_interfaces_through_base() {
        let graph = DeclarationGraph::build("App", &[], &library());
        let label = TypeIdentity::new("Microsoft.Maui.Controls", "Label");

        let interfaces = graph.all_interfaces(&label);
        assert_eq!(
            interfaces,
            vec![
                TypeIdentity::new("Microsoft.Maui", "ITextStyle"),
                TypeIdentity::new("Microsoft.Maui.Controls", "IAnimatable"),
                TypeIdentity::new("Microsoft.Maui", "IView"),
            ]
        );
        assert!(graph.implements_all(
            &label,
            &[
                TypeIdentity::new("Microsoft.Maui", "ITextStyle"),
                TypeIdentity::new("Microsoft.Maui.Controls", "IAnimatable"),
            ]
        ));
    }

    #[test]
    fn test_program_type_resolves_through_using() {
        let mut fancy = class("MyApp", "FancyLabel", &["Label"]);
        fancy.usings = vec!["Microsoft.Maui.Controls".to_string()];

        let graph = DeclarationGraph::build("MyApp", &[fancy], &library());
        let identity = TypeIdentity::new("MyApp", "FancyLabel");

        assert_eq!(
            graph.ancestors(&identity),
            vec![
                TypeIdentity::new("Microsoft.Maui.Controls", "Label"),
                TypeIdentity::new("Microsoft.Maui.Controls", "View"),
            ]
        );
        assert!(graph.is_fully_resolved(&identity));
        assert_eq!(graph.program_types().count(), 1);
    }

    #[test]
    fn test_global_usings_apply_to_every_program_type() {
        let badge = class("MyApp", "Badge", &["View", "ITextStyle"]);
        let globals = vec![
            "Microsoft.Maui".to_string(),
            "Microsoft.Maui.Controls".to_string(),
        ];

        let graph =
            DeclarationGraph::build_with_global_usings("MyApp", &[badge], &globals, &library());
        let identity = TypeIdentity::new("MyApp", "Badge");

        assert!(graph.is_fully_resolved(&identity));
        assert_eq!(
            graph.node(&identity).unwrap().base,
            Some(TypeIdentity::new("Microsoft.Maui.Controls", "View"))
        );
        assert!(graph.implements_all(
            &identity,
            &[
                TypeIdentity::new("Microsoft.Maui", "ITextStyle"),
                TypeIdentity::new("Microsoft.Maui.Controls", "IAnimatable"),
            ]
        ));
    }

    #[test]
    fn test_super_interface_counts() {
        let program = vec![
            interface("MyApp", "IStyledText").with_bases(["Microsoft.Maui.ITextStyle"]),
            class(
                "MyApp",
                "Glyph",
                &["IStyledText", "Microsoft.Maui.Controls.IAnimatable"],
            ),
        ];
        let graph = DeclarationGraph::build("MyApp", &program, &library());

        let glyph = TypeIdentity::new("MyApp", "Glyph");
        assert!(graph.node(&glyph).unwrap().base.is_none());
        assert!(graph.implements_all(
            &glyph,
            &[
                TypeIdentity::new("Microsoft.Maui", "ITextStyle"),
                TypeIdentity::new("Microsoft.Maui.Controls", "IAnimatable"),
            ]
        ));
    }

    #[test]
    fn test_unresolved_reference_is_reported_transitively() {
        let program = vec![
            class("MyApp", "Middle", &["MissingBase"]),
            class("MyApp", "Leaf", &["Middle"]),
        ];
        let graph = DeclarationGraph::build("MyApp", &program, &library());

        let leaf = TypeIdentity::new("MyApp", "Leaf");
        assert_eq!(graph.ancestors(&leaf), vec![TypeIdentity::new("MyApp", "Middle")]);
        assert!(!graph.is_fully_resolved(&leaf));
        assert_eq!(
            graph.unresolved_references(&leaf),
            vec!["MissingBase (in MyApp.Middle)".to_string()]
        );
    }

    #[test]
    fn test_partial_declarations_merge() {
        let mut first = class("MyApp", "Split", &["Microsoft.Maui.Controls.Label"]);
        first.is_partial = true;
        let mut second = TypeDeclaration::new("MyApp", "Split", TypeKind::Class)
            .with_bases(["System.IDisposable"]);
        second.is_partial = true;

        let graph = DeclarationGraph::build("MyApp", &[first, second], &library());

        assert_eq!(graph.program_types().count(), 1);
        let node = graph.node(&TypeIdentity::new("MyApp", "Split")).unwrap();
        assert_eq!(node.declaration.bases.len(), 2);
        assert_eq!(node.unresolved, vec!["System.IDisposable".to_string()]);
    }

    #[test]
    fn test_circular_base_chain_terminates() {
        let program = vec![
            class("MyApp", "A", &["B"]),
            class("MyApp", "B", &["A"]),
        ];
        let graph = DeclarationGraph::build("MyApp", &program, &[]);

        let a = TypeIdentity::new("MyApp", "A");
        assert_eq!(graph.ancestors(&a), vec![TypeIdentity::new("MyApp", "B")]);
        assert!(graph.all_interfaces(&a).is_empty());
    }
}
