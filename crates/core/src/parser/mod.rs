//! C# source parsing using tree-sitter

pub mod csharp_parser;
pub mod declaration_collector;
pub mod utils;

// Re-export commonly used items
pub use csharp_parser::CSharpParser;
pub use declaration_collector::{DeclarationCollector, ParsedSource};
pub use utils::node_text;
