pub mod accessibility;
pub mod candidate;
pub mod declaration;
pub mod descriptor;
pub mod diagnostic;
pub mod identity;

// Re-export commonly used types
pub use accessibility::Accessibility;
pub use candidate::{CandidateOrigin, CandidateType};
pub use declaration::{ModuleMetadata, TypeDeclaration, TypeKind};
pub use descriptor::TypeDescriptor;
pub use diagnostic::{Diagnostic, Severity};
pub use identity::TypeIdentity;
