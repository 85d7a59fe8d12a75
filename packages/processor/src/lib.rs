pub mod diagnostic;
pub mod error;
pub mod processor;
pub mod visitor;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use error::{GenError, GenResult};
pub use processor::{
    FunctionProcessor, GENERATED_FILE_NAME, GENERATED_PACKAGE, NAME_ARGUMENT, TRIGGER_ANNOTATION,
};
pub use visitor::FunctionVisitor;
