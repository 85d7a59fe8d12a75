use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use crate::error::{GenError, GenResult};
use crate::visitor::FunctionVisitor;
use funcgen_model::model::DeclarationModel;
use funcgen_model::output::{Emitter, OutputTarget};
use tracing::{error, info};

/// Simple name of the annotation that opts a declaration into generation
pub const TRIGGER_ANNOTATION: &str = "Function";

/// Required annotation argument naming the generated function
pub const NAME_ARGUMENT: &str = "name";

pub const GENERATED_PACKAGE: &str = "com.example.ksp";
pub const GENERATED_FILE_NAME: &str = "GeneratedFunctions";

/// Generator driver: one `run` per build invocation.
///
/// Queries the declaration model for trigger-annotated declarations, opens
/// one output file, dispatches each declaration to the visitor and returns
/// the qualified names of declarations that need another generation round.
pub struct FunctionProcessor {
    diagnostics: Vec<Diagnostic>,
}

impl FunctionProcessor {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Run one full generation pass.
    ///
    /// Produces no file when nothing matches. Per-declaration failures are
    /// recorded as diagnostics and the run continues; only output
    /// destination failures abort the run.
    pub fn run(
        &mut self,
        model: &dyn DeclarationModel,
        target: &mut dyn OutputTarget,
    ) -> GenResult<Vec<String>> {
        info!("start generate");
        self.diagnostics.push(Diagnostic::info("start generate"));

        let symbols = model.annotated_with(TRIGGER_ANNOTATION);
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let file = target.create_file(GENERATED_PACKAGE, GENERATED_FILE_NAME)?;
        file.append(&format!("package {GENERATED_PACKAGE}\n"));

        for class in &symbols {
            let mut visitor = FunctionVisitor::new(&mut *file, &mut self.diagnostics);
            if let Err(err) = visitor.visit_class(class) {
                if let GenError::Io(_) = err {
                    return Err(err);
                }
                // Recoverable per declaration: record and move on.
                error!(declaration = %class.name, "{}", err);
                self.diagnostics
                    .push(Diagnostic::error(err.to_string(), class.span.clone()));
            }
        }

        target.finish()?;

        let deferred = symbols
            .iter()
            .filter(|class| !class.validate())
            .map(|class| class.name.clone())
            .collect();
        Ok(deferred)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }
}

impl Default for FunctionProcessor {
    fn default() -> Self {
        Self::new()
    }
}
