//! Minimal host: builds a small in-memory declaration model, runs one
//! generation pass and prints the generated source.

use anyhow::Result;
use funcgen_model::ast::{
    Annotation, Argument, ClassDeclaration, ClassKind, Nullability, Property, ResolvedType, Span,
    TypeReference, Value,
};
use funcgen_model::model::InMemoryModel;
use funcgen_model::output::MemoryTarget;
use funcgen_processor::FunctionProcessor;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let span = Span::new(0, 0, "host".to_string());

    let mut model = InMemoryModel::new();
    model.add_class(
        ClassDeclaration::new("com.example.ksp.MyFunction", ClassKind::Interface, span.clone())
            .with_annotation(
                Annotation::new("Function", span.clone())
                    .with_argument(Argument::named("name", Value::string("MyGenFunction"))),
            ),
    );
    model.add_class(
        ClassDeclaration::new("com.example.ksp.WithProps", ClassKind::Interface, span.clone())
            .with_annotation(
                Annotation::new("Function", span.clone())
                    .with_argument(Argument::named("name", Value::string("Parameterized"))),
            )
            .with_property(Property::new(
                "label",
                TypeReference::Resolved(ResolvedType::new(
                    "kotlin.String",
                    Nullability::NotNullable,
                )),
                span,
            )),
    );

    let mut target = MemoryTarget::new();
    let mut processor = FunctionProcessor::new();
    let deferred = processor.run(&model, &mut target)?;

    for file in target.files() {
        println!("// {}/{}.kt", file.package.replace('.', "/"), file.name);
        println!("{}", file.contents);
    }
    if !deferred.is_empty() {
        println!("deferred to a later round: {deferred:?}");
    }

    Ok(())
}
