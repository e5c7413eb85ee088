//! Snapshot tests for Rust container generation.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::path::Path;

use dicon_codegen::{OutputError, testing};
use dicon_codegen_rust::{ContainerCodegen, Formatter, Generator, RustFormatter};
use dicon_ir::InterfaceDescriptor;

fn normalized(generator: &mut Generator, descriptor: &InterfaceDescriptor) -> String {
    generator
        .generate(descriptor, &descriptor.methods)
        .expect("generation failed");

    let mut sink = Vec::new();
    generator
        .out(&mut sink, Path::new("dicon_gen.rs"))
        .expect("normalization failed");
    String::from_utf8(sink).expect("output is utf-8")
}

#[test]
fn test_layered_container_raw() {
    let descriptor = testing::rust_layered();
    let mut generator = Generator::new();
    let raw = generator
        .generate(&descriptor, &descriptor.methods)
        .expect("generation failed");
    insta::assert_snapshot!("layered_container_raw", raw);
}

#[test]
fn test_normalized_keeps_marker_and_parses() {
    let out = normalized(&mut Generator::new(), &testing::rust_layered());

    assert!(out.starts_with("// Code generated by \"dicon\"; DO NOT EDIT.\n\n"));
    assert!(out.contains("use std::sync::Arc;"));
    assert!(out.contains("use std::sync::OnceLock;"));
    assert!(out.contains("fn repository(&self) -> Arc<crate::infra::Repository> {"));
    assert!(syn::parse_file(&out).is_ok());
}

#[test]
fn test_normalization_is_a_fixed_point() {
    let out = normalized(&mut Generator::new(), &testing::rust_layered());
    let again = RustFormatter
        .normalize(&out, Path::new("dicon_gen.rs"))
        .expect("normalized output parses");
    assert_eq!(out, again);
}

#[test]
fn test_unused_imports_pruned_without_methods() {
    let out = normalized(
        &mut Generator::new(),
        &InterfaceDescriptor::new("crate::app", "Container"),
    );

    assert!(!out.contains("use std::sync"));
    assert!(out.contains("impl Container for DiContainer {}"));
}

#[test]
fn test_invalid_module_path_fails_to_normalize() {
    let descriptor = InterfaceDescriptor::new("crate::app", "Container").method(
        dicon_ir::FactorySignature::new("logger", "crate::app")
            .returns(dicon_ir::TypeRef::new("Logger", "crate::::broken")),
    );
    let mut generator = Generator::new();
    generator
        .generate(&descriptor, &descriptor.methods)
        .expect("the emitter does not validate module paths");

    let mut sink = Vec::new();
    let err = generator
        .out(&mut sink, Path::new("dicon_gen.rs"))
        .unwrap_err();
    assert!(matches!(err, OutputError::Format(_)));
    assert!(sink.is_empty());
}
