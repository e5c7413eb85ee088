//! Integration tests that build and run generated Go containers.
//!
//! The generated file is placed next to hand-written constructors that count
//! their calls, then the module is built with `go build` and run with
//! `go run`. Skipped when the Go toolchain is not installed.

use std::path::Path;

use dicon_codegen::testing::{self, CompileChecker, GoChecker, run_generated, tool_available};
use dicon_codegen_go::{ContainerCodegen, Generator};
use dicon_ir::InterfaceDescriptor;

const GO_MOD: &str = "module example.com/shop\n\ngo 1.21\n";

const APP_TYPES: &str = r#"package app

import "example.com/shop/infra"

var Built = map[string]int{}

type Container interface {
	Config() Config
	Logger() Logger
	Repository() infra.Repository
	Service() Service
}

type Config struct {
	Name string
}

type Logger struct {
	Config Config
}

type Service struct {
	Repository infra.Repository
	Logger     Logger
}

func NewConfig() Config {
	Built["Config"]++
	return Config{Name: "shop"}
}

func NewLogger(config Config) Logger {
	Built["Logger"]++
	return Logger{Config: config}
}

func NewService(repository infra.Repository, logger Logger) Service {
	Built["Service"]++
	return Service{Repository: repository, Logger: logger}
}
"#;

const INFRA: &str = r#"package infra

var Built int

type Repository struct {
	Deps []any
}

func NewRepository(logger, config any) Repository {
	Built++
	return Repository{Deps: []any{logger, config}}
}
"#;

const MAIN: &str = r#"package main

import (
	"fmt"

	"example.com/shop/app"
	"example.com/shop/infra"
)

func main() {
	c := app.NewDIContainer()
	first := c.Service()
	second := c.Service()
	c.Repository()
	c.Logger()
	fmt.Printf("config=%d logger=%d repository=%d service=%d same=%t\n",
		app.Built["Config"], app.Built["Logger"], infra.Built, app.Built["Service"],
		first.Logger.Config.Name == second.Logger.Config.Name && len(first.Repository.Deps) == 2)
}
"#;

/// Normalized container for `descriptor`, laid out by gofmt when it is installed.
fn generate(descriptor: &InterfaceDescriptor) -> String {
    let mut generator = Generator::new().with_imports([("infra", "example.com/shop/infra")]);
    if !tool_available("gofmt") {
        generator = generator.without_gofmt();
    }
    generator
        .generate(descriptor, &descriptor.methods)
        .expect("generation failed");

    let mut sink = Vec::new();
    generator
        .out(&mut sink, Path::new("app/dicon_gen.go"))
        .expect("normalization failed");
    String::from_utf8(sink).expect("output is utf-8")
}

#[test]
fn test_layered_container_builds_each_instance_once() {
    if !tool_available(GoChecker.program()) {
        eprintln!("go not found, skipping");
        return;
    }

    let container = generate(&testing::layered());
    let stdout = run_generated(
        &[
            ("go.mod", GO_MOD),
            ("app/types.go", APP_TYPES),
            ("app/dicon_gen.go", &container),
            ("infra/repository.go", INFRA),
            ("main.go", MAIN),
        ],
        &GoChecker,
    )
    .expect("generated Go container should build and run");

    assert_eq!(
        stdout.trim(),
        "config=1 logger=1 repository=1 service=1 same=true"
    );
}

#[test]
fn test_empty_container_builds() {
    if !tool_available(GoChecker.program()) {
        eprintln!("go not found, skipping");
        return;
    }

    let container = generate(&InterfaceDescriptor::new("app", "Container"));
    let stdout = run_generated(
        &[
            ("go.mod", GO_MOD),
            ("app/types.go", "package app\n\ntype Container interface{}\n"),
            ("app/dicon_gen.go", &container),
            (
                "main.go",
                "package main\n\nimport (\n\t\"fmt\"\n\n\t\"example.com/shop/app\"\n)\n\nfunc main() {\n\tfmt.Println(app.NewDIContainer() != nil)\n}\n",
            ),
        ],
        &GoChecker,
    )
    .expect("generated Go container should build and run");

    assert_eq!(stdout.trim(), "true");
}
