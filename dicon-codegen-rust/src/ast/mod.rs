//! Rust syntax builders rendered through [`CodeBuilder`](dicon_codegen::CodeBuilder).

mod fns;
mod impls;
mod structs;
mod uses;

pub use fns::{Fn, Param, Stmt};
pub use impls::Impl;
pub use structs::{Field, Struct};
pub use uses::Use;

/// Item visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Private,
    Crate,
    Public,
}

impl Visibility {
    /// Keyword prefix, including the trailing space.
    pub fn prefix(self) -> &'static str {
        match self {
            Visibility::Private => "",
            Visibility::Crate => "pub(crate) ",
            Visibility::Public => "pub ",
        }
    }
}
