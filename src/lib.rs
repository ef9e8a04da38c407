pub mod ast;
pub mod compiler;
pub mod error;

pub use compiler::{GenericCompiler, PostgresCompiler, Render, SqlString};

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::compiler::{GenericCompiler, PostgresCompiler, Render, SqlString};
    pub use crate::error::*;
}
