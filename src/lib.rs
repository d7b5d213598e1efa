//! Example grammars built on `pegcore`, and the pieces of the `smolpeg`
//! command line tool.

pub mod grammars;
pub mod run;
