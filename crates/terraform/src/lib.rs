//! Terraform generation for bucket deployments.
//!
//! A [`QuestionSummary`](bucket_questionnaire::QuestionSummary) flows through
//! the module contributors, the assembler and the output generator to produce
//! a deterministic `main.tf`.

pub mod assembler;
pub mod config;
pub mod contributors;
pub mod description;
pub mod document;
pub mod error;
pub mod module;
pub mod outputs;
pub mod package;

pub use assembler::assemble;
pub use config::TerraformConfig;
pub use contributors::{ModuleContributor, collect_modules, default_contributors};
pub use description::describe;
pub use document::ConfigurationDocument;
pub use error::AssembleError;
pub use module::{InputValue, InputVariable, Literal, ModuleSpec, SymbolicExpr};
pub use outputs::{OutputSpec, outputs_for};
pub use package::{TerraformPackage, build_package};
