//! Expression translation engine.
//!
//! ## Module Structure
//!
//! - `extract`: Find `${...}` expression tokens in text
//! - `normalize`: camelCase key normalization for secret references
//! - `expressions`: Built-in static table and dynamic expression families
//! - `resolve`: Resolution engine (static, dynamic, unresolved)
//! - `scanner`: File discovery
//! - `translate`: Corpus scan, report and in-place replacement
//! - `error`: Engine error type

pub mod error;
pub mod expressions;
pub mod extract;
pub mod normalize;
pub mod resolve;
pub mod scanner;
pub mod translate;

pub use error::TranslateError;
pub use expressions::SecretScope;
pub use extract::{expression_key, extract_expressions};
pub use normalize::to_camel_case;
pub use resolve::{ExpressionResolver, Resolution};
pub use translate::{
    CorpusScan, ExpressionReport, ReplacementSummary, TranslateOptions, TranslationOutcome,
    translate,
};
