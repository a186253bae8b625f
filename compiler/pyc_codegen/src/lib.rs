//! pyc codegen - Annotated Python functions to C
//!
//! Translates one function at a time into a C declaration and body text.
//!
//! # Architecture
//!
//! ```text
//! source text
//!      ↓
//!  extract_body      (strip the `def` header, dedent the body)
//!      ↓
//!  StatementParser   (body text → Body of arena nodes)
//!      ↓
//!  analyze           (variables → attributes → lists → tie)
//!      ↓
//!  emit              (declaration block, then statement block)
//!      ↓
//!  TranslatedFunction
//! ```
//!
//! The parser and the renderer are traits ([`StatementParser`],
//! [`NodeRenderer`]); [`translate_function`] uses [`PythonParser`] and
//! [`CRenderer`].
//!
//! # Debugging
//!
//! Set `RUST_LOG=pyc_codegen=debug` (or `trace` for per-statement output)
//! and call [`init_tracing`] once at startup.

pub mod analysis;
pub mod c;
mod context;
mod emit;
mod error;
mod frontend;
mod header;
mod signature;
mod translate;
mod types;

use std::sync::Once;

pub use c::CRenderer;
pub use context::{
    Attributes, ListBinding, ListTable, TranslationContext, Variable, Variables,
};
pub use emit::emit;
pub use error::{ExtractError, TranslateError};
pub use frontend::{NodeRenderer, StatementParser};
pub use header::{extract_body, ExtractedBody};
pub use pyc_parse::PythonParser;
pub use signature::{FunctionSignature, Param};
pub use translate::{
    translate_batch, translate_body, translate_function, translate_with, FunctionSource,
    TranslateConfig, TranslatedFunction,
};
pub use types::{list_element, CType, Scalar};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once; only
/// the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
