//! Analysis passes over a parsed body.
//!
//! Each pass takes the [`TranslationContext`] by value, walks the body with
//! a [`Visitor`](pyc_ir::visitor::Visitor) and returns the context with its
//! registry filled. The passes run in a fixed order because later ones
//! resolve names against the variables registered by inference:
//!
//! ```text
//! infer_variables → collect_attributes → collect_lists → tie_lists
//! ```

mod attributes;
mod lists;
mod variables;

pub use attributes::collect_attributes;
pub use lists::{collect_lists, tie_lists};
pub use variables::infer_variables;

use pyc_ir::Body;

use crate::{TranslateError, TranslationContext};

/// Run every pass in order.
#[tracing::instrument(level = "debug", skip_all)]
pub fn analyze(ctx: TranslationContext, body: &Body) -> Result<TranslationContext, TranslateError> {
    let ctx = infer_variables(ctx, body)?;
    let ctx = collect_attributes(ctx, body)?;
    let ctx = collect_lists(ctx, body);
    tie_lists(ctx, body)
}
