//! Lookup plugins exposed to the host runtime.

mod pipe_once;

pub use pipe_once::PipeOnceLookup;

use async_trait::async_trait;

use crate::types::requests::LookupTerms;
use crate::PipeOnceResult;

/// A lookup the host can call from a template expression.
///
/// The host hands over the terms of one lookup expression and receives one
/// value per term, in the same order.
#[async_trait]
pub trait LookupPlugin: Send + Sync {
    /// Name the host registers the lookup under.
    fn name(&self) -> &str;

    /// Resolves every term, or fails as a whole.
    async fn run(&self, terms: LookupTerms) -> PipeOnceResult<Vec<String>>;
}
