//! src/stage/close_und.rs

use crate::{
    context::InferenceContext,
    stage::{InferenceError, Proposals, Stage},
};

/// Adds `und_S_R → L_S_R` (or the script-only / region-only form) for every
/// target with a known language, so wildcard-language lookups resolve.
pub struct CloseUnd;

impl Stage for CloseUnd {
    fn name(&self) -> &'static str {
        "close_und"
    }

    fn pass(&self, ctx: &mut InferenceContext) -> Result<Proposals, InferenceError> {
        let mut proposals = Proposals::new(self.name());
        for value in ctx.table.values() {
            if value.is_und() || value.specificity() == 0 {
                continue;
            }
            let key = value.to_und().without_variants();
            if !ctx.table.contains_key(&key) {
                proposals.offer(key, value.clone());
            }
        }
        Ok(proposals)
    }
}
