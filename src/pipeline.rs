// src/pipeline.rs
pub mod preset;

use crate::{
    context::{Changes, InferenceContext},
    stage::{InferenceError, Stage},
};
use std::sync::Arc;
use tracing::info;

/// An ordered list of stages, run in rounds until a whole round changes nothing.
#[derive(Clone)]
pub struct Pipeline {
    name: &'static str,
    stages: Vec<Arc<dyn Stage>>,
}

impl Pipeline {
    pub fn new(name: &'static str, stages: Vec<Arc<dyn Stage>>) -> Self {
        Self { name, stages }
    }

    pub fn builder(name: &'static str) -> PipelineBuilder {
        PipelineBuilder {
            name,
            stages: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage to its own fixed point, then start over while any stage
    /// still wrote something. Bounded by `max_passes` rounds.
    pub fn run(&self, ctx: &mut InferenceContext) -> Result<Changes, InferenceError> {
        let mut added = Changes::new();
        let max_rounds = ctx.options.max_passes;
        for round in 1..=max_rounds {
            let mut changed = false;
            for stage in &self.stages {
                let written = ctx.apply(stage.as_ref())?;
                changed |= !written.is_empty();
                added.extend(written);
            }
            if !changed {
                info!(
                    pipeline = self.name,
                    rounds = round,
                    "{} entries in table, {} written",
                    ctx.table.len(),
                    added.len()
                );
                return Ok(added);
            }
        }
        Err(InferenceError::NonConvergent {
            stage: self.name,
            passes: max_rounds,
        })
    }
}

pub struct PipelineBuilder {
    name: &'static str,
    stages: Vec<Arc<dyn Stage>>,
}

impl PipelineBuilder {
    pub fn add_stage<T: Stage + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline::new(self.name, self.stages)
    }
}
