//! Seam between the planning agent and final-answer validation
//!
//! The agent itself (LLM runtime, resort and flight searches) lives outside
//! this crate. It only has to turn a [`TripRequest`] into an answer string.

use tracing::{info, instrument};

use crate::pipeline::{ValidationPipeline, ValidationReport};
use crate::request::TripRequest;
use crate::{DiveTripError, Result};

/// Something that plans a trip and answers with a JSON result set
pub trait PlanningAgent {
    fn plan(&self, request: &TripRequest) -> anyhow::Result<String>;
}

impl<F> PlanningAgent for F
where
    F: Fn(&TripRequest) -> anyhow::Result<String>,
{
    fn plan(&self, request: &TripRequest) -> anyhow::Result<String> {
        self(request)
    }
}

/// Agent answer together with its verdicts
#[derive(Debug, Clone)]
pub struct GatedAnswer {
    /// Answer exactly as the agent returned it
    pub answer: String,
    pub report: ValidationReport,
}

impl GatedAnswer {
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.report.passed()
    }
}

/// Runs an agent and validates what it returns
#[derive(Debug, Clone, Default)]
pub struct FinalAnswerGate {
    pipeline: ValidationPipeline,
}

impl FinalAnswerGate {
    #[must_use]
    pub fn new(pipeline: ValidationPipeline) -> Self {
        Self { pipeline }
    }

    #[instrument(name = "final_answer_gate", skip_all, fields(location = %request.location))]
    pub fn run<A: PlanningAgent + ?Sized>(
        &self,
        agent: &A,
        request: &TripRequest,
    ) -> Result<GatedAnswer> {
        let answer = agent
            .plan(request)
            .map_err(|e| DiveTripError::agent(format!("{e:#}")))?;
        let report = self.pipeline.validate_str(&answer);
        info!(accepted = report.passed(), "agent answer gated");
        Ok(GatedAnswer { answer, report })
    }
}
