//! Builds the five stage agents and wires the outreach service

use std::sync::Arc;

use ai_core::{InferenceEngine, OpenAiInferenceEngine};
use application::pipeline::{PipelineSettings, PipelineStage, agent_instructions};
use application::ports::AgentPort;
use application::{ApplicationError, OutreachService, StageAgents};
use tracing::info;

use super::{FileExporter, InferenceAgentAdapter, WebSearchAdapter};
use crate::config::AppConfig;

/// Create one agent per stage on a shared engine
///
/// Each agent gets its stage's instructions rendered from `settings` and
/// the stage's model from `settings.models`, or the engine default.
pub fn build_stage_agents(
    engine: &Arc<dyn InferenceEngine>,
    settings: &PipelineSettings,
) -> StageAgents {
    let agent = |stage: PipelineStage| -> Arc<dyn AgentPort> {
        let mut adapter = InferenceAgentAdapter::new(
            Arc::clone(engine),
            stage.agent_name(),
            agent_instructions(stage, settings),
        );
        if let Some(model) = settings.models.for_stage(stage) {
            adapter = adapter.with_model(model);
        }
        Arc::new(adapter)
    };

    StageAgents {
        company_finder: agent(PipelineStage::Companies),
        contact_finder: agent(PipelineStage::Contacts),
        researcher: agent(PipelineStage::Research),
        email_writer: agent(PipelineStage::Emails),
        quality_checker: agent(PipelineStage::QualityCheck),
    }
}

/// Build a ready-to-run outreach service from configuration
///
/// # Errors
///
/// Returns a configuration error if the OpenAI key is missing, a setting
/// is out of range, or a client cannot be constructed.
pub fn build_outreach_service(config: &AppConfig) -> Result<OutreachService, ApplicationError> {
    config.validate()?;
    let api_key = config.openai_api_key()?;

    let engine = OpenAiInferenceEngine::new(config.inference.clone(), api_key)
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
    let engine: Arc<dyn InferenceEngine> = Arc::new(engine);

    let agents = build_stage_agents(&engine, &config.pipeline);
    let search = Arc::new(WebSearchAdapter::new(config.web_search_config())?);

    let mut service = OutreachService::new(agents, search, config.pipeline.clone())?;
    if config.export.enabled {
        service = service.with_exporter(Arc::new(FileExporter::new(&config.export.out_dir)));
    }

    info!(
        model = %config.inference.default_model,
        export = config.export.enabled,
        "Outreach service ready"
    );
    Ok(service)
}
