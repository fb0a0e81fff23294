//! Outreach service - Runs the five-stage outreach pipeline

use std::{fmt, sync::Arc};

use domain::{
    CompaniesPayload, ContactsPayload, EmailsPayload, Payload, QcPayload, QcResult,
    ResearchPayload,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    pipeline::{
        CompanyStage, ContactStage, EmailStage, PipelineSettings, PipelineStage, ResearchStage,
        Stage, StageReport, StageResult, StageRunner, run_quality_check,
    },
    ports::{AgentPort, ExportPaths, ExportPort, NoopProgress, ProgressReporter, SearchPort},
};

/// One agent per pipeline stage
#[derive(Clone)]
pub struct StageAgents {
    /// Company discovery
    pub company_finder: Arc<dyn AgentPort>,
    /// Contact discovery
    pub contact_finder: Arc<dyn AgentPort>,
    /// Research
    pub researcher: Arc<dyn AgentPort>,
    /// Email writing
    pub email_writer: Arc<dyn AgentPort>,
    /// Quality check
    pub quality_checker: Arc<dyn AgentPort>,
}

impl StageAgents {
    /// Agent serving a stage
    pub fn for_stage(&self, stage: PipelineStage) -> &dyn AgentPort {
        let agent = match stage {
            PipelineStage::Companies => &self.company_finder,
            PipelineStage::Contacts => &self.contact_finder,
            PipelineStage::Research => &self.researcher,
            PipelineStage::Emails => &self.email_writer,
            PipelineStage::QualityCheck => &self.quality_checker,
        };
        agent.as_ref()
    }
}

impl fmt::Debug for StageAgents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageAgents")
            .field("company_finder", &self.company_finder.name())
            .field("contact_finder", &self.contact_finder.name())
            .field("researcher", &self.researcher.name())
            .field("email_writer", &self.email_writer.name())
            .field("quality_checker", &self.quality_checker.name())
            .finish()
    }
}

/// Targeting for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutreachRequest {
    /// Description of the companies to prospect
    pub target: String,
    /// Description of what the sender offers
    pub offering: String,
}

impl OutreachRequest {
    /// Create a request
    pub fn new(target: impl Into<String>, offering: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            offering: offering.into(),
        }
    }
}

/// Everything a run produced
#[derive(Debug, Clone, Default)]
pub struct OutreachReport {
    /// Discovered companies
    pub companies: CompaniesPayload,
    /// Contacts per company
    pub contacts: ContactsPayload,
    /// Insights per company
    pub research: ResearchPayload,
    /// Drafted emails
    pub emails: EmailsPayload,
    /// One verdict per email when the quality check ran
    pub qc: Vec<QcResult>,
    /// Execution summary per stage, in run order
    pub stages: Vec<(PipelineStage, StageReport)>,
    /// Files written by the exporter
    pub exports: Vec<ExportPaths>,
}

impl OutreachReport {
    /// Summary of a stage, if it was reached
    pub fn stage(&self, stage: PipelineStage) -> Option<&StageReport> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, report)| report)
    }
}

/// Service orchestrating the outreach pipeline
pub struct OutreachService {
    agents: StageAgents,
    search: Arc<dyn SearchPort>,
    exporter: Option<Arc<dyn ExportPort>>,
    progress: Arc<dyn ProgressReporter>,
    settings: PipelineSettings,
}

impl fmt::Debug for OutreachService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutreachService")
            .field("agents", &self.agents)
            .field("has_exporter", &self.exporter.is_some())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl OutreachService {
    /// Create a service
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the settings are out of range.
    pub fn new(
        agents: StageAgents,
        search: Arc<dyn SearchPort>,
        settings: PipelineSettings,
    ) -> Result<Self, ApplicationError> {
        settings.validate()?;
        Ok(Self {
            agents,
            search,
            exporter: None,
            progress: Arc::new(NoopProgress),
            settings,
        })
    }

    /// Persist every stage payload through an exporter
    #[must_use]
    pub fn with_exporter(mut self, exporter: Arc<dyn ExportPort>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Report stage progress to a front end
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Settings used for every run
    pub const fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run all stages for a request
    ///
    /// Stages run strictly in order. Contact, research and email stages are
    /// skipped when no company was found; the quality check is skipped when
    /// disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if an agent fails fatally (missing or rejected
    /// credentials) or an export JSON file cannot be written. Files already
    /// exported remain on disk.
    #[instrument(skip(self, request), fields(limit = self.settings.num_companies))]
    pub async fn run(&self, request: &OutreachRequest) -> Result<OutreachReport, ApplicationError> {
        let settings = &self.settings;
        let search = self.search.as_ref();
        let exclusions = settings.exclusions();
        let mut stages = Vec::with_capacity(PipelineStage::ALL.len());
        let mut exports = Vec::new();

        let companies = self
            .run_stage(&CompanyStage {
                target: &request.target,
                offering: &request.offering,
                limit: settings.num_companies,
                exclusions: &exclusions,
                search,
            })
            .await?;
        let companies = self
            .record(PipelineStage::Companies, companies, &mut stages, &mut exports)
            .await?;

        let contacts = if companies.is_empty() {
            self.skip(PipelineStage::Contacts)
        } else {
            self.run_stage(&ContactStage {
                companies: &companies,
                target: &request.target,
                offering: &request.offering,
                search,
            })
            .await?
        };
        let contacts = self
            .record(PipelineStage::Contacts, contacts, &mut stages, &mut exports)
            .await?;

        let research = if companies.is_empty() {
            self.skip(PipelineStage::Research)
        } else {
            self.run_stage(&ResearchStage {
                companies: &companies,
                search,
            })
            .await?
        };
        let research = self
            .record(PipelineStage::Research, research, &mut stages, &mut exports)
            .await?;

        let emails = if companies.is_empty() {
            self.skip(PipelineStage::Emails)
        } else {
            self.run_stage(&EmailStage {
                companies: &companies,
                contacts: &contacts,
                research: &research,
                sender: &settings.sender,
                style: settings.email_style,
            })
            .await?
        };
        let emails = self
            .record(PipelineStage::Emails, emails, &mut stages, &mut exports)
            .await?;

        let qc = if settings.quality_check {
            let stage = PipelineStage::QualityCheck;
            self.progress.stage_started(stage);
            let (verdicts, report) =
                run_quality_check(self.agents.for_stage(stage), &emails).await?;
            self.progress.stage_finished(stage, &report);
            stages.push((stage, report));
            let payload = QcPayload { qc: verdicts };
            self.export(stage, &payload, &mut exports).await?;
            payload.qc
        } else {
            let result: StageResult<QcPayload> = self.skip(PipelineStage::QualityCheck);
            self.progress
                .stage_finished(PipelineStage::QualityCheck, &result.report);
            stages.push((PipelineStage::QualityCheck, result.report));
            Vec::new()
        };

        info!(
            companies = companies.record_count(),
            emails = emails.record_count(),
            verdicts = qc.len(),
            "Outreach run finished"
        );

        Ok(OutreachReport {
            companies,
            contacts,
            research,
            emails,
            qc,
            stages,
            exports,
        })
    }

    async fn run_stage<S: Stage>(
        &self,
        stage: &S,
    ) -> Result<StageResult<S::Output>, ApplicationError> {
        let kind = stage.kind();
        self.progress.stage_started(kind);
        let runner = StageRunner::new(
            self.agents.for_stage(kind),
            self.settings.retries,
            self.settings.allow_fallbacks,
        );
        runner.run(stage).await
    }

    fn skip<T: Payload>(&self, stage: PipelineStage) -> StageResult<T> {
        info!(stage = %stage, "Skipping stage");
        self.progress.stage_started(stage);
        StageResult::skipped()
    }

    async fn record<T: Payload + Serialize>(
        &self,
        stage: PipelineStage,
        result: StageResult<T>,
        stages: &mut Vec<(PipelineStage, StageReport)>,
        exports: &mut Vec<ExportPaths>,
    ) -> Result<T, ApplicationError> {
        self.progress.stage_finished(stage, &result.report);
        stages.push((stage, result.report));
        self.export(stage, &result.payload, exports).await?;
        Ok(result.payload)
    }

    async fn export<T: Serialize>(
        &self,
        stage: PipelineStage,
        payload: &T,
        exports: &mut Vec<ExportPaths>,
    ) -> Result<(), ApplicationError> {
        let Some(exporter) = &self.exporter else {
            return Ok(());
        };
        let value = serde_json::to_value(payload)
            .map_err(|e| ApplicationError::Internal(format!("Failed to serialize {stage}: {e}")))?;
        let paths = exporter.export(stage.export_prefix(), &value).await?;
        info!(stage = %stage, path = %paths.json.display(), "Exported stage payload");
        exports.push(paths);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use domain::{SearchHit, Sender};
    use mockall::mock;

    use super::*;
    use crate::pipeline::StageOutcome;
    use crate::ports::{AgentReply, SearchOptions};

    mock! {
        pub Agent {}

        #[async_trait::async_trait]
        impl AgentPort for Agent {
            async fn run(&self, prompt: &str) -> Result<AgentReply, ApplicationError>;
            fn name(&self) -> String;
        }
    }

    mock! {
        pub Search {}

        #[async_trait::async_trait]
        impl SearchPort for Search {
            async fn search(
                &self,
                query: &str,
                options: SearchOptions,
            ) -> Result<Vec<SearchHit>, ApplicationError>;
        }
    }

    /// Records the prefixes it was asked to export
    #[derive(Default)]
    struct RecordingExporter {
        prefixes: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl ExportPort for RecordingExporter {
        async fn export(
            &self,
            prefix: &str,
            _payload: &serde_json::Value,
        ) -> Result<ExportPaths, ApplicationError> {
            self.prefixes.lock().unwrap().push(prefix.to_string());
            Ok(ExportPaths {
                json: PathBuf::from(format!("{prefix}.json")),
                csv: None,
            })
        }
    }

    /// Records progress notifications in order
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn stage_started(&self, stage: PipelineStage) {
            self.events.lock().unwrap().push(format!("start {stage}"));
        }

        fn stage_finished(&self, stage: PipelineStage, _report: &StageReport) {
            self.events.lock().unwrap().push(format!("finish {stage}"));
        }
    }

    fn agent(replies: Vec<&'static str>) -> Arc<dyn AgentPort> {
        let mut agent = MockAgent::new();
        let mut replies = replies.into_iter();
        let calls = replies.len();
        agent.expect_name().return_const("agent".to_string());
        agent
            .expect_run()
            .times(calls)
            .returning(move |_| Ok(AgentReply::new(replies.next().unwrap(), "test-model")));
        Arc::new(agent)
    }

    fn unused_agent() -> Arc<dyn AgentPort> {
        agent(Vec::new())
    }

    fn unavailable_search() -> Arc<dyn SearchPort> {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .returning(|_, _| Err(ApplicationError::ExternalService("unavailable".into())));
        Arc::new(search)
    }

    fn silent_search() -> Arc<dyn SearchPort> {
        let mut search = MockSearch::new();
        search.expect_search().never();
        Arc::new(search)
    }

    fn settings() -> PipelineSettings {
        PipelineSettings {
            sender: Sender::new("Ada Lovelace", "Livetrend"),
            ..Default::default()
        }
    }

    fn request() -> OutreachRequest {
        OutreachRequest::new("European fashion retailers", "Trend analytics")
    }

    const COMPANIES: &str = r#"{"companies": [{"name": "COS", "website": "https://www.cos.com", "why_fit": "Fashion retailer with seasonal collections"}]}"#;
    const CONTACTS: &str = r#"{"companies": [{"company": "COS", "contacts": [{"name": "Jane Doe", "role": "Head of Buying", "email": "jane.doe@cos.com", "inferred": true}]}]}"#;
    const RESEARCH: &str = r#"{"companies": [{"company": "COS", "insights": ["COS expanded its seasonal collection drops to monthly releases."]}]}"#;
    const EMAILS: &str = r#"{"emails": [{"company": "COS", "contact": "Jane Doe", "subject": "Trend data for COS", "body": "Hi Jane", "followups": ["Quick follow-up?"]}]}"#;
    const QC: &str = r#"{"qc": [{"ok": true, "notes": "Specific"}]}"#;

    #[tokio::test]
    async fn happy_path_runs_every_stage_once() {
        let agents = StageAgents {
            company_finder: agent(vec![COMPANIES]),
            contact_finder: agent(vec![CONTACTS]),
            researcher: agent(vec![RESEARCH]),
            email_writer: agent(vec![EMAILS]),
            quality_checker: agent(vec![QC]),
        };
        let exporter = Arc::new(RecordingExporter::default());
        let service = OutreachService::new(agents, silent_search(), settings())
            .unwrap()
            .with_exporter(exporter.clone());

        let report = service.run(&request()).await.unwrap();

        assert_eq!(report.companies.companies[0].name, "COS");
        assert_eq!(report.contacts.for_company("COS")[0].name, "Jane Doe");
        assert_eq!(report.research.for_company("COS").len(), 1);
        assert!(report.emails.emails[0].body.ends_with("Follow-ups:\n- Quick follow-up?"));
        assert_eq!(report.qc.len(), 1);
        assert!(report.qc[0].ok);
        for stage in PipelineStage::ALL {
            assert_eq!(
                report.stage(stage).map(|r| r.outcome),
                Some(StageOutcome::Success { attempt: 1 })
            );
        }
        assert_eq!(
            *exporter.prefixes.lock().unwrap(),
            ["companies", "contacts", "research", "emails", "qc"]
        );
        assert_eq!(report.exports.len(), 5);
    }

    #[tokio::test]
    async fn empty_discovery_short_circuits_downstream() {
        let agents = StageAgents {
            company_finder: agent(vec![r#"{"companies": []}"#, r#"{"companies": []}"#]),
            contact_finder: unused_agent(),
            researcher: unused_agent(),
            email_writer: unused_agent(),
            quality_checker: unused_agent(),
        };
        let service = OutreachService::new(agents, unavailable_search(), settings()).unwrap();

        let report = service.run(&request()).await.unwrap();

        assert!(report.companies.is_empty());
        assert!(report.contacts.is_empty());
        assert!(report.research.is_empty());
        assert!(report.emails.is_empty());
        assert!(report.qc.is_empty());

        let companies = report.stage(PipelineStage::Companies).unwrap();
        assert_eq!(companies.outcome, StageOutcome::Fallback);
        assert_eq!(companies.attempts, 2);
        for stage in [PipelineStage::Contacts, PipelineStage::Research, PipelineStage::Emails] {
            assert_eq!(report.stage(stage).unwrap().outcome, StageOutcome::Skipped);
        }
    }

    #[tokio::test]
    async fn empty_email_replies_fall_back_to_templates() {
        let agents = StageAgents {
            company_finder: agent(vec![COMPANIES]),
            contact_finder: agent(vec![CONTACTS]),
            researcher: agent(vec![RESEARCH]),
            email_writer: agent(vec!["", "no emails"]),
            quality_checker: unused_agent(),
        };
        let settings = PipelineSettings {
            quality_check: false,
            ..settings()
        };
        let service = OutreachService::new(agents, silent_search(), settings).unwrap();

        let report = service.run(&request()).await.unwrap();

        assert_eq!(report.emails.emails.len(), 1);
        let email = &report.emails.emails[0];
        assert_eq!(email.contact, "Jane Doe");
        assert!(!email.subject.is_empty());
        assert!(email.body.contains("Ada Lovelace — Livetrend"));
        assert_eq!(
            report.stage(PipelineStage::Emails).unwrap().outcome,
            StageOutcome::Fallback
        );
        assert_eq!(
            report.stage(PipelineStage::QualityCheck).unwrap().outcome,
            StageOutcome::Skipped
        );
    }

    #[tokio::test]
    async fn excluded_domain_is_dropped_by_normalization() {
        let agents = StageAgents {
            company_finder: agent(vec![
                r#"{"companies": [{"name": "Livetrend", "website": "https://livetrend.co", "why_fit": "Trend data"}, {"name": "Arket", "website": "https://arket.com", "why_fit": "Fashion brand"}]}"#,
            ]),
            contact_finder: agent(vec![r#"{"companies": [{"company": "Arket", "contacts": []}]}"#]),
            researcher: agent(vec![r#"{"companies": [{"company": "Arket", "insights": []}]}"#]),
            email_writer: agent(vec![
                r#"{"emails": [{"company": "Arket", "contact": "Team", "subject": "Hi", "body": "Hello"}]}"#,
            ]),
            quality_checker: agent(vec!["{}"]),
        };
        let service = OutreachService::new(agents, silent_search(), settings()).unwrap();

        let report = service.run(&request()).await.unwrap();

        assert_eq!(report.companies.companies.len(), 1);
        assert_eq!(report.companies.companies[0].name, "Arket");
        assert_eq!(report.qc.len(), 1);
        assert!(!report.qc[0].ok);
    }

    #[tokio::test]
    async fn fatal_agent_error_aborts_run() {
        let mut company_finder = MockAgent::new();
        company_finder.expect_name().return_const("agent".to_string());
        company_finder
            .expect_run()
            .times(1)
            .returning(|_| Err(ApplicationError::NotAuthorized("invalid key".into())));

        let agents = StageAgents {
            company_finder: Arc::new(company_finder),
            contact_finder: unused_agent(),
            researcher: unused_agent(),
            email_writer: unused_agent(),
            quality_checker: unused_agent(),
        };
        let service = OutreachService::new(agents, silent_search(), settings()).unwrap();

        let result = service.run(&request()).await;
        assert!(matches!(result, Err(ApplicationError::NotAuthorized(_))));
    }

    #[tokio::test]
    async fn fallback_contacts_use_search() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|query, _| {
            if query.starts_with("Head of Buying") {
                Ok(vec![SearchHit::new("https://example.com/jane", "Jane Doe - Head of Buying")])
            } else {
                Ok(Vec::new())
            }
        });

        let agents = StageAgents {
            company_finder: agent(vec![COMPANIES]),
            contact_finder: agent(vec!["{}", "{}"]),
            researcher: agent(vec![RESEARCH]),
            email_writer: agent(vec![EMAILS]),
            quality_checker: agent(vec![QC]),
        };
        let service = OutreachService::new(agents, Arc::new(search), settings()).unwrap();

        let report = service.run(&request()).await.unwrap();
        let contacts = report.contacts.for_company("COS");
        assert_eq!(contacts[0].email.as_deref(), Some("jane.doe@cos.com"));
        assert!(contacts[0].inferred);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let agents = StageAgents {
            company_finder: unused_agent(),
            contact_finder: unused_agent(),
            researcher: unused_agent(),
            email_writer: unused_agent(),
            quality_checker: unused_agent(),
        };
        let settings = PipelineSettings {
            num_companies: 0,
            ..Default::default()
        };
        let result = OutreachService::new(agents, silent_search(), settings);
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[tokio::test]
    async fn every_stage_reports_start_and_finish_when_skipped() {
        let agents = StageAgents {
            company_finder: agent(vec![r#"{"companies": []}"#, r#"{"companies": []}"#]),
            contact_finder: unused_agent(),
            researcher: unused_agent(),
            email_writer: unused_agent(),
            quality_checker: unused_agent(),
        };
        let progress = Arc::new(RecordingProgress::default());
        let service = OutreachService::new(
            agents,
            unavailable_search(),
            PipelineSettings {
                quality_check: false,
                ..settings()
            },
        )
        .unwrap()
        .with_progress(progress.clone());

        let report = service.run(&request()).await.unwrap();

        let expected: Vec<String> = PipelineStage::ALL
            .iter()
            .flat_map(|stage| [format!("start {stage}"), format!("finish {stage}")])
            .collect();
        assert_eq!(*progress.events.lock().unwrap(), expected);
        assert_eq!(
            report.stage(PipelineStage::QualityCheck).map(|r| r.outcome),
            Some(StageOutcome::Skipped)
        );
    }
}
