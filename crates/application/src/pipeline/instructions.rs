//! System instructions for the five stage agents

use super::{PipelineSettings, PipelineStage};

fn list_or(items: &[String], empty: &str) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn company_finder(settings: &PipelineSettings) -> Vec<String> {
    vec![
        "You are CompanyFinderAgent. Use your knowledge of the web to find companies that match \
         the targeting criteria."
            .to_string(),
        format!(
            "Industries: {}. Regions: {}. Exclude domains: {}.",
            list_or(&settings.industries, "any"),
            list_or(&settings.regions, "any"),
            list_or(&settings.exclude_domains, "none"),
        ),
        "Return ONLY valid JSON with key 'companies' as a list; respect the requested limit."
            .to_string(),
        "Each item must have: name, website, why_fit (1-2 lines).".to_string(),
        "Do not include companies whose domains are in the exclude list.".to_string(),
    ]
}

fn contact_finder() -> Vec<String> {
    vec![
        "You are ContactFinderAgent. Find 1-2 relevant decision makers per company.".to_string(),
        "Prioritize roles in buying and merchandising, the founder's office, GTM, sales \
         leadership, partnerships and product marketing."
            .to_string(),
        "If a direct email is not known, infer one using common formats and mark inferred=true."
            .to_string(),
        "Return ONLY valid JSON with companies and contacts.".to_string(),
    ]
}

fn researcher() -> Vec<String> {
    vec![
        "You are ResearchAgent. For each company, collect valuable insights from:".to_string(),
        "1) Their official website (about, blog, product pages)".to_string(),
        "2) Reddit discussions mentioning the brand".to_string(),
        "Return 2-4 interesting, non-generic points per company for email personalization."
            .to_string(),
    ]
}

fn email_writer(settings: &PipelineSettings) -> Vec<String> {
    let mut lines = vec![
        "You are EmailWriterAgent. Write concise, personalized B2B outreach emails.".to_string(),
        settings.email_style.instruction().to_string(),
        "Length: 120-160 words. Include 1-2 lines of personalization using research insights."
            .to_string(),
    ];
    if settings.followups > 0 {
        lines.push(format!(
            "Also generate {} numbered follow-up emails (1-2 lines each) with JSON key \
             'followups' as a list.",
            settings.followups
        ));
    }
    lines.push("Always use sender.name and sender.company from the input for the signature.".to_string());
    lines.push(format!(
        "Adapt tone to {}'s offering: data-driven trend analysis, competitive intelligence, \
         assortment planning, pricing and buying optimization.",
        settings.sender.company
    ));
    lines.push(
        "Return ONLY valid JSON with emails: list of {company, contact, subject, body, optional \
         followups}."
            .to_string(),
    );
    lines
}

fn quality_checker() -> Vec<String> {
    vec![
        "You are QualityCheckAgent. Verify that each email is tailored, specific (non-generic), \
         references at least one research point, and avoids spammy phrases."
            .to_string(),
        "Return ONLY valid JSON with key 'qc' as a list matching the emails' order, each item \
         with {ok: bool, notes: string}."
            .to_string(),
    ]
}

/// System instructions for the agent serving a stage
pub fn agent_instructions(stage: PipelineStage, settings: &PipelineSettings) -> String {
    let lines = match stage {
        PipelineStage::Companies => company_finder(settings),
        PipelineStage::Contacts => contact_finder(),
        PipelineStage::Research => researcher(),
        PipelineStage::Emails => email_writer(settings),
        PipelineStage::QualityCheck => quality_checker(),
    };
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use domain::{EmailStyle, Sender};

    use super::*;

    #[test]
    fn company_finder_lists_filters() {
        let settings = PipelineSettings {
            industries: vec!["Fashion".to_string(), " Apparel ".to_string()],
            regions: Vec::new(),
            ..Default::default()
        };
        let text = agent_instructions(PipelineStage::Companies, &settings);
        assert!(text.contains("Industries: Fashion, Apparel. Regions: any. Exclude domains: livetrend.co."));
    }

    #[test]
    fn company_finder_without_exclusions() {
        let settings = PipelineSettings {
            exclude_domains: Vec::new(),
            ..Default::default()
        };
        let text = agent_instructions(PipelineStage::Companies, &settings);
        assert!(text.contains("Exclude domains: none."));
    }

    #[test]
    fn email_writer_includes_style_and_followups() {
        let settings = PipelineSettings {
            email_style: EmailStyle::Cold,
            followups: 2,
            sender: Sender::new("Ada", "Acme"),
            ..Default::default()
        };
        let text = agent_instructions(PipelineStage::Emails, &settings);
        assert!(text.contains(EmailStyle::Cold.instruction()));
        assert!(text.contains("Also generate 2 numbered follow-up emails"));
        assert!(text.contains("Adapt tone to Acme's offering"));
    }

    #[test]
    fn email_writer_without_followups() {
        let text = agent_instructions(PipelineStage::Emails, &PipelineSettings::default());
        assert!(!text.contains("follow-up emails"));
    }

    #[test]
    fn every_stage_has_instructions() {
        let settings = PipelineSettings::default();
        for stage in PipelineStage::ALL {
            assert!(agent_instructions(stage, &settings).contains("Agent."));
        }
    }
}
