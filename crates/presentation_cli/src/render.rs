//! Plain-text rendering of a finished run

use application::OutreachReport;

/// Longest cell printed before truncation
const MAX_CELL_CHARS: usize = 60;

/// Print every section of the report
pub fn print_report(report: &OutreachReport) {
    println!();
    println!("🏢 Companies");
    println!("{}", companies_table(report));

    println!("👤 Contacts");
    println!("{}", contacts_table(report));

    println!("💡 Insights");
    println!("{}", insights_table(report));

    println!("✉️  Emails");
    if report.emails.emails.is_empty() {
        println!("  (none)");
    }
    for email in &report.emails.emails {
        println!("── {} / {}", email.company, email.contact);
        println!("Subject: {}", email.subject);
        println!();
        println!("{}", email.body);
        println!();
    }

    if !report.qc.is_empty() {
        println!("🧪 Quality check");
        println!("{}", qc_table(report));
    }

    if !report.exports.is_empty() {
        println!("📁 Exports");
        for paths in &report.exports {
            println!("  {}", paths.json.display());
            if let Some(csv) = &paths.csv {
                println!("  {}", csv.display());
            }
        }
    }
}

fn companies_table(report: &OutreachReport) -> String {
    let rows = report
        .companies
        .companies
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                (i + 1).to_string(),
                c.name.clone(),
                c.website.clone(),
                c.why_fit.clone(),
            ]
        })
        .collect();
    table(&["#", "Name", "Website", "Why fit"], rows)
}

fn contacts_table(report: &OutreachReport) -> String {
    let rows = report
        .contacts
        .companies
        .iter()
        .flat_map(|group| {
            group.contacts.iter().map(|c| {
                vec![
                    group.company.clone(),
                    c.name.clone(),
                    c.role.clone(),
                    c.email.clone().unwrap_or_default(),
                    if c.inferred { "yes" } else { "" }.to_string(),
                ]
            })
        })
        .collect();
    table(&["Company", "Name", "Role", "Email", "Inferred"], rows)
}

fn insights_table(report: &OutreachReport) -> String {
    let rows = report
        .research
        .companies
        .iter()
        .flat_map(|group| {
            group
                .insights
                .iter()
                .map(|insight| vec![group.company.clone(), insight.clone()])
        })
        .collect();
    table(&["Company", "Insight"], rows)
}

fn qc_table(report: &OutreachReport) -> String {
    let rows = report
        .qc
        .iter()
        .zip(&report.emails.emails)
        .map(|(verdict, email)| {
            vec![
                email.subject.clone(),
                if verdict.ok { "✓" } else { "✗" }.to_string(),
                verdict.notes.clone(),
            ]
        })
        .collect();
    table(&["Email", "OK", "Notes"], rows)
}

/// Render left-aligned columns separated by two spaces
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "  (none)\n".to_string();
    }

    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| row.iter().map(|cell| clip(cell)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = render_line(headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&render_line(rule.iter().map(String::as_str), &widths));
    for row in &rows {
        out.push_str(&render_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    format!("  {}\n", padded.join("  ").trim_end())
}

/// Collapse whitespace and shorten long cells
fn clip(cell: &str) -> String {
    let flat = cell.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CELL_CHARS {
        return flat;
    }
    let mut clipped: String = flat.chars().take(MAX_CELL_CHARS - 1).collect();
    clipped.push('…');
    clipped
}
