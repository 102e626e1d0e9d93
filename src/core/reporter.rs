use crate::domain::model::{ReportFormat, ScrapeReport};
use crate::utils::error::Result;

pub fn header_line(source_url: &str) -> String {
    format!("Scraped from: {}", source_url)
}

/// Render a report in the requested format. The text form is a header line
/// followed by one `Lift: <name>, Status: <status>` line per record.
pub fn render(report: &ScrapeReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => render_json(report),
        ReportFormat::Csv => render_csv(report),
    }
}

fn render_text(report: &ScrapeReport) -> String {
    let mut lines = Vec::with_capacity(report.lifts.len() + 1);
    lines.push(header_line(&report.source_url));
    lines.extend(report.lifts.iter().map(|lift| lift.to_string()));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn render_json(report: &ScrapeReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

fn render_csv(report: &ScrapeReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "status"])?;
    for lift in &report.lifts {
        writer.write_record([lift.name.as_str(), lift.status.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LiftStatus;

    fn report(lifts: Vec<LiftStatus>) -> ScrapeReport {
        ScrapeReport::new("https://www.cypressmountain.com/mountain-report", lifts)
    }

    #[test]
    fn test_text_report() {
        let report = report(vec![
            LiftStatus::new("Eagle Express", "Open"),
            LiftStatus::new("Raven Ridge", "Closed"),
        ]);

        let text = render(&report, ReportFormat::Text).unwrap();

        assert_eq!(
            text,
            "Scraped from: https://www.cypressmountain.com/mountain-report\n\
             Lift: Eagle Express, Status: Open\n\
             Lift: Raven Ridge, Status: Closed\n"
        );
    }

    #[test]
    fn test_text_report_without_lifts_keeps_header() {
        let text = render(&report(vec![]), ReportFormat::Text).unwrap();

        assert_eq!(
            text,
            "Scraped from: https://www.cypressmountain.com/mountain-report\n"
        );
    }

    #[test]
    fn test_json_report() {
        let report = report(vec![LiftStatus::new("Eagle Express", "Open")]);

        let json = render(&report, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["source_url"],
            "https://www.cypressmountain.com/mountain-report"
        );
        assert_eq!(value["lifts"][0]["name"], "Eagle Express");
        assert_eq!(value["lifts"][0]["status"], "Open");
        assert!(value["scraped_at"].is_string());
    }

    #[test]
    fn test_csv_report_quotes_commas() {
        let report = report(vec![
            LiftStatus::new("Eagle Express", "Open"),
            LiftStatus::new("Lions Express, Upper", "Closed"),
        ]);

        let csv = render(&report, ReportFormat::Csv).unwrap();

        assert_eq!(
            csv,
            "name,status\nEagle Express,Open\n\"Lions Express, Upper\",Closed\n"
        );
    }
}
