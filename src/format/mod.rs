//! Output formatting for scraped records (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::storefront::{ProductDetails, ProductSummary};

/// Formats scraped records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats product summaries from a listing page.
    pub fn format_summaries(&self, summaries: &[ProductSummary]) -> String {
        if summaries.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => summary_csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(summaries).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_summaries(summaries),
            OutputFormat::Markdown => self.markdown_summaries(summaries),
            OutputFormat::Csv => self.csv_summaries(summaries),
        }
    }

    /// Formats a single product detail record.
    pub fn format_detail(&self, details: &ProductDetails) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(details).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_detail(details),
            OutputFormat::Markdown => self.markdown_details(std::slice::from_ref(details)),
            OutputFormat::Csv => self.csv_details(std::slice::from_ref(details)),
        }
    }

    /// Formats multiple product detail records.
    pub fn format_details(&self, details: &[ProductDetails]) -> String {
        if details.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => detail_csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(details).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => details
                .iter()
                .map(|d| self.table_detail(d))
                .collect::<Vec<_>>()
                .join("\n\n"),
            OutputFormat::Markdown => self.markdown_details(details),
            OutputFormat::Csv => self.csv_details(details),
        }
    }

    /// Formats a plain list of product links.
    pub fn format_links(&self, links: &[String]) -> String {
        if links.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => "url".to_string(),
                _ => "No product links found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(links).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => {
                let mut lines = vec!["url".to_string()];
                lines.extend(links.iter().map(|l| csv_escape(l)));
                lines.join("\n")
            }
            _ => links.join("\n"),
        }
    }

    // Table formatting

    fn table_summaries(&self, summaries: &[ProductSummary]) -> String {
        let stock_width = 12;
        let mfr_width = 22;
        let price_width = 12;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<stock_width$}  {:<mfr_width$}  {:<price_width$}  {}",
            "Stock No.", "Mfr. Part No.", "Price", "Title"
        ));
        lines.push(format!(
            "{:-<stock_width$}  {:-<mfr_width$}  {:-<price_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for summary in summaries {
            lines.push(format!(
                "{:<stock_width$}  {:<mfr_width$}  {:<price_width$}  {}",
                summary.stock_no,
                truncate(&summary.mfr_part_no, mfr_width),
                summary.price,
                truncate(&summary.title, title_width),
            ));
        }

        lines.push(String::new());
        lines.push(format!("{} products", summaries.len()));
        lines.join("\n")
    }

    fn table_detail(&self, details: &ProductDetails) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:         {}", details.title));
        lines.push(format!("Stock No.:     {}", opt(&details.stock_no)));
        lines.push(format!("Mfr. Part No.: {}", opt(&details.mfr_part_no)));
        lines.push(format!("Brand:         {}", opt(&details.brand)));
        lines.push(format!("Price:         {}", opt(&details.price)));
        lines.push(format!("Availability:  {}", opt(&details.availability)));
        lines.push(format!("URL:           {}", details.url));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_summaries(&self, summaries: &[ProductSummary]) -> String {
        let mut lines = Vec::new();
        lines.push("| Stock No. | Mfr. Part No. | Price | Title |".to_string());
        lines.push("|-----------|---------------|-------|-------|".to_string());

        for summary in summaries {
            lines.push(format!(
                "| {} | {} | {} | [{}]({}) |",
                summary.stock_no,
                summary.mfr_part_no,
                summary.price,
                summary.title.replace('|', "\\|"),
                summary.url,
            ));
        }

        lines.join("\n")
    }

    fn markdown_details(&self, details: &[ProductDetails]) -> String {
        let mut lines = Vec::new();
        lines.push("| Stock No. | Mfr. Part No. | Brand | Price | Availability | Title |".to_string());
        lines.push("|-----------|---------------|-------|-------|--------------|-------|".to_string());

        for d in details {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | [{}]({}) |",
                opt(&d.stock_no),
                opt(&d.mfr_part_no),
                opt(&d.brand),
                opt(&d.price),
                opt(&d.availability),
                d.title.replace('|', "\\|"),
                d.url,
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_summaries(&self, summaries: &[ProductSummary]) -> String {
        let mut lines = vec![summary_csv_header()];

        for summary in summaries {
            lines.push(
                [
                    csv_escape(&summary.stock_no),
                    csv_escape(&summary.mfr_part_no),
                    csv_escape(&summary.title),
                    csv_escape(&summary.price),
                    csv_escape(&summary.url),
                ]
                .join(","),
            );
        }

        lines.join("\n")
    }

    fn csv_details(&self, details: &[ProductDetails]) -> String {
        let mut lines = vec![detail_csv_header()];

        for d in details {
            lines.push(
                [
                    csv_escape(d.stock_no.as_deref().unwrap_or("")),
                    csv_escape(d.mfr_part_no.as_deref().unwrap_or("")),
                    csv_escape(&d.title),
                    csv_escape(d.brand.as_deref().unwrap_or("")),
                    csv_escape(d.price.as_deref().unwrap_or("")),
                    csv_escape(d.availability.as_deref().unwrap_or("")),
                    csv_escape(&d.url),
                ]
                .join(","),
            );
        }

        lines.join("\n")
    }
}

fn summary_csv_header() -> String {
    "stock_no,mfr_part_no,title,price,url".to_string()
}

fn detail_csv_header() -> String {
    "stock_no,mfr_part_no,title,brand,price,availability,url".to_string()
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_summary() -> ProductSummary {
        ProductSummary {
            title: "RS PRO Carbon Resistor 10K".to_string(),
            stock_no: "123-4567".to_string(),
            mfr_part_no: "CFR-25JB-52-10K".to_string(),
            price: "£0.024".to_string(),
            url: "https://uk.example.test/p/1234567".to_string(),
        }
    }

    fn make_details() -> ProductDetails {
        ProductDetails {
            title: "RS PRO Carbon Resistor 10K".to_string(),
            stock_no: Some("123-4567".to_string()),
            mfr_part_no: Some("CFR-25JB-52-10K".to_string()),
            brand: Some("RS PRO".to_string()),
            price: Some("£0.024".to_string()),
            availability: None,
            url: "https://uk.example.test/p/1234567".to_string(),
        }
    }

    #[test]
    fn test_table_summaries() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_summaries(&[make_summary()]);
        assert!(output.contains("123-4567"));
        assert!(output.contains("CFR-25JB-52-10K"));
        assert!(output.contains("£0.024"));
        assert!(output.contains("RS PRO Carbon Resistor 10K"));
        assert!(output.contains("1 products"));
    }

    #[test]
    fn test_table_empty_summaries() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_summaries(&[]), "No products found.");
    }

    #[test]
    fn test_json_summaries() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_summaries(&[make_summary()]);
        assert!(output.starts_with('['));
        assert!(output.contains("123-4567"));

        let parsed: Vec<ProductSummary> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_json_empty_summaries() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_summaries(&[]), "[]");
    }

    #[test]
    fn test_csv_summaries() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_summaries(&[make_summary()]);
        let mut lines = output.lines();
        assert_eq!(lines.next().unwrap(), "stock_no,mfr_part_no,title,price,url");
        assert!(lines.next().unwrap().starts_with("123-4567,CFR-25JB-52-10K"));
    }

    #[test]
    fn test_csv_empty_summaries_header_only() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(formatter.format_summaries(&[]), "stock_no,mfr_part_no,title,price,url");
    }

    #[test]
    fn test_csv_escaping() {
        let mut summary = make_summary();
        summary.title = "Resistor, 10K \"precision\"".to_string();

        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_summaries(&[summary]);
        assert!(output.contains(r#""Resistor, 10K ""precision""""#));
    }

    #[test]
    fn test_markdown_summaries() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_summaries(&[make_summary()]);
        assert!(output.starts_with("| Stock No."));
        assert!(output.contains("[RS PRO Carbon Resistor 10K](https://uk.example.test/p/1234567)"));
    }

    #[test]
    fn test_table_detail() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_detail(&make_details());
        assert!(output.contains("Title:         RS PRO Carbon Resistor 10K"));
        assert!(output.contains("Brand:         RS PRO"));
        assert!(output.contains("Availability:  N/A"));
        assert!(output.contains("URL:           https://uk.example.test/p/1234567"));
    }

    #[test]
    fn test_json_detail() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_detail(&make_details());
        let parsed: ProductDetails = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.title, "RS PRO Carbon Resistor 10K");
    }

    #[test]
    fn test_details_batch_table() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_details(&[make_details(), make_details()]);
        // Two records separated by a blank line
        assert_eq!(output.matches("Title:").count(), 2);
        assert!(output.contains("\n\n"));
    }

    #[test]
    fn test_details_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_details(&[]), "No products found.");
    }

    #[test]
    fn test_links_plain() {
        let formatter = Formatter::new(OutputFormat::Table);
        let links = vec!["https://a.test/p/1".to_string(), "https://a.test/p/2".to_string()];
        assert_eq!(formatter.format_links(&links), "https://a.test/p/1\nhttps://a.test/p/2");
    }

    #[test]
    fn test_links_json() {
        let formatter = Formatter::new(OutputFormat::Json);
        let links = vec!["https://a.test/p/1".to_string()];
        let output = formatter.format_links(&links);
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, links);
    }

    #[test]
    fn test_links_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_links(&[]), "No product links found.");
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(formatter.format_links(&[]), "url");
    }

    #[test]
    fn test_truncate_long_title() {
        let mut summary = make_summary();
        summary.title = "X".repeat(80);

        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_summaries(&[summary]);
        assert!(output.contains("..."));
        assert!(!output.contains(&"X".repeat(80)));
    }
}
