use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}. Valid options are: human, json", s)),
        }
    }
}

pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
}

pub struct TableOutput {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableOutput {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = self.headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }
        widths
    }
}

impl OutputFormatter for TableOutput {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => self.format_json(),
        }
    }
}

impl TableOutput {
    fn format_human(&self) -> String {
        let widths = self.widths();
        let mut output = String::new();

        for (i, header) in self.headers.iter().enumerate() {
            if i > 0 {
                output.push_str(" │ ");
            }
            let padded = format!("{:width$}", header, width = widths[i]);
            output.push_str(&padded.cyan().bold().to_string());
        }
        output.push('\n');

        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                output.push_str("─┼─");
            }
            output.push_str(&"─".repeat(*width));
        }
        output.push('\n');

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    output.push_str(" │ ");
                }
                match widths.get(i) {
                    Some(width) => output.push_str(&format!("{:width$}", cell, width = *width)),
                    None => output.push_str(cell),
                }
            }
            output.push('\n');
        }

        output
    }

    fn format_json(&self) -> String {
        let objects: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                let mut obj = serde_json::Map::new();
                for (header, cell) in self.headers.iter().zip(row) {
                    obj.insert(header.clone(), serde_json::Value::String(cell.clone()));
                }
                serde_json::Value::Object(obj)
            })
            .collect();
        serde_json::to_string_pretty(&objects).unwrap_or_default()
    }
}

/// Status types for consistent status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
}

/// What happened to a file or step during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Written from a template
    Created,
    /// Written from built-in content because the template was missing
    Fallback,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub target: String,
    pub detail: String,
}

impl Action {
    pub fn new(kind: ActionKind, target: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            detail: detail.into(),
        }
    }
}

/// Context for output that abstracts format details
pub trait OutputContext {
    /// Get the current output format
    fn format(&self) -> OutputFormat;

    /// Print a header
    fn print_header(&mut self, title: &str);

    /// Print a section title
    fn print_section(&mut self, title: &str);

    /// Print a table
    fn print_table(&mut self, table: TableOutput);

    /// Print a status message
    fn print_status(&mut self, status: Status, message: &str);

    /// Print raw text (format-aware)
    fn print_text(&mut self, text: &str);

    /// Record an action for the run report and show it as a status line
    fn record(&mut self, action: Action);

    /// Actions recorded so far
    fn actions(&self) -> &[Action];
}

/// Concrete implementation of OutputContext
pub struct OutputContextImpl {
    format: OutputFormat,
    actions: Vec<Action>,
    messages: Vec<serde_json::Value>,
    quiet: bool,
}

impl OutputContextImpl {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            actions: Vec::new(),
            messages: Vec::new(),
            quiet: false,
        }
    }

    /// Context that records actions without printing anything
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new(OutputFormat::Human)
        }
    }

    /// Emit the collected report (JSON mode only)
    pub fn flush(&mut self) {
        if self.format != OutputFormat::Json || self.quiet {
            return;
        }
        let report = serde_json::json!({
            "actions": self.actions,
            "messages": self.messages,
        });
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    }

    fn emit(&self, text: &str) {
        if !self.quiet {
            println!("{}", text);
        }
    }

    /// Print a formatted line, or keep it as a report message in JSON mode
    fn emit_formatted(&mut self, formatted: String) {
        match self.format {
            OutputFormat::Json => {
                if let Ok(value) = serde_json::from_str(&formatted) {
                    self.messages.push(value);
                }
            }
            OutputFormat::Human => self.emit(&formatted),
        }
    }
}

impl OutputContext for OutputContextImpl {
    fn format(&self) -> OutputFormat {
        self.format
    }

    fn print_header(&mut self, title: &str) {
        self.emit_formatted(format_header(title, self.format));
    }

    fn print_section(&mut self, title: &str) {
        self.emit_formatted(format_section(title, self.format));
    }

    fn print_table(&mut self, table: TableOutput) {
        self.emit_formatted(table.format(self.format));
    }

    fn print_status(&mut self, status: Status, message: &str) {
        let formatted = match status {
            Status::Success => format_success(message, self.format),
            Status::Error => format_error(message, self.format),
            Status::Warning => format_warning(message, self.format),
            Status::Info => format_info(message, self.format),
        };
        self.emit_formatted(formatted);
    }

    fn print_text(&mut self, text: &str) {
        match self.format {
            OutputFormat::Json => self.messages.push(serde_json::Value::String(text.to_string())),
            OutputFormat::Human => self.emit(text),
        }
    }

    fn record(&mut self, action: Action) {
        if self.format == OutputFormat::Human {
            let status = match action.kind {
                ActionKind::Created => Status::Success,
                ActionKind::Fallback => Status::Success,
                ActionKind::Skipped => Status::Warning,
                ActionKind::Failed => Status::Error,
            };
            let message = if action.detail.is_empty() {
                action.target.clone()
            } else {
                format!("{} ({})", action.target, action.detail)
            };
            self.print_status(status, &message);
        }
        self.actions.push(action);
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }
}

pub fn format_success(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!("{} {}", "✓".green(), message),
        OutputFormat::Json => serde_json::json!({
            "status": "success",
            "message": message
        })
        .to_string(),
    }
}

pub fn format_error(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!("{} {}", "✗".red(), message.red()),
        OutputFormat::Json => serde_json::json!({
            "status": "error",
            "message": message
        })
        .to_string(),
    }
}

pub fn format_warning(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!("{} {}", "⚠".yellow(), message.yellow()),
        OutputFormat::Json => serde_json::json!({
            "status": "warning",
            "message": message
        })
        .to_string(),
    }
}

pub fn format_info(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!("{} {}", "ℹ".blue(), message),
        OutputFormat::Json => serde_json::json!({
            "status": "info",
            "message": message
        })
        .to_string(),
    }
}

pub fn format_header(title: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => {
            let line = "═".repeat(title.chars().count() + 4);
            format!("{}\n  {}  \n{}", line.blue(), title.cyan().bold(), line.blue())
        }
        OutputFormat::Json => serde_json::json!({ "header": title }).to_string(),
    }
}

pub fn format_section(title: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!(
            "\n{}\n{}",
            title.yellow().bold(),
            "─".repeat(title.chars().count()).blue()
        ),
        OutputFormat::Json => serde_json::json!({ "section": title }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Human);
    }

    #[test]
    fn test_table_json() {
        let mut table = TableOutput::new(vec!["Setting".to_string(), "Value".to_string()]);
        table.add_row(vec!["Language".to_string(), "rust".to_string()]);

        let value: serde_json::Value =
            serde_json::from_str(&table.format(OutputFormat::Json)).unwrap();
        assert_eq!(value[0]["Setting"], "Language");
        assert_eq!(value[0]["Value"], "rust");
    }

    #[test]
    fn test_table_human_contains_cells() {
        let mut table = TableOutput::new(vec!["Option".to_string(), "Status".to_string()]);
        table.add_row(vec!["Readme".to_string(), "enabled".to_string()]);
        let text = table.format(OutputFormat::Human);
        assert!(text.contains("Readme"));
        assert!(text.contains("enabled"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_record_keeps_actions() {
        let mut ctx = OutputContextImpl::quiet();
        ctx.record(Action::new(ActionKind::Created, ".gitignore", "gitignore.python"));
        ctx.record(Action::new(ActionKind::Skipped, "README.md", "template not found"));

        assert_eq!(ctx.actions().len(), 2);
        assert_eq!(ctx.actions()[1].kind, ActionKind::Skipped);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::new(ActionKind::Fallback, ".gitattributes", "built-in");
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "fallback");
        assert_eq!(value["target"], ".gitattributes");
    }

    #[test]
    fn test_format_helpers_json() {
        let value: serde_json::Value =
            serde_json::from_str(&format_warning("careful", OutputFormat::Json)).unwrap();
        assert_eq!(value["status"], "warning");
        let header: serde_json::Value =
            serde_json::from_str(&format_header("Title", OutputFormat::Json)).unwrap();
        assert_eq!(header["header"], "Title");
    }

    #[test]
    fn test_json_context_collects_formatted_messages() {
        let mut ctx = OutputContextImpl::new(OutputFormat::Json);
        ctx.print_header("Setup");
        ctx.print_section("Files");
        ctx.print_status(Status::Error, "git failed");
        ctx.print_text("plain");

        assert_eq!(ctx.messages.len(), 4);
        assert_eq!(ctx.messages[0]["header"], "Setup");
        assert_eq!(ctx.messages[1]["section"], "Files");
        assert_eq!(ctx.messages[2]["status"], "error");
        assert_eq!(ctx.messages[2]["message"], "git failed");
        assert_eq!(ctx.messages[3], "plain");
    }
}
