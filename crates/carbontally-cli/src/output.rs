use console::{style, StyledObject};
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Where a status line lands
#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
        }
    }

    fn status_line(&self, status: &str, glyph: StyledObject<&str>, message: impl Display, stream: Stream) {
        let line = match self.format {
            OutputFormat::Human => format!("{} {}", glyph.bold(), message),
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": status,
                    "message": message.to_string(),
                });
                serde_json::to_string_pretty(&output).unwrap()
            }
        };
        match stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }

    pub fn success(&self, message: impl Display) {
        self.status_line("success", style("✓").green(), message, Stream::Stdout);
    }

    pub fn info(&self, message: impl Display) {
        self.status_line("info", style("ℹ").blue(), message, Stream::Stdout);
    }

    pub fn warning(&self, message: impl Display) {
        self.status_line("warning", style("⚠").yellow(), message, Stream::Stderr);
    }

    pub fn error(&self, message: impl Display) {
        self.status_line("error", style("✗").red(), message, Stream::Stderr);
    }

    pub fn table<T: Tabled>(&self, data: Vec<T>) {
        match self.format {
            OutputFormat::Human => {
                if data.is_empty() {
                    println!("{}", style("(no data)").dim());
                } else {
                    let mut table = Table::new(data);
                    table.with(Style::rounded());
                    println!("{}", table);
                }
            }
            // JSON callers emit structured data through `result` instead
            OutputFormat::Json => {}
        }
    }

    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let rendered = match self.format {
            OutputFormat::Human => serde_json::to_string_pretty(&data)?,
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "success",
                    "data": data,
                });
                serde_json::to_string_pretty(&output)?
            }
        };
        println!("{}", rendered);
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{}: {}", style(key).bold(), value);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    key.to_string(): value.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            }
        }
    }

    pub fn section(&self, title: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("\n{}", style(title).bold().underlined());
            }
            OutputFormat::Json => {}
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}
