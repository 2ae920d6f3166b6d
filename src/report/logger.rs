// src/report/logger.rs
// =============================================================================
// The report model and the logger that writes it out.
//
// ReportModel holds the state of one checking run:
// - a pass/fail flag per CheckCategory (everything starts as "pass")
// - the ordered list of messages recorded against each category
//
// ErrorLogger owns a ReportModel plus an output sink. In JSON mode the report
// is streamed: `open()` writes the opening of the document, every recorded
// message is written as soon as it arrives, and `finish()` writes the closing.
// If the logger is dropped before `finish()` (early return, `?`, panic
// unwinding), Drop writes the closing so the JSON stays well-formed.
// =============================================================================

use super::category::{CheckCategory, Severity};
use super::message::{JsonLog, ReportMessage};
use std::io::{self, Write};

/// How the report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ReportModel {
    status: [bool; CheckCategory::COUNT],
    messages: Vec<Vec<ReportMessage>>,
}

impl Default for ReportModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportModel {
    pub fn new() -> Self {
        ReportModel {
            status: [true; CheckCategory::COUNT],
            messages: vec![Vec::new(); CheckCategory::COUNT],
        }
    }

    /// Appends a message to its category and marks the category failed.
    pub fn record_failure(&mut self, msg: ReportMessage) {
        let category = msg.id.category();
        self.status[category.index()] = false;
        self.messages[category.index()].push(msg);
    }

    /// Marks a category failed without a message.
    pub fn force_fail(&mut self, category: CheckCategory) {
        self.set_result(category, false);
    }

    pub fn set_result(&mut self, category: CheckCategory, passed: bool) {
        self.status[category.index()] = passed;
    }

    pub fn passed(&self, category: CheckCategory) -> bool {
        self.status[category.index()]
    }

    pub fn messages(&self, category: CheckCategory) -> &[ReportMessage] {
        &self.messages[category.index()]
    }

    /// Every message of the given template, in recording order.
    #[cfg(test)]
    pub fn messages_with_id(&self, id: super::category::MessageId) -> impl Iterator<Item = &ReportMessage> + '_ {
        self.messages(id.category()).iter().filter(move |m| m.id == id)
    }

    /// True when no ERROR-level category failed. Warnings never count.
    pub fn overall_status(&self) -> bool {
        CheckCategory::ALL
            .iter()
            .filter(|c| c.severity() == Severity::Error)
            .all(|c| self.passed(*c))
    }

    /// Human-readable report: one block per failing category, in category order.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for category in CheckCategory::ALL {
            if self.passed(category) {
                continue;
            }
            out.push_str(&format!(
                "[{}] {}:\n",
                category.severity(),
                category.description()
            ));
            for msg in self.messages(category) {
                out.push_str("  ");
                out.push_str(&msg.expand());
                out.push('\n');
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonState {
    NotOpen,
    Open { first: bool },
    Closed,
}

pub struct ErrorLogger<W: Write> {
    model: ReportModel,
    mode: OutputMode,
    out: W,
    json: JsonState,
}

impl<W: Write> ErrorLogger<W> {
    /// Creates the logger and, in JSON mode, writes the opening of the document.
    pub fn open(mode: OutputMode, out: W) -> io::Result<Self> {
        let mut logger = ErrorLogger {
            model: ReportModel::new(),
            mode,
            out,
            json: JsonState::NotOpen,
        };
        if mode == OutputMode::Json {
            logger.out.write_all(b"{\"logs\":[")?;
            logger.out.flush()?;
            logger.json = JsonState::Open { first: true };
        }
        Ok(logger)
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    #[cfg(test)]
    pub fn model(&self) -> &ReportModel {
        &self.model
    }

    /// Records a failure message. This is the only way messages enter the report.
    pub fn add_msg(&mut self, msg: ReportMessage) {
        if let JsonState::Open { first } = self.json {
            // A broken stdout is not a check failure; the model still has the message.
            if let Err(e) = self.write_json_log(&msg, first) {
                log::warn!("Failed to write report entry: {}", e);
            }
            self.json = JsonState::Open { first: false };
        }
        self.model.record_failure(msg);
    }

    pub fn force_fail(&mut self, category: CheckCategory) {
        self.model.force_fail(category);
    }

    pub fn set_result(&mut self, category: CheckCategory, passed: bool) {
        self.model.set_result(category, passed);
    }

    pub fn overall_status(&self) -> bool {
        self.model.overall_status()
    }

    /// Writes the end of the report.
    ///
    /// Text mode writes the whole summary; JSON mode closes the document.
    /// Calling it a second time does nothing.
    pub fn finish(&mut self) -> io::Result<()> {
        match (self.mode, self.json) {
            (OutputMode::Text, JsonState::NotOpen) => {
                let text = self.model.render_text();
                self.out.write_all(text.as_bytes())?;
                self.json = JsonState::Closed;
            }
            (OutputMode::Json, JsonState::Open { .. }) => {
                self.json = JsonState::Closed;
                self.out.write_all(b"\n]}\n")?;
            }
            _ => {}
        }
        self.out.flush()
    }

    fn write_json_log(&mut self, msg: &ReportMessage, first: bool) -> io::Result<()> {
        let sep: &[u8] = if first { b"\n" } else { b",\n" };
        self.out.write_all(sep)?;
        serde_json::to_writer(&mut self.out, &JsonLog(msg))?;
        self.out.flush()
    }
}

impl<W: Write> Drop for ErrorLogger<W> {
    fn drop(&mut self) {
        if let JsonState::Open { .. } = self.json {
            self.json = JsonState::Closed;
            let _ = self.out.write_all(b"\n]}\n");
            let _ = self.out.flush();
        }
    }
}
