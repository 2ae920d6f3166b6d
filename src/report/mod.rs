// src/report/mod.rs
// =============================================================================
// This module contains the report model shared by every check.
//
// Submodules:
// - category: the fixed check categories and message templates
// - message: one report message and its JSON form
// - logger: pass/fail state, message lists, text and JSON output
// =============================================================================

mod category;
mod logger;
mod message;

pub use category::{CheckCategory, MessageId};
pub use logger::{ErrorLogger, OutputMode};
#[cfg(test)]
pub use logger::ReportModel;
pub use message::ReportMessage;
