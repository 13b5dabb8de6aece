//! Routing of analysis messages into the report.
//!
//! The [`DiagnosticRouter`] holds the messages supplied with a surface
//! model and hands them out by association, marking each handed-out
//! message as consumed. Whatever is left unconsumed at the end of a pass
//! is rendered in the trailing block of the report, so no message is ever
//! silently dropped.
//!
//! The router is also where the engine raises its own findings: rendering
//! `(undocumented)` records a missing-documentation diagnostic as a side
//! effect.

use log::warn;

use veneer_core::declaration::DeclarationId;
use veneer_core::entity::EntityId;
use veneer_core::message::{ApiMessage, MessageAssociation};

/// One routed message with its consumption state.
#[derive(Debug)]
struct RoutedMessage {
    message: ApiMessage,
    consumed: bool,
}

/// Accumulates and routes messages during one report pass.
#[derive(Debug, Default)]
pub struct DiagnosticRouter {
    messages: Vec<RoutedMessage>,
    raised: Vec<String>,
}

impl DiagnosticRouter {
    /// Create a router over the messages of a surface model.
    pub fn new(messages: &[ApiMessage]) -> Self {
        Self {
            messages: messages
                .iter()
                .map(|message| RoutedMessage {
                    message: message.clone(),
                    consumed: false,
                })
                .collect(),
            raised: Vec::new(),
        }
    }

    /// Messages associated with `declaration`, marking them consumed.
    pub fn take_for_declaration(&mut self, declaration: DeclarationId) -> Vec<String> {
        self.take(|association| {
            matches!(
                association,
                MessageAssociation::Declaration { declaration: d } if *d == declaration
            )
        })
    }

    /// Messages associated with one export name of `entity`, marking them
    /// consumed.
    pub fn take_for_export_name(&mut self, entity: EntityId, name: &str) -> Vec<String> {
        self.take(|association| {
            matches!(
                association,
                MessageAssociation::ExportName { entity: e, name: n } if *e == entity && n == name
            )
        })
    }

    /// All messages not consumed by any declaration or export clause, in
    /// input order, marking them consumed.
    pub fn take_unconsumed(&mut self) -> Vec<String> {
        self.take(|_| true)
    }

    fn take(&mut self, matches: impl Fn(&MessageAssociation) -> bool) -> Vec<String> {
        let mut taken = Vec::new();
        for routed in &mut self.messages {
            if !routed.consumed && matches(&routed.message.association) {
                routed.consumed = true;
                taken.push(routed.message.text.clone());
            }
        }
        taken
    }

    /// Record a missing-documentation finding raised by the engine itself.
    pub fn report_undocumented(&mut self, name: &str, file: &str) {
        warn!(declaration = name, file = file; "Declaration has no documentation comment");
        self.raised.push(format!("{file}: `{name}` is undocumented"));
    }

    /// Findings raised by the engine during this pass.
    pub fn raised(&self) -> &[String] {
        &self.raised
    }
}
