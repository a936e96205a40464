use crate::error::Result;
use tracing::Span;

/// Label attached to every protocol debug line
pub const BOT_LABEL: &str = "slack_socket";

/// Minimal logging sink handed to the Slack protocol layer.
///
/// Mirrors the single-method logger contract socket clients usually expect:
/// one already-formatted line per call, plus a stack depth hint.
pub trait ProtocolLog: Send + Sync {
    fn output(&self, call_depth: usize, message: &str) -> Result<()>;
}

/// Routes protocol output into `tracing` at debug level
#[derive(Debug, Clone)]
pub struct DebugLogger {
    span: Span,
}

impl DebugLogger {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Adapter bound to a child of `parent` labelled `bot = "slack_socket"`
    pub fn scoped(parent: &Span) -> Self {
        Self::new(tracing::info_span!(parent: parent, "slack", bot = BOT_LABEL))
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!(parent: &self.span, "{}", message);
    }
}

impl ProtocolLog for DebugLogger {
    fn output(&self, _call_depth: usize, message: &str) -> Result<()> {
        self.debug(message);
        Ok(())
    }
}
