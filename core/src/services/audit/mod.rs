//! Security audit trail for token lifecycle events.

mod event;
mod sink;

pub use event::{ReuseReason, SecurityEvent};
pub use sink::{AuditSink, MemoryAuditSink, TracingAuditSink, SECURITY_TARGET};

#[cfg(test)]
mod tests;
