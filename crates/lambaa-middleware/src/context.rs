//! Per-dispatch middleware context.

use lambaa_core::EventKind;

/// Read-only description of where the current event is headed.
///
/// Created once per routed event and shared by every middleware in the chain.
/// For an event with no route, both destination fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiddlewareContext {
    destination_handler_group: Option<String>,
    destination_method: Option<String>,
    event_kind: Option<EventKind>,
}

impl MiddlewareContext {
    /// Context for an event with no resolved destination.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for an event resolved to `handler_group.method`.
    #[must_use]
    pub fn for_destination(handler_group: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            destination_handler_group: Some(handler_group.into()),
            destination_method: Some(method.into()),
            event_kind: None,
        }
    }

    /// Records the classified kind of the event.
    #[must_use]
    pub const fn with_event_kind(mut self, kind: Option<EventKind>) -> Self {
        self.event_kind = kind;
        self
    }

    /// Type name of the handler group the event was routed to.
    #[must_use]
    pub fn destination_handler_group(&self) -> Option<&str> {
        self.destination_handler_group.as_deref()
    }

    /// Method id the event was routed to.
    #[must_use]
    pub fn destination_method(&self) -> Option<&str> {
        self.destination_method.as_deref()
    }

    /// Classified kind of the event, if it was recognised.
    #[must_use]
    pub const fn event_kind(&self) -> Option<EventKind> {
        self.event_kind
    }

    /// Returns `true` if a destination was resolved.
    #[must_use]
    pub const fn is_routed(&self) -> bool {
        self.destination_method.is_some()
    }

    /// Returns `true` if the event came from API Gateway.
    #[must_use]
    pub fn is_http(&self) -> bool {
        self.event_kind.is_some_and(EventKind::is_http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrouted_context() {
        let ctx = MiddlewareContext::new();
        assert!(!ctx.is_routed());
        assert_eq!(ctx.destination_handler_group(), None);
        assert!(!ctx.is_http());
    }

    #[test]
    fn test_destination() {
        let ctx = MiddlewareContext::for_destination("UsersController", "getUser")
            .with_event_kind(Some(EventKind::ApiGateway));
        assert!(ctx.is_routed());
        assert_eq!(ctx.destination_handler_group(), Some("UsersController"));
        assert_eq!(ctx.destination_method(), Some("getUser"));
        assert!(ctx.is_http());
    }

    #[test]
    fn test_non_http_kind() {
        let ctx = MiddlewareContext::new().with_event_kind(Some(EventKind::Sqs));
        assert_eq!(ctx.event_kind(), Some(EventKind::Sqs));
        assert!(!ctx.is_http());
    }
}
