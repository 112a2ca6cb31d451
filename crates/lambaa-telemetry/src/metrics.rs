//! Routing metrics.
//!
//! Recorded through the `metrics` facade; no exporter is installed here.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `lambaa_events_total` | Counter | `kind`, `outcome` |
//! | `lambaa_route_duration_seconds` | Histogram | `kind` |

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::fmt;
use std::time::Duration;

/// Counter of routed events.
pub const EVENTS_TOTAL: &str = "lambaa_events_total";

/// Histogram of time spent in `route`.
pub const ROUTE_DURATION_SECONDS: &str = "lambaa_route_duration_seconds";

/// How a routed event finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteOutcome {
    /// The pipeline returned a value.
    Handled,
    /// The pipeline returned an error.
    Failed,
    /// No destination matched the event.
    Unroutable,
}

impl RouteOutcome {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Handled => "handled",
            Self::Failed => "failed",
            Self::Unroutable => "unroutable",
        }
    }
}

impl fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registers help text for the routing metrics with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(EVENTS_TOTAL, Unit::Count, "Events passed to the router");
    describe_histogram!(
        ROUTE_DURATION_SECONDS,
        Unit::Seconds,
        "Time from event receipt to pipeline completion"
    );
}

/// Records one routed event.
pub fn record_route(kind: &str, outcome: RouteOutcome, duration: Duration) {
    counter!(
        EVENTS_TOTAL,
        "kind" => kind.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    histogram!(ROUTE_DURATION_SECONDS, "kind" => kind.to_string())
        .record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString,
    };
    use std::sync::{Arc, Mutex};

    /// Captures the keys the code under test registers.
    #[derive(Default)]
    struct Capture {
        keys: Arc<Mutex<Vec<String>>>,
    }

    impl Capture {
        fn record(&self, key: &Key) {
            let mut labels: Vec<String> = key
                .labels()
                .map(|label| format!("{}={}", label.key(), label.value()))
                .collect();
            labels.sort();
            self.keys
                .lock()
                .unwrap()
                .push(format!("{}{{{}}}", key.name(), labels.join(",")));
        }
    }

    impl Recorder for Capture {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.record(key);
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            self.record(key);
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            self.record(key);
            Histogram::noop()
        }
    }

    #[test]
    fn test_record_route_labels() {
        let capture = Capture::default();
        let keys = Arc::clone(&capture.keys);

        metrics::with_local_recorder(&capture, || {
            describe_metrics();
            record_route("sqs", RouteOutcome::Handled, Duration::from_millis(3));
        });

        assert_eq!(
            *keys.lock().unwrap(),
            vec![
                "lambaa_events_total{kind=sqs,outcome=handled}".to_string(),
                "lambaa_route_duration_seconds{kind=sqs}".to_string(),
            ]
        );
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_route("unknown", RouteOutcome::Unroutable, Duration::ZERO);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(RouteOutcome::Handled.to_string(), "handled");
        assert_eq!(RouteOutcome::Failed.as_str(), "failed");
        assert_eq!(RouteOutcome::Unroutable.as_str(), "unroutable");
    }
}
