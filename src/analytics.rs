//! Product analytics events.
//!
//! Events are reported through the [`Analytics`] trait; the default sink
//! writes them as structured `tracing` events.

use crate::layout::LayoutVariant;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    NetworkDetailsOpened {
        organization: String,
        project_id: String,
        is_sdk_setup: bool,
        resource_method: String,
        resource_status: String,
        resource_type: String,
    },
    NetworkDetailsClosed {
        organization: String,
        project_id: String,
    },
    LayoutChanged {
        organization: String,
        layout: LayoutVariant,
    },
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NetworkDetailsOpened { .. } => "replay.details-network-panel-opened",
            Self::NetworkDetailsClosed { .. } => "replay.details-network-panel-closed",
            Self::LayoutChanged { .. } => "replay.details-layout-changed",
        }
    }
}

pub trait Analytics {
    fn track(&self, event: AnalyticsEvent);
}

/// Sends events to the log under the `replayview::analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        let name = event.name();
        match event {
            AnalyticsEvent::NetworkDetailsOpened {
                organization,
                project_id,
                is_sdk_setup,
                resource_method,
                resource_status,
                resource_type,
            } => tracing::info!(
                target: "replayview::analytics",
                event = name,
                %organization,
                %project_id,
                is_sdk_setup,
                %resource_method,
                %resource_status,
                %resource_type,
            ),
            AnalyticsEvent::NetworkDetailsClosed {
                organization,
                project_id,
            } => tracing::info!(
                target: "replayview::analytics",
                event = name,
                %organization,
                %project_id,
            ),
            AnalyticsEvent::LayoutChanged {
                organization,
                layout,
            } => tracing::info!(
                target: "replayview::analytics",
                event = name,
                %organization,
                %layout,
            ),
        }
    }
}

/// Keeps every tracked event, for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: std::cell::RefCell<Vec<AnalyticsEvent>>,
}

#[cfg(test)]
impl RecordingAnalytics {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(AnalyticsEvent::name).collect()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

#[cfg(test)]
impl Analytics for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        self.events.borrow_mut().push(event);
    }
}
