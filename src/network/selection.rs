//! Detail row selection, persisted in the location's query string.

use crate::analytics::{Analytics, AnalyticsEvent};
use crate::constants::DETAIL_ROW_PARAM;
use crate::context::ViewContext;
use crate::location::Location;

use super::frame::NetworkFrame;

/// Row index named by the location, if any.
pub fn selected_row(location: &Location) -> Option<usize> {
    location
        .query(DETAIL_ROW_PARAM)
        .and_then(|value| value.parse().ok())
}

fn open(
    location: &mut Location,
    index: usize,
    frame: &NetworkFrame,
    context: &ViewContext,
    analytics: &dyn Analytics,
) {
    location.set_query(DETAIL_ROW_PARAM, &index.to_string());
    analytics.track(AnalyticsEvent::NetworkDetailsOpened {
        organization: context.organization.clone(),
        project_id: context.project_id.clone(),
        is_sdk_setup: context.network_details,
        resource_method: frame.method().to_string(),
        resource_status: frame.status(),
        resource_type: frame.op.clone(),
    });
}

/// Close the detail drawer. `current` is the selection as the table sees it;
/// a parameter naming a row that no longer exists is dropped without an
/// event. Returns false if nothing was selected.
pub fn close(
    location: &mut Location,
    current: Option<usize>,
    context: &ViewContext,
    analytics: &dyn Analytics,
) -> bool {
    if current.is_none() {
        if location.query(DETAIL_ROW_PARAM).is_some() {
            tracing::debug!("dropping stale detail row");
            location.set_query(DETAIL_ROW_PARAM, "");
        }
        return false;
    }
    location.set_query(DETAIL_ROW_PARAM, "");
    analytics.track(AnalyticsEvent::NetworkDetailsClosed {
        organization: context.organization.clone(),
        project_id: context.project_id.clone(),
    });
    true
}

/// Click on row `index`: the selected row closes, any other row replaces the
/// current selection (closed, then opened).
pub fn toggle(
    location: &mut Location,
    current: Option<usize>,
    index: usize,
    frame: &NetworkFrame,
    context: &ViewContext,
    analytics: &dyn Analytics,
) {
    close(location, current, context, analytics);
    if current != Some(index) {
        open(location, index, frame, context, analytics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RecordingAnalytics;
    use crate::network::frame::mock_frames;

    fn setup() -> (Location, ViewContext, RecordingAnalytics, Vec<NetworkFrame>) {
        (
            Location::for_replay("abc").unwrap(),
            ViewContext::default(),
            RecordingAnalytics::default(),
            mock_frames(0.0, 10),
        )
    }

    #[test]
    fn test_select_then_reselect_clears() {
        let (mut location, context, analytics, frames) = setup();

        let current = selected_row(&location);
        toggle(&mut location, current, 3, &frames[3], &context, &analytics);
        assert_eq!(selected_row(&location), Some(3));
        assert_eq!(location.query(DETAIL_ROW_PARAM), Some("3".to_string()));
        assert_eq!(analytics.names(), vec!["replay.details-network-panel-opened"]);

        let current = selected_row(&location);
        toggle(&mut location, current, 3, &frames[3], &context, &analytics);
        assert_eq!(selected_row(&location), None);
        assert_eq!(location.query(DETAIL_ROW_PARAM), None);
        assert_eq!(
            analytics.names(),
            vec![
                "replay.details-network-panel-opened",
                "replay.details-network-panel-closed"
            ]
        );
    }

    #[test]
    fn test_switching_rows_closes_then_opens() {
        let (mut location, context, analytics, frames) = setup();
        let current = selected_row(&location);
        toggle(&mut location, current, 1, &frames[1], &context, &analytics);
        analytics.clear();

        let current = selected_row(&location);
        toggle(&mut location, current, 6, &frames[6], &context, &analytics);
        assert_eq!(selected_row(&location), Some(6));
        assert_eq!(
            analytics.names(),
            vec![
                "replay.details-network-panel-closed",
                "replay.details-network-panel-opened"
            ]
        );
    }

    #[test]
    fn test_opened_event_describes_row() {
        let (mut location, mut context, analytics, frames) = setup();
        context.network_details = true;
        let current = selected_row(&location);
        toggle(&mut location, current, 2, &frames[2], &context, &analytics);

        match &analytics.events()[0] {
            AnalyticsEvent::NetworkDetailsOpened {
                is_sdk_setup,
                resource_method,
                resource_status,
                resource_type,
                ..
            } => {
                assert!(*is_sdk_setup);
                assert_eq!(resource_method, frames[2].method());
                assert_eq!(*resource_status, frames[2].status());
                assert_eq!(resource_type, &frames[2].op);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_close_without_selection_is_silent() {
        let (mut location, context, analytics, _) = setup();
        assert!(!close(&mut location, None, &context, &analytics));
        assert!(analytics.names().is_empty());
    }

    #[test]
    fn test_stale_param_is_dropped_silently() {
        let (_, context, analytics, frames) = setup();
        let mut location = Location::new("/replays/abc/?n_detail_row=8").unwrap();

        toggle(&mut location, None, 0, &frames[0], &context, &analytics);
        assert_eq!(selected_row(&location), Some(0));
        assert_eq!(analytics.names(), vec!["replay.details-network-panel-opened"]);

        analytics.clear();
        let mut location = Location::new("/replays/abc/?n_detail_row=8").unwrap();
        assert!(!close(&mut location, None, &context, &analytics));
        assert_eq!(location.query(DETAIL_ROW_PARAM), None);
        assert!(analytics.names().is_empty());
    }

    #[test]
    fn test_unparseable_param_is_no_selection() {
        let location = Location::new("/replays/abc/?n_detail_row=nope").unwrap();
        assert_eq!(selected_row(&location), None);
    }
}
