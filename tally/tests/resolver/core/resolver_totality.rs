use proptest::prelude::*;
use tally::{AttributionRequest, TallyError, VisitSignals, WindowId};
use tally_mock::StoreBehavior;

use crate::helpers::{anonymous_custom, channel, harness, key, media, video};

fn arb_signals() -> impl Strategy<Value = VisitSignals> {
    prop_oneof![
        ("UC[0-9]{1,2}", 0u64..100).prop_map(|(c, d)| VisitSignals::from(video(&c, "v1", d))),
        "UC[0-9]{1,2}".prop_map(|c| VisitSignals::from(channel(&c, "Acme"))),
        Just(VisitSignals::from(anonymous_custom())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_request_reports_exactly_once(
        visits in prop::collection::vec(arb_signals(), 1..12),
        failing_save in any::<bool>(),
    ) {
        tokio_test::block_on(async {
            let h = harness();
            if failing_save {
                h.controller
                    .set_default_save_behavior(StoreBehavior::Fail(TallyError::store("mem", "down")))
                    .await;
            }
            for (i, signals) in visits.iter().enumerate() {
                let window = WindowId(i as u64);
                let request = AttributionRequest::new(window, format!("https://page/{i}"), signals.clone());
                let outcome = h.tally.attribute(request).await;
                let reports = h.reporter.for_window(window);
                assert_eq!(reports.len(), 1, "window {i} got {reports:?}");
                assert_eq!(outcome.is_resolved(), reports[0].record().is_some());
            }
            assert_eq!(h.reporter.len(), visits.len());
        });
    }

    #[test]
    fn accumulated_equals_sum_of_observed(durations in prop::collection::vec(0u64..10_000, 1..16)) {
        tokio_test::block_on(async {
            let h = harness();
            for (i, d) in durations.iter().enumerate() {
                // Interleave an unrelated media key to check isolation
                let other = AttributionRequest::new(WindowId(1), "u", video("UC1", "other", 1));
                h.tally.attribute(other).await;
                let request = AttributionRequest::new(WindowId(i as u64), "u", video("UC1", "v1", *d));
                assert!(h.tally.attribute(request).await.is_resolved());
            }
            let stored = h.controller.record(&key("UC1")).await.unwrap();
            assert_eq!(stored.media_duration(&media("v1")), Some(durations.iter().sum()));
            assert_eq!(stored.media_duration(&media("other")), Some(durations.len() as u64));
        });
    }
}
