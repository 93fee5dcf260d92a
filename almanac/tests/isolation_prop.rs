mod helpers;

use almanac::{AlmanacError, Source, Status};
use helpers::{dynamic, query};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]
    #[test]
    fn status_tracks_exactly_the_failed_sources(
        failing in prop::sample::subsequence(Source::ALL.to_vec(), 0..=3),
        days in 1u32..=10,
    ) {
        let result = tokio_test::block_on(async {
            let (builder, controller) = dynamic();
            let almanac = builder.build().unwrap();
            for s in &failing {
                controller.fail(*s, AlmanacError::Data(format!("{s} broke"))).await;
            }
            let end = format!("2024-02-{days:02}");
            almanac.fetch_all(&query("2024-02-01", &end, "any")).await
        });

        let expected = match failing.len() {
            0 => Status::Success,
            3 => Status::Failure,
            _ => Status::PartialFailure,
        };
        prop_assert_eq!(result.status, expected);
        prop_assert_eq!(&result.failed_sources, &failing);
        prop_assert_eq!(result.data.len(), days as usize);
        for s in &failing {
            prop_assert!(result.message.contains(s.as_str()));
        }
    }
}
