use docfilter::FindOptions;
use docfilter::query::{SortDirection, SortField, get_sort_definitions};
use proptest::prelude::*;

fn sort_field() -> impl Strategy<Value = SortField> {
    (prop_oneof![Just(""), Just("a"), Just("b"), Just("c"), Just("d")], any::<bool>()).prop_map(
        |(f, asc)| {
            SortField::new(f, if asc { SortDirection::Ascending } else { SortDirection::Descending })
        },
    )
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 64,
        .. proptest::test_runner::Config::default()
    })]

    // First occurrence of each named field wins; blanks never appear.
    #[test]
    fn prop_sort_first_occurrence_wins(sorts in proptest::collection::vec(sort_field(), 0..12)) {
        let mut expected: Vec<(String, i32)> = Vec::new();
        for s in &sorts {
            if s.field.is_empty() || expected.iter().any(|(f, _)| *f == s.field) {
                continue;
            }
            let v = if s.direction == SortDirection::Ascending { 1 } else { -1 };
            expected.push((s.field.clone(), v));
        }
        match get_sort_definitions(&sorts) {
            None => prop_assert!(expected.is_empty()),
            Some(d) => {
                let got: Vec<(String, i32)> = d
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_i32().unwrap()))
                    .collect();
                prop_assert_eq!(got, expected);
            }
        }
    }

    #[test]
    fn prop_paging_math(page in 0u64..1000, size in 0u64..1000) {
        let o = FindOptions::default().paged(page, size);
        if page > 0 && size > 0 {
            prop_assert_eq!(o.skip, Some((page - 1) * size));
            prop_assert_eq!(o.limit, Some(size));
        } else {
            prop_assert_eq!(o.skip, None);
            prop_assert_eq!(o.limit, None);
        }
    }
}
