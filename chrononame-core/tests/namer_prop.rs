use chrono::NaiveDate;
use chrononame_core::synthesize;
use proptest::prelude::*;
use std::collections::HashSet;

fn timestamps() -> impl Strategy<Value = chrono::NaiveDateTime> {
    (2000i32..2100, 1u32..13, 1u32..29, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| {
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap()
        },
    )
}

fn extensions() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        prop::sample::select(vec!["jpg", "jpeg", "png", "txt", "MOV", "gif"])
            .prop_map(|e| Some(e.to_string())),
    ]
}

proptest! {
    // No sequence of synthesize calls sharing one reservation set can ever
    // produce a duplicate name.
    #[test]
    fn synthesized_names_never_collide(
        inputs in prop::collection::vec((timestamps(), extensions()), 1..40)
    ) {
        let mut used = HashSet::new();
        let mut seen = HashSet::new();
        for (ts, ext) in inputs {
            let name = synthesize(ts, ext.as_deref(), &mut used);
            prop_assert!(seen.insert(name.clone()), "duplicate name: {name}");
        }
    }

    #[test]
    fn names_follow_the_canonical_shape(
        ts in timestamps(),
        ext in extensions(),
    ) {
        let mut used = HashSet::new();
        let name = synthesize(ts, ext.as_deref(), &mut used);

        let prefix = ext
            .as_deref()
            .map_or("FILE".to_string(), str::to_uppercase);
        let expected_start = format!("{prefix}_");
        prop_assert!(name.starts_with(&expected_start));
        prop_assert!(name.contains("AM") || name.contains("PM"));
        if let Some(ext) = ext {
            let expected_end = format!(".{}", ext.to_lowercase());
            prop_assert!(name.ends_with(&expected_end));
        }
    }
}
