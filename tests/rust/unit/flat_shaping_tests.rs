//! Flat and nested shaping of canned responses

#[cfg(test)]
mod flat_shaping_tests {
    use glui::catalog::Catalog;
    use glui::query_chain::{Hop, HopId, SanitizationRules, SanitizedPath};
    use glui::result_shaper::{flatten, shape, FetchState, RenderTree, ShapeMode};
    use serde_json::{json, Value};

    fn path(kinds: &[&str]) -> SanitizedPath {
        let hops: Vec<Hop> = kinds
            .iter()
            .map(|k| Hop {
                id: HopId::new(),
                kind: (*k).into(),
            })
            .collect();
        glui::query_chain::resolve_path(&hops, &SanitizationRules::default())
    }

    fn two_schools() -> Value {
        json!({
            "school": [
                {
                    "name": "North",
                    "students": [
                        {"userName": "amy", "firstName": "Amy", "lastName": "Lee"},
                        {"userName": "bob", "firstName": "Bob", "lastName": "Ray"}
                    ]
                },
                {
                    "name": "South",
                    "students": [
                        {"userName": "amy", "firstName": "Amy", "lastName": "Lee"},
                        {"userName": "cat", "firstName": "Cat"}
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_two_schools_duplicate_students_collapse() {
        let fetch = FetchState::Ready(two_schools());
        let tree = shape(
            &fetch,
            &path(&["school", "students"]),
            ShapeMode::Flat,
            &Catalog::default(),
        )
        .unwrap();

        let entries = match tree {
            RenderTree::Flat(entries) => entries,
            other => panic!("expected flat tree, got {:?}", other),
        };
        assert!(entries.len() <= 4);
        let names: Vec<&str> = entries.iter().map(|e| e.primary.as_str()).collect();
        assert_eq!(names, vec!["amy", "bob", "cat"]);
        assert_eq!(entries[0].secondary, "Amy Lee");
        assert_eq!(entries[2].secondary, "Cat");
    }

    #[test]
    fn test_flatten_size_is_sum_before_dedupe() {
        // Distinct students: dedupe keeps everything, so the flattened size
        // equals the sum of the per-school collections.
        let data = json!({
            "schools": [
                {"students": [{"id": 1}, {"id": 2}, {"id": 3}]},
                {"students": []},
                {"students": [{"id": 4}, {"id": 5}]}
            ]
        });
        let flat = flatten(&data, &path(&["schools", "students"]), &Catalog::default());
        assert_eq!(flat.len(), 3 + 0 + 2);
    }

    #[test]
    fn test_dedupe_never_grows_and_keeps_first_order() {
        let data = json!({
            "groups": [
                {"teachers": [{"id": 2}, {"id": 1}]},
                {"teachers": [{"id": 1}, {"id": 3}, {"id": 2}]}
            ]
        });
        let flat = flatten(&data, &path(&["groups", "teachers"]), &Catalog::default());
        assert!(flat.len() <= 5);
        assert_eq!(flat, vec![&json!({"id": 2}), &json!({"id": 1}), &json!({"id": 3})]);
    }

    #[test]
    fn test_three_level_walk() {
        let data = json!({
            "schools": [
                {"groups": [
                    {"students": [{"userName": "a"}, {"userName": "b"}]},
                    {"students": [{"userName": "b"}]}
                ]},
                {"groups": [
                    {"students": [{"userName": "c"}]}
                ]}
            ]
        });
        let flat = flatten(
            &data,
            &path(&["schools", "groups", "students"]),
            &Catalog::default(),
        );
        let names: Vec<&str> = flat
            .iter()
            .filter_map(|v| v.get("userName").and_then(Value::as_str))
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nested_mode_keeps_every_item() {
        let fetch = FetchState::Ready(two_schools());
        let tree = shape(
            &fetch,
            &path(&["school", "students"]),
            ShapeMode::Nested,
            &Catalog::default(),
        )
        .unwrap();
        assert_eq!(tree.len(), 2);
        let text = tree.to_string();
        assert_eq!(text.matches("userName - amy").count(), 2);
        assert!(text.contains("students (More)"));
    }

    #[test]
    fn test_failed_fetch_renders_nothing() {
        assert!(shape(
            &FetchState::Failed,
            &path(&["school", "students"]),
            ShapeMode::Flat,
            &Catalog::default()
        )
        .is_none());
    }
}
