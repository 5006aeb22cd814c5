//! Catalog and sanitization rules loaded from YAML files, driving a session

#[cfg(test)]
mod catalog_file_tests {
    use std::io::Write;

    use glui::catalog::{Catalog, CatalogError};
    use glui::config::GluiConfig;
    use glui::result_shaper::{FetchState, RenderTree, ShapeMode};
    use glui::session::Session;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_session_with_custom_catalog_and_rules() {
        let catalog = yaml_file(
            r#"
entities:
  - kind: courses
    fields: [code, title]
    filters: [code]
  - kind: teachers
    fields: [userName]
"#,
        );
        let rules = yaml_file(
            r#"
courses:
  teachers: teacher
"#,
        );
        let config = GluiConfig {
            catalog_path: Some(catalog.path().to_path_buf()),
            sanitizer_rules_path: Some(rules.path().to_path_buf()),
            default_mode: ShapeMode::Flat,
            ..Default::default()
        };

        let mut session = Session::new(
            config.load_catalog().unwrap(),
            config.load_rules().unwrap(),
            &config,
        );
        let course = session.add_hop(&"courses".into()).unwrap();
        session.add_hop(&"teachers".into()).unwrap();
        session.set_filter(course, "code", "CS101").unwrap();

        let query = session.search().unwrap().clone();
        assert_eq!(
            query.as_str(),
            r#"{courses(code: "CS101") {code title teacher {userName}}}"#
        );

        session.record_response(FetchState::Ready(json!({
            "courses": [
                {"code": "CS101", "teacher": {"userName": "turing"}},
                {"code": "CS101", "teacher": {"userName": "turing"}}
            ]
        })));
        match session.render().unwrap() {
            RenderTree::Flat(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].primary, "turing");
            }
            other => panic!("expected flat tree, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_in_custom_catalog() {
        let catalog = yaml_file("entities:\n  - kind: courses\n    fields: [code]\n");
        let catalog = Catalog::from_yaml_file(catalog.path()).unwrap();
        assert!(matches!(
            catalog.entity(&"schools".into()),
            Err(CatalogError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_invalid_catalog_file_is_rejected() {
        let catalog = yaml_file("entities:\n  - kind: \"bad kind\"\n    fields: [code]\n");
        assert!(matches!(
            Catalog::from_yaml_file(catalog.path()),
            Err(CatalogError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_addable_kinds_follow_custom_catalog_order() {
        let catalog = yaml_file(
            "entities:\n  - kind: b\n    fields: [id]\n  - kind: a\n    fields: [id]\n",
        );
        let mut session = Session::new(
            Catalog::from_yaml_file(catalog.path()).unwrap(),
            Default::default(),
            &GluiConfig::default(),
        );
        let offered: Vec<String> = session
            .addable_kinds()
            .into_iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(offered, vec!["b", "a"]);

        session.add_hop(&"a".into()).unwrap();
        let offered: Vec<String> = session
            .addable_kinds()
            .into_iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(offered, vec!["b"]);
    }
}
