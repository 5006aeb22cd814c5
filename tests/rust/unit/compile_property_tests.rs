//! Properties of the compiled query string
//!
//! Brace balance, field inclusion, filter argument placement, and agreement
//! between the emitted type names and the resolved path.

#[cfg(test)]
mod compile_property_tests {
    use glui::catalog::{Catalog, CatalogConfig};
    use glui::query_chain::{QueryChain, SanitizationRules};
    use glui::query_compiler::{compile, compile_with_path};
    use regex::Regex;

    fn chain_of(catalog: &Catalog, kinds: &[&str]) -> QueryChain {
        kinds.iter().fold(QueryChain::new(), |chain, kind| {
            chain.add_hop(catalog, &(*kind).into()).unwrap()
        })
    }

    /// Identifiers directly followed by `(` or ` {` are selection type names.
    fn emitted_types(query: &str) -> Vec<String> {
        let re = Regex::new(r"([_A-Za-z][_0-9A-Za-z]*)(\(| \{)").unwrap();
        re.captures_iter(query).map(|c| c[1].to_string()).collect()
    }

    fn words(query: &str) -> Vec<&str> {
        query
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|w| !w.is_empty())
            .collect()
    }

    #[test]
    fn test_braces_balance_for_every_chain_length() {
        let catalog = Catalog::default();
        let kinds = ["schools", "groups", "teachers", "students"];
        for n in 1..=8 {
            let chosen: Vec<&str> = (0..n).map(|i| kinds[i % kinds.len()]).collect();
            let chain = chain_of(&catalog, &chosen);
            let query = compile(&chain, &SanitizationRules::default()).unwrap();

            let mut depth = 0i32;
            for c in query.as_str().chars() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        assert!(depth >= 0, "closing brace before opening in {}", query);
                    }
                    _ => {}
                }
            }
            assert_eq!(depth, 0, "unbalanced: {}", query);

            // One selection set per hop, plus the operation braces
            let opening = query.as_str().matches('{').count();
            assert_eq!(opening, n + 1, "{}", query);
        }
    }

    #[test]
    fn test_included_fields_present_and_excluded_absent() {
        let catalog = Catalog::default();
        let all = ["id", "firstName", "lastName", "userName"];

        for mask in 0u8..16 {
            let chain = chain_of(&catalog, &["teachers"]);
            let id = chain.hops()[0].id;
            let chain = all
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) == 0)
                .fold(chain, |chain, (_, field)| chain.toggle_field(id, field).unwrap());

            let query = compile(&chain, &SanitizationRules::default()).unwrap();
            let emitted = words(query.as_str());
            for (bit, field) in all.iter().enumerate() {
                let included = mask & (1 << bit) != 0;
                assert_eq!(
                    emitted.contains(field),
                    included,
                    "field {} in {}",
                    field,
                    query
                );
            }
        }
    }

    #[test]
    fn test_all_fields_deselected_still_compiles() {
        let catalog = Catalog::default();
        let chain = chain_of(&catalog, &["schools"]);
        let id = chain.hops()[0].id;
        let chain = chain
            .toggle_field(id, "id")
            .unwrap()
            .toggle_field(id, "name")
            .unwrap();
        let query = compile(&chain, &SanitizationRules::default()).unwrap();
        assert_eq!(query.as_str(), "{schools {}}");
    }

    #[test]
    fn test_filter_parentheses_only_with_non_empty_values() {
        let catalog = Catalog::default();
        let chain = chain_of(&catalog, &["schools", "students"]);
        let school = chain.hops()[0].id;
        let student = chain.hops()[1].id;

        let query = compile(&chain, &SanitizationRules::default()).unwrap();
        assert!(!query.as_str().contains('('));

        let chain = chain.set_filter(student, "userName", "jdoe").unwrap();
        let query = compile(&chain, &SanitizationRules::default()).unwrap();
        assert_eq!(
            query.as_str(),
            r#"{schools {id name students(userName: "jdoe") {id firstName lastName userName}}}"#
        );

        // Cleared again: back to no arguments at all
        let chain = chain
            .set_filter(student, "userName", "")
            .unwrap()
            .set_filter(school, "name", "")
            .unwrap();
        let query = compile(&chain, &SanitizationRules::default()).unwrap();
        assert!(!query.as_str().contains('('));
    }

    #[test]
    fn test_filters_follow_catalog_order() {
        let catalog = Catalog::default();
        let chain = chain_of(&catalog, &["students"]);
        let id = chain.hops()[0].id;
        // Set in reverse catalog order
        let chain = chain
            .set_filter(id, "userName", "jd")
            .unwrap()
            .set_filter(id, "firstName", "Jane")
            .unwrap();
        let query = compile(&chain, &SanitizationRules::default()).unwrap();
        assert!(query
            .as_str()
            .starts_with(r#"{students(firstName: "Jane", userName: "jd") {"#));
    }

    #[test]
    fn test_emitted_types_match_resolved_path() {
        let catalog = Catalog::default();
        let rules = SanitizationRules::default();
        for kinds in [
            vec!["students", "schools"],
            vec!["groups", "schools", "teachers"],
            vec!["schools", "groups", "students", "schools"],
            vec!["teachers", "schools"],
        ] {
            let chain = chain_of(&catalog, &kinds);
            let (query, path) = compile_with_path(&chain, &rules).unwrap();
            let resolved: Vec<String> = chain
                .resolve_path(&rules)
                .type_names()
                .map(str::to_string)
                .collect();
            assert_eq!(emitted_types(query.as_str()), resolved, "{}", query);
            assert_eq!(path, chain.resolve_path(&rules));
        }
    }

    #[test]
    fn test_schools_after_students_is_emitted_singular() {
        let catalog = Catalog::default();
        let chain = chain_of(&catalog, &["students", "schools"]);
        let query = compile(&chain, &SanitizationRules::default()).unwrap();
        assert_eq!(emitted_types(query.as_str()), vec!["students", "school"]);
    }

    #[test]
    fn test_singular_catalog_kinds() {
        let catalog = CatalogConfig::from_yaml_str(
            r#"
entities:
  - kind: school
    fields: [id, name]
    collection: false
  - kind: student
    fields: [id, username]
  - kind: schools
    fields: [id, name]
"#,
        )
        .unwrap()
        .into_catalog()
        .unwrap();

        let chain = chain_of(&catalog, &["student", "schools"]);
        let student = chain.hops()[0].id;
        let chain = chain.toggle_field(student, "id").unwrap();
        let query = compile(&chain, &SanitizationRules::default()).unwrap();
        assert_eq!(query.as_str(), "{student {username school {id name}}}");
    }

    #[test]
    fn test_quotes_in_filter_values_are_escaped() {
        let catalog = Catalog::default();
        let chain = chain_of(&catalog, &["schools"]);
        let id = chain.hops()[0].id;
        let chain = chain.set_filter(id, "name", r#"St. "Mary's""#).unwrap();
        let query = compile(&chain, &SanitizationRules::default()).unwrap();
        assert_eq!(
            query.as_str(),
            r#"{schools(name: "St. \"Mary's\"") {id name}}"#
        );
    }
}
