use crate::tables::TagRule;

pub const DEFAULT_TAG: &str = "General";

/// Labels whose keywords occur in `text`, in rule order. Never empty.
pub fn tag_text(text: &str, rules: &[TagRule]) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tags: Vec<String> = rules
        .iter()
        .filter(|rule| rule.keywords.iter().any(|k| lowered.contains(k.as_str())))
        .map(|rule| rule.label.clone())
        .collect();
    if tags.is_empty() {
        vec![DEFAULT_TAG.to_string()]
    } else {
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::AnalysisTables;

    #[test]
    fn no_match_yields_general() {
        let tables = AnalysisTables::default();
        assert_eq!(tag_text("Lorem ipsum dolor.", &tables.tag_rules), vec!["General"]);
        assert_eq!(tag_text("", &tables.tag_rules), vec!["General"]);
    }

    #[test]
    fn tags_follow_table_order() {
        let tables = AnalysisTables::default();
        let text = "Passenger INVOICE for the depot";
        assert_eq!(
            tag_text(text, &tables.tag_rules),
            vec![
                "Engineering/Rolling Stock",
                "Procurement/Finance",
                "Operations/Stations"
            ]
        );
    }

    #[test]
    fn injected_rules_replace_defaults() {
        let rules = vec![TagRule {
            label: "Weather".to_string(),
            keywords: vec!["monsoon".to_string()],
        }];
        assert_eq!(tag_text("Monsoon delays expected", &rules), vec!["Weather"]);
        assert_eq!(tag_text("invoice", &rules), vec!["General"]);
    }
}
