//! "Applied Tags" line for a turn.

use crate::taxonomy::{short_form_severity, SafetyTag};

/// Separator between short forms in one tag list.
const TAG_SEPARATOR: &str = " & ";

/// Placeholder when the agent tagged a turn the reviewer would leave untagged.
const NO_TAG: &str = "No Tag";

/// Sort short forms in report order. Stable: tags outside SX/SM keep their
/// relative order and follow every SX/SM tag.
pub fn sort_short_forms(forms: &mut [String]) {
    forms.sort_by_key(|form| {
        let key = short_form_severity(form);
        (key.is_none(), key)
    });
}

/// Short forms of `tags` in report order, joined with `" & "`.
pub fn format_tag_list<'a>(tags: impl IntoIterator<Item = &'a SafetyTag>) -> String {
    let mut forms: Vec<String> = tags.into_iter().map(|tag| tag.short_form()).collect();
    sort_short_forms(&mut forms);
    forms.join(TAG_SEPARATOR)
}

/// Describe the disagreement between agent and QA tags for one turn.
///
/// Empty when neither side has tags.
pub fn format_tags_for_summary<'a>(
    agent: impl IntoIterator<Item = &'a SafetyTag>,
    qa: impl IntoIterator<Item = &'a SafetyTag>,
) -> String {
    let agent = format_tag_list(agent);
    let qa = format_tag_list(qa);

    match (agent.is_empty(), qa.is_empty()) {
        (false, false) => format!("{agent} should be {qa}"),
        (false, true) => format!("{agent} should be {NO_TAG}"),
        (true, false) => format!("Should be {qa}"),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(tags: &[SafetyTag]) -> BTreeSet<SafetyTag> {
        tags.iter().copied().collect()
    }

    #[test]
    fn sx_sorts_before_sm_then_by_level() {
        let mut forms: Vec<String> = ["SM2", "SX4", "SX1", "SM0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_short_forms(&mut forms);
        assert_eq!(forms, vec!["SX1", "SX4", "SM0", "SM2"]);
    }

    #[test]
    fn other_tags_keep_encounter_order_after_sx_sm() {
        let mut forms: Vec<String> = ["violence_other", "SM3", "hate_speech", "SX0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_short_forms(&mut forms);
        assert_eq!(forms, vec!["SX0", "SM3", "violence_other", "hate_speech"]);
    }

    #[test]
    fn levels_compare_numerically() {
        let mut forms = vec!["SX10".to_string(), "SX9".to_string(), "SX".to_string()];
        sort_short_forms(&mut forms);
        assert_eq!(forms, vec!["SX", "SX9", "SX10"]);
    }

    #[test]
    fn short_form_order_matches_severity_order() {
        let mut forms: Vec<String> = SafetyTag::ALL.iter().rev().map(|t| t.short_form()).collect();
        sort_short_forms(&mut forms);

        let mut ranked: Vec<SafetyTag> = SafetyTag::ALL.iter().rev().copied().collect();
        ranked.sort_by_key(|tag| (tag.severity().is_none(), tag.severity()));
        let expected: Vec<String> = ranked.iter().map(|t| t.short_form()).collect();
        assert_eq!(forms, expected);
        assert_eq!(forms[0], "SX0");
        assert_eq!(forms[13], "hate_speech");
    }

    #[test]
    fn agent_only() {
        let agent = set(&[SafetyTag::Sx4SpecificSexualContent]);
        assert_eq!(
            format_tags_for_summary(&agent, &BTreeSet::new()),
            "SX4 should be No Tag"
        );
    }

    #[test]
    fn qa_only() {
        let qa = set(&[SafetyTag::Sm1AdultSexualActivity]);
        assert_eq!(format_tags_for_summary(&BTreeSet::new(), &qa), "Should be SM1");
    }

    #[test]
    fn both_sides() {
        let agent = set(&[SafetyTag::Sx2EroticImpliedSexualActivity]);
        let qa = set(&[SafetyTag::Sm3SexBetweenMinors]);
        assert_eq!(format_tags_for_summary(&agent, &qa), "SX2 should be SM3");
    }

    #[test]
    fn neither_side() {
        let empty = BTreeSet::new();
        assert_eq!(format_tags_for_summary(&empty, &empty), "");
    }

    #[test]
    fn multiple_tags_are_sorted_and_joined() {
        let agent = set(&[
            SafetyTag::Sm2SexualizationYoungChildren,
            SafetyTag::Sx5GraphicSexualContent,
            SafetyTag::PromotesSelfHarm,
            SafetyTag::Sx1MildSensualActivity,
        ]);
        let qa = set(&[SafetyTag::HateSpeech, SafetyTag::Sm0OtherContent]);
        assert_eq!(
            format_tags_for_summary(&agent, &qa),
            "SX1 & SX5 & SM2 & promotes_selfharm should be SM0 & hate_speech"
        );
    }
}
