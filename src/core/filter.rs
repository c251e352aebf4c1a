// actchat - core/filter.rs
//
// Group/name matching and the keep decision for classified lines.
// Core layer: pure logic, no I/O.

use crate::core::model::{Group, LogLine, Membership, MessageKind};

/// True when `line`'s speaker belongs to `group`.
///
/// The sentinel everyone group matches unconditionally. Otherwise the
/// normalised speaker name must be an exact, case-sensitive member.
pub fn matches(line: &LogLine<'_>, group: &Group) -> bool {
    match &group.membership {
        Membership::Everyone => true,
        Membership::Members(names) => names.contains(&line.speaker),
    }
}

/// Whether the line's kind is eligible for a transcript at all.
///
/// Say is always eligible, Emote only when emotes are included, Other never.
pub fn kind_eligible(kind: MessageKind, include_emotes: bool) -> bool {
    match kind {
        MessageKind::Say => true,
        MessageKind::Emote => include_emotes,
        MessageKind::Other => false,
    }
}

/// The full keep decision: kind gate, then group membership.
pub fn is_kept(line: &LogLine<'_>, group: &Group, include_emotes: bool) -> bool {
    kind_eligible(line.kind, include_emotes) && matches(line, group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn make_line(speaker: &str, kind: MessageKind) -> LogLine<'static> {
        LogLine {
            raw_text: "",
            timestamp: DateTime::parse_from_rfc3339("2024-01-15T20:16:42-05:00").unwrap(),
            code: "000A".to_string(),
            speaker: speaker.to_string(),
            kind,
            body: "",
        }
    }

    fn party() -> Group {
        Group::with_members("party", "Party", ["Jane Doe", "John Smith"])
    }

    #[test]
    fn test_everyone_matches_any_speaker() {
        let group = Group::everyone();
        assert!(matches(&make_line("Jane Doe", MessageKind::Say), &group));
        assert!(matches(&make_line("", MessageKind::Say), &group));
    }

    #[test]
    fn test_member_match_is_exact_and_case_sensitive() {
        let group = party();
        assert!(matches(&make_line("Jane Doe", MessageKind::Say), &group));
        assert!(!matches(&make_line("jane doe", MessageKind::Say), &group));
        assert!(!matches(&make_line("Jane", MessageKind::Say), &group));
        assert!(!matches(&make_line("Someone Else", MessageKind::Say), &group));
    }

    #[test]
    fn test_emotes_gated_by_flag() {
        let group = party();
        let emote = make_line("Jane Doe", MessageKind::Emote);
        assert!(!is_kept(&emote, &group, false));
        assert!(is_kept(&emote, &group, true));
    }

    #[test]
    fn test_other_never_kept() {
        let other = make_line("Jane Doe", MessageKind::Other);
        assert!(!is_kept(&other, &Group::everyone(), true));
        assert!(!is_kept(&other, &party(), true));
    }

    #[test]
    fn test_say_from_non_member_not_kept() {
        let say = make_line("Someone Else", MessageKind::Say);
        assert!(!is_kept(&say, &party(), true));
        assert!(is_kept(&say, &Group::everyone(), false));
    }
}
