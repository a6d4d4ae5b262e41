//! Base and revision record merging.

use crate::record::{CharacterRecord, SkillEntry};

/// Merge a base record with its revision.
///
/// - attributes merge key-wise, revision values replace base values and
///   base-only keys are kept
/// - skills are keyed by `(attribute, name)`; base order is kept, revision
///   entries replace matching base entries and new ones are appended
/// - class, race and level take the revision's value when it is non-empty
/// - name and player name come from the base, falling back to the revision
///
/// A revision attribute whose value failed dice normalization is absent
/// rather than blank, so the base value survives. Such cases are logged at
/// debug level.
pub fn merge_records(
    base: Option<CharacterRecord>,
    revision: Option<CharacterRecord>,
) -> CharacterRecord {
    let (mut merged, revision) = match (base, revision) {
        (Some(base), Some(revision)) => (base, revision),
        (Some(only), None) | (None, Some(only)) => return only,
        (None, None) => return CharacterRecord::default(),
    };

    for key in merged.attributes.keys() {
        if !revision.attributes.contains_key(key) {
            tracing::debug!(
                character = %merged.name,
                attribute = %key,
                "revision lacks attribute, keeping base value"
            );
        }
    }
    merged.attributes.extend(revision.attributes);

    for entry in revision.skills {
        merge_skill(&mut merged.skills, entry);
    }

    replace_if_set(&mut merged.class, revision.class);
    replace_if_set(&mut merged.race, revision.race);
    replace_if_set(&mut merged.level, revision.level);
    fill_if_empty(&mut merged.name, revision.name);
    fill_if_empty(&mut merged.player_name, revision.player_name);

    merged
}

fn merge_skill(skills: &mut Vec<SkillEntry>, entry: SkillEntry) {
    match skills
        .iter_mut()
        .find(|skill| skill.attribute == entry.attribute && skill.name == entry.name)
    {
        Some(existing) => *existing = entry,
        None => skills.push(entry),
    }
}

fn replace_if_set(field: &mut String, value: String) {
    if !value.is_empty() {
        *field = value;
    }
}

fn fill_if_empty(field: &mut String, value: String) {
    if field.is_empty() {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(class: &str) -> CharacterRecord {
        CharacterRecord {
            class: class.to_string(),
            ..Default::default()
        }
    }

    fn skill(attribute: &str, name: &str, total: &str) -> SkillEntry {
        SkillEntry {
            attribute: attribute.to_string(),
            name: name.to_string(),
            total: total.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_override_precedence() {
        let merged = merge_records(Some(record("A")), Some(record("B")));
        assert_eq!(merged.class, "B");
    }

    #[test]
    fn test_blank_override_keeps_base() {
        let merged = merge_records(Some(record("A")), Some(record("")));
        assert_eq!(merged.class, "A");
    }

    #[test]
    fn test_attributes_merge_keywise() {
        let mut base = CharacterRecord::default();
        base.attributes.insert("Stärke".to_string(), "2D".to_string());
        base.attributes.insert("Weisheit".to_string(), "3D".to_string());
        let mut revision = CharacterRecord::default();
        revision.attributes.insert("Stärke".to_string(), "3D+1".to_string());
        revision.attributes.insert("Charisma".to_string(), "1D".to_string());

        let merged = merge_records(Some(base), Some(revision));
        assert_eq!(merged.attributes.len(), 3);
        assert_eq!(merged.attributes["Stärke"], "3D+1");
        assert_eq!(merged.attributes["Weisheit"], "3D");
        assert_eq!(merged.attributes["Charisma"], "1D");
    }

    #[test]
    fn test_skills_replace_and_append() {
        let base = CharacterRecord {
            skills: vec![skill("Wissen", "Lesen", "2D"), skill("Wissen", "Rechnen", "1D")],
            ..Default::default()
        };
        let revision = CharacterRecord {
            skills: vec![skill("Magie", "Feuerball", "1D"), skill("Wissen", "Lesen", "3D")],
            ..Default::default()
        };

        let merged = merge_records(Some(base), Some(revision));
        let names: Vec<&str> = merged.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Lesen", "Rechnen", "Feuerball"]);
        assert_eq!(merged.skills[0].total, "3D");
    }

    #[test]
    fn test_identity_comes_from_base() {
        let base = CharacterRecord {
            name: "Alriik".to_string(),
            player_name: "Tom".to_string(),
            ..Default::default()
        };
        let revision = CharacterRecord {
            name: "Alrik".to_string(),
            player_name: "Tom_V2".to_string(),
            ..Default::default()
        };
        let merged = merge_records(Some(base), Some(revision));
        assert_eq!(merged.name, "Alriik");
        assert_eq!(merged.player_name, "Tom");

        let nameless = CharacterRecord::default();
        let revision = CharacterRecord {
            name: "Alrik".to_string(),
            ..Default::default()
        };
        assert_eq!(merge_records(Some(nameless), Some(revision)).name, "Alrik");
    }

    #[test]
    fn test_single_side() {
        assert_eq!(merge_records(None, Some(record("B"))).class, "B");
        assert_eq!(merge_records(Some(record("A")), None).class, "A");
        assert!(merge_records(None, None).is_blank());
    }
}
