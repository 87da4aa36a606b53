//! Content fingerprints for version records.

use crate::models::CapsuleSnapshot;

/// blake3 hex digest over the capsule's content fields.
///
/// Counters, scores and timestamps are excluded so the fingerprint only
/// changes when content does. List fields are length-prefixed to keep
/// `["ab"]` and `["a", "b"]` apart.
pub fn content_fingerprint(capsule: &CapsuleSnapshot) -> String {
    let mut hasher = blake3::Hasher::new();
    write_field(&mut hasher, &capsule.title);
    write_field(&mut hasher, &capsule.domain);
    write_list(&mut hasher, &capsule.topics);
    write_field(&mut hasher, &capsule.insight);
    write_list(&mut hasher, &capsule.evidence);
    write_list(&mut hasher, &capsule.action_items);
    write_field(&mut hasher, &capsule.applicability);
    write_list(&mut hasher, &capsule.limitations);
    write_list(&mut hasher, &capsule.authors);
    hasher.finalize().to_hex().to_string()
}

fn write_field(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn write_list(hasher: &mut blake3::Hasher, values: &[String]) {
    hasher.update(&(values.len() as u64).to_le_bytes());
    for value in values {
        write_field(hasher, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_ignores_counters() {
        let a = CapsuleSnapshot::new("c", "Title here", "physics", "insight");
        let mut b = a.clone();
        b.citations = 42;
        b.validations = 3;
        assert_eq!(content_fingerprint(&a), content_fingerprint(&b));
    }

    #[test]
    fn fingerprint_separates_list_boundaries() {
        let mut a = CapsuleSnapshot::new("c", "t", "d", "i");
        let mut b = a.clone();
        a.evidence = vec!["ab".into()];
        b.evidence = vec!["a".into(), "b".into()];
        assert_ne!(content_fingerprint(&a), content_fingerprint(&b));
    }
}
