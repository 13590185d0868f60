//! Free-text filtering over status listings.

use crate::model::CertificateStatus;

/// Apply an optional case-sensitive filter to a listing.
///
/// An entry passes when the filter string appears as a substring of the name
/// or fingerprint, or exactly matches one of the DNS alt names. Input order
/// is preserved; `None` is the identity.
pub fn apply(statuses: Vec<CertificateStatus>, filter: Option<&str>) -> Vec<CertificateStatus> {
    let Some(filter) = filter else {
        return statuses;
    };

    statuses
        .into_iter()
        .filter(|status| {
            status.name.contains(filter)
                || status.fingerprint.contains(filter)
                || status.dns_alt_names.iter().any(|alt| alt == filter)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CertificateState;

    fn status(name: &str, fingerprint: &str, alt_names: &[&str]) -> CertificateStatus {
        CertificateStatus {
            name: name.to_string(),
            fingerprint: fingerprint.to_string(),
            dns_alt_names: alt_names.iter().map(|s| s.to_string()).collect(),
            state: CertificateState::Signed,
        }
    }

    #[test]
    fn no_filter_is_identity() {
        let input = vec![status("a", "AA", &[]), status("b", "BB", &[])];
        assert_eq!(apply(input.clone(), None), input);
    }

    #[test]
    fn matches_name_substring() {
        let input = vec![
            status("web01.example.com", "AA", &[]),
            status("db01.example.com", "BB", &[]),
        ];
        let result = apply(input, Some("web01"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "web01.example.com");
    }

    #[test]
    fn matches_fingerprint_substring() {
        let input = vec![
            status("a", "AA:BB:CC", &[]),
            status("b", "DD:EE:FF", &[]),
        ];
        let result = apply(input, Some("EE:FF"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "b");
    }

    #[test]
    fn alt_names_require_exact_match() {
        let input = vec![status("a", "AA", &["mail.example.com"])];
        assert!(apply(input.clone(), Some("mail.example")).is_empty());
        assert_eq!(apply(input, Some("mail.example.com")).len(), 1);
    }

    #[test]
    fn filter_is_case_sensitive() {
        let input = vec![status("Web01.example.com", "AA", &[])];
        assert!(apply(input.clone(), Some("web01")).is_empty());
        assert_eq!(apply(input, Some("Web01")).len(), 1);
    }

    #[test]
    fn preserves_input_order() {
        let input = vec![
            status("node3.example.com", "AA", &[]),
            status("node1.example.com", "BB", &[]),
            status("node2.example.com", "CC", &[]),
        ];
        let result = apply(input, Some("node"));
        let names: Vec<_> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["node3.example.com", "node1.example.com", "node2.example.com"]
        );
    }

    #[test]
    fn no_match_yields_empty() {
        let input = vec![status("a", "AA", &[])];
        assert!(apply(input, Some("zzz")).is_empty());
    }
}
