//! Certificate status wire model.
//!
//! Snapshots of certificate state as reported by the CA. Instances are
//! constructed fresh from each upstream response and never mutated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a certificate as reported by the CA.
///
/// The CA models `requested`, `signed` and `revoked`. Anything else the
/// upstream reports is preserved verbatim as [`CertificateState::Other`];
/// only operations that branch on state validate against the known set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CertificateState {
    Requested,
    Signed,
    Revoked,
    Other(String),
}

impl From<String> for CertificateState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "requested" => Self::Requested,
            "signed" => Self::Signed,
            "revoked" => Self::Revoked,
            _ => Self::Other(s),
        }
    }
}

impl From<CertificateState> for String {
    fn from(state: CertificateState) -> Self {
        match state {
            CertificateState::Requested => "requested".to_string(),
            CertificateState::Signed => "signed".to_string(),
            CertificateState::Revoked => "revoked".to_string(),
            CertificateState::Other(s) => s,
        }
    }
}

impl FromStr for CertificateState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for CertificateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => write!(f, "requested"),
            Self::Signed => write!(f, "signed"),
            Self::Revoked => write!(f, "revoked"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One certificate as reported by `certificate_status(es)`.
///
/// Unknown upstream fields are ignored; the CA reports more than we forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateStatus {
    /// Certname, the unique identifier of the certificate
    pub name: String,

    /// Content hash of the certificate
    #[serde(default)]
    pub fingerprint: String,

    /// DNS alternative names, in upstream order
    #[serde(default)]
    pub dns_alt_names: Vec<String>,

    /// Current lifecycle state
    pub state: CertificateState,
}

/// Caller input for a status listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateStatusQuery {
    /// States to list, in order. Absent means all states in one call.
    #[serde(default)]
    pub states: Option<Vec<CertificateState>>,

    /// Free-text filter over name, fingerprint and DNS alt names
    #[serde(default)]
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_states_round_trip() {
        for (text, state) in [
            ("requested", CertificateState::Requested),
            ("signed", CertificateState::Signed),
            ("revoked", CertificateState::Revoked),
        ] {
            let json = format!("\"{}\"", text);
            let parsed: CertificateState = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, state);
            assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
        }
    }

    #[test]
    fn unknown_state_is_preserved_verbatim() {
        let parsed: CertificateState = serde_json::from_str("\"held\"").unwrap();
        assert_eq!(parsed, CertificateState::Other("held".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"held\"");
        assert_eq!(parsed.to_string(), "held");
    }

    #[test]
    fn status_decodes_with_missing_optional_fields() {
        let status: CertificateStatus =
            serde_json::from_str(r#"{"name": "web01.example.com", "state": "requested"}"#)
                .unwrap();
        assert_eq!(status.name, "web01.example.com");
        assert_eq!(status.state, CertificateState::Requested);
        assert!(status.fingerprint.is_empty());
        assert!(status.dns_alt_names.is_empty());
    }

    #[test]
    fn status_ignores_extra_upstream_fields() {
        let status: CertificateStatus = serde_json::from_str(
            r#"{
                "name": "db01.example.com",
                "state": "signed",
                "fingerprint": "AA:BB",
                "dns_alt_names": ["db01", "db01.example.com"],
                "fingerprints": {"SHA256": "AA:BB"},
                "authorization_extensions": {}
            }"#,
        )
        .unwrap();
        assert_eq!(status.dns_alt_names, vec!["db01", "db01.example.com"]);
    }

    #[test]
    fn query_rejects_unknown_fields() {
        assert!(serde_json::from_str::<CertificateStatusQuery>(r#"{"bogus": 1}"#).is_err());
        let query: CertificateStatusQuery =
            serde_json::from_str(r#"{"states": ["requested"], "filter": "web"}"#).unwrap();
        assert_eq!(
            query.states,
            Some(vec![CertificateState::Requested])
        );
        assert_eq!(query.filter.as_deref(), Some("web"));
    }
}
