//! # Feature: Roster
//!
//! Chat-platform identities and the ledger-name to identity match.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use async_trait::async_trait;

/// An addressable chat identity: opaque platform id plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatIdentity {
    pub id: String,
    pub display_name: String,
}

/// Anything that can list the team's chat identities.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn list_identities(&self) -> anyhow::Result<Vec<ChatIdentity>>;
}

/// Strategy for matching a ledger name to a chat identity.
///
/// Kept behind a trait so a fuzzy matcher can replace the exact one
/// without touching the scheduler.
pub trait IdentityResolver: Send + Sync {
    fn resolve<'a>(&self, name: &str, roster: &'a [ChatIdentity]) -> Option<&'a ChatIdentity>;
}

/// Exact display-name equality, first hit wins.
///
/// If the same display name appears twice in the roster the earlier entry
/// is chosen; beyond roster order the tie-break is unspecified.
pub struct ExactNameResolver;

impl IdentityResolver for ExactNameResolver {
    fn resolve<'a>(&self, name: &str, roster: &'a [ChatIdentity]) -> Option<&'a ChatIdentity> {
        roster.iter().find(|identity| identity.display_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(id: &str, name: &str) -> ChatIdentity {
        ChatIdentity {
            id: id.into(),
            display_name: name.into(),
        }
    }

    #[test]
    fn test_resolve_exact_match() {
        let roster = vec![identity("U1", "Alice"), identity("U2", "Bob")];
        let found = ExactNameResolver.resolve("Bob", &roster);
        assert_eq!(found.map(|i| i.id.as_str()), Some("U2"));
    }

    #[test]
    fn test_resolve_miss_is_none() {
        let roster = vec![identity("U1", "Alice")];
        assert!(ExactNameResolver.resolve("Zed", &roster).is_none());
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let roster = vec![identity("U1", "Alice")];
        assert!(ExactNameResolver.resolve("alice", &roster).is_none());
    }

    #[test]
    fn test_resolve_duplicate_names_first_wins() {
        let roster = vec![identity("U1", "Alice"), identity("U2", "Alice")];
        let found = ExactNameResolver.resolve("Alice", &roster);
        assert_eq!(found.map(|i| i.id.as_str()), Some("U1"));
    }
}
