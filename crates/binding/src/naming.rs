//! Field name to tree key translation.
//!
//! Records name their fields in `CapitalizedWords`; the attribute tree uses
//! `lower_snake` keys. The translation is purely mechanical. A field whose
//! automatic key is undesired must be renamed, the translator is never
//! special-cased.

/// Translate a record field name into its attribute tree key.
///
/// A separator goes before every uppercase letter that follows a lowercase
/// letter or digit, and before the last letter of an uppercase run that is
/// followed by a lowercase letter, so acronyms split before the next word.
///
/// ```
/// use binding::to_tree_key;
///
/// assert_eq!(to_tree_key("GithubInstallationId"), "github_installation_id");
/// assert_eq!(to_tree_key("OAuthTokenID"), "o_auth_token_id");
/// ```
pub fn to_tree_key(field: &str) -> String {
    let chars: Vec<char> = field.chars().collect();
    let mut key = String::with_capacity(field.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !key.ends_with('_') {
                key.push('_');
            }
        }
        key.extend(c.to_lowercase());
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_words() {
        assert_eq!(to_tree_key("Id"), "id");
        assert_eq!(to_tree_key("Name"), "name");
        assert_eq!(to_tree_key("TokenId"), "token_id");
        assert_eq!(to_tree_key("GithubInstallationId"), "github_installation_id");
    }

    #[test]
    fn test_acronym_runs() {
        assert_eq!(to_tree_key("OAuthTokenID"), "o_auth_token_id");
        assert_eq!(to_tree_key("VCSRepo"), "vcs_repo");
        assert_eq!(to_tree_key("ID"), "id");
        assert_eq!(to_tree_key("HTTPServerURL"), "http_server_url");
    }

    #[test]
    fn test_digits() {
        assert_eq!(to_tree_key("Sha256Sum"), "sha256_sum");
        assert_eq!(to_tree_key("V2Endpoint"), "v2_endpoint");
    }

    #[test]
    fn test_already_lowercase_and_underscored() {
        assert_eq!(to_tree_key("name"), "name");
        assert_eq!(to_tree_key("Agent_PoolId"), "agent_pool_id");
        assert_eq!(to_tree_key(""), "");
    }

    #[test]
    fn test_deterministic_across_calls() {
        let first = to_tree_key("QueueAllRuns");
        to_tree_key("SomethingElseEntirely");
        assert_eq!(to_tree_key("QueueAllRuns"), first);
        assert_eq!(first, "queue_all_runs");
    }
}
