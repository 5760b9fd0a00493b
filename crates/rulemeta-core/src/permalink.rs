use crate::constants::paths;

/// Shareable link to a rule in the web rule browser:
/// `{base}/coding_rules#rule_key=<percent-encoded key>`
pub fn permalink(base_url: &str, rule_key: &str) -> String {
    format!(
        "{}{}#rule_key={}",
        base_url.trim_end_matches('/'),
        paths::CODING_RULES_PAGE,
        encode_uri_component(rule_key)
    )
}

/// Percent-encode the way browsers' `encodeURIComponent` does, which
/// leaves `!'()*` unescaped where `urlencoding` escapes them.
fn encode_uri_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_key() {
        assert_eq!(
            permalink("http://sonar", "S123"),
            "http://sonar/coding_rules#rule_key=S123"
        );
    }

    #[test]
    fn test_key_is_percent_encoded() {
        assert_eq!(
            permalink("http://sonar", "A B"),
            "http://sonar/coding_rules#rule_key=A%20B"
        );
        assert_eq!(
            permalink("http://sonar", "squid:S1067"),
            "http://sonar/coding_rules#rule_key=squid%3AS1067"
        );
    }

    #[test]
    fn test_uri_component_marks_stay_unescaped() {
        assert_eq!(
            permalink("http://sonar", "a(b)"),
            "http://sonar/coding_rules#rule_key=a(b)"
        );
        assert_eq!(
            permalink("http://sonar", "it's!*"),
            "http://sonar/coding_rules#rule_key=it's!*"
        );
        // a literal escape sequence in the key is still escaped
        assert_eq!(
            permalink("http://sonar", "%28"),
            "http://sonar/coding_rules#rule_key=%2528"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(
            permalink("http://sonar/", "S1"),
            "http://sonar/coding_rules#rule_key=S1"
        );
    }

    #[test]
    fn test_empty_base_url() {
        assert_eq!(permalink("", "S1"), "/coding_rules#rule_key=S1");
    }
}
