use std::fmt;

use serde::{Deserialize, Serialize};

/// Wildcard rule label: matches any single host label
pub const WILDCARD: &str = "*";

/// Prefix marking an exception rule label
pub const EXCEPTION_MARKER: char = '!';

/// A single public suffix rule.
///
/// Labels are kept in written order, so `*.uk` is `["*", "uk"]` and the
/// rightmost label is the top-level domain. Serializes as a plain JSON array
/// of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rule {
    labels: Vec<String>,
}

impl Rule {
    /// Create a rule from its labels in written order
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted rule such as `"!city.kawasaki.jp"`.
    ///
    /// An empty string gives an empty rule, which never matches.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self::new(text.split('.'))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether this is an exception rule (leftmost label carries `!`)
    pub fn is_exception(&self) -> bool {
        self.labels
            .first()
            .is_some_and(|label| label.starts_with(EXCEPTION_MARKER))
    }

    /// Whether any label is the `*` wildcard
    pub fn is_wildcard(&self) -> bool {
        self.labels.iter().any(|label| label == WILDCARD)
    }

    /// Match this rule against host labels, walking both from the TLD end.
    ///
    /// - `!label` ends the walk: the result is whether `label` equals the host label
    /// - `*` pairs with any host label
    /// - anything else must be equal (case-sensitive)
    ///
    /// The rule matches once all of its labels are paired. A rule longer than
    /// the host never matches, and an empty rule never matches.
    pub fn matches_labels<S: AsRef<str>>(&self, host_labels: &[S]) -> bool {
        if self.labels.is_empty() {
            return false;
        }

        let mut host = host_labels.iter().rev();
        for rule_label in self.labels.iter().rev() {
            let Some(host_label) = host.next() else {
                return false;
            };
            let host_label = host_label.as_ref();

            if let Some(exception) = rule_label.strip_prefix(EXCEPTION_MARKER) {
                return exception == host_label;
            }
            if rule_label != WILDCARD && rule_label != host_label {
                return false;
            }
        }

        true
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join("."))
    }
}

impl From<&str> for Rule {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Ordered collection of rules.
///
/// Serializes as a JSON array of string arrays. Order only matters for which
/// exception rule is reported when several match, and for ties between
/// equally long rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify a host against this rule set. See [`crate::match_host`].
    pub fn match_host(&self, candidate: &str) -> Option<Match> {
        crate::matcher::match_host(candidate, self)
    }

    /// See [`crate::is_unrestricted`].
    pub fn is_unrestricted(&self, candidate: &str) -> bool {
        crate::matcher::is_unrestricted(candidate, self)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Result of classifying one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Every rule that matched, in rule set order
    pub matched_rules: Vec<Rule>,
    /// The rule whose verdict applies
    pub prevailing_rule: Rule,
    /// `true` when the host is itself a public suffix
    pub is_restricted: bool,
}

impl Match {
    /// Number of host labels that form the public suffix.
    ///
    /// An exception rule's own leftmost label is not part of the suffix.
    pub fn suffix_label_count(&self) -> usize {
        if self.prevailing_rule.is_exception() {
            self.prevailing_rule.len() - 1
        } else {
            self.prevailing_rule.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_parse() {
        let rule = Rule::parse("*.kawasaki.jp");
        assert_eq!(rule.labels(), &["*", "kawasaki", "jp"]);
        assert!(rule.is_wildcard());
        assert!(!rule.is_exception());
        assert_eq!(rule.to_string(), "*.kawasaki.jp");
    }

    #[test]
    fn test_rule_parse_empty() {
        assert!(Rule::parse("").is_empty());
        assert!(!Rule::parse("").matches_labels(&["com"]));
    }

    #[test]
    fn test_exception_rule() {
        let rule = Rule::parse("!city.kawasaki.jp");
        assert!(rule.is_exception());
        assert!(rule.matches_labels(&["city", "kawasaki", "jp"]));
        assert!(rule.matches_labels(&["www", "city", "kawasaki", "jp"]));
        assert!(!rule.matches_labels(&["town", "kawasaki", "jp"]));
    }

    #[test]
    fn test_exception_stops_walk() {
        // Labels left of the marker are never compared
        let rule = Rule::new(["ignored", "!yahoo", "com"]);
        assert!(rule.matches_labels(&["yahoo", "com"]));
        assert!(rule.matches_labels(&["mail", "yahoo", "com"]));
    }

    #[test]
    fn test_exception_without_partner_label() {
        let rule = Rule::new(["!www", "ck"]);
        assert!(!rule.matches_labels(&["ck"]));
    }

    #[test]
    fn test_exact_rule() {
        let rule = Rule::parse("co.uk");
        assert!(rule.matches_labels(&["co", "uk"]));
        assert!(rule.matches_labels(&["bbc", "co", "uk"]));
        assert!(!rule.matches_labels(&["uk"]));
        assert!(!rule.matches_labels(&["ac", "uk"]));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let rule = Rule::parse("com");
        assert!(!rule.matches_labels(&["example", "COM"]));
    }

    #[test]
    fn test_wildcard_rule() {
        let rule = Rule::parse("*.com");
        assert!(rule.matches_labels(&["yahoo", "com"]));
        assert!(rule.matches_labels(&["mail", "yahoo", "com"]));
        assert!(!rule.matches_labels(&["com"]));
        assert!(!rule.matches_labels(&["yahoo", "org"]));
    }

    #[test]
    fn test_rule_set_json_shape() {
        let rules: RuleSet = serde_json::from_str(r#"[["com"],["*","uk"],[]]"#).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.rules()[1], Rule::parse("*.uk"));
        assert!(rules.rules()[2].is_empty());
        assert_eq!(
            serde_json::to_string(&rules).unwrap(),
            r#"[["com"],["*","uk"],[]]"#
        );
    }

    #[test]
    fn test_suffix_label_count() {
        let m = Match {
            matched_rules: vec![Rule::parse("!city.kawasaki.jp")],
            prevailing_rule: Rule::parse("!city.kawasaki.jp"),
            is_restricted: false,
        };
        assert_eq!(m.suffix_label_count(), 2);

        let m = Match {
            matched_rules: vec![Rule::parse("co.uk")],
            prevailing_rule: Rule::parse("co.uk"),
            is_restricted: true,
        };
        assert_eq!(m.suffix_label_count(), 2);
    }
}
