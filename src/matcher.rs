//! Suffix matching.
//!
//! Every rule in the set is checked against the host labels. An exception
//! rule always wins and makes the host registrable; otherwise the longest
//! matching rule decides, and the host is restricted when it has no labels
//! beyond that rule.

use crate::syntax::is_valid_host;
use crate::types::{Match, Rule, RuleSet};

/// Classify `candidate` against `rules`.
///
/// Returns `None` when the host fails syntax validation or when no rule
/// matches. The two cases are not distinguished here; call
/// [`crate::syntax::is_valid_host`] to tell them apart.
///
/// When several exception rules match, the first in rule set order is
/// reported. Among equally long non-exception rules the first one wins.
pub fn match_host(candidate: &str, rules: &RuleSet) -> Option<Match> {
    if !is_valid_host(candidate) {
        return None;
    }

    let labels: Vec<&str> = candidate.split('.').collect();
    let matched_rules: Vec<Rule> = rules
        .iter()
        .filter(|rule| rule.matches_labels(&labels))
        .cloned()
        .collect();

    if let Some(exception) = matched_rules.iter().find(|rule| rule.is_exception()) {
        return Some(Match {
            prevailing_rule: exception.clone(),
            matched_rules,
            is_restricted: false,
        });
    }

    let longest = longest_rule(&matched_rules)?.clone();
    let is_restricted = labels.len() <= longest.len();

    Some(Match {
        matched_rules,
        prevailing_rule: longest,
        is_restricted,
    })
}

/// `true` only when the host matched and is not itself a public suffix.
///
/// Invalid and unmatched hosts both give `false`.
pub fn is_unrestricted(candidate: &str, rules: &RuleSet) -> bool {
    match_host(candidate, rules).is_some_and(|m| !m.is_restricted)
}

/// The public suffix of `candidate`, e.g. `co.uk` for `www.bbc.co.uk`.
pub fn public_suffix(candidate: &str, rules: &RuleSet) -> Option<String> {
    let m = match_host(candidate, rules)?;
    match m.suffix_label_count() {
        0 => None,
        count => Some(trailing_labels(candidate, count)),
    }
}

/// The registrable domain of `candidate`: its public suffix plus one label.
///
/// `None` when the host is a public suffix itself or cannot be classified.
pub fn registrable_domain(candidate: &str, rules: &RuleSet) -> Option<String> {
    let m = match_host(candidate, rules)?;
    if m.is_restricted {
        return None;
    }
    Some(trailing_labels(candidate, m.suffix_label_count() + 1))
}

/// First rule with the greatest label count.
fn longest_rule(rules: &[Rule]) -> Option<&Rule> {
    let mut best: Option<&Rule> = None;
    for rule in rules {
        if best.map_or(true, |b| rule.len() > b.len()) {
            best = Some(rule);
        }
    }
    best
}

fn trailing_labels(host: &str, count: usize) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(count);
    labels[start..].join(".")
}
