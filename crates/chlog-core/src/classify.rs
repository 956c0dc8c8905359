//! Changelog ordering.

use std::cmp::{Ordering, Reverse};

use chlog_commit::ParsedCommit;

use crate::Taxonomy;

/// Sorts commits into changelog order.
///
/// The order is total: type rank, then scope rank, then newest first, then
/// description by byte order. Identical commits under different hashes fall
/// back to hash order.
#[must_use]
pub fn sort(taxonomy: &Taxonomy, mut commits: Vec<ParsedCommit>) -> Vec<ParsedCommit> {
    commits.sort_by(|a, b| compare(taxonomy, a, b));
    commits
}

fn compare(taxonomy: &Taxonomy, a: &ParsedCommit, b: &ParsedCommit) -> Ordering {
    let key = |c: &ParsedCommit| {
        (
            taxonomy.type_rank(&c.r#type),
            taxonomy.scope_rank(&c.scope),
            Reverse(c.date),
        )
    };
    key(a)
        .cmp(&key(b))
        .then_with(|| a.description.as_bytes().cmp(b.description.as_bytes()))
        .then_with(|| a.hash.cmp(&b.hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chlog_config::TypeConfig;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn commit(hash: &str, ty: &str, scope: &str, description: &str, t: i64) -> ParsedCommit {
        ParsedCommit::builder(hash, ty)
            .scope(scope)
            .description(description)
            .date(at(t))
            .build()
    }

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(
            vec![
                TypeConfig::new("feat", "Features"),
                TypeConfig::new("fix", "Bug Fixes"),
                TypeConfig::new("perf", "Performance Improvements"),
            ],
            vec!["runtime".to_string(), "editor".to_string()],
        )
    }

    fn descriptions(commits: &[ParsedCommit]) -> Vec<&str> {
        commits.iter().map(|c| c.description.as_str()).collect()
    }

    #[test]
    fn test_type_rank_first() {
        let sorted = sort(
            &taxonomy(),
            vec![
                commit("a", "perf", "runtime", "p", 9),
                commit("b", "fix", "runtime", "x", 9),
                commit("c", "feat", "editor", "f", 1),
            ],
        );
        assert_eq!(descriptions(&sorted), ["f", "x", "p"]);
    }

    #[test]
    fn test_scope_rank_within_type() {
        let sorted = sort(
            &taxonomy(),
            vec![
                commit("a", "feat", "website", "unknown scope", 9),
                commit("b", "feat", "editor", "editor", 9),
                commit("c", "feat", "runtime", "runtime", 1),
            ],
        );
        assert_eq!(descriptions(&sorted), ["runtime", "editor", "unknown scope"]);
    }

    #[test]
    fn test_unknown_scopes_ordered_by_time() {
        let sorted = sort(
            &taxonomy(),
            vec![
                commit("a", "fix", "zeta", "older", 1),
                commit("b", "fix", "alpha", "newer", 2),
            ],
        );
        assert_eq!(descriptions(&sorted), ["newer", "older"]);
    }

    #[test]
    fn test_newest_first_within_scope() {
        let sorted = sort(
            &taxonomy(),
            vec![
                commit("a", "fix", "editor", "one", 1),
                commit("b", "fix", "editor", "three", 3),
                commit("c", "fix", "editor", "two", 2),
            ],
        );
        assert_eq!(descriptions(&sorted), ["three", "two", "one"]);
    }

    #[test]
    fn test_description_breaks_ties() {
        let sorted = sort(
            &taxonomy(),
            vec![
                commit("a", "feat", "runtime", "beta", 5),
                commit("b", "feat", "runtime", "Zulu", 5),
                commit("c", "feat", "runtime", "alpha", 5),
            ],
        );
        // Byte order puts uppercase before lowercase.
        assert_eq!(descriptions(&sorted), ["Zulu", "alpha", "beta"]);
    }

    #[test]
    fn test_unknown_type_sorts_last() {
        let sorted = sort(
            &taxonomy(),
            vec![
                commit("a", "docs", "runtime", "docs", 9),
                commit("b", "perf", "website", "perf", 1),
            ],
        );
        assert_eq!(descriptions(&sorted), ["perf", "docs"]);
    }

    #[test]
    fn test_sort_is_deterministic_under_shuffles() {
        let commits = vec![
            commit("1", "feat", "runtime", "add X", 3),
            commit("2", "fix", "editor", "fix Y", 1),
            commit("3", "feat", "editor", "add Z", 2),
            commit("4", "feat", "editor", "add Z", 2),
            commit("5", "perf", "other", "speed", 2),
            commit("6", "feat", "runtime", "add W", 3),
        ];
        let expected = sort(&taxonomy(), commits.clone());

        let mut rotated = commits.clone();
        for _ in 0..commits.len() {
            rotated.rotate_left(1);
            assert_eq!(
                descriptions(&sort(&taxonomy(), rotated.clone())),
                descriptions(&expected)
            );
        }

        let mut reversed = commits;
        reversed.reverse();
        assert_eq!(
            descriptions(&sort(&taxonomy(), reversed)),
            descriptions(&expected)
        );
    }

    #[test]
    fn test_empty() {
        assert!(sort(&taxonomy(), Vec::new()).is_empty());
    }
}
