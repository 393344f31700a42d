//! Property-based tests for path resolution.
//!
//! Note: The normalize and resolver modules already carry small property
//! suites. This module runs heavier ones covering policy and syntax choices.

use super::normalize::normalize;
use super::resolver::PathResolver;
use super::syntax::{LeadingSlashPolicy, PathSyntax, PosixSyntax, WindowsSyntax};
use super::test_util::FakeEnv;
use proptest::prelude::*;
use std::collections::HashMap;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just("..".to_string()),
        Just(String::new()),
        "[a-z0-9_.-]{1,12}",
    ]
}

fn posix_path_strategy() -> impl Strategy<Value = String> {
    (0..4usize, prop::collection::vec(segment_strategy(), 0..8))
        .prop_map(|(slashes, parts)| format!("{}{}", "/".repeat(slashes), parts.join("/")))
}

fn resolver(policy: LeadingSlashPolicy) -> PathResolver {
    PathResolver::new()
        .with_syntax(Box::new(PosixSyntax::new(policy)))
        .with_env(FakeEnv::new("/cwd/dir").home("/home/me"))
        .with_users(HashMap::<String, String>::new())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Every resolution result is absolute
    #[test]
    fn resolution_always_absolute(path in posix_path_strategy()) {
        let resolved = resolver(LeadingSlashPolicy::Preserve).resolve(&path, None).unwrap();
        prop_assert!(PosixSyntax::default().is_absolute(&resolved));
    }

    // Resolving a resolved path changes nothing
    #[test]
    fn resolution_idempotent(path in posix_path_strategy()) {
        for policy in [LeadingSlashPolicy::Preserve, LeadingSlashPolicy::Collapse] {
            let resolver = resolver(policy);
            let once = resolver.resolve(&path, None).unwrap();
            let twice = resolver.resolve(&once, None).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    // Collapse never yields a leading double slash
    #[test]
    fn collapse_policy_single_root(path in posix_path_strategy()) {
        let resolved = resolver(LeadingSlashPolicy::Collapse).resolve(&path, None).unwrap();
        prop_assert!(!resolved.starts_with("//"));
    }

    // Preserve keeps the exact leading run of an absolute input
    #[test]
    fn preserve_policy_keeps_leading_run(slashes in 2..6usize, name in "[a-z]{1,8}") {
        let path = format!("{}{name}", "/".repeat(slashes));
        let resolved = resolver(LeadingSlashPolicy::Preserve).resolve(&path, None).unwrap();
        prop_assert_eq!(resolved, path);
    }

    // Windows normalization agrees with POSIX on the part after the root
    #[test]
    fn windows_matches_posix_after_root(parts in prop::collection::vec(segment_strategy(), 0..8)) {
        let rest = parts.join("/");
        let posix = normalize(&PosixSyntax::new(LeadingSlashPolicy::Collapse), &format!("/{rest}")).unwrap();
        let windows = normalize(&WindowsSyntax, &format!("C:/{rest}")).unwrap();
        prop_assert_eq!(format!("C:{posix}"), windows);
    }
}
