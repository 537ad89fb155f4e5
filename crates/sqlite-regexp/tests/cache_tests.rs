//! Matching cache tests.

use sqlite_regexp::{CompileConfig, MatchCache};

fn cache<const N: usize>() -> MatchCache<N> {
    MatchCache::with_config(CompileConfig::default()).unwrap()
}

fn order<const N: usize>(cache: &MatchCache<N>) -> Vec<String> {
    cache.patterns().map(str::to_string).collect()
}

// =============================================================================
// Promotion and eviction
// =============================================================================

#[test]
fn capacity_two_evicts_least_recent() {
    let mut cache = cache::<2>();
    cache.resolve("a").unwrap();
    cache.resolve("b").unwrap();
    cache.resolve("a").unwrap();
    assert_eq!(order(&cache), ["a", "b"]);

    cache.resolve("c").unwrap();
    assert_eq!(order(&cache), ["c", "a"]);
}

#[test]
fn n_plus_one_distinct_evicts_only_first() {
    let mut cache = cache::<16>();
    let patterns: Vec<String> = (0..=16).map(|i| format!("p{i}")).collect();
    for p in &patterns {
        cache.resolve(p).unwrap();
    }

    assert_eq!(cache.len(), 16);
    assert!(!cache.contains("p0"));
    for p in &patterns[1..] {
        assert!(cache.contains(p), "{p} should still be cached");
    }
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn front_hit_is_free() {
    let mut cache = cache::<4>();
    cache.resolve("x").unwrap();
    let before = cache.stats();

    cache.resolve("x").unwrap();
    let after = cache.stats();
    assert_eq!(after.misses, before.misses);
    assert_eq!(after.hits, before.hits + 1);
    assert_eq!(order(&cache), ["x"]);
}

#[test]
fn hit_from_last_slot() {
    let mut cache = cache::<3>();
    for p in ["a", "b", "c"] {
        cache.resolve(p).unwrap();
    }
    cache.resolve("a").unwrap();
    assert_eq!(order(&cache), ["a", "c", "b"]);

    // "b" is now least recent
    cache.resolve("d").unwrap();
    assert_eq!(order(&cache), ["d", "a", "c"]);
}

#[test]
fn lookup_is_exact_text() {
    let mut cache = cache::<4>();
    cache.resolve("a+").unwrap();
    cache.resolve("a+ ").unwrap();
    cache.resolve("(?:a+)").unwrap();
    assert_eq!(cache.len(), 3);
}

// =============================================================================
// Failure paths
// =============================================================================

#[test]
fn syntax_error_is_not_cached() {
    let mut cache = cache::<2>();
    cache.resolve("a").unwrap();

    for _ in 0..2 {
        let err = cache.resolve("[z-a]").unwrap_err();
        assert!(err.is_syntax_error());
    }
    assert_eq!(order(&cache), ["a"]);

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.failures, 2);
    assert_eq!(stats.size, 1);
}

#[test]
fn failed_lookups_do_not_lower_hit_rate() {
    let mut cache = cache::<4>();
    cache.resolve("a").unwrap();
    for _ in 0..3 {
        cache.resolve("a").unwrap();
    }
    for _ in 0..10 {
        cache.resolve("(").unwrap_err();
    }
    assert!((cache.stats().hit_rate() - 0.75).abs() < 0.001);
}

#[test]
fn syntax_error_on_full_cache_evicts_nothing() {
    let mut cache = cache::<2>();
    cache.resolve("a").unwrap();
    cache.resolve("b").unwrap();

    assert!(cache.resolve("a{2,1}").is_err());
    assert_eq!(order(&cache), ["b", "a"]);
}

// =============================================================================
// Entries
// =============================================================================

#[test]
fn entries_carry_compiled_form() {
    let mut cache = cache::<4>();
    cache.resolve("literal").unwrap();
    cache.resolve("lit+eral").unwrap();

    let entries = cache.entries();
    assert_eq!(entries[0].pattern(), "lit+eral");
    assert!(entries[0].compiled().prefilter().is_none());
    assert_eq!(entries[1].pattern(), "literal");
    assert!(entries[1].compiled().prefilter().is_some());
}

#[test]
fn cached_matcher_behaves_like_fresh_compile() {
    let mut cache = cache::<4>();
    let subjects = ["", "abc", "ABC", "a1b2", "ünïcödé", "line\nbreak"];
    let patterns = [r"^\p{L}+$", "b", r"\d", "(?m)^break$", "(?i)abc"];
    let compiler = sqlite_regexp::PatternCompiler::default();

    for pattern in patterns {
        let fresh = compiler.compile(pattern).unwrap();
        for _ in 0..2 {
            let cached = cache.resolve(pattern).unwrap();
            for subject in subjects {
                assert_eq!(
                    cached.is_match(subject),
                    fresh.is_match(subject),
                    "{pattern:?} on {subject:?}"
                );
            }
        }
    }
}
