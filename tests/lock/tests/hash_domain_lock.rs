//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. The domain set has the expected count
//! 2. All domain byte strings are unique
//! 3. All domains are null-terminated and follow `ATHENA::*::V1\0`
//! 4. No raw `ATHENA::` domain literals in production source outside
//!    `hash_domain.rs`
//! 5. No `deny_unknown_fields` in production source, so suite and world
//!    schemas can gain fields without breaking older readers

use std::collections::BTreeSet;
use std::path::Path;

use athena_kernel::proof::hash::canonical_hash;
use athena_kernel::proof::hash_domain::HashDomain;
use lock_tests::workspace_root;

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        5,
        "expected 5 domain variants; if you added a new domain, update this count"
    );
}

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(seen.insert(domain.as_bytes()), "duplicate domain bytes: {domain}");
    }
}

#[test]
fn hash_domain_wire_format() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(bytes.starts_with(b"ATHENA::"), "{domain} does not start with ATHENA::");
        assert!(bytes.ends_with(b"::V1\0"), "{domain} does not end with ::V1\\0");
        assert_eq!(
            bytes.iter().filter(|&&b| b == 0).count(),
            1,
            "{domain} has an interior null"
        );
    }
}

#[test]
fn same_bytes_different_domains_differ() {
    let digests: BTreeSet<String> = HashDomain::ALL
        .iter()
        .map(|domain| canonical_hash(*domain, b"{}").as_str().to_string())
        .collect();
    assert_eq!(digests.len(), HashDomain::ALL.len());
}

fn collect_rust_sources(dir: &Path, out: &mut Vec<std::path::PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rust_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Production sources of every library crate containing `pattern`.
fn production_files_containing(pattern: &str) -> Vec<String> {
    let root = workspace_root();
    let mut sources = Vec::new();
    for member in ["kernel", "search", "csp", "games", "harness"] {
        collect_rust_sources(&root.join(member).join("src"), &mut sources);
    }
    assert!(!sources.is_empty(), "no sources found under {}", root.display());

    sources
        .iter()
        .filter(|path| !path.ends_with("hash_domain.rs"))
        .filter(|path| std::fs::read_to_string(path).is_ok_and(|text| text.contains(pattern)))
        .map(|path| path.display().to_string())
        .collect()
}

#[test]
fn no_raw_domain_literals_outside_hash_domain() {
    let offenders = production_files_containing("b\"ATHENA::");
    assert!(offenders.is_empty(), "raw domain literals in: {offenders:?}");
}

#[test]
fn no_deny_unknown_fields_in_production_code() {
    let offenders = production_files_containing(concat!("deny_unknown", "_fields"));
    assert!(offenders.is_empty(), "deny_unknown_fields in: {offenders:?}");
}
