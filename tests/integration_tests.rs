//! Integration tests for kropki-patterns
//!
//! These tests exercise the library the way the engine does: compile tables
//! from templates, look neighbourhoods up for either side, dump and reload
//! tables, and audit catalogs against the realizable patterns.

use std::collections::BTreeSet;

use kropki_patterns::PatternError;
use kropki_patterns::constants::{IMPOSSIBLE_EMPTY, IMPOSSIBLE_OUTSIDE, PATTERN3_SIZE};
use kropki_patterns::enumerate::{audit, canonical_patterns, check_bottom_edge};
use kropki_patterns::pattern3::{Pattern3, Pattern3Table};
use kropki_patterns::pattern52::{Pattern52, Pattern52Table};
use kropki_patterns::patterns::{Catalog, EdgeCatalog, Patterns};
use kropki_patterns::table::{Field, MergePolicy, PatternCode, Player};
use kropki_patterns::wildcard::Expansion;

// =============================================================================
// Helper functions
// =============================================================================

fn p3(atoms: &str) -> Pattern3 {
    Pattern3::from_atoms(atoms).unwrap()
}

fn random_field(rng: &mut fastrand::Rng) -> Field {
    match rng.u8(0..4) {
        0 => Field::Empty,
        1 => Field::First,
        2 => Field::Second,
        _ => Field::Outside,
    }
}

/// A random neighbourhood as the board model would sample it.
fn random_pattern3(rng: &mut fastrand::Rng) -> Pattern3 {
    let fields = std::array::from_fn(|_| random_field(rng));
    let atari = std::array::from_fn(|_| rng.bool());
    Pattern3::from_neighbours(fields, atari)
}

// =============================================================================
// Symmetry algebra tests
// =============================================================================

#[test]
fn test_group_laws_on_sampled_codes() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..10_000 {
        let p = random_pattern3(&mut rng);
        assert!(p.is_well_formed());
        assert_eq!(p.rotate().rotate().rotate().rotate(), p);
        assert_eq!(p.reflect().reflect(), p);
        assert_eq!(p.reverse_colour().reverse_colour(), p);
        // A reflection conjugates a rotation into its inverse
        assert_eq!(p.reflect().rotate().reflect(), p.rotate().rotate().rotate());
    }
}

#[test]
fn test_decode_is_stable_on_sampled_codes() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..10_000 {
        let p = random_pattern3(&mut rng);
        let atoms = p.atoms();
        assert_eq!(p3(&atoms).atoms(), atoms);
        assert!(!atoms.contains(IMPOSSIBLE_EMPTY as char));
        assert!(!atoms.contains(IMPOSSIBLE_OUTSIDE as char));
    }
}

#[test]
fn test_symmetric_neighbourhoods_have_small_orbits() {
    for atoms in ["....H....", "YYYYHYYYY", "###.H.###", "Y.Y.H.Y.Y"] {
        let p = p3(atoms);
        let orbit: BTreeSet<_> = p.orbit().into_iter().collect();
        assert!(orbit.len() < 8, "{atoms}");
        assert_eq!(p.canonical().canonical(), p.canonical());
        for q in orbit {
            assert_eq!(q.canonical(), p.canonical());
        }
    }
}

#[test]
fn test_canonical_on_sampled_codes() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..2_000 {
        let p = random_pattern3(&mut rng);
        let c = p.canonical();
        assert!(c.is_canonical());
        assert!(p.orbit().contains(&c));
        assert_eq!(p.reverse_colour().canonical(), c.reverse_colour().canonical());
    }
}

// =============================================================================
// Template compilation tests
// =============================================================================

#[test]
fn test_enclosing_hane_covers_every_expansion() {
    let table =
        Pattern3Table::from_literals(&[concat!("XOX", ".H.", "???"), "52"], MergePolicy::Replace)
            .unwrap();
    let expansion = Expansion::new("XOX.H.???", Pattern3::tracks_atari).unwrap();
    assert_eq!(expansion.len(), 2 * 6 * 4 * 4);
    for atoms in expansion {
        let p = p3(&atoms);
        for q in p.orbit() {
            assert_eq!(table.lookup(q, Player::First), 52, "{}", q.atoms());
            assert_eq!(table.lookup(q.reverse_colour(), Player::Second), 52);
        }
    }
}

#[test]
fn test_enclosing_hane_under_max_merge() {
    let literals = [concat!("XOX", ".H.", "???"), "52", concat!("XOX", ".H.", "?Y?"), "60"];
    let table = Pattern3Table::from_literals(&literals, MergePolicy::Max).unwrap();
    let expansion = Expansion::new("XOX.H.???", Pattern3::tracks_atari).unwrap();
    for atoms in expansion {
        for q in p3(&atoms).orbit() {
            assert!(table.lookup(q, Player::First) >= 52);
        }
    }
    assert_eq!(table.lookup(p3("YQY.H..Y."), Player::First), 60);
    assert_eq!(table.lookup(p3("YQY.H...."), Player::First), 52);
}

#[test]
fn test_all_empty_template_end_to_end() {
    let table = Pattern3Table::from_literals(&[".........", "0"], MergePolicy::Replace).unwrap();
    assert_eq!(table.lookup(Pattern3::EMPTY, Player::First), 0);
    assert_eq!(table.lookup(Pattern3::EMPTY, Player::Second), 0);
    assert_eq!(table.count_nonzero(), 0);
}

#[test]
fn test_replace_precedence() {
    let literals = ["XOX.H.???", "52", "XOX.H.?.?", "80", "XOX.H.###", "-5"];
    let table = Pattern3Table::from_literals(&literals, MergePolicy::Replace).unwrap();
    // The first positive value wins
    assert_eq!(table.get(p3("YQY.H....")), 52);
    // A negative value overrides it
    assert_eq!(table.get(p3("YQY.H.###")), -5);
    assert_eq!(table.get(p3("QYQ.H.###")), -5);
}

#[test]
fn test_value_pair_for_inverted_colours() {
    let table = Pattern3Table::from_literals(&["?X?OHO???", "7,3"], MergePolicy::Replace).unwrap();
    let p = p3(".Y.QHQ...");
    assert_eq!(table.lookup(p, Player::First), 7);
    assert_eq!(table.lookup(p.reverse_colour(), Player::First), 3);
    assert_eq!(table.lookup(p, Player::Second), 3);
}

#[test]
fn test_one_side_template() {
    let table = Pattern3Table::from_literals(&["XOX.H.???X", "52"], MergePolicy::Replace).unwrap();
    let p = p3("YQY.H....");
    assert_eq!(table.lookup(p, Player::First), 52);
    assert_eq!(table.lookup(p.rotate(), Player::First), 52);
    assert_eq!(table.lookup(p.reverse_colour(), Player::First), 0);
    assert_eq!(table.lookup(p, Player::Second), 0);
}

#[test]
fn test_template_errors_surface() {
    let err = Pattern3Table::from_literals(&["XOX.H.??Z", "1"], MergePolicy::Replace).unwrap_err();
    assert!(matches!(err, PatternError::UnknownSymbol { symbol: 'Z', position: 8, .. }));

    let err = Pattern3Table::from_literals(&["|OX.H.???", "1"], MergePolicy::Replace).unwrap_err();
    assert!(matches!(err, PatternError::AtariNotTracked { position: 0, .. }));

    let err = Pattern3Table::from_literals(&["XOX.H.???"], MergePolicy::Replace).unwrap_err();
    assert!(matches!(err, PatternError::MissingValue { .. }));
}

// =============================================================================
// Edge band table tests
// =============================================================================

#[test]
fn test_edge_band_table() {
    let table =
        Pattern52Table::from_literals(&["?XO.X??H.?", "0.6"], MergePolicy::MaxKeepNegative)
            .unwrap();
    let p = Pattern52::from_atoms(".YQ.Y..H..").unwrap();
    assert_eq!(table.lookup(p, Player::First), 0.6);
    assert_eq!(table.lookup(p.reflect(), Player::First), 0.6);
    assert_eq!(table.lookup(p.reverse_colour(), Player::Second), 0.6);
    assert_eq!(table.lookup(p.reverse_colour(), Player::First), 0.6);
    assert_eq!(table.lookup(Pattern52::EMPTY, Player::First), 0.0);
}

#[test]
fn test_edge_band_negative_sticks() {
    let literals = ["X.H.?O..x?", "-0.5", "X.H.?O...?", "0.9"];
    let table = Pattern52Table::from_literals(&literals, MergePolicy::MaxKeepNegative).unwrap();
    let p = Pattern52::from_atoms("Y.H..Q....").unwrap();
    assert_eq!(table.get(p), -0.5);
}

// =============================================================================
// Binary table file tests
// =============================================================================

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moves.bin");

    let table = Catalog::Moves.build().unwrap();
    table.save_to_file(&path).unwrap();
    assert_eq!(
        std::fs::metadata(&path).unwrap().len(),
        (PATTERN3_SIZE * 2) as u64
    );

    let loaded = Pattern3Table::load_from_file(&path).unwrap();
    assert_eq!(loaded.values(), table.values());
    let p = p3("YQY.H....");
    assert_eq!(loaded.lookup(p, Player::Second), table.lookup(p, Player::Second));
}

#[test]
fn test_save_and_load_edge_band() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edge.bin");

    let table = EdgeCatalog::Edge.build().unwrap();
    table.save_to_file(&path).unwrap();
    let loaded = Pattern52Table::load_from_file(&path).unwrap();
    assert_eq!(loaded.values(), table.values());
}

#[test]
fn test_load_rejects_wrong_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    std::fs::write(&path, [0u8, 1, 2]).unwrap();

    let err = Pattern3Table::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        PatternError::TableSize { expected, actual: 3 } if expected == PATTERN3_SIZE * 2
    ));
    // A 3x3 dump is not an edge band dump
    let moves = dir.path().join("moves.bin");
    Pattern3Table::new(MergePolicy::Replace).save_to_file(&moves).unwrap();
    assert!(matches!(
        Pattern52Table::load_from_file(&moves),
        Err(PatternError::TableSize { .. })
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Pattern3Table::load_from_file(dir.path().join("missing.bin")).unwrap_err();
    assert!(matches!(err, PatternError::Io(_)));
}

#[test]
fn test_set_empty_value_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moves.bin");
    Catalog::Moves.build().unwrap().save_to_file(&path).unwrap();

    let mut table = Pattern3Table::load_from_file(&path).unwrap();
    table.set_empty_value(-1);
    assert_eq!(table.lookup(Pattern3::EMPTY, Player::First), -1);
    assert_eq!(table.lookup(Pattern3::EMPTY, Player::Second), -1);
}

// =============================================================================
// Enumeration and audit tests
// =============================================================================

#[test]
fn test_bottom_edge_on_rendered_patterns() {
    // One off-board neighbour flanked by two more on the same side
    assert!(check_bottom_edge(&p3("....H.###").ring()));
    // A single isolated off-board cell on the bottom row
    assert!(!check_bottom_edge(&p3("....H..#.").ring()));
}

#[test]
fn test_enumeration_is_deterministic() {
    let first = canonical_patterns();
    let second = canonical_patterns();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4437);
    assert!(first.contains(&Pattern3::EMPTY));
    for p in &first {
        let atoms = p.atoms();
        assert!(!atoms.contains(IMPOSSIBLE_EMPTY as char), "{atoms}");
        assert!(!atoms.contains(IMPOSSIBLE_OUTSIDE as char), "{atoms}");
        assert!(p.is_canonical());
    }
}

#[test]
fn test_audit_of_catalog() {
    let realizable = canonical_patterns();
    let table = Catalog::Moves.build().unwrap();
    let coverage = audit(&table, &realizable);
    assert!(!coverage.covered.is_empty());
    assert_eq!(coverage.covered.len() + coverage.uncovered.len(), realizable.len());
}

#[test]
fn test_audit_flags_impossible_template() {
    let realizable = canonical_patterns();
    // Two corners off-board with the edge side between them on the board
    let table = Pattern3Table::from_literals(&["#.#.H....", "1"], MergePolicy::Replace).unwrap();
    let coverage = audit(&table, &realizable);
    assert!(coverage.covered.is_empty());
    assert!(coverage.spurious.contains(&p3("#.#.H....").canonical()));
}

// =============================================================================
// Catalog bundle tests
// =============================================================================

#[test]
fn test_bundle_is_shared_between_threads() {
    let patterns = Patterns::build().unwrap();
    let p = p3("YQY.H....");
    let expected = patterns.moves.lookup(p, Player::First);
    std::thread::scope(|s| {
        for player in [Player::First, Player::Second] {
            let patterns = &patterns;
            s.spawn(move || {
                let q = match player {
                    Player::First => p,
                    Player::Second => p.reverse_colour(),
                };
                assert_eq!(patterns.moves.lookup(q, player), expected);
            });
        }
    });
}
