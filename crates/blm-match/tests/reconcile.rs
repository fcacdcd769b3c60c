use blm_common::column_text_values;
use blm_model::{ColumnSelection, MatchError, MatchOptions, NameScript, Threshold};
use blm_match::{CancellationToken, Reconciler, reconcile, token_sort_ratio};
use polars::prelude::*;
use proptest::prelude::*;

fn blocklist(ids: &[Option<&str>], names: &[Option<&str>]) -> DataFrame {
    DataFrame::new(vec![
        Series::new("citizenship_number".into(), ids).into_column(),
        Series::new("name".into(), names).into_column(),
    ])
    .unwrap()
}

fn ledger(ids: &[Option<&str>], names: &[Option<&str>]) -> DataFrame {
    DataFrame::new(vec![
        Series::new("CUS_LEG_ID".into(), ids).into_column(),
        Series::new("name".into(), names).into_column(),
    ])
    .unwrap()
}

fn text(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    column_text_values(df.column(column).unwrap()).unwrap()
}

fn some(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some((*v).to_string())).collect()
}

#[test]
fn devanagari_identifiers_match_ascii_identifiers() {
    let source = blocklist(&[Some("१२३४५६")], &[Some("राम थापा")]);
    let target = ledger(&[Some("123456")], &[Some("SITA SHRESTHA")]);

    let result = reconcile(
        &source,
        &target,
        &ColumnSelection::default(),
        &MatchOptions::default(),
    )
    .unwrap();

    assert_eq!(result.exact.height(), 1);
    assert_eq!(text(&result.exact, "source_citizenship_number"), some(&["123456"]));
    assert_eq!(text(&result.exact, "match_type"), some(&["CitizenshipMatch"]));
    assert!(result.exact.column("match_score").is_err());
    assert_eq!(result.fuzzy.height(), 0);
    assert_eq!(result.total_matches(), 1);
}

#[test]
fn unkeyed_row_matches_by_transliterated_name() {
    let source = blocklist(&[Some("nan")], &[Some("राम बहादुर थापा")]);
    let target = ledger(
        &[Some("999"), Some("998")],
        &[Some("HARI PRASAD"), Some("RAM BAHADUR THAPA")],
    );

    let result = reconcile(
        &source,
        &target,
        &ColumnSelection::default(),
        &MatchOptions::default(),
    )
    .unwrap();

    assert_eq!(result.exact.height(), 0);
    assert_eq!(result.fuzzy.height(), 1);
    assert_eq!(text(&result.fuzzy, "target_CUS_LEG_ID"), some(&["998"]));
    assert_eq!(
        text(&result.fuzzy, "source_canonical_name"),
        some(&["rama bahadura thapa"])
    );
    assert_eq!(text(&result.fuzzy, "match_type"), some(&["NameMatch"]));

    let score = result
        .fuzzy
        .column("match_score")
        .unwrap()
        .f64()
        .unwrap()
        .get(0)
        .unwrap();
    assert!((85.0..=100.0).contains(&score));
    assert_eq!(result.stats.unkeyed_source_rows, 1);
    assert_eq!(result.stats.fuzzy_matches, 1);
}

#[test]
fn best_candidate_below_threshold_is_dropped() {
    let source = blocklist(&[None], &[Some("सीता")]);
    let target = ledger(&[Some("1")], &[Some("HARI PRASAD")]);

    let result = reconcile(
        &source,
        &target,
        &ColumnSelection::default(),
        &MatchOptions::default(),
    )
    .unwrap();

    assert_eq!(result.total_matches(), 0);
    assert_eq!(result.stats.rejected_below_threshold, 1);
}

#[test]
fn null_name_without_identifier_is_silently_skipped() {
    let source = blocklist(&[Some(" "), Some("42")], &[None, Some("हरि")]);
    let target = ledger(&[Some("42")], &[Some("HARI")]);

    let result = reconcile(
        &source,
        &target,
        &ColumnSelection::default(),
        &MatchOptions::default(),
    )
    .unwrap();

    assert_eq!(result.exact.height(), 1);
    assert_eq!(result.fuzzy.height(), 0);
    assert_eq!(result.stats.skipped_unmatchable, 1);
    assert_eq!(result.stats.source_names.unmatchable, 1);
}

#[test]
fn reordered_name_scores_full_marks() {
    assert_eq!(token_sort_ratio("ram kumar sharma", "sharma kumar ram"), 100.0);

    let options = MatchOptions::default().with_scripts(NameScript::Latin, NameScript::Latin);
    let source = blocklist(&[None], &[Some("Ram Kumar Sharma")]);
    let target = ledger(&[Some("1")], &[Some("SHARMA, KUMAR RAM")]);
    let result = reconcile(&source, &target, &ColumnSelection::default(), &options).unwrap();

    let scores = result.fuzzy.column("match_score").unwrap().f64().unwrap();
    assert_eq!(scores.get(0), Some(100.0));
}

#[test]
fn threshold_includes_equal_scores_only() {
    let columns = ColumnSelection::default();
    let source = blocklist(&[None], &[Some("abcd")]);
    let target = ledger(&[Some("1")], &[Some("abce")]);
    let latin = MatchOptions::default().with_scripts(NameScript::Latin, NameScript::Latin);

    let at = latin.clone().with_threshold(Threshold::new(75).unwrap());
    assert_eq!(reconcile(&source, &target, &columns, &at).unwrap().fuzzy.height(), 1);

    let above = latin.with_threshold(Threshold::new(76).unwrap());
    assert_eq!(reconcile(&source, &target, &columns, &above).unwrap().fuzzy.height(), 0);
}

#[test]
fn missing_name_column_fails_before_matching() {
    let source = DataFrame::new(vec![
        Series::new("citizenship_number".into(), [Some("1")]).into_column(),
    ])
    .unwrap();
    let target = ledger(&[Some("1")], &[Some("RAM")]);

    let err = reconcile(
        &source,
        &target,
        &ColumnSelection::default(),
        &MatchOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "source table has no column 'name'");
}

#[test]
fn cancellation_surfaces_as_error() {
    let columns = ColumnSelection::default();
    let options = MatchOptions::default();
    let source = blocklist(&[None], &[Some("राम")]);
    let target = ledger(&[Some("1")], &[Some("RAM")]);
    let token = CancellationToken::new();
    token.cancel();

    let err = Reconciler::new(&columns, &options)
        .with_cancellation(token)
        .run(&source, &target)
        .unwrap_err();
    assert!(matches!(err, MatchError::Cancelled { .. }));
}

#[test]
fn inputs_are_not_modified() {
    let source = blocklist(&[Some(" १ ")], &[Some("राम")]);
    let target = ledger(&[Some("1")], &[Some("RAM")]);
    let before = source.clone();

    reconcile(
        &source,
        &target,
        &ColumnSelection::default(),
        &MatchOptions::default(),
    )
    .unwrap();

    assert!(source.equals_missing(&before));
}

fn arb_key() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => "[1-4]".prop_map(Some),
        1 => Just(Some(" ".to_string())),
        1 => Just(Some("nan".to_string())),
        1 => Just(Some(String::new())),
        1 => Just(None),
    ]
}

fn frame(key: &str, keys: &[Option<String>]) -> DataFrame {
    let names: Vec<String> = (0..keys.len()).map(|i| format!("person {i}")).collect();
    DataFrame::new(vec![
        Series::new(key.into(), keys.to_vec()).into_column(),
        Series::new("name".into(), names).into_column(),
    ])
    .unwrap()
}

fn usable(key: &Option<String>) -> Option<&str> {
    key.as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty() && *k != "nan")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn every_source_row_is_keyed_or_unkeyed(
        source_keys in prop::collection::vec(arb_key(), 0..12),
        target_keys in prop::collection::vec(arb_key(), 0..12),
    ) {
        let source = frame("citizenship_number", &source_keys);
        let target = frame("CUS_LEG_ID", &target_keys);
        let options = MatchOptions::default().with_scripts(NameScript::Latin, NameScript::Latin);
        let result = reconcile(&source, &target, &ColumnSelection::default(), &options).unwrap();

        let keyed = source_keys.iter().filter(|k| usable(k).is_some()).count();
        prop_assert_eq!(result.stats.keyed_source_rows, keyed);
        prop_assert_eq!(
            result.stats.keyed_source_rows + result.stats.unkeyed_source_rows,
            source_keys.len()
        );
    }

    #[test]
    fn exact_rows_are_exactly_the_equal_key_pairs(
        source_keys in prop::collection::vec(arb_key(), 0..12),
        target_keys in prop::collection::vec(arb_key(), 0..12),
    ) {
        let source = frame("citizenship_number", &source_keys);
        let target = frame("CUS_LEG_ID", &target_keys);
        let options = MatchOptions::default().with_scripts(NameScript::Latin, NameScript::Latin);
        let result = reconcile(&source, &target, &ColumnSelection::default(), &options).unwrap();

        let expected: usize = source_keys
            .iter()
            .filter_map(usable)
            .map(|s| target_keys.iter().filter(|t| usable(t) == Some(s)).count())
            .sum();
        prop_assert_eq!(result.exact.height(), expected);

        let left = text(&result.exact, "source_citizenship_number");
        let right = text(&result.exact, "target_CUS_LEG_ID");
        for (l, r) in left.iter().zip(&right) {
            prop_assert!(l.is_some());
            prop_assert_eq!(l, r);
        }
    }
}
