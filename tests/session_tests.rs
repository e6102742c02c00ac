//! End-to-end tests of the session API against CSV fixtures.

use std::io::Write;
use std::path::PathBuf;

use listing_stats::{ExportError, ExportOptions, FilterCriteria, LoadError, PerRoom, Session};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::{NamedTempFile, TempDir};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn loaded_session() -> Session {
    let mut session = Session::new();
    session
        .load(fixtures_path().join("listings.csv"))
        .expect("fixture should load");
    session
}

fn active_ids(session: &Session) -> Vec<String> {
    session.active_records().map(|l| l.id.clone()).collect()
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

fn read_json(path: &std::path::Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read export");
    serde_json::from_str(&text).expect("export is JSON")
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn load_coerces_numeric_fields() {
    let session = loaded_session();
    let all = session.all_records();

    assert_eq!(all.len(), 6);
    assert_eq!(session.active_len(), 6);

    assert_eq!(all[3].price, 1200.50);
    assert_eq!(all[3].accommodates, 4);
    assert_eq!(all[2].review_scores_rating, 0.0);
    assert_eq!(all[5].price, 0.0);
    assert_eq!(all[1].extra["name"], "Loft, downtown");
}

#[test]
fn failed_load_keeps_previous_data() {
    let mut session = loaded_session();
    session.filter(&FilterCriteria::default().min_price(100.0));

    let err = session
        .load(fixtures_path().join("missing.csv"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));

    assert_eq!(session.all_records().len(), 6);
    assert_eq!(active_ids(&session), vec!["2", "4", "5"]);
}

#[test]
fn malformed_csv_is_a_load_error() {
    let file = csv_file("id,host_id,price\n1,2,3,4\n");
    let err = Session::new().load(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Csv { .. }));
}

#[test]
fn operations_before_load_yield_empty_results() {
    let mut session = Session::new();
    session
        .filter(&FilterCriteria::default().min_price(10.0))
        .compute_stats()
        .compute_host_rankings();

    assert_eq!(session.active_len(), 0);
    assert!(session.price_per_room().is_empty());
    assert!(session.host_rankings().is_empty());
    assert_eq!(Session::find_max_price(session.all_records()), 0.0);
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn filter_starts_from_original_every_time() {
    let mut chained = loaded_session();
    chained
        .filter(&FilterCriteria::default().min_price(100.0))
        .filter(&FilterCriteria::default().min_accommodates(2));

    let mut direct = loaded_session();
    direct.filter(&FilterCriteria::default().min_accommodates(2));

    assert_eq!(active_ids(&chained), active_ids(&direct));
    assert_eq!(active_ids(&direct), vec!["1", "2", "4", "5"]);
}

#[test]
fn filter_is_idempotent_and_leaves_original_alone() {
    let mut session = loaded_session();
    let criteria = FilterCriteria::default().min_review_score(4.5);

    session.filter(&criteria);
    let first = active_ids(&session);
    session.filter(&criteria);

    assert_eq!(active_ids(&session), first);
    assert_eq!(first, vec!["1", "2", "4", "6"]);
    assert_eq!(session.all_records().len(), 6);
}

#[test]
fn empty_result_is_valid() {
    let mut session = loaded_session();
    session
        .filter(&FilterCriteria::default().min_price(10_000.0))
        .compute_stats()
        .compute_host_rankings();

    assert_eq!(session.active_len(), 0);
    assert!(session.price_per_room().is_empty());
    assert!(session.top_hosts(10).is_empty());
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn stats_follow_active_order() {
    let mut session = loaded_session();
    session.compute_stats();

    let stats = session.price_per_room();
    let ids: Vec<&str> = stats.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);

    assert_eq!(stats[0].avg_price_per_room.to_string(), "25.00");
    assert_eq!(stats[2].avg_price_per_room, PerRoom::NotApplicable);
    assert_eq!(stats[3].avg_price_per_room.to_string(), "300.13");
}

#[test]
fn compute_stats_twice_is_identical() {
    let mut session = loaded_session();
    session.filter(&FilterCriteria::default().min_accommodates(1));

    session.compute_stats();
    let first = serde_json::to_string(session.price_per_room()).unwrap();
    session.compute_stats();
    let second = serde_json::to_string(session.price_per_room()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn host_ranking_ties_keep_encounter_order() {
    let file = csv_file(
        "id,host_id,price,accommodates,review_scores_rating\n\
         1,A,1,1,1\n\
         2,C,1,1,1\n\
         3,B,1,1,1\n\
         4,B,1,1,1\n\
         5,A,1,1,1\n\
         6,B,1,1,1\n\
         7,A,1,1,1\n",
    );
    let mut session = Session::new();
    session.load(file.path()).unwrap().compute_host_rankings();

    let ranked: Vec<(&str, usize)> = session
        .host_rankings()
        .iter()
        .map(|r| (r.host.as_str(), r.count))
        .collect();
    assert_eq!(ranked, vec![("A", 3), ("B", 3), ("C", 1)]);
}

#[test]
fn top_hosts_is_a_slice_of_the_full_ranking() {
    let mut session = loaded_session();
    session.compute_host_rankings();

    assert_eq!(session.host_rankings().len(), 4);
    let top: Vec<&str> = session.top_hosts(2).iter().map(|r| r.host.as_str()).collect();
    assert_eq!(top, vec!["10", "20"]);
    assert_eq!(session.top_hosts(50).len(), 4);
}

#[test]
fn filtering_marks_aggregations_stale() {
    let mut session = loaded_session();
    session.compute_stats().compute_host_rankings();
    assert_eq!(session.price_per_room().len(), 6);

    session.filter(&FilterCriteria::default().min_price(100.0));
    assert!(session.price_per_room().is_empty());
    assert!(session.host_rankings().is_empty());
}

#[test]
fn max_price_uses_the_records_it_is_given() {
    let mut session = loaded_session();
    session.filter(&FilterCriteria::default().min_review_score(5.0));

    assert_eq!(active_ids(&session), vec!["6"]);
    assert_eq!(Session::find_max_price(session.active_records()), 0.0);
    assert_eq!(Session::find_max_price(session.all_records()), 1200.50);
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn three_row_pipeline() {
    let file = csv_file(
        "id,host_id,price,accommodates,review_scores_rating\n\
         1,h1,$50,2,4.0\n\
         2,h2,$300,3,4.0\n\
         3,h3,$0,0,4.0\n",
    );
    let mut session = Session::new();
    session
        .load(file.path())
        .unwrap()
        .filter(&FilterCriteria::default().min_price(100.0))
        .compute_stats();

    assert_eq!(active_ids(&session), vec!["2"]);
    let stats = session.price_per_room();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].room_num, 3);
    assert_eq!(stats[0].avg_price_per_room.to_string(), "100.00");
    assert_eq!(Session::find_max_price(session.all_records()), 300.0);
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn export_writes_snapshot() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.json");

    let mut session = loaded_session();
    session
        .filter(&FilterCriteria::default().min_price(100.0))
        .compute_stats()
        .compute_host_rankings()
        .export(&out)
        .unwrap();

    let json = read_json(&out);
    assert_eq!(json["totalFilteredListings"], 3);
    assert_eq!(json["avgPricePerRoom"][0]["id"], "2");
    assert_eq!(json["avgPricePerRoom"][0]["avgPricePerRoom"], "100.00");
    assert_eq!(json["avgPricePerRoom"][0]["roomNum"], 3);
    assert_eq!(json["hostRankings"][0]["host"], "20");
    assert_eq!(json["hostRankings"][0]["count"], 2);
    assert_eq!(json["filteredData"].as_array().unwrap().len(), 3);
    assert_eq!(json["filteredData"][1]["price"], 1200.5);
    assert_eq!(json["filteredData"][1]["name"], "Studio");
}

#[test]
fn export_without_aggregation_recomputes_for_the_file_only() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.json");

    let mut session = loaded_session();
    session
        .compute_stats()
        .filter(&FilterCriteria::default().min_accommodates(3));
    session.export(&out).unwrap();

    let json = read_json(&out);
    assert_eq!(json["totalFilteredListings"], 2);
    assert_eq!(json["avgPricePerRoom"].as_array().unwrap().len(), 2);
    assert_eq!(json["hostRankings"].as_array().unwrap().len(), 2);

    assert!(session.price_per_room().is_empty());
    assert!(session.host_rankings().is_empty());
}

#[test]
fn chain_continues_after_export() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let mut session = loaded_session();
    session
        .filter(&FilterCriteria::default().min_price(100.0))
        .export(&first)
        .unwrap()
        .filter(&FilterCriteria::default().min_accommodates(3))
        .compute_stats()
        .export(&second)
        .unwrap();

    assert_eq!(read_json(&first)["totalFilteredListings"], 3);
    assert_eq!(read_json(&second)["totalFilteredListings"], 2);
    assert_eq!(session.price_per_room().len(), 2);
}

#[test]
fn export_can_omit_records() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.json");

    let mut session = Session::with_export_options(ExportOptions {
        include_records: false,
    });
    session
        .load(fixtures_path().join("listings.csv"))
        .unwrap()
        .export(&out)
        .unwrap();

    let json = read_json(&out);
    assert_eq!(json["totalFilteredListings"], 6);
    assert!(json.get("filteredData").is_none());
}

#[test]
fn export_failure_leaves_session_unchanged() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("no_such_dir").join("out.json");

    let mut session = loaded_session();
    session.compute_stats();
    let before = serde_json::to_string(session.price_per_room()).unwrap();

    let err = session.export(&out).unwrap_err();
    assert!(matches!(err, ExportError::Io { .. }));
    assert!(!out.exists());

    assert_eq!(serde_json::to_string(session.price_per_room()).unwrap(), before);
    assert_eq!(session.active_len(), 6);
}
