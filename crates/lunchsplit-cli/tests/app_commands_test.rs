//! Drives the controller with parsed command lines.

use clap::Parser;
use lunchsplit_cli::config::StorageBackend;
use lunchsplit_cli::{App, Cli, LunchSplitConfig, is_user_error};
use lunchsplit_core::{InMemoryStore, JsonFileStore, SessionStore};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn exec(app: &mut App, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("lunchsplit").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    app.run(cli.command, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn memory_app() -> App {
    App::with_store(LunchSplitConfig::default(), Box::new(InMemoryStore::new())).unwrap()
}

#[test]
fn test_full_bill_from_commands() {
    let mut app = memory_app();
    exec(&mut app, &["participant", "add", "Alice"]).unwrap();
    exec(&mut app, &["participant", "add", "Bob"]).unwrap();
    exec(
        &mut app,
        &["item", "add", "--name", "Plov", "--price", "30,00", "--shared-by", "alice", "bob"],
    )
    .unwrap();
    exec(
        &mut app,
        &["item", "add", "--name", "Tea", "--price", "5", "--quantity", "2", "--shared-by", "Bob"],
    )
    .unwrap();
    exec(&mut app, &["extras", "set", "--tax", "10", "--tip", "4"]).unwrap();

    let summary = app.session().summary();
    assert_eq!(summary.subtotal, dec!(40.00));
    assert_eq!(summary.extra_costs.tax, dec!(4.00));
    assert_eq!(summary.grand_total, dec!(48.00));

    let text = exec(&mut app, &["summary"]).unwrap();
    assert!(text.contains("Grand total: 48,00 TJS"));

    let json = exec(&mut app, &["summary", "--json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["grandTotal"], "48.00");
}

#[test]
fn test_extras_set_keeps_omitted_values() {
    let mut app = memory_app();
    exec(&mut app, &["extras", "set", "--tax", "12", "--service", "10"]).unwrap();
    exec(&mut app, &["extras", "set", "--tip-kind", "percent", "--tip", "5"]).unwrap();

    let extras = app.session().extra_costs();
    assert_eq!(extras.tax_percent, dec!(12));
    assert_eq!(extras.service_percent, dec!(10));
    assert_eq!(extras.tip_value, dec!(5));
}

#[test]
fn test_edit_and_adjust_quantity() {
    let mut app = memory_app();
    exec(&mut app, &["item", "add", "--name", "Samsa", "--price", "6"]).unwrap();
    exec(&mut app, &["item", "edit", "samsa", "--quantity", "3", "--price", "6.5"]).unwrap();
    assert_eq!(app.session().items()[0].quantity, 3);
    assert_eq!(app.session().items()[0].price, dec!(6.5));

    exec(&mut app, &["item", "edit", "Samsa", "--adjust", "-10"]).unwrap();
    assert_eq!(app.session().items()[0].quantity, 1);
}

#[test]
fn test_removing_participant_unassigns_them() {
    let mut app = memory_app();
    exec(&mut app, &["participant", "add", "Alice"]).unwrap();
    exec(&mut app, &["participant", "add", "Bob"]).unwrap();
    exec(&mut app, &["item", "add", "--name", "Plov", "--price", "20", "--shared-by", "Alice,Bob"])
        .unwrap();
    exec(&mut app, &["participant", "remove", "Bob"]).unwrap();

    let summary = app.session().summary();
    assert_eq!(summary.breakdowns.len(), 1);
    assert_eq!(summary.breakdowns[0].total, dec!(20.00));
    assert_eq!(app.session().items()[0].share_count(), 1);
}

#[test]
fn test_user_errors_are_classified() {
    let mut app = memory_app();
    exec(&mut app, &["participant", "add", "Alice"]).unwrap();

    let duplicate = exec(&mut app, &["participant", "add", "ALICE"]).unwrap_err();
    assert!(is_user_error(&duplicate));

    let bad_price =
        exec(&mut app, &["item", "add", "--name", "Tea", "--price", "free"]).unwrap_err();
    assert!(is_user_error(&bad_price));

    let unknown = exec(&mut app, &["item", "remove", "Lagman"]).unwrap_err();
    assert!(is_user_error(&unknown));

    let nothing = exec(&mut app, &["export", "--format", "json"]).unwrap_err();
    assert!(is_user_error(&nothing));
}

#[test]
fn test_session_survives_restart_with_file_store() {
    let dir = TempDir::new().unwrap();
    let mut config = LunchSplitConfig::default();
    config.storage.data_dir = dir.path().to_path_buf();
    config.storage.backend = StorageBackend::File;

    let mut app = App::open(config.clone()).unwrap();
    exec(&mut app, &["participant", "add", "Alice"]).unwrap();
    exec(&mut app, &["item", "add", "--name", "Soup", "--price", "9", "--shared-by", "Alice"])
        .unwrap();

    let reopened = App::open(config).unwrap();
    assert_eq!(reopened.session(), app.session());
}

#[test]
fn test_clear_empties_store() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());
    let path = store.path().to_path_buf();
    let mut app = App::with_store(LunchSplitConfig::default(), Box::new(store)).unwrap();

    exec(&mut app, &["participant", "add", "Alice"]).unwrap();
    assert!(path.exists());

    exec(&mut app, &["clear"]).unwrap();
    assert!(app.session().is_empty());
    assert!(JsonFileStore::new(dir.path()).load().unwrap().is_none());
}

#[test]
fn test_export_to_configured_directory() {
    let dir = TempDir::new().unwrap();
    let mut config = LunchSplitConfig::default();
    config.export.directory = dir.path().join("exports");

    let mut app = App::with_store(config, Box::new(InMemoryStore::new())).unwrap();
    exec(&mut app, &["participant", "add", "Alice"]).unwrap();
    exec(&mut app, &["item", "add", "--name", "Soup", "--price", "9", "--shared-by", "Alice"])
        .unwrap();

    let text = exec(&mut app, &["export"]).unwrap();
    assert!(text.starts_with("Exported to "));
    let entries: Vec<_> = std::fs::read_dir(dir.path().join("exports")).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].as_ref().unwrap().file_name();
    assert!(name.to_string_lossy().ends_with(".csv"));
}

#[test]
fn test_participant_list_shows_what_each_colleague_owes() {
    let mut app = memory_app();
    exec(&mut app, &["participant", "add", "Alice"]).unwrap();
    exec(&mut app, &["participant", "add", "Bob"]).unwrap();
    exec(&mut app, &["item", "add", "--name", "Plov", "--price", "30", "--shared-by", "Alice,Bob"])
        .unwrap();
    exec(&mut app, &["item", "add", "--name", "Cake", "--price", "10", "--shared-by", "Alice"])
        .unwrap();
    exec(&mut app, &["extras", "set", "--tip", "8"]).unwrap();

    // Alice: 15 + 10 + 8 * 25/40 = 30; Bob: 15 + 8 * 15/40 = 18
    let text = exec(&mut app, &["participant", "list"]).unwrap();
    assert!(text.contains("Alice  owes 30,00 TJS"));
    assert!(text.contains("Bob  owes 18,00 TJS"));
}

#[test]
fn test_oversized_dish_is_rejected_and_summary_still_works() {
    let mut app = memory_app();
    exec(&mut app, &["participant", "add", "Alice"]).unwrap();

    let err = exec(
        &mut app,
        &[
            "item", "add", "--name", "Gold", "--price", "100000000000000000000", "--quantity",
            "1000000000", "--shared-by", "Alice",
        ],
    )
    .unwrap_err();
    assert!(is_user_error(&err));
    assert!(app.session().items().is_empty());

    let quantity_err = exec(
        &mut app,
        &["item", "add", "--name", "Rice", "--price", "3", "--quantity", "1000000000"],
    )
    .unwrap_err();
    assert!(is_user_error(&quantity_err));

    let text = exec(&mut app, &["summary"]).unwrap();
    assert!(text.contains("Grand total: 0,00 TJS"));
}
