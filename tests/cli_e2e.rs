use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bites(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bites").unwrap();
    cmd.env("BITES_DATA_DIR", dir.path())
        .env_remove("BITES_PLACES_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn empty_list_suggests_adding() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No restaurants yet"));
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .args(["add", "--name", "Zuni Cafe", "--rating", "5", "--contact", "(415) 552-2522"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restaurant added: Zuni Cafe"));

    bites(&dir)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.").and(predicate::str::contains("Zuni Cafe")));

    assert!(dir.path().join("@restaurants.json").exists());
}

#[test]
fn add_without_rating_fails_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .args(["add", "--name", "Nameless"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Please fill out all fields"));

    assert!(!dir.path().join("@restaurants.json").exists());
}

#[test]
fn non_finite_location_is_refused() {
    let dir = TempDir::new().unwrap();
    bites(&dir).arg("seed").assert().success();

    bites(&dir)
        .args(["add", "--name", "Nowhere", "--rating", "4", "--at", "NaN,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finite"));

    bites(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Burger Haven"));
}

#[test]
fn seed_edit_details_delete() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample data added!"));

    bites(&dir)
        .args(["edit", "2", "--rating", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restaurant updated: Sushi World"));

    bites(&dir)
        .args(["details", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sushi World").and(predicate::str::contains("(2)")));

    bites(&dir)
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: Sushi World"));

    bites(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sushi World").not());
}

#[test]
fn editing_unknown_record_fails() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .args(["edit", "7", "--rating", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Restaurant not found: 7"));
}

#[test]
fn deleting_unknown_record_only_warns() {
    let dir = TempDir::new().unwrap();
    bites(&dir).arg("seed").assert().success();
    bites(&dir)
        .args(["delete", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No restaurant matches 'nope'"));
}

#[test]
fn clear_requires_confirmation_off_terminal() {
    let dir = TempDir::new().unwrap();
    bites(&dir).arg("seed").assert().success();

    bites(&dir).arg("clear").assert().failure();
    bites(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("Burger Haven"));

    bites(&dir)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All data cleared!"));
    assert!(!dir.path().join("@restaurants.json").exists());
}

#[test]
fn link_prints_map_urls() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .args(["add", "--name", "Mission Chinese", "--rating", "4", "--at", "37.761,-122.419"])
        .assert()
        .success();

    bites(&dir)
        .args(["link", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://www.google.com/maps/search/?api=1&query=37.761,-122.419",
        ));
}

#[test]
fn map_centres_on_record() {
    let dir = TempDir::new().unwrap();
    bites(&dir).arg("seed").assert().success();
    bites(&dir)
        .args(["map", "--record", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Centred on Burger Haven"));
}

#[test]
fn suggest_without_key_degrades() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .args(["suggest", "pizza"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("No suggestions")
                .and(predicate::str::contains("BITES_PLACES_API_KEY")),
        );
}

#[test]
fn empty_suggest_makes_no_lookup() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .arg("suggest")
        .assert()
        .success()
        .stdout(predicate::str::contains("No suggestions."));
}

#[test]
fn add_with_search_needs_a_key() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .args(["add", "--search", "tony's pizza", "--rating", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Place lookup failed"));
}

#[test]
fn config_set_and_show() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .args(["config", "search-radius-m", "1200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search-radius-m set to 1200"));

    bites(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("search-radius-m = 1200"));
}

#[test]
fn environment_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .args(["config", "search-radius-m", "1200"])
        .assert()
        .success();

    bites(&dir)
        .env("BITES_SEARCH_RADIUS_M", "300")
        .args(["config", "search-radius-m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("300"));
}

#[test]
fn about_names_the_team() {
    let dir = TempDir::new().unwrap();
    bites(&dir)
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal Restaurant Guide"));
}

#[test]
fn corrupt_store_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("@restaurants.json"), "{not json").unwrap();
    bites(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be decoded"));
}
