//! Round-trip tests for the emission record store.
//!
//! These run against a live PostgreSQL instance through `DATABASE_URL`
//! and a populated `co2emission_reduced` table. Run them with
//! `cargo test --features database`.

use chrono::NaiveDate;
use seaboard_database::{
    EMISSIONS, EmissionRecord, delete, establish_connection, get_by_key, insert, list_page,
    update,
};

// IMO numbers are seven digits; anything above that range cannot collide
// with warehouse data.
const TEST_IMO: i64 = 99_900_001;

fn test_record() -> EmissionRecord {
    EmissionRecord {
        imo: TEST_IMO,
        ship_name: Some("Test Vessel".to_string()),
        technical_efficiency_number: Some(5.2),
        ship_type: Some("tanker".to_string()),
        issue: NaiveDate::from_ymd_opt(2020, 1, 1),
        expiry: NaiveDate::from_ymd_opt(2025, 1, 1),
    }
}

#[test]
#[cfg_attr(not(feature = "database"), ignore)]
fn insert_then_get_round_trips() {
    dotenvy::dotenv().ok();
    let mut conn = establish_connection().expect("Failed to connect");
    delete(&mut conn, TEST_IMO).expect("Cleanup failed");

    let record = test_record();
    insert(&mut conn, &record).expect("Insert failed");

    let fetched = get_by_key(&mut conn, TEST_IMO)
        .expect("Lookup failed")
        .expect("Inserted record missing");
    assert_eq!(fetched, record);

    delete(&mut conn, TEST_IMO).expect("Cleanup failed");
}

#[test]
#[cfg_attr(not(feature = "database"), ignore)]
fn duplicate_insert_conflicts_and_leaves_original() {
    dotenvy::dotenv().ok();
    let mut conn = establish_connection().expect("Failed to connect");
    delete(&mut conn, TEST_IMO).expect("Cleanup failed");

    let record = test_record();
    insert(&mut conn, &record).expect("Insert failed");

    let mut duplicate = test_record();
    duplicate.ship_name = Some("Impostor".to_string());
    let err = insert(&mut conn, &duplicate).expect_err("Duplicate insert must fail");
    assert!(err.is_conflict());

    let fetched = get_by_key(&mut conn, TEST_IMO)
        .expect("Lookup failed")
        .expect("Original record missing");
    assert_eq!(fetched.ship_name.as_deref(), Some("Test Vessel"));

    delete(&mut conn, TEST_IMO).expect("Cleanup failed");
}

#[test]
#[cfg_attr(not(feature = "database"), ignore)]
fn update_of_missing_key_is_not_found() {
    dotenvy::dotenv().ok();
    let mut conn = establish_connection().expect("Failed to connect");
    delete(&mut conn, TEST_IMO).expect("Cleanup failed");

    let err = update(&mut conn, &test_record()).expect_err("Update of absent key must fail");
    assert!(err.is_not_found());
}

#[test]
#[cfg_attr(not(feature = "database"), ignore)]
fn update_changes_fields_but_not_the_key() {
    dotenvy::dotenv().ok();
    let mut conn = establish_connection().expect("Failed to connect");
    delete(&mut conn, TEST_IMO).expect("Cleanup failed");
    insert(&mut conn, &test_record()).expect("Insert failed");

    let mut changed = test_record();
    changed.ship_name = Some("Renamed Vessel".to_string());
    changed.technical_efficiency_number = Some(7.5);
    update(&mut conn, &changed).expect("Update failed");

    let fetched = get_by_key(&mut conn, TEST_IMO)
        .expect("Lookup failed")
        .expect("Updated record missing");
    assert_eq!(fetched.imo, TEST_IMO);
    assert_eq!(fetched.ship_name.as_deref(), Some("Renamed Vessel"));
    assert_eq!(fetched.technical_efficiency_number, Some(7.5));
    assert_eq!(fetched.ship_type.as_deref(), Some("tanker"));

    delete(&mut conn, TEST_IMO).expect("Cleanup failed");
}

#[test]
#[cfg_attr(not(feature = "database"), ignore)]
fn delete_is_idempotent() {
    dotenvy::dotenv().ok();
    let mut conn = establish_connection().expect("Failed to connect");
    delete(&mut conn, TEST_IMO).expect("Cleanup failed");
    insert(&mut conn, &test_record()).expect("Insert failed");

    delete(&mut conn, TEST_IMO).expect("First delete failed");
    assert!(
        get_by_key(&mut conn, TEST_IMO)
            .expect("Lookup failed")
            .is_none()
    );

    // Deleting again is a no-op, not an error
    delete(&mut conn, TEST_IMO).expect("Second delete failed");
    assert!(
        get_by_key(&mut conn, TEST_IMO)
            .expect("Lookup failed")
            .is_none()
    );
}

#[test]
#[cfg_attr(not(feature = "database"), ignore)]
fn inserted_record_appears_once_in_the_listing() {
    dotenvy::dotenv().ok();
    let mut conn = establish_connection().expect("Failed to connect");
    delete(&mut conn, TEST_IMO).expect("Cleanup failed");
    insert(&mut conn, &test_record()).expect("Insert failed");

    // Large enough limit to cover the whole table in one page for the
    // purposes of this check.
    let rows = list_page(&mut conn, &EMISSIONS, "imo", i64::from(i32::MAX), 0)
        .expect("Listing failed");
    let matches = rows
        .iter()
        .filter(|row| row.get("imo").and_then(|v| v.as_i64()) == Some(TEST_IMO))
        .count();
    assert_eq!(matches, 1);

    delete(&mut conn, TEST_IMO).expect("Cleanup failed");
}
