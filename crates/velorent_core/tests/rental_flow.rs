use rusqlite::Connection;
use velorent_core::db::open_db_in_memory;
use velorent_core::{
    Bicycle, BicycleDraft, BicycleRepository, FleetService, RentRequest, RentalError,
    RentalService, SqliteBicycleRepository, SqliteRenterRepository, SqliteUserRepository, User,
    UserDraft, UserService, UuidIdProvider, ValidationError,
};

#[test]
fn full_rental_cycle_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let alice = create_user(&conn, "Alice");
    let bicycle = add_bicycle(&conn, bicycle_draft("road"));

    let mut rentals = rental_service(&conn);
    let renter = rentals
        .rent_bicycle(&alice.user_id, rent_request(&bicycle.bicycle_id))
        .unwrap();
    assert_eq!(renter.renter_user_id, alice.user_id);
    assert_eq!(renter.bicycle_id, bicycle.bicycle_id);
    assert_eq!(renter.rent_time, "2024-05-04T10:00");

    let held = fetch_bicycle(&conn, &bicycle.bicycle_id);
    assert!(!held.is_available);
    assert_eq!(held.renter_id, alice.user_id);

    assert!(rentals
        .return_bicycle(&alice.user_id, &bicycle.bicycle_id)
        .unwrap());

    let released = fetch_bicycle(&conn, &bicycle.bicycle_id);
    assert!(released.is_available);
    assert_eq!(released.renter_id, "");

    // the ledger record from the rent survives the return untouched
    let stored = rentals.get_renter(&renter.renter_id).unwrap().unwrap();
    assert_eq!(stored, renter);
    assert_eq!(renter_count(&conn), 1);
}

#[test]
fn renting_a_held_bicycle_fails_and_mutates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let alice = create_user(&conn, "Alice");
    let bob = create_user(&conn, "Bob");
    let bicycle = add_bicycle(&conn, bicycle_draft("road"));

    let mut rentals = rental_service(&conn);
    rentals
        .rent_bicycle(&alice.user_id, rent_request(&bicycle.bicycle_id))
        .unwrap();
    let before = fetch_bicycle(&conn, &bicycle.bicycle_id);

    let err = rentals
        .rent_bicycle(&bob.user_id, rent_request(&bicycle.bicycle_id))
        .unwrap_err();
    assert!(matches!(err, RentalError::BicycleUnavailable(id) if id == bicycle.bicycle_id));

    assert_eq!(fetch_bicycle(&conn, &bicycle.bicycle_id), before);
    assert_eq!(renter_count(&conn), 1);
}

#[test]
fn rent_rejects_unknown_user_and_unknown_bicycle() {
    let conn = open_db_in_memory().unwrap();
    let alice = create_user(&conn, "Alice");
    let bicycle = add_bicycle(&conn, bicycle_draft("road"));

    let mut rentals = rental_service(&conn);

    let err = rentals
        .rent_bicycle("no-such-user", rent_request(&bicycle.bicycle_id))
        .unwrap_err();
    assert!(matches!(err, RentalError::UserNotFound(id) if id == "no-such-user"));

    let err = rentals
        .rent_bicycle(&alice.user_id, rent_request("no-such-bike"))
        .unwrap_err();
    assert!(matches!(err, RentalError::BicycleNotFound(id) if id == "no-such-bike"));

    assert_eq!(renter_count(&conn), 0);
}

#[test]
fn rent_payload_validation_precedes_lookups() {
    let conn = open_db_in_memory().unwrap();
    let alice = create_user(&conn, "Alice");
    let bicycle = add_bicycle(&conn, bicycle_draft("road"));

    let mut rentals = rental_service(&conn);
    let err = rentals
        .rent_bicycle(
            &alice.user_id,
            RentRequest {
                rent_time: String::new(),
                bicycle_id: bicycle.bicycle_id.clone(),
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RentalError::Validation(ValidationError::MissingField { field: "rentTime" })
    ));

    assert_eq!(renter_count(&conn), 0);
    assert!(fetch_bicycle(&conn, &bicycle.bicycle_id).is_available);
}

#[test]
fn non_holder_cannot_return_a_bicycle() {
    let conn = open_db_in_memory().unwrap();
    let alice = create_user(&conn, "Alice");
    let bob = create_user(&conn, "Bob");
    let bicycle = add_bicycle(&conn, bicycle_draft("road"));

    let mut rentals = rental_service(&conn);
    rentals
        .rent_bicycle(&alice.user_id, rent_request(&bicycle.bicycle_id))
        .unwrap();

    let err = rentals
        .return_bicycle(&bob.user_id, &bicycle.bicycle_id)
        .unwrap_err();
    assert!(matches!(err, RentalError::NotCurrentRenter { .. }));

    let still_held = fetch_bicycle(&conn, &bicycle.bicycle_id);
    assert!(!still_held.is_available);
    assert_eq!(still_held.renter_id, alice.user_id);
}

#[test]
fn returning_twice_fails_the_second_time() {
    let conn = open_db_in_memory().unwrap();
    let alice = create_user(&conn, "Alice");
    let bicycle = add_bicycle(&conn, bicycle_draft("road"));

    let mut rentals = rental_service(&conn);
    rentals
        .rent_bicycle(&alice.user_id, rent_request(&bicycle.bicycle_id))
        .unwrap();
    assert!(rentals
        .return_bicycle(&alice.user_id, &bicycle.bicycle_id)
        .unwrap());

    let err = rentals
        .return_bicycle(&alice.user_id, &bicycle.bicycle_id)
        .unwrap_err();
    assert!(matches!(err, RentalError::NotCurrentRenter { .. }));
}

#[test]
fn preassigned_bicycle_is_not_rentable_until_returned() {
    let conn = open_db_in_memory().unwrap();
    let alice = create_user(&conn, "Alice");
    let bob = create_user(&conn, "Bob");
    let bicycle = add_bicycle(
        &conn,
        BicycleDraft {
            kind: "cargo".to_string(),
            is_available: false,
            renter_id: alice.user_id.clone(),
        },
    );

    let mut rentals = rental_service(&conn);
    let err = rentals
        .rent_bicycle(&bob.user_id, rent_request(&bicycle.bicycle_id))
        .unwrap_err();
    assert!(matches!(err, RentalError::BicycleUnavailable(_)));

    assert!(rentals
        .return_bicycle(&alice.user_id, &bicycle.bicycle_id)
        .unwrap());
    rentals
        .rent_bicycle(&bob.user_id, rent_request(&bicycle.bicycle_id))
        .unwrap();

    let held = fetch_bicycle(&conn, &bicycle.bicycle_id);
    assert!(!held.is_available);
    assert_eq!(held.renter_id, bob.user_id);
}

fn rental_service(
    conn: &Connection,
) -> RentalService<
    SqliteUserRepository<'_>,
    SqliteBicycleRepository<'_>,
    SqliteRenterRepository<'_>,
    UuidIdProvider,
> {
    RentalService::new(
        SqliteUserRepository::try_new(conn).unwrap(),
        SqliteBicycleRepository::try_new(conn).unwrap(),
        SqliteRenterRepository::try_new(conn).unwrap(),
        UuidIdProvider,
    )
}

fn create_user(conn: &Connection, name: &str) -> User {
    let mut service =
        UserService::new(SqliteUserRepository::try_new(conn).unwrap(), UuidIdProvider);
    service
        .create_user(UserDraft {
            user_name: name.to_string(),
            user_address: "1 Main St".to_string(),
            user_age: "30".to_string(),
        })
        .unwrap()
}

fn add_bicycle(conn: &Connection, draft: BicycleDraft) -> Bicycle {
    let mut service = FleetService::new(
        SqliteBicycleRepository::try_new(conn).unwrap(),
        UuidIdProvider,
    );
    service.add_bicycle(draft).unwrap()
}

fn bicycle_draft(kind: &str) -> BicycleDraft {
    BicycleDraft {
        kind: kind.to_string(),
        is_available: true,
        renter_id: String::new(),
    }
}

fn rent_request(bicycle_id: &str) -> RentRequest {
    RentRequest {
        rent_time: "2024-05-04T10:00".to_string(),
        bicycle_id: bicycle_id.to_string(),
    }
}

fn fetch_bicycle(conn: &Connection, bicycle_id: &str) -> Bicycle {
    SqliteBicycleRepository::try_new(conn)
        .unwrap()
        .get_bicycle(bicycle_id)
        .unwrap()
        .unwrap()
}

fn renter_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM renters;", [], |row| row.get(0))
        .unwrap()
}
