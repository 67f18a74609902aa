//! CLI smoke entry point.
//!
//! # Responsibility
//! - Walk the four rental operations against a throwaway in-memory
//!   database to verify `velorent_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use std::error::Error;
use velorent_core::db::open_db_in_memory;
use velorent_core::{
    BicycleDraft, FleetService, RentRequest, RentalService, SequenceIdProvider,
    SqliteBicycleRepository, SqliteRenterRepository, SqliteUserRepository, UserDraft, UserService,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("velorent demo failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("velorent_core version={}", velorent_core::core_version());
    let conn = open_db_in_memory()?;

    let mut users = UserService::new(
        SqliteUserRepository::try_new(&conn)?,
        SequenceIdProvider::new("user"),
    );
    let alice = users.create_user(UserDraft {
        user_name: "Alice".to_string(),
        user_address: "1 Main St".to_string(),
        user_age: "30".to_string(),
    })?;
    println!("created user {} name={}", alice.user_id, alice.user_name);

    let mut fleet = FleetService::new(
        SqliteBicycleRepository::try_new(&conn)?,
        SequenceIdProvider::new("bike"),
    );
    let bicycle = fleet.add_bicycle(BicycleDraft {
        kind: "road".to_string(),
        is_available: true,
        renter_id: String::new(),
    })?;
    println!("added bicycle {} type={}", bicycle.bicycle_id, bicycle.kind);

    let mut rentals = RentalService::new(
        SqliteUserRepository::try_new(&conn)?,
        SqliteBicycleRepository::try_new(&conn)?,
        SqliteRenterRepository::try_new(&conn)?,
        SequenceIdProvider::new("rental"),
    );
    let renter = rentals.rent_bicycle(
        &alice.user_id,
        RentRequest {
            rent_time: "2024-05-04T10:00".to_string(),
            bicycle_id: bicycle.bicycle_id.clone(),
        },
    )?;
    println!(
        "rented bicycle {} to user {} as {}",
        renter.bicycle_id, renter.renter_user_id, renter.renter_id
    );

    let returned = rentals.return_bicycle(&alice.user_id, &bicycle.bicycle_id)?;
    println!("returned bicycle {} ok={returned}", bicycle.bicycle_id);

    match fleet.get_bicycle(&bicycle.bicycle_id)? {
        Some(after) => println!(
            "bicycle {} available={} renter_id={:?}",
            after.bicycle_id, after.is_available, after.renter_id
        ),
        None => eprintln!("bicycle {} vanished after return", bicycle.bicycle_id),
    }

    Ok(())
}
