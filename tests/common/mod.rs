#![allow(dead_code)]

use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::Command;
use tripbook::application::workflow::ReservationForm;

pub fn form(first: &str, last: &str, passport: &str, trip_date: &str) -> ReservationForm {
    ReservationForm {
        first_name: first.to_string(),
        last_name: last.to_string(),
        passport_number: passport.to_string(),
        trip_date: trip_date.to_string(),
        base_price: "1000".to_string(),
        ..Default::default()
    }
}

pub fn anna_nowak() -> ReservationForm {
    ReservationForm {
        base_price: "2000".to_string(),
        adjustment: "-200".to_string(),
        ..form("Anna", "Nowak", "AB1234567", "2025-06-01")
    }
}

/// The CLI pointed at `db_path`, isolated from the caller's environment.
pub fn tripbook(db_path: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("tripbook"));
    cmd.env_remove("TRIPBOOK_DB")
        .env_remove("RUST_LOG")
        .arg("--db-path")
        .arg(db_path);
    cmd
}

pub fn add_anna(db_path: &Path) -> Command {
    let mut cmd = tripbook(db_path);
    cmd.args([
        "add",
        "--first-name",
        "Anna",
        "--last-name",
        "Nowak",
        "--passport",
        "AB1234567",
        "--trip-date",
        "2025-06-01",
        "--base-price",
        "2000",
        "--adjustment",
        "-200",
    ]);
    cmd
}
