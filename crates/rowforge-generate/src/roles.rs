//! Semantic column roles.
//!
//! An ordered table of `(matcher, generator)` pairs evaluated in priority
//! order against the lower-cased column name; the first match wins. Keeping
//! the rules as data makes the dispatch auditable and each rule testable on
//! its own.

use chrono::{Duration, NaiveDateTime};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StreetName, ZipCode};
use fake::faker::internet::en::{DomainSuffix, Password, SafeEmail, Username};
use fake::faker::lorem::en::Word;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::families::datetime_between;
use crate::value::Value;

/// One semantic generation rule.
pub struct Role {
    /// Stable identifier used in logs and tests.
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub generate: fn(&mut ChaCha8Rng, NaiveDateTime) -> Value,
}

/// Priority-ordered rule table. Specific name forms come before the
/// substring rules (`email`, `phone`) so that e.g. `contact_name` is a
/// full name rather than falling through.
pub const ROLES: &[Role] = &[
    Role { name: "first_name", matches: is_first_name, generate: first_name },
    Role { name: "last_name", matches: is_last_name, generate: last_name },
    Role { name: "full_name", matches: is_full_name, generate: full_name },
    Role { name: "email", matches: is_email, generate: email },
    Role { name: "username", matches: is_username, generate: username },
    Role { name: "sku", matches: is_sku, generate: sku },
    Role { name: "phone", matches: is_phone, generate: phone },
    Role { name: "city", matches: is_city, generate: city },
    Role { name: "country", matches: is_country, generate: country },
    Role { name: "street_address", matches: is_street_address, generate: street_address },
    Role { name: "postal_code", matches: is_postal_code, generate: postal_code },
    Role { name: "url", matches: is_url, generate: url },
    Role { name: "password", matches: is_password, generate: password },
    Role { name: "created_at", matches: is_created_at, generate: created_at },
    Role { name: "updated_at", matches: is_updated_at, generate: updated_at },
];

/// First role matching the lower-cased column name, if any.
pub fn role_for(column: &str) -> Option<&'static Role> {
    ROLES.iter().find(|role| (role.matches)(column))
}

fn is_first_name(name: &str) -> bool {
    matches!(name, "first_name" | "firstname" | "fname" | "given_name")
}

fn is_last_name(name: &str) -> bool {
    matches!(name, "last_name" | "lastname" | "lname" | "surname" | "family_name")
}

fn is_full_name(name: &str) -> bool {
    matches!(name, "full_name" | "name" | "customer_name" | "contact_name")
}

fn is_email(name: &str) -> bool {
    name.contains("email")
}

fn is_username(name: &str) -> bool {
    matches!(name, "username" | "user_name" | "login" | "account")
}

fn is_sku(name: &str) -> bool {
    matches!(name, "sku" | "product_code" | "item_code" | "code")
}

fn is_phone(name: &str) -> bool {
    name.contains("phone") || name == "msisdn"
}

fn is_city(name: &str) -> bool {
    matches!(name, "city" | "town")
}

fn is_country(name: &str) -> bool {
    name == "country"
}

fn is_street_address(name: &str) -> bool {
    matches!(name, "address" | "street" | "street_address" | "addr_line1")
}

fn is_postal_code(name: &str) -> bool {
    matches!(name, "postal_code" | "zipcode" | "zip")
}

fn is_url(name: &str) -> bool {
    matches!(name, "url" | "website" | "homepage")
}

fn is_password(name: &str) -> bool {
    matches!(name, "password" | "passwd" | "hashed_password")
}

fn is_created_at(name: &str) -> bool {
    matches!(name, "created_at" | "createdon" | "created_date" | "inserted_at")
}

fn is_updated_at(name: &str) -> bool {
    matches!(
        name,
        "updated_at" | "modified_at" | "updatedon" | "modifiedon" | "last_modified"
    )
}

fn first_name(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = FirstName().fake_with_rng(rng);
    Value::Text(value)
}

fn last_name(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = LastName().fake_with_rng(rng);
    Value::Text(value)
}

fn full_name(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = Name().fake_with_rng(rng);
    Value::Text(value)
}

fn email(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = SafeEmail().fake_with_rng(rng);
    Value::Text(value)
}

fn username(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = Username().fake_with_rng(rng);
    Value::Text(value)
}

fn sku(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let letters: String = (0..3)
        .map(|_| char::from(rng.random_range(b'A'..=b'Z')))
        .collect();
    let digits: u32 = rng.random_range(0..100_000_000);
    Value::Text(format!("{letters}-{digits:08}"))
}

fn phone(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = PhoneNumber().fake_with_rng(rng);
    Value::Text(value)
}

fn city(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = CityName().fake_with_rng(rng);
    Value::Text(value)
}

fn country(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = CountryName().fake_with_rng(rng);
    Value::Text(value)
}

fn street_address(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    Value::Text(format!("{number} {street}"))
}

fn postal_code(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = ZipCode().fake_with_rng(rng);
    Value::Text(value)
}

fn url(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    Value::Text(format!("https://www.{host}.{suffix}/"))
}

fn password(rng: &mut ChaCha8Rng, _now: NaiveDateTime) -> Value {
    let value: String = Password(12..13).fake_with_rng(rng);
    Value::Text(value)
}

/// Uniform over the two-year window ending one year ago. Together with the
/// `updated_at` window this keeps `updated_at >= created_at` for any two
/// draws sharing one reference instant.
fn created_at(rng: &mut ChaCha8Rng, now: NaiveDateTime) -> Value {
    Value::DateTime(datetime_between(
        rng,
        now - Duration::days(3 * 365),
        now - Duration::days(365),
    ))
}

/// Uniform over the last year up to the reference instant.
fn updated_at(rng: &mut ChaCha8Rng, now: NaiveDateTime) -> Value {
    Value::DateTime(datetime_between(rng, now - Duration::days(365), now))
}
