//! Tests for the domain user model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn ada(created_at: DateTime<Utc>) -> User {
    User::new(
        UserId::new(VALID_ID).expect("valid id"),
        EmailAddress::new("Ada@Example.org").expect("valid email"),
        DisplayName::new("Ada Lovelace").expect("valid name"),
        UserRole::Admin,
        created_at,
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("@example.org", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
#[case("a@b@c", UserValidationError::InvalidEmail)]
#[case("ada lovelace@example.org", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw).expect_err("invalid email"), expected);
}

#[rstest]
fn email_is_trimmed_and_lower_cased() {
    let email = EmailAddress::new("  Ada@Example.ORG ").expect("valid email");
    assert_eq!(email.as_ref(), "ada@example.org");
}

#[rstest]
#[case("", UserValidationError::EmptyName)]
#[case("   ", UserValidationError::EmptyName)]
#[case("bad\u{7}bell", UserValidationError::NameInvalidCharacters)]
fn display_name_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(DisplayName::new(raw).expect_err("invalid name"), expected);
}

#[rstest]
fn display_name_rejects_overlong_input() {
    let raw = "a".repeat(DISPLAY_NAME_MAX + 1);
    assert_eq!(
        DisplayName::new(raw).expect_err("too long"),
        UserValidationError::NameTooLong {
            max: DISPLAY_NAME_MAX
        }
    );
}

#[rstest]
#[case("USER", UserRole::User)]
#[case("ADMIN", UserRole::Admin)]
fn role_parses_literal_values(#[case] raw: &str, #[case] expected: UserRole) {
    assert_eq!(raw.parse::<UserRole>().expect("known role"), expected);
    assert_eq!(expected.as_str(), raw);
}

#[rstest]
#[case("user")]
#[case("Admin")]
#[case("OWNER")]
#[case("")]
fn role_rejects_anything_else(#[case] raw: &str) {
    assert!(raw.parse::<UserRole>().is_err());
    assert!(serde_json::from_value::<UserRole>(json!(raw)).is_err());
}

#[rstest]
fn user_serialises_camel_case(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "email": "ada@example.org",
            "name": "Ada Lovelace",
            "role": "ADMIN",
            "createdAt": "2024-05-01T12:00:00Z",
        })
    );
}

#[rstest]
fn user_deserialisation_validates_fields(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    let round_tripped: User = serde_json::from_value(value).expect("deserialise user");
    assert_eq!(round_tripped, ada);

    let bad = json!({
        "id": VALID_ID,
        "email": "ada@example.org",
        "name": "Ada",
        "role": "SUPERUSER",
        "createdAt": "2024-05-01T12:00:00Z",
    });
    assert!(serde_json::from_value::<User>(bad).is_err());
}
