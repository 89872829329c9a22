//! Resolved session identity.
//!
//! A [`Session`] is what request handlers see once the session cookie has been
//! resolved against the user store. Its `user` field combines the default
//! session identity (`id`, `email`, `name`) with the user's [`UserRole`], so a
//! session without a `USER`/`ADMIN` role cannot be constructed or
//! deserialised.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DisplayName, EmailAddress, User, UserId, UserRole};

/// Identity carried by a resolved session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionUser {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    #[schema(value_type = String, example = "ada@example.org")]
    pub email: EmailAddress,
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub name: DisplayName,
    pub role: UserRole,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            email: user.email().clone(),
            name: user.name().clone(),
            role: user.role(),
        }
    }
}

/// Session resolved for one request.
///
/// # Examples
/// ```
/// use exam_registry::domain::{Session, UserRole};
/// use serde_json::json;
///
/// let session: Session = serde_json::from_value(json!({
///     "user": {
///         "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
///         "email": "ada@example.org",
///         "name": "Ada",
///         "role": "ADMIN"
///     }
/// }))
/// .unwrap();
/// assert_eq!(session.user.role, UserRole::Admin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    /// Build the session view of a stored user.
    pub fn for_user(user: &User) -> Self {
        Self {
            user: SessionUser::from(user),
        }
    }

    /// Role of the signed-in user.
    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// Whether the signed-in user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn payload(role: Option<&str>) -> Value {
        let mut user = json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "email": "ada@example.org",
            "name": "Ada",
        });
        if let (Some(role), Some(map)) = (role, user.as_object_mut()) {
            map.insert("role".to_owned(), json!(role));
        }
        json!({ "user": user })
    }

    #[rstest]
    #[case("USER", false)]
    #[case("ADMIN", true)]
    fn accepts_known_roles(#[case] role: &str, #[case] admin: bool) {
        let session: Session = serde_json::from_value(payload(Some(role))).expect("valid session");
        assert_eq!(session.is_admin(), admin);
    }

    #[rstest]
    #[case(Some("OWNER"))]
    #[case(Some("admin"))]
    #[case(Some(""))]
    #[case(None)]
    fn rejects_missing_or_unknown_roles(#[case] role: Option<&str>) {
        assert!(serde_json::from_value::<Session>(payload(role)).is_err());
    }

    #[rstest]
    fn for_user_copies_identity_and_role() {
        let user = User::new(
            UserId::random(),
            EmailAddress::new("grace@example.org").expect("email"),
            DisplayName::new("Grace Hopper").expect("name"),
            UserRole::User,
            Utc::now(),
        );
        let session = Session::for_user(&user);
        assert_eq!(session.user.id, *user.id());
        assert_eq!(session.user.email.as_ref(), "grace@example.org");
        assert_eq!(session.role(), UserRole::User);
    }
}
