//! Closed string enums stored as TEXT columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements Display/FromStr and the sqlx TEXT mapping for a closed enum.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $slug:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($slug => Ok($name::$variant),)+
                    other => Err(format!(
                        concat!("Invalid ", stringify!($name), ": {}"), other
                    )),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                let s: String = self.as_str().to_string();
                <String as Encode<Postgres>>::encode(s, buf)
            }
        }
    };
}

/// User role. Anything absent or unknown resolves to `Member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Librarian,
    Admin,
}

text_enum!(Role {
    Member => "member",
    Librarian => "librarian",
    Admin => "admin",
});

impl From<Option<String>> for Role {
    fn from(s: Option<String>) -> Self {
        s.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

/// Book availability, cached from the existence of an open borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Borrowed,
}

text_enum!(BookStatus {
    Available => "available",
    Borrowed => "borrowed",
});

/// Event status label shown on the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Attending,
    Maybe,
    Declined,
}

text_enum!(EventStatus {
    Upcoming => "upcoming",
    Attending => "attending",
    Maybe => "maybe",
    Declined => "declined",
});

/// Invitation lifecycle state. Accepted and declined are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

text_enum!(InvitationStatus {
    Pending => "pending",
    Accepted => "accepted",
    Declined => "declined",
});

impl InvitationStatus {
    /// Whether the invitation can still be answered
    pub fn is_pending(&self) -> bool {
        matches!(self, InvitationStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_member() {
        assert_eq!(Role::from(None), Role::Member);
        assert_eq!(Role::from(Some("gardener".to_string())), Role::Member);
        assert_eq!(Role::from(Some("admin".to_string())), Role::Admin);
    }

    #[test]
    fn slugs_round_trip() {
        for role in [Role::Member, Role::Librarian, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Declined,
        ] {
            assert_eq!(status.as_str().parse::<InvitationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        assert!("returned".parse::<BookStatus>().is_err());
        assert!("cancelled".parse::<EventStatus>().is_err());
    }
}
