use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::{NewUser, User, UserReplacement};
use crate::domain::error::DomainError;

/// REST DTO for user representation with serde/utoipa
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new user.
///
/// Fields are optional on the wire so that missing or `null` values surface
/// as validation errors instead of deserialization failures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// REST DTO for a full user update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Body of 422/500 responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DomainError> {
    value.ok_or_else(|| DomainError::missing_field(field))
}

impl TryFrom<CreateUserReq> for NewUser {
    type Error = DomainError;

    fn try_from(req: CreateUserReq) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(req.name, "name")?,
            email: required(req.email, "email")?,
        })
    }
}

impl TryFrom<UpdateUserReq> for UserReplacement {
    type Error = DomainError;

    fn try_from(req: UpdateUserReq) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(req.name, "name")?,
            email: required(req.email, "email")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn user_dto_uses_camel_case_strings() {
        let at = Utc.with_ymd_and_hms(2023, 11, 14, 12, 0, 0).unwrap();
        let dto = UserDto {
            id: Uuid::nil(),
            name: "iury oliveira".into(),
            email: "i@t.com".into(),
            created_at: at,
            updated_at: at,
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["createdAt"], "2023-11-14T12:00:00Z");
        assert_eq!(json["createdAt"], json["updatedAt"]);
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn null_and_missing_fields_deserialize_as_none() {
        let req: CreateUserReq =
            serde_json::from_value(serde_json::json!({ "name": null })).unwrap();
        assert_eq!(req.name, None);
        assert_eq!(req.email, None);
    }

    #[test]
    fn missing_fields_become_domain_errors() {
        let err = NewUser::try_from(CreateUserReq {
            name: Some("x".into()),
            email: None,
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::MissingField { field: "email" }));

        let err = UserReplacement::try_from(UpdateUserReq::default()).unwrap_err();
        assert!(matches!(err, DomainError::MissingField { field: "name" }));
    }
}
