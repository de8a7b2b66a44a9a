//! Request and response shapes of the TrueCoach API.

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// An identifier the API sends either as a JSON string or as a JSON number.
///
/// Both forms decode to the same text: `12345` and `"12345"` each become
/// `"12345"`. Any other JSON kind is rejected with an error naming it.
///
/// # Examples
///
/// ```
/// use truecoach::FlexibleId;
///
/// let from_number: FlexibleId = serde_json::from_str("12345").unwrap();
/// let from_string: FlexibleId = serde_json::from_str("\"12345\"").unwrap();
///
/// assert_eq!(from_number, from_string);
/// assert_eq!(from_number.as_str(), "12345");
/// assert!(serde_json::from_str::<FlexibleId>("true").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FlexibleId(String);

impl FlexibleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FlexibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FlexibleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for FlexibleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FlexibleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for FlexibleId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for FlexibleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FlexibleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for FlexibleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FlexibleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlexibleIdVisitor;

        impl<'de> Visitor<'de> for FlexibleIdVisitor {
            type Value = FlexibleId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or number identifier")
            }

            fn visit_str<E>(self, value: &str) -> Result<FlexibleId, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<FlexibleId, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<FlexibleId, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<FlexibleId, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(value.to_string()))
            }

            // Integral floats such as `12345.0` keep their integer text.
            fn visit_f64<E>(self, value: f64) -> Result<FlexibleId, E>
            where
                E: de::Error,
            {
                if value.is_finite() && value.fract() == 0.0 {
                    Ok(FlexibleId(format!("{:.0}", value)))
                } else {
                    Err(E::invalid_value(de::Unexpected::Float(value), &self))
                }
            }

            fn visit_unit<E>(self) -> Result<FlexibleId, E>
            where
                E: de::Error,
            {
                Err(E::invalid_type(de::Unexpected::Other("null"), &self))
            }
        }

        deserializer.deserialize_any(FlexibleIdVisitor)
    }
}

/// Body of `POST /oauth/token`.
#[derive(Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> TokenRequest<'a> {
    pub fn password(username: &'a str, password: &'a str) -> Self {
        Self {
            grant_type: "password",
            username,
            password,
        }
    }
}

/// Session returned by a successful login.
///
/// The access token is opaque; pass it back unchanged to the authenticated
/// operations. It is never refreshed by this crate.
#[derive(Clone, PartialEq, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    pub token_type: String,
    pub user_id: FlexibleId,
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// The authenticated user's profile.
///
/// `id` and `client_id` live in different namespaces: habit trackers are
/// scoped by `client_id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: FlexibleId,
    pub client_id: FlexibleId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub timezone: Option<String>,
    pub units: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<i64>,
    pub image_id: Option<u64>,
}

#[derive(Deserialize)]
pub(crate) struct UserProfileEnvelope {
    pub user: UserProfile,
}

/// Opaque description of a tracking window (previous, current or next).
pub type DurationDescriptor = serde_json::Map<String, serde_json::Value>;

/// A day's habit tracking data for one client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HabitTrackerResponse {
    #[serde(default)]
    pub trackings: Vec<HabitTrackerEntry>,
    pub previous_duration: Option<DurationDescriptor>,
    pub next_duration: Option<DurationDescriptor>,
    pub current_duration: Option<DurationDescriptor>,
    /// Set when the returned data belongs to a prior period.
    #[serde(default)]
    pub is_previous: bool,
}

#[derive(Deserialize)]
pub(crate) struct HabitTrackerEnvelope {
    pub response: HabitTrackerResponse,
}

/// One day of recorded metrics. Every metric is `None` when it was not
/// recorded, whether the key was missing or `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HabitTrackerEntry {
    pub id: u64,
    /// Empty when the API sends no date for the row.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    pub client_id: FlexibleId,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub weight: Option<f64>,
    pub sleep: Option<f64>,
    pub steps: Option<u64>,
    pub energy: Option<f64>,
    pub hunger: Option<f64>,
    pub stress: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Formats a date the way the habit tracker endpoint expects it, e.g. `Feb 1, 2026`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
/// assert_eq!(truecoach::tracker_date(date), "Feb 1, 2026");
/// ```
pub fn tracker_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flexible_id_from_number_and_string() {
        let from_number: FlexibleId = serde_json::from_value(json!(12345)).unwrap();
        let from_string: FlexibleId = serde_json::from_value(json!("12345")).unwrap();

        assert_eq!(from_number.as_str(), "12345");
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_flexible_id_integral_float() {
        let id: FlexibleId = serde_json::from_str("12345.0").unwrap();
        assert_eq!(id, "12345");
    }

    #[test]
    fn test_flexible_id_negative_number() {
        let id: FlexibleId = serde_json::from_value(json!(-7)).unwrap();
        assert_eq!(id, "-7");
    }

    #[test]
    fn test_flexible_id_rejects_fractional_float() {
        let err = serde_json::from_str::<FlexibleId>("1.5").unwrap_err();
        assert!(err.to_string().contains("floating point `1.5`"));
    }

    #[test]
    fn test_flexible_id_rejects_other_kinds() {
        let cases = [
            ("true", "boolean"),
            ("[1]", "sequence"),
            (r#"{"id": 1}"#, "map"),
            ("null", "null"),
        ];

        for (input, kind) in cases {
            let err = serde_json::from_str::<FlexibleId>(input).unwrap_err();
            let message = err.to_string();
            assert!(
                message.contains(kind),
                "error for {} should name {}: {}",
                input,
                kind,
                message
            );
            assert!(message.contains("a string or number identifier"));
        }
    }

    #[test]
    fn test_flexible_id_serializes_as_string() {
        let id = FlexibleId::from(77u64);
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("77"));
        assert_eq!(id.to_string(), "77");
        assert_eq!(id.into_string(), "77");
    }

    #[test]
    fn test_token_request_shape() {
        let body = serde_json::to_value(TokenRequest::password("a@b.com", "secret")).unwrap();
        assert_eq!(
            body,
            json!({"grant_type": "password", "username": "a@b.com", "password": "secret"})
        );
    }

    #[test]
    fn test_session_token_debug_redacts_access_token() {
        let token: SessionToken = serde_json::from_value(json!({
            "access_token": "super-secret",
            "token_type": "bearer",
            "user_id": 1
        }))
        .unwrap();

        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(token.user_id, "1");
    }

    #[test]
    fn test_user_profile_keeps_ids_apart() {
        let envelope: UserProfileEnvelope = serde_json::from_value(json!({
            "user": {
                "id": 1,
                "client_id": 77,
                "email": "a@b.com",
                "first_name": "Ada",
                "last_name": null,
                "timezone": "America/New_York",
                "units": "imperial",
                "weight": 150.5,
                "height": null,
                "image_id": 9
            }
        }))
        .unwrap();

        let user = envelope.user;
        assert_eq!(user.id, "1");
        assert_eq!(user.client_id, "77");
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.last_name, None);
        assert_eq!(user.weight, Some(150.5));
        assert_eq!(user.height, None);
        assert_eq!(user.image_id, Some(9));
    }

    #[test]
    fn test_user_profile_requires_client_id() {
        let result = serde_json::from_value::<UserProfileEnvelope>(json!({
            "user": {"id": 1, "email": "a@b.com"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_optional_metrics() {
        let sparse: HabitTrackerEntry = serde_json::from_value(json!({
            "id": 10,
            "date": "2026-02-01",
            "client_id": 77,
            "steps": null
        }))
        .unwrap();
        assert_eq!(sparse.steps, None);
        assert_eq!(sparse.weight, None);
        assert_eq!(sparse.notes, None);

        let full: HabitTrackerEntry = serde_json::from_value(json!({
            "id": 11,
            "date": "2026-02-02",
            "client_id": "77",
            "steps": 5000,
            "weight": 70.5,
            "sleep": 0,
            "notes": ""
        }))
        .unwrap();
        assert_eq!(full.steps, Some(5000));
        assert_eq!(full.weight, Some(70.5));
        assert_eq!(full.sleep, Some(0.0));
        assert_eq!(full.notes.as_deref(), Some(""));
        assert_eq!(full.calories, None);
    }

    #[test]
    fn test_entry_tolerates_missing_or_null_date() {
        let response: HabitTrackerResponse = serde_json::from_value(json!({
            "trackings": [
                {"id": 1, "date": null, "client_id": 7},
                {"id": 2, "client_id": 7},
                {"id": 3, "date": "2026-02-01", "client_id": 7, "steps": 12}
            ]
        }))
        .unwrap();

        assert_eq!(response.trackings.len(), 3);
        assert_eq!(response.trackings[0].date, "");
        assert_eq!(response.trackings[1].date, "");
        assert_eq!(response.trackings[2].date, "2026-02-01");
        assert_eq!(response.trackings[2].steps, Some(12));
    }

    #[test]
    fn test_zero_steps_is_present() {
        let entry: HabitTrackerEntry = serde_json::from_value(json!({
            "id": 1,
            "date": "2026-02-01",
            "client_id": 77,
            "steps": 0
        }))
        .unwrap();
        assert_eq!(entry.steps, Some(0));
    }

    #[test]
    fn test_habit_tracker_envelope_unwraps() {
        let envelope: HabitTrackerEnvelope = serde_json::from_value(json!({
            "response": {
                "trackings": [{"id": 1, "date": "2026-02-01", "client_id": 77}],
                "previous_duration": {"start": "2026-01-25", "end": "2026-01-31"},
                "current_duration": {"start": "2026-02-01", "end": "2026-02-07"},
                "next_duration": null,
                "is_previous": true
            }
        }))
        .unwrap();

        let response = envelope.response;
        assert!(response.is_previous);
        assert_eq!(response.trackings.len(), 1);
        assert_eq!(
            response.previous_duration.unwrap()["start"],
            json!("2026-01-25")
        );
        assert!(response.current_duration.is_some());
        assert!(response.next_duration.is_none());
    }

    #[test]
    fn test_habit_tracker_defaults() {
        let response: HabitTrackerResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.trackings.is_empty());
        assert!(!response.is_previous);
    }

    #[test]
    fn test_tracker_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(tracker_date(date), "Feb 1, 2026");

        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(tracker_date(date), "Dec 25, 2025");
    }
}
