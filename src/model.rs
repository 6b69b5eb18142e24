use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The six persisted collections, one JSON array per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Teachers,
    Students,
    Events,
    Bookings,
    Messages,
    Blogs,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Teachers,
        Collection::Students,
        Collection::Events,
        Collection::Bookings,
        Collection::Messages,
        Collection::Blogs,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Teachers => "padel:teachers",
            Collection::Students => "padel:students",
            Collection::Events => "padel:events",
            Collection::Bookings => "padel:bookings",
            Collection::Messages => "padel:messages",
            Collection::Blogs => "padel:blogs",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The key suffix doubles as the display name.
        let name = self.key().trim_start_matches("padel:");
        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub image: String,
    pub role: String,
    pub specialties: Vec<String>,
    pub experience: String,
    pub rating: f32,
    pub bio: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    #[default]
    #[serde(rename = "less-than-year")]
    LessThanYear,
    #[serde(rename = "1-3-years")]
    OneToThreeYears,
    #[serde(rename = "more-than-3-years")]
    MoreThanThreeYears,
}

/// Moderation state of a registration. `Unspecified` is the explicit model
/// of legacy records that predate the moderation workflow and carry no
/// status field at all; the public-facing filters count it as approved and
/// `Students::normalize_legacy_statuses` rewrites it to `Approved`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Pending,
    Approved,
    Rejected,
    #[default]
    Unspecified,
}

impl StudentStatus {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, StudentStatus::Unspecified)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub level: Level,
    pub experience: Experience,
    pub preferred_days: Vec<String>,
    pub preferred_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    // Absent on disk for legacy rows; never written back as "unspecified".
    #[serde(default, skip_serializing_if = "StudentStatus::is_unspecified")]
    pub status: StudentStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[default]
    Tournament,
    Clinic,
    League,
    OpenDay,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub image: String,
    /// Display date, compared verbatim by the calendar views.
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub category: String,
    pub participants: String,
    pub price: String,
    pub description: String,
    #[serde(rename = "registration_deadline")]
    pub registration_deadline: String,
    /// Student ids, deduplicated by register/unregister.
    #[serde(default)]
    pub registrations: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    #[default]
    Individual,
    Group,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

/// Canonical booking shape: the one the booking calendar and admin panel
/// write, keyed by student and teacher ids with display names denormalized
/// alongside. The abandoned server-side experiment used a different shape;
/// see [`LegacyBooking`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub teacher_name: String,
    pub date: String,
    pub time: String,
    pub court: String,
    #[serde(rename = "type")]
    pub kind: BookingType,
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The booking shape left behind by the unfinished server-side key-value
/// store: free-text teacher name, no student name, an optional `userId`.
/// Kept only as an input to [`Booking::from_legacy`]; nothing persists it.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBooking {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub date: String,
    pub time: String,
    pub court: String,
    pub teacher: String,
    #[serde(rename = "type")]
    pub kind: BookingType,
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Adapts a record from the abandoned server-side shape. The legacy
    /// shape never stored names or a teacher id, so those fields come
    /// through empty and the teacher's display name is all we keep.
    pub fn from_legacy(legacy: LegacyBooking) -> Booking {
        Booking {
            id: legacy.id,
            student_id: legacy.user_id.unwrap_or_default(),
            student_name: String::new(),
            teacher_id: String::new(),
            teacher_name: legacy.teacher,
            date: legacy.date,
            time: legacy.time,
            court: legacy.court,
            kind: legacy.kind,
            status: legacy.status,
            created_at: legacy.created_at,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSubject {
    #[default]
    Info,
    Classes,
    Events,
    Facilities,
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: MessageSubject,
    pub message: String,
    // Independent monotone flags, not one enum: read flips on first view,
    // replied flips once a reply is recorded. Neither reverts.
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub replied: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    pub author: String,
    pub date: String,
    pub image: String,
    pub published: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_status_defaults_to_unspecified_when_absent() {
        let raw = r#"{
            "id": "student-9",
            "name": "Lucía Torres",
            "email": "lucia@example.com",
            "phone": "645678901",
            "birthDate": "1995-02-01",
            "level": "beginner",
            "experience": "less-than-year",
            "preferredDays": ["Lunes"],
            "preferredTime": "Tarde"
        }"#;
        let student: Student = serde_json::from_str(raw).unwrap();
        assert_eq!(student.status, StudentStatus::Unspecified);

        // And it stays absent on the way back out.
        let out = serde_json::to_value(&student).unwrap();
        assert!(out.get("status").is_none());
    }

    #[test]
    fn student_status_round_trips_when_present() {
        let student = Student {
            id: "student-1".to_string(),
            status: StudentStatus::Pending,
            ..Default::default()
        };
        let out = serde_json::to_value(&student).unwrap();
        assert_eq!(out["status"], "pending");
        let back: Student = serde_json::from_value(out).unwrap();
        assert_eq!(back.status, StudentStatus::Pending);
    }

    #[test]
    fn booking_from_legacy_maps_user_and_teacher() {
        let raw = r#"{
            "id": "5f0c4d2e",
            "userId": "student-2",
            "date": "2023-05-16",
            "time": "17:00 - 18:00",
            "court": "Pista 2",
            "teacher": "Ana Martínez",
            "type": "group",
            "status": "pending"
        }"#;
        let legacy: LegacyBooking = serde_json::from_str(raw).unwrap();
        let booking = Booking::from_legacy(legacy);
        assert_eq!(booking.student_id, "student-2");
        assert_eq!(booking.teacher_name, "Ana Martínez");
        assert!(booking.teacher_id.is_empty());
        assert_eq!(booking.kind, BookingType::Group);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn event_type_uses_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_value(EventType::OpenDay).unwrap(),
            serde_json::json!("open_day")
        );
    }
}
