//! Core types for scored references, catalog records, and hydrated results.
//!
//! Field names on the wire are preserved from the upstream JSON dumps
//! (`seatsCapacity`, `classId`, `ref`, `type`, …) so serialized output stays
//! interchangeable with the data the indexes and store were built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which corpus a scored reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    /// A course offering, resolvable through the catalog store.
    Class,
    /// A staff directory entry, resolvable through the employee map.
    Employee,
}

impl RefKind {
    /// Returns the wire name of this kind (`"class"` / `"employee"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference into one of the two corpora, tagged with the relevance score
/// the external index assigned it.
///
/// Produced only by the subject matcher (score 0) or the scored-list merger;
/// immutable once created. Within any merger-produced sequence, scores are
/// non-increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRef {
    /// Opaque identifier resolvable by the external store: a content hash for
    /// classes, a lookup key for employees.
    #[serde(rename = "ref")]
    pub ref_id: String,
    /// Relevance score from the external full-text index. Subject-match
    /// listings carry 0.
    pub score: f64,
    /// Which corpus `ref_id` points into.
    #[serde(rename = "type")]
    pub kind: RefKind,
}

/// A subject as listed by the catalog store (`{subject, text}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Short subject code, e.g. `"CS"`.
    pub subject: String,
    /// Human-readable subject name, e.g. `"Computer Science"`.
    pub text: String,
}

/// A course offering record from the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub host: String,
    pub term_id: String,
    pub subject: String,
    /// Unique identifier of this class within its subject and term.
    pub class_uid: String,
    /// Catalog number as text; usually numeric (`"2500"`) but not always
    /// (`"XL1"` style cross-listings exist).
    pub class_id: String,
    pub name: String,
    /// Section selectors attached to this class. Absent in some dumps.
    #[serde(default)]
    pub crns: Vec<String>,
}

/// A section record from the catalog store, keyed by a derived section hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    pub crn: String,
    pub seats_capacity: i64,
    pub seats_remaining: i64,
    /// Waitlist capacity; only some sections run a waitlist.
    #[serde(default)]
    pub wait_capacity: Option<i64>,
    #[serde(default)]
    pub wait_remaining: Option<i64>,
}

impl SectionRecord {
    /// Seats taken in this section, counting the waitlist when both waitlist
    /// fields are present.
    pub fn seats_taken(&self) -> i64 {
        let mut taken = self.seats_capacity - self.seats_remaining;
        if let (Some(capacity), Some(remaining)) = (self.wait_capacity, self.wait_remaining) {
            taken += capacity - remaining;
        }
        taken
    }
}

/// A staff directory record from the employee map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub name: String,
    #[serde(default)]
    pub primary_role: Option<String>,
    #[serde(default)]
    pub primary_department: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A fully resolved search result, built fresh per request and never cached.
///
/// Record fields are `Option` because a ref whose record has gone missing from
/// the store still occupies its result slot (with `None`) instead of aborting
/// the batch or shifting the pagination arithmetic; the miss is reported as an
/// [`Anomaly`](crate::error::Anomaly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HydratedResult {
    /// A course offering with its resolved section records.
    Class {
        score: f64,
        class: Option<ClassRecord>,
        sections: Vec<SectionRecord>,
    },
    /// A staff directory entry.
    Employee {
        score: f64,
        employee: Option<EmployeeRecord>,
    },
}

impl HydratedResult {
    /// The relevance score carried over from the [`ScoredRef`] this result
    /// was hydrated from.
    pub fn score(&self) -> f64 {
        match self {
            Self::Class { score, .. } | Self::Employee { score, .. } => *score,
        }
    }

    /// Which corpus this result came from.
    pub fn kind(&self) -> RefKind {
        match self {
            Self::Class { .. } => RefKind::Class,
            Self::Employee { .. } => RefKind::Employee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_section(capacity: i64, remaining: i64) -> SectionRecord {
        SectionRecord {
            crn: "12345".into(),
            seats_capacity: capacity,
            seats_remaining: remaining,
            wait_capacity: None,
            wait_remaining: None,
        }
    }

    #[test]
    fn ref_kind_name_and_display() {
        assert_eq!(RefKind::Class.name(), "class");
        assert_eq!(RefKind::Employee.name(), "employee");
        assert_eq!(RefKind::Class.to_string(), "class");
        assert_eq!(RefKind::Employee.to_string(), "employee");
    }

    #[test]
    fn scored_ref_serializes_with_wire_names() {
        let scored = ScoredRef {
            ref_id: "neu.edu/201830/CS/2500_1234".into(),
            score: 3.25,
            kind: RefKind::Class,
        };
        let json = serde_json::to_value(&scored).expect("serialize");
        assert_eq!(json["ref"], "neu.edu/201830/CS/2500_1234");
        assert_eq!(json["type"], "class");
        assert!((json["score"].as_f64().expect("score") - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn scored_ref_round_trip() {
        let scored = ScoredRef {
            ref_id: "emp-17".into(),
            score: 1.5,
            kind: RefKind::Employee,
        };
        let json = serde_json::to_string(&scored).expect("serialize");
        let decoded: ScoredRef = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, scored);
    }

    #[test]
    fn class_record_parses_camel_case() {
        let json = r#"{
            "host": "neu.edu",
            "termId": "201830",
            "subject": "CS",
            "classUid": "2500_1234",
            "classId": "2500",
            "name": "Fundamentals of Computer Science 1",
            "crns": ["12345", "12346"]
        }"#;
        let class: ClassRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(class.term_id, "201830");
        assert_eq!(class.class_uid, "2500_1234");
        assert_eq!(class.crns.len(), 2);
    }

    #[test]
    fn class_record_missing_crns_defaults_empty() {
        let json = r#"{
            "host": "neu.edu",
            "termId": "201830",
            "subject": "HIST",
            "classUid": "1130_99",
            "classId": "1130",
            "name": "Law and Society"
        }"#;
        let class: ClassRecord = serde_json::from_str(json).expect("deserialize");
        assert!(class.crns.is_empty());
    }

    #[test]
    fn section_record_parses_camel_case() {
        let json = r#"{
            "crn": "12345",
            "seatsCapacity": 100,
            "seatsRemaining": 25,
            "waitCapacity": 10,
            "waitRemaining": 8
        }"#;
        let section: SectionRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(section.seats_capacity, 100);
        assert_eq!(section.wait_remaining, Some(8));
    }

    #[test]
    fn seats_taken_without_waitlist() {
        let section = make_section(100, 25);
        assert_eq!(section.seats_taken(), 75);
    }

    #[test]
    fn seats_taken_includes_waitlist_when_both_present() {
        let section = SectionRecord {
            wait_capacity: Some(10),
            wait_remaining: Some(4),
            ..make_section(30, 10)
        };
        assert_eq!(section.seats_taken(), 26);
    }

    #[test]
    fn seats_taken_ignores_half_defined_waitlist() {
        let section = SectionRecord {
            wait_capacity: Some(10),
            wait_remaining: None,
            ..make_section(30, 10)
        };
        assert_eq!(section.seats_taken(), 20);
    }

    #[test]
    fn seats_taken_can_be_negative() {
        // Over-released sections exist in real dumps; the ranker treats any
        // non-positive sum as "no takers".
        let section = make_section(10, 15);
        assert_eq!(section.seats_taken(), -5);
    }

    #[test]
    fn hydrated_class_tagged_as_class() {
        let result = HydratedResult::Class {
            score: 2.0,
            class: None,
            sections: vec![],
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["type"], "class");
        assert!(json["class"].is_null());
        assert_eq!(result.kind(), RefKind::Class);
    }

    #[test]
    fn hydrated_employee_tagged_as_employee() {
        let result = HydratedResult::Employee {
            score: 1.25,
            employee: Some(EmployeeRecord {
                name: "Ada Lovelace".into(),
                primary_role: Some("Professor".into()),
                primary_department: None,
                emails: vec!["a.lovelace@northeastern.edu".into()],
                phone: None,
            }),
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["type"], "employee");
        assert_eq!(json["employee"]["name"], "Ada Lovelace");
        assert_eq!(result.kind(), RefKind::Employee);
        assert!((result.score() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn employee_record_optional_fields_default() {
        let json = r#"{"name": "Grace Hopper"}"#;
        let employee: EmployeeRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(employee.name, "Grace Hopper");
        assert!(employee.primary_role.is_none());
        assert!(employee.emails.is_empty());
    }

    #[test]
    fn hydrated_result_round_trip() {
        let result = HydratedResult::Class {
            score: 3.5,
            class: Some(ClassRecord {
                host: "neu.edu".into(),
                term_id: "201830".into(),
                subject: "CS".into(),
                class_uid: "2500_1234".into(),
                class_id: "2500".into(),
                name: "Fundamentals of Computer Science 1".into(),
                crns: vec!["12345".into()],
            }),
            sections: vec![make_section(100, 2)],
        };
        let json = serde_json::to_string(&result).expect("serialize");
        let decoded: HydratedResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, result);
    }
}
