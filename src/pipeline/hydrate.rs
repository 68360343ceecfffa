//! Resolving scored refs into full records.
//!
//! Hydration runs on the expanded window only, never on the whole ref list,
//! and always against the live store; records are never cached alongside
//! refs, so seat counts stay current. Lookup failures degrade slot by slot:
//! the ref keeps its position with whatever resolved, and the miss is
//! reported as an [`Anomaly`].

use crate::error::Anomaly;
use crate::store::{CatalogStore, SectionKey};
use crate::types::{EmployeeRecord, HydratedResult, RefKind, ScoredRef};
use std::collections::HashMap;
use tracing::warn;

/// Resolves each ref to its records, in order. One output per input.
pub fn hydrate_refs(
    store: &dyn CatalogStore,
    employees: &HashMap<String, EmployeeRecord>,
    refs: &[ScoredRef],
    anomalies: &mut Vec<Anomaly>,
) -> Vec<HydratedResult> {
    refs.iter()
        .map(|scored| hydrate_one(store, employees, scored, anomalies))
        .collect()
}

fn hydrate_one(
    store: &dyn CatalogStore,
    employees: &HashMap<String, EmployeeRecord>,
    scored: &ScoredRef,
    anomalies: &mut Vec<Anomaly>,
) -> HydratedResult {
    match scored.kind {
        RefKind::Class => {
            let Some(class) = store.class_by_hash(&scored.ref_id) else {
                warn!(ref_id = %scored.ref_id, "class record missing from store");
                anomalies.push(Anomaly::MissingClass {
                    ref_id: scored.ref_id.clone(),
                });
                return HydratedResult::Class {
                    score: scored.score,
                    class: None,
                    sections: Vec::new(),
                };
            };

            let mut sections = Vec::with_capacity(class.crns.len());
            for crn in &class.crns {
                let key = SectionKey {
                    host: &class.host,
                    term_id: &class.term_id,
                    subject: &class.subject,
                    class_uid: &class.class_uid,
                    crn,
                };
                let Some(hash) = store.section_hash(&key) else {
                    warn!(class_uid = %class.class_uid, crn = %crn, "no hash for section key");
                    anomalies.push(Anomaly::MissingSectionKey {
                        class_uid: class.class_uid.clone(),
                        crn: crn.clone(),
                    });
                    continue;
                };
                match store.section_by_hash(&hash) {
                    Some(section) => sections.push(section.clone()),
                    None => {
                        warn!(hash = %hash, "section record missing from store");
                        anomalies.push(Anomaly::MissingSection { hash });
                    }
                }
            }

            HydratedResult::Class {
                score: scored.score,
                class: Some(class.clone()),
                sections,
            }
        }
        RefKind::Employee => {
            let employee = employees.get(&scored.ref_id).cloned();
            if employee.is_none() {
                warn!(ref_id = %scored.ref_id, "employee record missing");
                anomalies.push(Anomaly::MissingEmployee {
                    ref_id: scored.ref_id.clone(),
                });
            }
            HydratedResult::Employee {
                score: scored.score,
                employee,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassRecord, SectionRecord, Subject};

    struct FakeCatalog {
        classes: HashMap<String, ClassRecord>,
        sections: HashMap<String, SectionRecord>,
    }

    impl CatalogStore for FakeCatalog {
        fn subjects(&self) -> &[Subject] {
            &[]
        }

        fn classes_in_subject(&self, _subject: &str) -> Vec<String> {
            Vec::new()
        }

        fn class_by_hash(&self, hash: &str) -> Option<&ClassRecord> {
            self.classes.get(hash)
        }

        fn section_by_hash(&self, hash: &str) -> Option<&SectionRecord> {
            self.sections.get(hash)
        }

        fn section_hash(&self, key: &SectionKey<'_>) -> Option<String> {
            // CRNs prefixed "bad" stand in for keys the scheme rejects.
            if key.crn.starts_with("bad") {
                return None;
            }
            Some(format!(
                "{}/{}/{}/{}/{}",
                key.host, key.term_id, key.subject, key.class_uid, key.crn
            ))
        }
    }

    fn make_class(crns: &[&str]) -> ClassRecord {
        ClassRecord {
            host: "neu.edu".into(),
            term_id: "201830".into(),
            subject: "CS".into(),
            class_uid: "2500_1234".into(),
            class_id: "2500".into(),
            name: "Fundamentals of Computer Science 1".into(),
            crns: crns.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    fn make_section(crn: &str) -> SectionRecord {
        SectionRecord {
            crn: crn.into(),
            seats_capacity: 50,
            seats_remaining: 25,
            wait_capacity: None,
            wait_remaining: None,
        }
    }

    fn class_ref(ref_id: &str, score: f64) -> ScoredRef {
        ScoredRef {
            ref_id: ref_id.into(),
            score,
            kind: RefKind::Class,
        }
    }

    fn employee_ref(ref_id: &str, score: f64) -> ScoredRef {
        ScoredRef {
            ref_id: ref_id.into(),
            score,
            kind: RefKind::Employee,
        }
    }

    fn make_catalog() -> FakeCatalog {
        let class = make_class(&["11111", "22222"]);
        let sections = HashMap::from([
            (
                "neu.edu/201830/CS/2500_1234/11111".to_string(),
                make_section("11111"),
            ),
            (
                "neu.edu/201830/CS/2500_1234/22222".to_string(),
                make_section("22222"),
            ),
        ]);
        FakeCatalog {
            classes: HashMap::from([("class-hash".to_string(), class)]),
            sections,
        }
    }

    fn make_employees() -> HashMap<String, EmployeeRecord> {
        HashMap::from([(
            "emp-1".to_string(),
            EmployeeRecord {
                name: "Ada Lovelace".into(),
                primary_role: Some("Professor".into()),
                primary_department: None,
                emails: vec![],
                phone: None,
            },
        )])
    }

    #[test]
    fn class_ref_resolves_record_and_sections() {
        let catalog = make_catalog();
        let mut anomalies = Vec::new();

        let results = hydrate_refs(
            &catalog,
            &make_employees(),
            &[class_ref("class-hash", 2.5)],
            &mut anomalies,
        );

        assert_eq!(results.len(), 1);
        let HydratedResult::Class {
            score,
            class: Some(class),
            sections,
        } = &results[0]
        else {
            panic!("expected a resolved class");
        };
        assert_eq!(*score, 2.5);
        assert_eq!(class.class_id, "2500");
        assert_eq!(sections.len(), 2);
        assert!(anomalies.is_empty());
    }

    #[test]
    fn missing_class_keeps_its_slot_empty() {
        let catalog = make_catalog();
        let mut anomalies = Vec::new();

        let results = hydrate_refs(
            &catalog,
            &make_employees(),
            &[class_ref("gone", 1.0), class_ref("class-hash", 0.5)],
            &mut anomalies,
        );

        assert_eq!(results.len(), 2);
        assert!(matches!(
            &results[0],
            HydratedResult::Class {
                class: None,
                sections,
                ..
            } if sections.is_empty()
        ));
        assert_eq!(
            anomalies,
            vec![Anomaly::MissingClass {
                ref_id: "gone".into()
            }]
        );
    }

    #[test]
    fn unhashable_crn_is_skipped() {
        let mut catalog = make_catalog();
        catalog
            .classes
            .insert("class-hash".into(), make_class(&["11111", "bad-crn"]));
        let mut anomalies = Vec::new();

        let results = hydrate_refs(
            &catalog,
            &make_employees(),
            &[class_ref("class-hash", 1.0)],
            &mut anomalies,
        );

        let HydratedResult::Class { sections, .. } = &results[0] else {
            panic!("expected class");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(
            anomalies,
            vec![Anomaly::MissingSectionKey {
                class_uid: "2500_1234".into(),
                crn: "bad-crn".into()
            }]
        );
    }

    #[test]
    fn unresolved_section_hash_is_skipped() {
        let mut catalog = make_catalog();
        catalog
            .sections
            .remove("neu.edu/201830/CS/2500_1234/22222");
        let mut anomalies = Vec::new();

        let results = hydrate_refs(
            &catalog,
            &make_employees(),
            &[class_ref("class-hash", 1.0)],
            &mut anomalies,
        );

        let HydratedResult::Class { sections, .. } = &results[0] else {
            panic!("expected class");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].crn, "11111");
        assert_eq!(
            anomalies,
            vec![Anomaly::MissingSection {
                hash: "neu.edu/201830/CS/2500_1234/22222".into()
            }]
        );
    }

    #[test]
    fn employee_ref_resolves_record() {
        let catalog = make_catalog();
        let mut anomalies = Vec::new();

        let results = hydrate_refs(
            &catalog,
            &make_employees(),
            &[employee_ref("emp-1", 1.5)],
            &mut anomalies,
        );

        let HydratedResult::Employee {
            score,
            employee: Some(employee),
        } = &results[0]
        else {
            panic!("expected a resolved employee");
        };
        assert_eq!(*score, 1.5);
        assert_eq!(employee.name, "Ada Lovelace");
        assert!(anomalies.is_empty());
    }

    #[test]
    fn missing_employee_keeps_its_slot_empty() {
        let catalog = make_catalog();
        let mut anomalies = Vec::new();

        let results = hydrate_refs(
            &catalog,
            &make_employees(),
            &[employee_ref("emp-unknown", 1.0)],
            &mut anomalies,
        );

        assert!(matches!(
            &results[0],
            HydratedResult::Employee { employee: None, .. }
        ));
        assert_eq!(
            anomalies,
            vec![Anomaly::MissingEmployee {
                ref_id: "emp-unknown".into()
            }]
        );
    }

    #[test]
    fn mixed_refs_hydrate_in_order() {
        let catalog = make_catalog();
        let mut anomalies = Vec::new();

        let results = hydrate_refs(
            &catalog,
            &make_employees(),
            &[
                employee_ref("emp-1", 3.0),
                class_ref("class-hash", 2.0),
                employee_ref("emp-1", 1.0),
            ],
            &mut anomalies,
        );

        let kinds: Vec<RefKind> = results.iter().map(HydratedResult::kind).collect();
        assert_eq!(
            kinds,
            vec![RefKind::Employee, RefKind::Class, RefKind::Employee]
        );
        let scores: Vec<f64> = results.iter().map(HydratedResult::score).collect();
        assert_eq!(scores, vec![3.0, 2.0, 1.0]);
    }
}
