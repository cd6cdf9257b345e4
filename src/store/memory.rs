// ABOUTME: In-memory document store backend evaluating predicates field-wise
// ABOUTME: Used by tests and development runs; keeps insertion order per collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::DateTime;
use dashmap::DashMap;
use fittrack_core::errors::AppResult;
use fittrack_core::filters::{Clause, Constraint, Predicate, Scalar};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{DocumentStore, SortSpec};

/// In-memory [`DocumentStore`] backend
///
/// Collections are vectors of JSON documents in insertion order. All
/// operations take the collection's shard lock for their full duration,
/// so single-document updates and deletes are atomic.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, Vec<Value>>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, mut doc: Value) -> AppResult<String> {
        let id = match doc.get("id").and_then(Value::as_str) {
            Some(id) => id.to_owned(),
            None => {
                let id = Uuid::new_v4().to_string();
                if let Some(map) = doc.as_object_mut() {
                    map.insert("id".to_owned(), Value::String(id.clone()));
                }
                id
            }
        };
        self.collections
            .entry(collection.to_owned())
            .or_default()
            .push(doc);
        Ok(id)
    }

    async fn find_one(&self, collection: &str, predicate: &Predicate) -> AppResult<Option<Value>> {
        Ok(self.collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| matches_predicate(doc, predicate))
                .cloned()
        }))
    }

    async fn find(
        &self,
        collection: &str,
        predicate: &Predicate,
        sort: Option<&SortSpec>,
        skip: u64,
        limit: Option<u32>,
    ) -> AppResult<Vec<Value>> {
        let mut matched: Vec<Value> =
            self.collections.get(collection).map_or_else(Vec::new, |docs| {
                docs.iter()
                    .filter(|doc| matches_predicate(doc, predicate))
                    .cloned()
                    .collect()
            });

        if let Some(spec) = sort {
            matched.sort_by(|a, b| {
                let ordering = value_cmp(a.get(&spec.field), b.get(&spec.field));
                if spec.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let iter = matched.into_iter().skip(skip);
        Ok(match limit {
            Some(limit) => iter.take(limit as usize).collect(),
            None => iter.collect(),
        })
    }

    async fn count(&self, collection: &str, predicate: &Predicate) -> AppResult<u64> {
        Ok(self.collections.get(collection).map_or(0, |docs| {
            docs.iter()
                .filter(|doc| matches_predicate(doc, predicate))
                .count() as u64
        }))
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        predicate: &Predicate,
        set: &Map<String, Value>,
    ) -> AppResult<Option<Value>> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(None);
        };
        for doc in docs.iter_mut() {
            if matches_predicate(doc, predicate) {
                if let Some(map) = doc.as_object_mut() {
                    for (key, value) in set {
                        map.insert(key.clone(), value.clone());
                    }
                }
                return Ok(Some(doc.clone()));
            }
        }
        Ok(None)
    }

    async fn delete_one(&self, collection: &str, predicate: &Predicate) -> AppResult<u64> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(0);
        };
        let position = docs
            .iter()
            .position(|doc| matches_predicate(doc, predicate));
        Ok(match position {
            Some(index) => {
                docs.remove(index);
                1
            }
            None => 0,
        })
    }
}

fn matches_predicate(doc: &Value, predicate: &Predicate) -> bool {
    predicate
        .clauses()
        .iter()
        .all(|clause| matches_clause(doc, clause))
}

fn matches_clause(doc: &Value, clause: &Clause) -> bool {
    let Some(field) = doc.get(&clause.field) else {
        return false;
    };
    match &clause.constraint {
        Constraint::Eq(scalar) => scalar_cmp(field, scalar) == Some(Ordering::Equal),
        Constraint::Contains(substring) => field
            .as_str()
            .is_some_and(|s| s.to_lowercase().contains(&substring.to_lowercase())),
        Constraint::Range { min, max } => {
            let above = min.as_ref().is_none_or(|bound| {
                matches!(
                    scalar_cmp(field, bound),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            });
            let below = max.as_ref().is_none_or(|bound| {
                matches!(
                    scalar_cmp(field, bound),
                    Some(Ordering::Less | Ordering::Equal)
                )
            });
            above && below
        }
    }
}

/// Compare a document field against a typed scalar
///
/// Timestamps are stored as RFC 3339 strings with varying sub-second
/// precision, so they are parsed and compared as instants rather than
/// lexicographically.
fn scalar_cmp(field: &Value, scalar: &Scalar) -> Option<Ordering> {
    match scalar {
        Scalar::Str(s) => field.as_str().map(|v| v.cmp(s.as_str())),
        Scalar::Int(n) => field.as_f64().and_then(|v| v.partial_cmp(&(*n as f64))),
        Scalar::Float(n) => field.as_f64().and_then(|v| v.partial_cmp(n)),
        Scalar::DateTime(dt) => field
            .as_str()
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|v| v.with_timezone(&chrono::Utc).cmp(dt)),
    }
}

/// Order two document field values for sorting
fn value_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(a), Some(b)) = (a.as_f64(), b.as_f64()) {
                return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            }
            if let (Some(a), Some(b)) = (
                a.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok()),
                b.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok()),
            ) {
                return a.cmp(&b);
            }
            match (a.as_str(), b.as_str()) {
                (Some(a), Some(b)) => a.cmp(b),
                _ => Ordering::Equal,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owner_predicate(user_id: Uuid) -> Predicate {
        Predicate::scoped_to(user_id)
    }

    #[tokio::test]
    async fn test_insert_and_find_one_by_id() {
        let store = MemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        let doc_id = Uuid::new_v4().to_string();
        store
            .insert(
                "exercises",
                json!({"id": doc_id, "user_id": user_id.to_string(), "name": "Bench Press"}),
            )
            .await
            .unwrap();

        let found = store
            .find_one(
                "exercises",
                &owner_predicate(user_id).and_eq("id", doc_id.as_str()),
            )
            .await
            .unwrap();
        assert_eq!(found.unwrap()["name"], "Bench Press");
    }

    #[tokio::test]
    async fn test_owner_scoping_excludes_other_users() {
        let store = MemoryDocumentStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let doc_id = Uuid::new_v4().to_string();
        store
            .insert(
                "workouts",
                json!({"id": doc_id, "user_id": alice.to_string(), "name": "Leg day"}),
            )
            .await
            .unwrap();

        // Identical resource id scoped to another owner never matches
        let found = store
            .find_one(
                "workouts",
                &owner_predicate(bob).and_eq("id", doc_id.as_str()),
            )
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_contains_is_case_insensitive() {
        let store = MemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        store
            .insert(
                "exercises",
                json!({"user_id": user_id.to_string(), "name": "Incline Bench Press"}),
            )
            .await
            .unwrap();

        let found = store
            .find_one(
                "exercises",
                &owner_predicate(user_id).and_contains("name", "bench"),
            )
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_numeric_range_includes_bounds() {
        let store = MemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        for minutes in [30, 60, 90] {
            store
                .insert(
                    "workouts",
                    json!({"user_id": user_id.to_string(), "duration_minutes": minutes}),
                )
                .await
                .unwrap();
        }

        let predicate = owner_predicate(user_id).and_range(
            "duration_minutes",
            Some(Scalar::Int(30)),
            Some(Scalar::Int(60)),
        );
        let count = store.count("workouts", &predicate).await.unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_datetime_range_parses_rfc3339() {
        let store = MemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        store
            .insert(
                "workouts",
                json!({"user_id": user_id.to_string(), "date": "2026-01-15T10:00:00Z"}),
            )
            .await
            .unwrap();
        store
            .insert(
                "workouts",
                // Sub-second precision must not break instant comparison
                json!({"user_id": user_id.to_string(), "date": "2026-03-01T08:30:00.250Z"}),
            )
            .await
            .unwrap();

        let from = "2026-02-01T00:00:00Z".parse().unwrap();
        let predicate =
            owner_predicate(user_id).and_range("date", Some(Scalar::DateTime(from)), None);
        assert_eq!(store.count("workouts", &predicate).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_sort_skip_limit() {
        let store = MemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        for (name, day) in [("a", 1), ("b", 3), ("c", 2)] {
            store
                .insert(
                    "workouts",
                    json!({
                        "user_id": user_id.to_string(),
                        "name": name,
                        "date": format!("2026-01-0{day}T00:00:00Z"),
                    }),
                )
                .await
                .unwrap();
        }

        let docs = store
            .find(
                "workouts",
                &owner_predicate(user_id),
                Some(&SortSpec::descending("date")),
                1,
                Some(1),
            )
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "c");
    }

    #[tokio::test]
    async fn test_find_one_and_update_sets_fields() {
        let store = MemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        let doc_id = Uuid::new_v4().to_string();
        store
            .insert(
                "exercises",
                json!({"id": doc_id, "user_id": user_id.to_string(), "name": "Squat", "category": "legs"}),
            )
            .await
            .unwrap();

        let mut set = Map::new();
        set.insert("name".to_owned(), Value::String("Front Squat".into()));
        let updated = store
            .find_one_and_update(
                "exercises",
                &owner_predicate(user_id).and_eq("id", doc_id.as_str()),
                &set,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["name"], "Front Squat");
        assert_eq!(updated["category"], "legs");
    }

    #[tokio::test]
    async fn test_delete_one_returns_count() {
        let store = MemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        let doc_id = Uuid::new_v4().to_string();
        store
            .insert(
                "exercises",
                json!({"id": doc_id, "user_id": user_id.to_string()}),
            )
            .await
            .unwrap();

        let predicate = owner_predicate(user_id).and_eq("id", doc_id.as_str());
        assert_eq!(store.delete_one("exercises", &predicate).await.unwrap(), 1);
        assert_eq!(store.delete_one("exercises", &predicate).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let store = MemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        store
            .insert("exercises", json!({"user_id": user_id.to_string()}))
            .await
            .unwrap();

        let found = store
            .find_one(
                "exercises",
                &owner_predicate(user_id).and_eq("id", "not-a-valid-id"),
            )
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
