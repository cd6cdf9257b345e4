// ABOUTME: Exercise CRUD service with owner-scoped queries and partial updates
// ABOUTME: Not-found and not-owned collapse into one error so ownership leaks nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercise service
//!
//! Every read and write goes through an owner-scoped predicate. A
//! document that exists but belongs to someone else is indistinguishable
//! from one that never existed.

use std::sync::Arc;

use chrono::Utc;
use fittrack_core::errors::{AppError, AppResult, FieldError};
use fittrack_core::filters::{ExerciseFilters, Predicate};
use fittrack_core::models::{Exercise, ExerciseCategory, ExerciseType};
use fittrack_core::pagination::{Page, PaginationParams};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::store::DocumentStore;

const EXERCISES: &str = "exercises";
const RESOURCE: &str = "Exercise";

/// Request body for creating an exercise
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExerciseRequest {
    /// Display name; must not be empty
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Muscle group or modality
    pub category: ExerciseCategory,
    /// Training modality
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
}

impl CreateExerciseRequest {
    /// Validate field constraints
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each failing field.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation(vec![FieldError::new(
                "name",
                "must not be empty",
            )]));
        }
        Ok(())
    }
}

/// Request body for partially updating an exercise
///
/// Absent fields are left untouched; an all-absent request updates
/// nothing and the operation reports not found.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExerciseRequest {
    /// New name, if provided
    pub name: Option<String>,
    /// New description, if provided
    pub description: Option<String>,
    /// New category, if provided
    pub category: Option<ExerciseCategory>,
    /// New type, if provided
    #[serde(rename = "type")]
    pub exercise_type: Option<ExerciseType>,
}

impl UpdateExerciseRequest {
    /// Validate the fields that are present
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each failing field.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::validation(vec![FieldError::new(
                    "name",
                    "must not be empty",
                )]));
            }
        }
        Ok(())
    }

    /// Build the field-level update map from the present fields only
    fn to_set_map(&self) -> Map<String, Value> {
        let mut set = Map::new();
        if let Some(name) = &self.name {
            set.insert("name".to_owned(), Value::String(name.clone()));
        }
        if let Some(description) = &self.description {
            set.insert(
                "description".to_owned(),
                Value::String(description.clone()),
            );
        }
        if let Some(category) = self.category {
            set.insert(
                "category".to_owned(),
                Value::String(category.as_str().to_owned()),
            );
        }
        if let Some(exercise_type) = self.exercise_type {
            set.insert(
                "exercise_type".to_owned(),
                Value::String(exercise_type.as_str().to_owned()),
            );
        }
        set
    }
}

/// Exercise CRUD service
#[derive(Clone)]
pub struct ExerciseService {
    store: Arc<dyn DocumentStore>,
}

impl ExerciseService {
    /// Create the service over a document store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn owned(user_id: Uuid, id: &str) -> Predicate {
        Predicate::scoped_to(user_id).and_eq("id", id)
    }

    fn from_doc(doc: Value) -> AppResult<Exercise> {
        serde_json::from_value(doc)
            .map_err(|e| AppError::internal(format!("Exercise deserialization failed: {e}")))
    }

    /// Create an exercise owned by the user
    ///
    /// # Errors
    ///
    /// Returns validation or store errors.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateExerciseRequest,
    ) -> AppResult<Exercise> {
        request.validate()?;

        let exercise = Exercise {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            category: request.category,
            exercise_type: request.exercise_type,
            user_id,
            created_at: Utc::now(),
        };

        let doc = serde_json::to_value(&exercise)
            .map_err(|e| AppError::internal(format!("Exercise serialization failed: {e}")))?;
        self.store.insert(EXERCISES, doc).await?;
        Ok(exercise)
    }

    /// Fetch one exercise the user owns
    ///
    /// # Errors
    ///
    /// Returns not-found when the id is unknown, malformed, or owned by
    /// another user.
    pub async fn get(&self, user_id: Uuid, id: &str) -> AppResult<Exercise> {
        self.store
            .find_one(EXERCISES, &Self::owned(user_id, id))
            .await?
            .ok_or_else(|| AppError::not_found(RESOURCE))
            .and_then(Self::from_doc)
    }

    /// List the user's exercises with filters and pagination
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn list(
        &self,
        user_id: Uuid,
        filters: &ExerciseFilters,
        pagination: &PaginationParams,
    ) -> AppResult<Page<Exercise>> {
        let predicate = filters.to_predicate(user_id);
        let total = self.store.count(EXERCISES, &predicate).await?;
        let docs = self
            .store
            .find(
                EXERCISES,
                &predicate,
                None,
                pagination.skip(),
                Some(pagination.limit()),
            )
            .await?;
        let items = docs
            .into_iter()
            .map(Self::from_doc)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Page::build(items, total, pagination))
    }

    /// Partially update one exercise the user owns
    ///
    /// # Errors
    ///
    /// Returns not-found when nothing matches or when the request has no
    /// fields to apply.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: &str,
        request: UpdateExerciseRequest,
    ) -> AppResult<Exercise> {
        request.validate()?;

        let set = request.to_set_map();
        if set.is_empty() {
            return Err(AppError::not_found(RESOURCE));
        }

        self.store
            .find_one_and_update(EXERCISES, &Self::owned(user_id, id), &set)
            .await?
            .ok_or_else(|| AppError::not_found(RESOURCE))
            .and_then(Self::from_doc)
    }

    /// Delete one exercise the user owns
    ///
    /// Workouts referencing the exercise are untouched; their
    /// `exercise_id` references dangle.
    ///
    /// # Errors
    ///
    /// Returns not-found when nothing matches.
    pub async fn delete(&self, user_id: Uuid, id: &str) -> AppResult<()> {
        let deleted = self
            .store
            .delete_one(EXERCISES, &Self::owned(user_id, id))
            .await?;
        if deleted == 0 {
            return Err(AppError::not_found(RESOURCE));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use fittrack_core::errors::ErrorCode;

    fn service() -> ExerciseService {
        ExerciseService::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn create_request(name: &str) -> CreateExerciseRequest {
        CreateExerciseRequest {
            name: name.into(),
            description: None,
            category: ExerciseCategory::Chest,
            exercise_type: ExerciseType::Strength,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let user_id = Uuid::new_v4();
        let created = service
            .create(user_id, create_request("Bench Press"))
            .await
            .unwrap();
        let fetched = service.get(user_id, &created.id.to_string()).await.unwrap();
        assert_eq!(fetched.name, "Bench Press");
        assert_eq!(fetched.category, ExerciseCategory::Chest);
    }

    #[tokio::test]
    async fn test_other_owner_sees_not_found() {
        let service = service();
        let owner = Uuid::new_v4();
        let created = service
            .create(owner, create_request("Bench Press"))
            .await
            .unwrap();

        let err = service
            .get(Uuid::new_v4(), &created.id.to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
        assert_eq!(err.message, "Exercise not found");
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let service = service();
        let user_id = Uuid::new_v4();
        let created = service
            .create(user_id, create_request("Bench Press"))
            .await
            .unwrap();

        let updated = service
            .update(
                user_id,
                &created.id.to_string(),
                UpdateExerciseRequest {
                    description: Some("Barbell flat bench".into()),
                    ..UpdateExerciseRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Bench Press");
        assert_eq!(updated.description.as_deref(), Some("Barbell flat bench"));
    }

    #[tokio::test]
    async fn test_empty_update_is_not_found() {
        let service = service();
        let user_id = Uuid::new_v4();
        let created = service
            .create(user_id, create_request("Bench Press"))
            .await
            .unwrap();

        let err = service
            .update(
                user_id,
                &created.id.to_string(),
                UpdateExerciseRequest::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let user_id = Uuid::new_v4();
        let created = service
            .create(user_id, create_request("Bench Press"))
            .await
            .unwrap();
        let id = created.id.to_string();

        service.delete(user_id, &id).await.unwrap();
        assert!(service.get(user_id, &id).await.is_err());
        assert!(service.delete(user_id, &id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let service = service();
        let user_id = Uuid::new_v4();
        service
            .create(user_id, create_request("Bench Press"))
            .await
            .unwrap();
        service
            .create(user_id, create_request("Incline Press"))
            .await
            .unwrap();
        service
            .create(
                user_id,
                CreateExerciseRequest {
                    name: "Squat".into(),
                    description: None,
                    category: ExerciseCategory::Legs,
                    exercise_type: ExerciseType::Strength,
                },
            )
            .await
            .unwrap();

        let filters = ExerciseFilters {
            search: Some("press".into()),
            ..ExerciseFilters::default()
        };
        let page = service
            .list(user_id, &filters, &PaginationParams::new(1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let service = service();
        let err = service
            .get(Uuid::new_v4(), "not-a-uuid")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }
}
