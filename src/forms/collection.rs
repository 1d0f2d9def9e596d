use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::forms::{slugify, FormErrors, REQUIRED};
use crate::models::{Collection, CollectionInput};
use crate::repositories::{CollectionRepository, ProductRepository};

pub const NAME_MAX_LENGTH: usize = 128;
pub const NAME_TAKEN: &str = "Collection with this name already exists.";

/// Raw values submitted for a collection, as entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CollectionFormData {
    pub name: Option<String>,
    /// Product ids; the key may repeat in a urlencoded body
    pub products: Vec<String>,
}

impl CollectionFormData {
    pub fn new(name: impl Into<String>, products: impl IntoIterator<Item = i32>) -> Self {
        Self {
            name: Some(name.into()),
            products: products.into_iter().map(|id| id.to_string()).collect(),
        }
    }

    /// Build from decoded `key=value` pairs; unknown keys are ignored
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut data = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => data.name = Some(value),
                "products" if !value.trim().is_empty() => data.products.push(value),
                _ => {}
            }
        }
        data
    }

    /// Initial values for editing an existing collection
    pub fn from_collection(collection: &Collection, product_ids: &[i32]) -> Self {
        Self::new(collection.name.clone(), product_ids.iter().copied())
    }
}

/// Validates collection submissions and writes them
///
/// A form without data is unbound and never valid.
#[derive(Debug, Default)]
pub struct CollectionForm {
    data: Option<CollectionFormData>,
    instance: Option<Collection>,
    errors: FormErrors,
    cleaned: Option<CollectionInput>,
}

impl CollectionForm {
    /// Bound form creating a new collection
    pub fn new(data: CollectionFormData) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    /// Form without submitted data
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Form editing `instance`; `data` is `None` when only displaying it
    pub fn for_instance(instance: Collection, data: Option<CollectionFormData>) -> Self {
        Self {
            data,
            instance: Some(instance),
            ..Default::default()
        }
    }

    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&CollectionFormData> {
        self.data.as_ref()
    }

    pub fn instance(&self) -> Option<&Collection> {
        self.instance.as_ref()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Validate the bound data, collecting per-field errors
    pub async fn is_valid<C>(&mut self, conn: &C) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        self.errors.clear();
        self.cleaned = None;

        let Some(data) = &self.data else {
            return Ok(false);
        };

        let name = data.name.as_deref().map(str::trim).unwrap_or_default();
        let mut slug = String::new();
        if name.is_empty() {
            self.errors.add("name", REQUIRED);
        } else if name.chars().count() > NAME_MAX_LENGTH {
            self.errors.add(
                "name",
                format!(
                    "Ensure this value has at most {} characters.",
                    NAME_MAX_LENGTH
                ),
            );
        } else {
            slug = slugify(name);
            let exclude = self.instance.as_ref().map(|c| c.id);
            if slug.is_empty() {
                self.errors
                    .add("name", "Name must contain at least one letter or digit.");
            } else if CollectionRepository::slug_taken(conn, &slug, exclude).await? {
                self.errors.add("name", NAME_TAKEN);
            }
        }

        let mut product_ids = Vec::with_capacity(data.products.len());
        let mut invalid = Vec::new();
        for raw in &data.products {
            match raw.trim().parse::<i32>() {
                Ok(id) => product_ids.push(id),
                Err(_) => invalid.push(raw.clone()),
            }
        }
        let existing = ProductRepository::existing_ids(conn, &product_ids).await?;
        invalid.extend(
            product_ids
                .iter()
                .filter(|id| !existing.contains(id))
                .map(|id| id.to_string()),
        );
        for value in invalid {
            self.errors.add(
                "products",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    value
                ),
            );
        }

        if !self.errors.is_empty() {
            return Ok(false);
        }

        self.cleaned = Some(CollectionInput {
            name: name.to_string(),
            slug,
            product_ids,
        });
        Ok(true)
    }

    /// Persist a validated form in one transaction
    ///
    /// A slug claimed by another write since validation is reported as a
    /// `name` error and the form becomes invalid.
    pub async fn save(&mut self, db: &DatabaseConnection) -> AppResult<Collection> {
        let input = self
            .cleaned
            .take()
            .ok_or_else(|| AppError::Validation("Collection form is not valid".to_string()))?;

        let txn = db.begin().await?;
        let saved = match &self.instance {
            Some(instance) => CollectionRepository::update(&txn, instance.id, &input).await,
            None => CollectionRepository::create(&txn, &input).await,
        };

        match saved {
            Ok(collection) => {
                txn.commit().await?;
                Ok(collection)
            }
            Err(AppError::Conflict(_)) => {
                self.errors.add("name", NAME_TAKEN);
                Err(AppError::Validation(NAME_TAKEN.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}
