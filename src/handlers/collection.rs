use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::forms::{CollectionForm, CollectionFormData, FormErrors};
use crate::handlers::{found, PaginationParams};
use crate::middlewares::AuthUser;
use crate::models::Collection;
use crate::repositories::{CollectionRepository, Repository};
use crate::state::AppState;
use crate::urls;

// ============ Request/Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub is_published: bool,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            is_published: c.is_published,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionListResponse {
    pub collections: Vec<CollectionResponse>,
    pub total: u64,
}

/// Submitted (or initial) values plus the errors found in them
#[derive(Debug, Serialize, ToSchema)]
pub struct FormState {
    pub is_bound: bool,
    pub data: CollectionFormData,
    #[schema(value_type = Object)]
    pub errors: FormErrors,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionFormResponse {
    /// Collection being edited; null on the create page
    pub collection: Option<CollectionResponse>,
    pub form: FormState,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionDeleteResponse {
    pub collection: CollectionResponse,
    pub products_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PublishResponse {
    pub success: bool,
    pub is_published: bool,
}

fn render_form(form: &CollectionForm, initial: CollectionFormData) -> Response {
    Json(CollectionFormResponse {
        collection: form.instance().cloned().map(Into::into),
        form: FormState {
            is_bound: form.is_bound(),
            data: form.data().cloned().unwrap_or(initial),
            errors: form.errors().clone(),
        },
    })
    .into_response()
}

// ============ Handlers ============

/// List collections
#[utoipa::path(
    get,
    path = "/dashboard/collections",
    params(PaginationParams),
    responses(
        (status = 200, description = "All collections", body = CollectionListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a staff user")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn list_collections(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<CollectionListResponse>> {
    let collections = match params.window() {
        Some((limit, offset)) => CollectionRepository::list(&state.db, limit, offset).await?,
        None => CollectionRepository::list_all(&state.db).await?,
    };
    let total = CollectionRepository::count(&state.db).await?;

    Ok(Json(CollectionListResponse {
        collections: collections.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Empty collection form
#[utoipa::path(
    get,
    path = "/dashboard/collections/add",
    responses(
        (status = 200, description = "Unbound form", body = CollectionFormResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn collection_add_form(_user: AuthUser) -> Response {
    render_form(&CollectionForm::unbound(), CollectionFormData::default())
}

/// Create a collection from a form submission
#[utoipa::path(
    post,
    path = "/dashboard/collections/add",
    request_body(
        content = CollectionFormData,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 302, description = "Created, redirects to the collection list"),
        (status = 200, description = "Invalid submission re-rendered with errors", body = CollectionFormResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn create_collection(
    user: AuthUser,
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let mut form = CollectionForm::new(CollectionFormData::from_pairs(fields));

    if !form.is_valid(&state.db).await? {
        return Ok(render_form(&form, CollectionFormData::default()));
    }

    let collection = match form.save(&state.db).await {
        Ok(collection) => collection,
        Err(AppError::Validation(_)) => {
            return Ok(render_form(&form, CollectionFormData::default()))
        }
        Err(err) => return Err(err),
    };
    tracing::info!(
        collection_id = collection.id,
        slug = %collection.slug,
        user_id = %user.id,
        "Collection created"
    );

    Ok(found(&urls::collection_list()))
}

/// Collection form pre-filled from an existing collection
#[utoipa::path(
    get,
    path = "/dashboard/collections/{pk}/update",
    params(
        ("pk" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Form with current values", body = CollectionFormResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Collection not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn collection_update_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(pk): Path<i32>,
) -> AppResult<Response> {
    let collection = CollectionRepository::find_by_id(&state.db, pk).await?;
    let product_ids = CollectionRepository::product_ids(&state.db, pk).await?;

    let initial = CollectionFormData::from_collection(&collection, &product_ids);
    let form = CollectionForm::for_instance(collection, None);

    Ok(render_form(&form, initial))
}

/// Update a collection from a form submission
#[utoipa::path(
    post,
    path = "/dashboard/collections/{pk}/update",
    params(
        ("pk" = i32, Path, description = "Collection ID")
    ),
    request_body(
        content = CollectionFormData,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 302, description = "Updated, redirects to the collection list"),
        (status = 200, description = "Invalid submission re-rendered with errors", body = CollectionFormResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Collection not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn update_collection(
    user: AuthUser,
    State(state): State<AppState>,
    Path(pk): Path<i32>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let collection = CollectionRepository::find_by_id(&state.db, pk).await?;
    let mut form =
        CollectionForm::for_instance(collection, Some(CollectionFormData::from_pairs(fields)));

    if !form.is_valid(&state.db).await? {
        return Ok(render_form(&form, CollectionFormData::default()));
    }

    let collection = match form.save(&state.db).await {
        Ok(collection) => collection,
        Err(AppError::Validation(_)) => {
            return Ok(render_form(&form, CollectionFormData::default()))
        }
        Err(err) => return Err(err),
    };
    tracing::info!(
        collection_id = collection.id,
        slug = %collection.slug,
        user_id = %user.id,
        "Collection updated"
    );

    Ok(found(&urls::collection_list()))
}

/// Deletion confirmation
#[utoipa::path(
    get,
    path = "/dashboard/collections/{pk}/delete",
    params(
        ("pk" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection about to be deleted", body = CollectionDeleteResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Collection not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn collection_delete_confirm(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(pk): Path<i32>,
) -> AppResult<Json<CollectionDeleteResponse>> {
    let collection = CollectionRepository::find_by_id(&state.db, pk).await?;
    let products_count = CollectionRepository::product_ids(&state.db, pk).await?.len();

    Ok(Json(CollectionDeleteResponse {
        collection: collection.into(),
        products_count,
    }))
}

/// Delete a collection and refresh the menus linking to it
#[utoipa::path(
    post,
    path = "/dashboard/collections/{pk}/delete",
    params(
        ("pk" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 302, description = "Deleted, redirects to the collection list"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Collection not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn delete_collection(
    user: AuthUser,
    State(state): State<AppState>,
    Path(pk): Path<i32>,
) -> AppResult<Response> {
    let collection = CollectionRepository::find_by_id(&state.db, pk).await?;

    // Menu items cascade with the collection, so look them up first
    let menus = state.menus.menus_that_need_update(collection.id).await?;
    CollectionRepository::delete(&state.db, collection.id).await?;

    // The collection is already gone; a stale menu must not fail the request
    if !menus.is_empty() {
        if let Err(err) = state.menus.update_menus(&menus).await {
            tracing::error!(
                collection_id = collection.id,
                ?menus,
                error = %err,
                "Failed to update menus after collection deletion"
            );
        }
    }

    tracing::info!(
        collection_id = collection.id,
        menus_updated = menus.len(),
        user_id = %user.id,
        "Collection deleted"
    );

    Ok(found(&urls::collection_list()))
}

/// Toggle the published flag
#[utoipa::path(
    post,
    path = "/dashboard/collections/{pk}/publish",
    params(
        ("pk" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "New publication state", body = PublishResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Collection not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn toggle_collection_published(
    user: AuthUser,
    State(state): State<AppState>,
    Path(pk): Path<i32>,
) -> AppResult<Json<PublishResponse>> {
    let collection = CollectionRepository::toggle_published(&state.db, pk).await?;
    tracing::info!(
        collection_id = collection.id,
        is_published = collection.is_published,
        user_id = %user.id,
        "Collection publication toggled"
    );

    Ok(Json(PublishResponse {
        success: true,
        is_published: collection.is_published,
    }))
}
