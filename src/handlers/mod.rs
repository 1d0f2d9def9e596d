pub mod auth;
pub mod collection;
pub mod common;

pub use auth::{login, me, AuthResponse, LoginRequest};
pub use collection::{
    collection_add_form, collection_delete_confirm, collection_update_form, create_collection,
    delete_collection, list_collections, toggle_collection_published, update_collection,
    CollectionDeleteResponse, CollectionFormResponse, CollectionListResponse, CollectionResponse,
    FormState, PublishResponse,
};
pub use common::{found, PaginationParams};
