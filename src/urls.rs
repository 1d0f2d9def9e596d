//! Dashboard route paths
//!
//! Route templates are used when building the router; the functions resolve a
//! route to a concrete path for redirects and tests.

pub const COLLECTION_LIST: &str = "/dashboard/collections";
pub const COLLECTION_ADD: &str = "/dashboard/collections/add";
pub const COLLECTION_UPDATE: &str = "/dashboard/collections/{pk}/update";
pub const COLLECTION_DELETE: &str = "/dashboard/collections/{pk}/delete";
pub const COLLECTION_PUBLISH: &str = "/dashboard/collections/{pk}/publish";

pub fn collection_list() -> String {
    COLLECTION_LIST.to_string()
}

pub fn collection_add() -> String {
    COLLECTION_ADD.to_string()
}

pub fn collection_update(pk: i32) -> String {
    COLLECTION_UPDATE.replace("{pk}", &pk.to_string())
}

pub fn collection_delete(pk: i32) -> String {
    COLLECTION_DELETE.replace("{pk}", &pk.to_string())
}

pub fn collection_publish(pk: i32) -> String {
    COLLECTION_PUBLISH.replace("{pk}", &pk.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_collection_routes() {
        assert_eq!(collection_list(), "/dashboard/collections");
        assert_eq!(collection_add(), "/dashboard/collections/add");
        assert_eq!(collection_update(7), "/dashboard/collections/7/update");
        assert_eq!(collection_delete(7), "/dashboard/collections/7/delete");
        assert_eq!(collection_publish(7), "/dashboard/collections/7/publish");
    }
}
