mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{Factory, TestApp};
use storefront_dashboard::repositories::MenuRepository;
use storefront_dashboard::urls;

#[sqlx::test(migrations = "./migrations")]
async fn test_menus_that_need_update(pool: PgPool) {
    let app = TestApp::new(pool);
    let factory = Factory::new(&app.state);
    let linked = factory.create_collection().await;
    let unlinked = factory.create_collection().await;
    let menu = factory.create_menu_linking(&linked).await;

    let menus = &app.state.menus;
    assert_eq!(
        menus.menus_that_need_update(linked.id).await.unwrap(),
        vec![menu.id]
    );
    assert!(menus
        .menus_that_need_update(unlinked.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_menus_renders_items(pool: PgPool) {
    let app = TestApp::new(pool);
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection().await;
    let menu = factory.create_menu_linking(&collection).await;

    app.state.menus.update_menus(&[menu.id]).await.unwrap();

    let menu = MenuRepository::find_by_id(&app.state.db, menu.id)
        .await
        .unwrap();
    assert_eq!(
        menu.json_content,
        json!([
            {"name": "Home", "url": "/"},
            {
                "name": collection.name,
                "url": format!("/collections/{}-{}/", collection.slug, collection.id)
            }
        ])
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_collection_regenerates_menu(pool: PgPool) {
    let app = TestApp::new(pool);
    let factory = Factory::new(&app.state);
    let auth = factory.create_staff().await;
    let collection = factory.create_collection().await;
    let menu = factory.create_menu_linking(&collection).await;

    let response = app
        .server
        .post(&urls::collection_delete(collection.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::FOUND);

    let menu = MenuRepository::find_by_id(&app.state.db, menu.id)
        .await
        .unwrap();
    assert_eq!(menu.json_content, json!([{"name": "Home", "url": "/"}]));
    assert_eq!(
        MenuRepository::items(&app.state.db, menu.id)
            .await
            .unwrap()
            .len(),
        1
    );
}
