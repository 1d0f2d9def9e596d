use uuid::Uuid;

use storefront_dashboard::forms::slugify;
use storefront_dashboard::models::{
    Collection, CollectionInput, CreateUser, Menu, Product, ROLE_CUSTOMER, ROLE_STAFF,
};
use storefront_dashboard::repositories::{
    CollectionRepository, MenuRepository, ProductRepository, UserRepository,
};
use storefront_dashboard::services::AuthService;
use storefront_dashboard::state::AppState;

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Authentication info for tests
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    async fn create_user(&self, role: i16) -> TestAuth {
        let email = format!("test-{}@example.com", Uuid::new_v4());

        let input = CreateUser {
            email: email.clone(),
            password: TEST_PASSWORD.to_string(),
            name: "Test User".to_string(),
            role,
        };

        let password_hash = AuthService::hash_password(TEST_PASSWORD).unwrap();
        let user = UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap();

        let token = AuthService::generate_token(&user, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    /// Staff user allowed into the dashboard
    pub async fn create_staff(&self) -> TestAuth {
        self.create_user(ROLE_STAFF).await
    }

    /// Storefront customer
    pub async fn create_customer(&self) -> TestAuth {
        self.create_user(ROLE_CUSTOMER).await
    }

    pub async fn create_product(&self) -> Product {
        ProductRepository::create(&self.state.db, &format!("Test Product {}", Uuid::new_v4()))
            .await
            .unwrap()
    }

    /// Published collection without products
    pub async fn create_collection(&self) -> Collection {
        self.create_collection_with_products(&[]).await
    }

    pub async fn create_collection_with_products(&self, product_ids: &[i32]) -> Collection {
        let name = format!("Test Collection {}", Uuid::new_v4());
        let input = CollectionInput {
            slug: slugify(&name),
            name,
            product_ids: product_ids.to_vec(),
        };

        CollectionRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Menu with a plain link followed by a link to `collection`
    pub async fn create_menu_linking(&self, collection: &Collection) -> Menu {
        let menu = MenuRepository::create(&self.state.db, "navbar").await.unwrap();

        MenuRepository::add_item(&self.state.db, menu.id, "Home", Some("/"), None, 0)
            .await
            .unwrap();
        MenuRepository::add_item(
            &self.state.db,
            menu.id,
            &collection.name,
            None,
            Some(collection.id),
            1,
        )
        .await
        .unwrap();

        menu
    }
}
