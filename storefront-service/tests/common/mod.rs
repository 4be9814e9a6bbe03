use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenCodec;
use chrono::Duration;
use chrono::Utc;
use storefront_service::domain::errors::StoreError;
use storefront_service::domain::health::StoreProbe;
use storefront_service::domain::order::models::NewOrder;
use storefront_service::domain::order::models::Order;
use storefront_service::domain::order::models::OrderId;
use storefront_service::domain::order::ports::OrderRepository;
use storefront_service::domain::order::service::OrderService;
use storefront_service::domain::product::models::Product;
use storefront_service::domain::product::models::ProductId;
use storefront_service::domain::product::models::ProductQuery;
use storefront_service::domain::product::ports::ProductRepository;
use storefront_service::domain::product::service::ProductService;
use storefront_service::domain::user::models::NewUser;
use storefront_service::domain::user::models::User;
use storefront_service::domain::user::models::UserId;
use storefront_service::domain::user::ports::UserRepository;
use storefront_service::domain::user::service::UserService;
use storefront_service::inbound::http::router::create_router;
use storefront_service::inbound::http::router::AppState;
use storefront_service::inbound::http::router::RouterConfig;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application with the default route configuration
    pub async fn spawn() -> Self {
        Self::spawn_with(RouterConfig {
            cors_origins: vec![ALLOWED_ORIGIN.to_string()],
            orders_require_auth: false,
        })
        .await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with(config: RouterConfig) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryStore::with_catalog());
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, Duration::hours(24)));

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&store),
                Arc::clone(&authenticator),
            )),
            product_service: Arc::new(ProductService::new(Arc::clone(&store))),
            order_service: Arc::new(OrderService::new(Arc::clone(&store))),
            store_probe: store.clone(),
            authenticator,
            environment: "test".into(),
        };

        let router = create_router(state, config);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(TEST_SECRET, Duration::hours(24)),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Sign up through the API and return the issued token
    pub async fn signup(&self, email: &str, password: &str, role: Option<&str>) -> String {
        let mut body = serde_json::json!({"email": email, "password": password});
        if let Some(role) = role {
            body["role"] = role.into();
        }

        let response = self
            .post("/api/auth/signup")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}

/// In-memory stand-in for the external store, implementing every repository port.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    products: Vec<Product>,
    orders: Mutex<Vec<Order>>,
    next_order_id: AtomicI64,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn with_catalog() -> Self {
        let products = vec![
            product(1, "Fresh Milk", "Dairy", "Full cream cow milk"),
            product(2, "Paneer", "Dairy", "Soft cottage cheese"),
            product(3, "Brown Bread", "Bakery", "Whole wheat loaf"),
            product(4, "Basmati Rice", "Grains", "Aged long grain rice"),
            product(5, "Banana", "Fruits", "Sweet ripe bananas, goes well with milk"),
        ];

        Self {
            products,
            next_order_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    /// Make every subsequent store call fail as unreachable.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn user_count(&self, email: &str) -> usize {
        self.users
            .lock()
            .unwrap()
            .iter()
            .filter(|user| user.email == email)
            .count()
    }

    pub fn stored_user(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

fn product(id: i64, name: &str, category: &str, description: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: 10.0 * id as f64,
        description: Some(description.to_string()),
        image: None,
        stock: 20,
        rating: 4.5,
        reviews: 0,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        self.check()?;
        let created = User {
            id: UserId::new(uuid::Uuid::new_v4().to_string()),
            email: user.email,
            name: user.name,
            phone: user.phone,
            role: user.role,
            password_hash: user.password_hash,
            created_at: Some(user.created_at),
            updated_at: Some(user.created_at),
        };
        self.users.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| &user.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.check()?;
        Ok(self.stored_user(email))
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        self.check()?;
        let matches = |product: &&Product| match query {
            ProductQuery::All => true,
            ProductQuery::Category(category) => &product.category == category,
            ProductQuery::Search(term) => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            }
        };
        Ok(self.products.iter().filter(matches).cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.check()?;
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<String>, StoreError> {
        self.check()?;
        Ok(self.products.iter().map(|p| p.category.clone()).collect())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        self.check()?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        self.check()?;
        let created = Order {
            id: OrderId::Numeric(self.next_order_id.fetch_add(1, Ordering::SeqCst)),
            user_id: order.user_id,
            total_amount: order.total_amount,
            delivery_address: order.delivery_address,
            phone: order.phone,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            notes: order.notes,
            created_at: Some(Utc::now()),
        };
        self.orders.lock().unwrap().push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl StoreProbe for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
