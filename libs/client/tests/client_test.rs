//! Drives the client against the real routers served on a local port.

use axum::Router;
use axum_helpers::{JwtConfig, SessionGate, SessionTokens};
use diner_client::{
    ClientConfig, DinerClient, ImageFile, ItemForm, ListQuery, Pagination, RegisterForm,
    SignInForm,
};
use domain_items::{InMemoryItemRepository, ItemService};
use domain_users::{InMemoryUserRepository, UserService};
use media::InMemoryMediaStore;
use std::sync::Arc;
use tokio::net::TcpListener;

const SECRET: &str = "client-test-secret-with-32-characters";

async fn serve() -> String {
    let tokens = SessionTokens::new(&JwtConfig::new(SECRET));
    let users = UserService::new(InMemoryUserRepository::new());
    let gate = SessionGate::new(tokens.clone(), Arc::new(users.session_resolver()));
    let items = ItemService::new(
        InMemoryItemRepository::new(),
        Arc::new(InMemoryMediaStore::new()),
    );

    let api = Router::new()
        .nest("/items", domain_items::handlers::router(items, gate.clone()))
        .nest(
            "/users",
            domain_users::handlers::router(users, tokens, false),
        )
        .nest("/auth", domain_users::handlers::auth_router(gate));
    let app = Router::new().nest("/api", api);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn client() -> DinerClient {
    DinerClient::new(&ClientConfig::new(serve().await)).unwrap()
}

fn register_form(first: &str, email: &str) -> RegisterForm {
    RegisterForm {
        first_name: first.to_string(),
        last_name: "Smith".to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
    }
}

fn dish(name: &str, category: &str) -> ItemForm {
    ItemForm {
        name: Some(name.to_string()),
        description: Some(format!("{name} from the kitchen")),
        meal_category: Some(category.to_string()),
        price: Some(5.5),
        quantity: Some(3),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_admin_session_round_trip() {
    let client = client().await;

    assert_eq!(client.validate_token().await.unwrap(), None);

    let registered = client
        .register(&register_form("ada", "ada@diner.test"))
        .await
        .unwrap();
    assert!(registered.user.is_admin());

    let signed_in = client
        .sign_in(&SignInForm {
            email: "ada@diner.test".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(signed_in.user.name, "Ada Smith");

    let session = client.validate_token().await.unwrap().unwrap();
    assert_eq!(session.token, signed_in.token);

    let created = client
        .create_item(ItemForm {
            file: Some(ImageFile {
                file_name: "soup.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![137, 80, 78, 71],
            }),
            ..dish("Tomato Soup", "lunch")
        })
        .await
        .unwrap();
    assert_eq!(created.message, "Item created successfully");
    assert!(created.item.image.starts_with("memory://"));

    let updated = client
        .update_item(
            created.item.id,
            ItemForm {
                price: Some(6.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.item.price, 6.0);
    assert_eq!(updated.item.name, "Tomato Soup");

    let fetched = client.get_item(created.item.id).await.unwrap();
    assert_eq!(fetched, updated.item);

    client.delete_item(created.item.id).await.unwrap();
    let err = client.get_item(created.item.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    client.logout().await.unwrap();
    assert_eq!(client.validate_token().await.unwrap(), None);
}

#[tokio::test]
async fn test_member_cannot_create_items() {
    let client = client().await;
    client
        .register(&register_form("ada", "ada@diner.test"))
        .await
        .unwrap();
    client
        .register(&register_form("bo", "bo@diner.test"))
        .await
        .unwrap();

    let err = client.create_item(dish("Soup", "lunch")).await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    client
        .sign_in(&SignInForm {
            email: "bo@diner.test".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    let err = client.create_item(dish("Soup", "lunch")).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.messages(), vec!["Access denied. Admins only"]);
}

#[tokio::test]
async fn test_listing_with_pagination_state() {
    let client = client().await;
    client
        .register(&register_form("ada", "ada@diner.test"))
        .await
        .unwrap();
    client
        .sign_in(&SignInForm {
            email: "ada@diner.test".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    for i in 0..7 {
        client
            .create_item(dish(&format!("Pancake {i}"), "breakfast"))
            .await
            .unwrap();
    }
    client.create_item(dish("Spicy Wings", "dinner")).await.unwrap();

    let mut pagination = Pagination::new();
    let mut query = ListQuery::default();

    let page = client.list_items(&query).await.unwrap();
    pagination.observe(&page);
    assert_eq!(page.total_count, 8);
    assert_eq!(page.items.len(), 6);
    assert_eq!(pagination.label(), "Page 1 of 2");

    assert!(pagination.next());
    query.page = pagination.page();
    let page = client.list_items(&query).await.unwrap();
    pagination.observe(&page);
    assert_eq!(page.items.len(), 2);
    assert!(!pagination.can_go_next());

    let page = client
        .list_items(&ListQuery {
            search: "WING".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].name, "Spicy Wings");

    let err = client
        .create_item(ItemForm {
            price: Some(-1.0),
            ..dish("Broken", "brunch")
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    let messages = err.messages();
    assert!(messages.contains(&"Price must be greater than or equal to 0".to_string()));
    assert!(
        messages.contains(&"Meal category must be one of: breakfast, lunch, dinner, drinks".to_string())
    );
}
