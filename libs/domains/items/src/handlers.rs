use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};
use axum_helpers::{
    CurrentUser, FormPayload, MAX_UPLOAD_BYTES, SessionGate, UuidPath, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    require_admin, require_session,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::form;
use crate::models::{
    Item, ItemMessage, ItemPage, ItemPatch, ItemQuery, MealCategory, MessageResponse, NewItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// Room for multipart framing and text fields next to the largest image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, get_item, create_item, update_item, delete_item),
    components(
        schemas(Item, ItemPage, ItemMessage, MessageResponse, NewItem, ItemPatch, MealCategory),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Menu items: public browsing, admin management")
    )
)]
pub struct ApiDoc;

/// Items router. Reads are public; writes need an admin session.
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>, gate: SessionGate) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_items::<R>))
        .route("/{id}", get(get_item::<R>));

    let admin = Router::new()
        .route("/", post(create_item::<R>))
        .route("/{id}", put(update_item::<R>).delete(delete_item::<R>))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(gate, require_session))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + FORM_OVERHEAD_BYTES));

    public.merge(admin).with_state(shared_service)
}

/// List items, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Page of items, newest first", body = ItemPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ItemQuery>,
) -> ItemResult<Json<ItemPage>> {
    let page = service.list_items(query).await?;
    Ok(Json(page))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Create an item (admin). Accepts a multipart form with an optional `image` file, or JSON.
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body(content(
        (NewItem = "multipart/form-data"),
        (NewItem = "application/json")
    )),
    responses(
        (status = 201, description = "Item created successfully", body = ItemMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    CurrentUser(admin): CurrentUser,
    mut payload: FormPayload,
) -> ItemResult<(StatusCode, Json<ItemMessage>)> {
    let input = form::new_item(&payload)?;
    let image = payload.take_file().map(form::image_upload).transpose()?;

    let item = service.create_item(input, image).await?;
    tracing::info!(item_id = %item.id, admin_id = %admin.id, "Item created by admin");

    Ok((
        StatusCode::CREATED,
        Json(ItemMessage {
            message: "Item created successfully".to_string(),
            item,
        }),
    ))
}

/// Update an item (admin). Only the fields sent are changed.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body(content(
        (ItemPatch = "multipart/form-data"),
        (ItemPatch = "application/json")
    )),
    responses(
        (status = 201, description = "Item updated successfully", body = ItemMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    CurrentUser(admin): CurrentUser,
    UuidPath(id): UuidPath,
    mut payload: FormPayload,
) -> ItemResult<(StatusCode, Json<ItemMessage>)> {
    let patch = form::item_patch(&payload)?;
    let image = payload.take_file().map(form::image_upload).transpose()?;

    let item = service.update_item(id, patch, image).await?;
    tracing::info!(item_id = %item.id, admin_id = %admin.id, "Item updated by admin");

    Ok((
        StatusCode::CREATED,
        Json(ItemMessage {
            message: "Item updated successfully".to_string(),
            item,
        }),
    ))
}

/// Delete an item (admin). Succeeds whether or not the item existed.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    CurrentUser(admin): CurrentUser,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<MessageResponse>> {
    service.delete_item(id).await?;
    tracing::info!(item_id = %id, admin_id = %admin.id, "Item deleted by admin");

    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_string(),
    }))
}
