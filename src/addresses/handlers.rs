use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    addresses::{
        dto::{AddressResponse, CreateAddressRequest, GetAddressRequest, UpdateAddressRequest},
        services,
    },
    error::Result,
    extract::AppJson,
    response::{DataResponse, OK},
    state::AppState,
    users::AuthUser,
    validation::{parse_id, ValidationErrors},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contacts/:contactId/addresses",
            get(list_addresses).post(create_address),
        )
        .route(
            "/contacts/:contactId/addresses/:addressId",
            get(get_address).put(update_address).delete(delete_address),
        )
}

fn address_path(contact_id: &str, address_id: &str) -> std::result::Result<GetAddressRequest, ValidationErrors> {
    Ok(GetAddressRequest {
        contact_id: parse_id("contactId", contact_id)?,
        address_id: parse_id("addressId", address_id)?,
    })
}

#[instrument(skip(state, user, payload), fields(username = %user.username))]
pub async fn create_address(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<String>,
    AppJson(mut payload): AppJson<CreateAddressRequest>,
) -> Result<(StatusCode, Json<DataResponse<AddressResponse>>)> {
    payload.contact_id = parse_id("contactId", &contact_id)?;
    let address = services::create(&state.db, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(address))))
}

#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn list_addresses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<String>,
) -> Result<Json<DataResponse<Vec<AddressResponse>>>> {
    let contact_id = parse_id("contactId", &contact_id)?;
    let addresses = services::list(&state.db, &user, contact_id).await?;
    Ok(Json(DataResponse::new(addresses)))
}

#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn get_address(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> Result<Json<DataResponse<AddressResponse>>> {
    let req = address_path(&contact_id, &address_id)?;
    let address = services::get(&state.db, &user, req).await?;
    Ok(Json(DataResponse::new(address)))
}

#[instrument(skip(state, user, payload), fields(username = %user.username))]
pub async fn update_address(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((contact_id, address_id)): Path<(String, String)>,
    AppJson(mut payload): AppJson<UpdateAddressRequest>,
) -> Result<Json<DataResponse<AddressResponse>>> {
    let ids = address_path(&contact_id, &address_id)?;
    payload.contact_id = ids.contact_id;
    payload.id = ids.address_id;
    let address = services::update(&state.db, &user, payload).await?;
    Ok(Json(DataResponse::new(address)))
}

#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn delete_address(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> Result<Json<DataResponse<&'static str>>> {
    let req = address_path(&contact_id, &address_id)?;
    services::delete(&state.db, &user, req).await?;
    Ok(Json(DataResponse::new(OK)))
}
