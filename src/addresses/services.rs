use sqlx::PgPool;
use tracing::{debug, info};

use crate::addresses::dto::{
    AddressResponse, CreateAddressRequest, GetAddressRequest, UpdateAddressRequest,
};
use crate::addresses::repo_types::Address;
use crate::contacts::services::check_contact_must_exist;
use crate::error::{AppError, Result};
use crate::users::User;
use crate::validation::{Validate, Validator};

pub const ADDRESS_NOT_FOUND: &str = "Address is not found";

pub async fn create(db: &PgPool, user: &User, req: CreateAddressRequest) -> Result<AddressResponse> {
    req.validate()?;
    let contact = check_contact_must_exist(db, &user.username, req.contact_id).await?;
    let address = Address::create(db, contact.id, req.fields()).await?;
    info!(username = %user.username, contact_id = contact.id, address_id = address.id, "address created");
    Ok(address.into())
}

/// Second level of the ownership chain; callers check the contact first.
pub async fn check_address_must_exist(db: &PgPool, contact_id: i64, address_id: i64) -> Result<Address> {
    Validator::new().positive("addressId", address_id).finish()?;
    Address::find_in_contact(db, contact_id, address_id)
        .await?
        .ok_or_else(|| {
            debug!(contact_id, address_id, "address not found");
            AppError::not_found(ADDRESS_NOT_FOUND)
        })
}

pub async fn list(db: &PgPool, user: &User, contact_id: i64) -> Result<Vec<AddressResponse>> {
    let contact = check_contact_must_exist(db, &user.username, contact_id).await?;
    let rows = Address::list_by_contact(db, contact.id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn get(db: &PgPool, user: &User, req: GetAddressRequest) -> Result<AddressResponse> {
    check_contact_must_exist(db, &user.username, req.contact_id).await?;
    let address = check_address_must_exist(db, req.contact_id, req.address_id).await?;
    Ok(address.into())
}

pub async fn update(db: &PgPool, user: &User, req: UpdateAddressRequest) -> Result<AddressResponse> {
    req.validate()?;
    check_contact_must_exist(db, &user.username, req.contact_id).await?;
    check_address_must_exist(db, req.contact_id, req.id).await?;
    let address = Address::update(db, req.contact_id, req.id, req.fields())
        .await?
        .ok_or_else(|| AppError::not_found(ADDRESS_NOT_FOUND))?;
    info!(username = %user.username, contact_id = req.contact_id, address_id = address.id, "address updated");
    Ok(address.into())
}

pub async fn delete(db: &PgPool, user: &User, req: GetAddressRequest) -> Result<AddressResponse> {
    check_contact_must_exist(db, &user.username, req.contact_id).await?;
    let address = check_address_must_exist(db, req.contact_id, req.address_id).await?;
    Address::delete(db, req.contact_id, req.address_id).await?;
    info!(username = %user.username, contact_id = req.contact_id, address_id = req.address_id, "address deleted");
    Ok(address.into())
}
