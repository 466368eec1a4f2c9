use sqlx::PgPool;
use tracing::{debug, info};

use crate::contacts::dto::{
    ContactResponse, CreateContactRequest, SearchContactRequest, UpdateContactRequest,
};
use crate::contacts::repo_types::{Contact, ContactFilter};
use crate::error::{AppError, Result};
use crate::paging::{self, Pageable, Paging};
use crate::users::User;
use crate::validation::{Validate, ValidationErrors, Validator};

pub const CONTACT_NOT_FOUND: &str = "Contact is not Found!";

pub async fn create(db: &PgPool, user: &User, req: CreateContactRequest) -> Result<ContactResponse> {
    req.validate()?;
    let contact = Contact::create(
        db,
        &user.username,
        &req.first_name,
        req.last_name.as_deref(),
        req.email.as_deref(),
        req.phone.as_deref(),
    )
    .await?;
    info!(username = %user.username, contact_id = contact.id, "contact created");
    Ok(contact.into())
}

/// Ownership gate for everything under a contact: the id must be positive and the
/// contact must belong to `username`. Anything else is indistinguishable from absent.
pub async fn check_contact_must_exist(db: &PgPool, username: &str, contact_id: i64) -> Result<Contact> {
    Validator::new().positive("contactId", contact_id).finish()?;
    Contact::find_owned(db, username, contact_id)
        .await?
        .ok_or_else(|| {
            debug!(%username, contact_id, "contact not found");
            AppError::not_found(CONTACT_NOT_FOUND)
        })
}

pub async fn get(db: &PgPool, user: &User, contact_id: i64) -> Result<ContactResponse> {
    let contact = check_contact_must_exist(db, &user.username, contact_id).await?;
    Ok(contact.into())
}

pub async fn update(db: &PgPool, user: &User, req: UpdateContactRequest) -> Result<ContactResponse> {
    req.validate()?;
    let contact = check_contact_must_exist(db, &user.username, req.id).await?;
    let updated = Contact::update(
        db,
        &user.username,
        contact.id,
        &req.first_name,
        req.last_name.as_deref(),
        req.email.as_deref(),
        req.phone.as_deref(),
    )
    .await?
    // deleted between the check and the write
    .ok_or_else(|| AppError::not_found(CONTACT_NOT_FOUND))?;
    info!(username = %user.username, contact_id = updated.id, "contact updated");
    Ok(updated.into())
}

pub async fn delete(db: &PgPool, user: &User, contact_id: i64) -> Result<ContactResponse> {
    let contact = check_contact_must_exist(db, &user.username, contact_id).await?;
    Contact::delete(db, &user.username, contact.id).await?;
    info!(username = %user.username, contact_id, "contact deleted");
    Ok(contact.into())
}

pub async fn search(
    db: &PgPool,
    user: &User,
    req: SearchContactRequest,
) -> Result<Pageable<ContactResponse>> {
    req.validate()?;
    let (page, size) = (req.page(), req.size());
    let offset = paging::offset(page, size)
        .ok_or_else(|| ValidationErrors::single("page", "is too large"))?;
    let filter = ContactFilter {
        name: req.name.as_deref(),
        phone: req.phone.as_deref(),
        email: req.email.as_deref(),
    };

    let (rows, total) =
        Contact::search(db, &user.username, &filter, size, offset).await?;

    debug!(username = %user.username, total, page, size, "contact search");
    Ok(Pageable {
        data: rows.into_iter().map(Into::into).collect(),
        paging: Paging::new(total, page, size),
    })
}
