//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/users                          register a user
//! PUT    /api/v1/users/{email}                  update, or register when unknown
//! DELETE /api/v1/users/{email}                  remove a user
//! GET    /api/v1/users?start=YYYY-MM-DD&end=... users born within the range
//! ```
//!
//! Handlers check field formats here and leave business rules (uniqueness,
//! minimum age, range ordering) to the [`UserRegistry`] port.
//!
//! [`UserRegistry`]: crate::domain::ports::UserRegistry

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{EmailAddress, Error, PersonName, User, UserDetails};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrors, FieldName, parse_date, parse_email, parse_past_date, require, user_field_error,
};

const EMAIL: FieldName = FieldName::new("email");
const FIRST_NAME: FieldName = FieldName::new("firstName");
const LAST_NAME: FieldName = FieldName::new("lastName");
const BIRTH_DATE: FieldName = FieldName::new("birthDate");
const START: FieldName = FieldName::new("start");
const END: FieldName = FieldName::new("end");

/// Request body for registering or updating a user.
///
/// Every field is optional at the wire level so that missing fields are
/// reported alongside malformed ones.
///
/// Example JSON:
/// `{"email":"alice@x.com","firstName":"Alice","lastName":"Smith","birthDate":"1990-01-01"}`
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[schema(example = "alice@x.com")]
    pub email: Option<String>,
    #[schema(example = "Alice")]
    pub first_name: Option<String>,
    #[schema(example = "Smith")]
    pub last_name: Option<String>,
    /// ISO 8601 calendar date strictly before today.
    #[schema(format = Date, example = "1990-01-01")]
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl UserRequest {
    /// Validate every field and build the candidate record.
    fn into_user(self, today: NaiveDate) -> Result<User, Error> {
        let mut errors = FieldErrors::new();
        let email =
            errors.collect(require(self.email, EMAIL).and_then(|raw| parse_email(raw, EMAIL)));
        let first_name = errors.collect(require(self.first_name, FIRST_NAME).and_then(|raw| {
            PersonName::first(raw).map_err(|err| user_field_error(FIRST_NAME, &err))
        }));
        let last_name = errors.collect(require(self.last_name, LAST_NAME).and_then(|raw| {
            PersonName::last(raw).map_err(|err| user_field_error(LAST_NAME, &err))
        }));
        let birth_date = errors.collect(
            require(self.birth_date, BIRTH_DATE)
                .and_then(|raw| parse_past_date(&raw, BIRTH_DATE, today)),
        );

        let (Some(email), Some(first_name), Some(last_name), Some(birth_date)) =
            (email, first_name, last_name, birth_date)
        else {
            return Err(errors.into_error());
        };

        let mut details = UserDetails::new(first_name, last_name, birth_date);
        if let Some(address) = self.address {
            details = details.with_address(address);
        }
        if let Some(phone_number) = self.phone_number {
            details = details.with_phone_number(phone_number);
        }
        Ok(User::new(email, details))
    }
}

/// Query parameters for the birth date range search.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct BirthDateRangeQuery {
    /// Inclusive lower bound.
    pub start: Option<String>,
    /// Inclusive upper bound.
    pub end: Option<String>,
}

impl BirthDateRangeQuery {
    fn into_bounds(self) -> Result<(NaiveDate, NaiveDate), Error> {
        let mut errors = FieldErrors::new();
        let start =
            errors.collect(require(self.start, START).and_then(|raw| parse_date(&raw, START)));
        let end = errors.collect(require(self.end, END).and_then(|raw| parse_date(&raw, END)));
        match (start, end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(errors.into_error()),
        }
    }
}

fn today(state: &HttpState) -> NaiveDate {
    state.clock.local().date_naive()
}

/// Register a new user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::register_user;
///
/// let app = App::new().service(register_user);
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User registered", body = UserSchema),
        (status = 400, description = "Invalid fields, duplicate email or under minimum age", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<User>> {
    let candidate = payload.into_inner().into_user(today(&state))?;
    let created = state.users.register(candidate)?;
    Ok(web::Json(created))
}

/// Update the user keyed by `email`, registering the body when the key is
/// unknown.
///
/// The path key is matched as-is, without format checks. The stored email
/// never changes on update; the body email only matters on the registration
/// fallback.
#[utoipa::path(
    put,
    path = "/api/v1/users/{email}",
    params(
        ("email" = String, Path, description = "Email of the user to update")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated or registered", body = UserSchema),
        (status = 400, description = "Invalid fields or fallback registration rejected", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{email}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<User>> {
    let email = EmailAddress::lookup_key(path.into_inner());
    let changes = payload.into_inner().into_user(today(&state))?;
    let updated = state.users.update(&email, changes)?;
    Ok(web::Json(updated))
}

/// Delete the user keyed by `email`.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{email}",
    params(
        ("email" = String, Path, description = "Email of the user to delete")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "No user with this email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{email}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let email = EmailAddress::lookup_key(path.into_inner());
    state.users.delete(&email)?;
    Ok(HttpResponse::Ok().finish())
}

/// List users born between `start` and `end`, both inclusive, in insertion
/// order.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(
        ("start" = String, Query, description = "Inclusive lower bound (YYYY-MM-DD)"),
        ("end" = String, Query, description = "Inclusive upper bound (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Matching users", body = [UserSchema]),
        (status = 400, description = "Missing or malformed bounds, or start after end", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "usersByBirthDate"
)]
#[get("/users")]
pub async fn users_by_birth_date(
    state: web::Data<HttpState>,
    query: web::Query<BirthDateRangeQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let (start, end) = query.into_inner().into_bounds()?;
    let users = state.users.users_born_between(start, end)?;
    debug!(%start, %end, count = users.len(), "birth date range served");
    Ok(web::Json(users))
}
