//! Status code mapping for the back-office API.

use crate::traits::ApiErrorMapper;

use super::RestDomainApi;

/// The API reports failures through plain HTTP statuses with a
/// `{ message, errors[] }` body, so the default mapping applies as is.
impl ApiErrorMapper for RestDomainApi {}
