pub mod health;
pub mod quiz;
pub mod upload;

use crate::error::Error;

pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
