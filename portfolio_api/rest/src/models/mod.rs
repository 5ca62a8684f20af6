use serde::Serialize;

pub mod contact;

#[derive(Debug, Serialize)]
pub struct ApiError<D> {
    pub detail: D,
}
