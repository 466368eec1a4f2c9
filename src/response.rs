use serde::Serialize;

/// `{ "data": ... }` envelope wrapped around every successful payload.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

pub const OK: &str = "OK";
