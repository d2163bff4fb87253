use serde::Serialize;

#[derive(Serialize)]
pub struct SweepResponse {
    pub updated: u64,
}
