// src/common/response.rs

use serde::Serialize;

// Envelope uniforme de sucesso: { "success": true, "data": ... }.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

// Variante para listagens, com a contagem que o frontend espera.
#[derive(Debug, Serialize)]
pub struct ListEnvelope<T: Serialize> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> ListEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let value = serde_json::to_value(Envelope::new(42)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 42);
    }

    #[test]
    fn list_envelope_counts_rows() {
        let value = serde_json::to_value(ListEnvelope::new(vec!["a", "b"])).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["data"][0], "a");
    }
}
