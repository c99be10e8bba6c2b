//! Store-facing operations. Every function takes the connection it works
//! on as an argument; handlers pass the shared pool, tests may pass a
//! dedicated one.

pub mod catalog;
pub mod error;
pub mod order_reader;
pub mod order_writer;
pub mod status_updater;

pub use error::ServiceError;

/// Parses a path segment into an order id. Only positive integers are ids.
pub fn parse_order_id(raw: &str) -> Result<i32, ServiceError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ServiceError::InvalidId(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_ids() {
        assert_eq!(parse_order_id("1").unwrap(), 1);
        assert_eq!(parse_order_id("2147483647").unwrap(), i32::MAX);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["0", "-3", "abc", "1.5", "", "99999999999"] {
            assert!(
                matches!(parse_order_id(raw), Err(ServiceError::InvalidId(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
