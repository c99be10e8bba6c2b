use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a catalog or order operation.
///
/// `Display` carries the diagnostic text (including the database error)
/// and is meant for logs; [`ServiceError::public_message`] is what a
/// client gets to see.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid order id: {0:?}")]
    InvalidId(String),
    #[error("{0}")]
    InvalidStatus(String),
    #[error("Product {0} not found")]
    ProductNotFound(i32),
    #[error("Order {0} not found")]
    OrderNotFound(i32),
    #[error("Failed to begin transaction: {0}")]
    Transaction(#[source] DbErr),
    #[error("Failed to insert order item: {0}")]
    ItemInsert(#[source] DbErr),
    #[error("Failed to commit transaction: {0}")]
    Commit(#[source] DbErr),
    #[error("Database error: {0}")]
    Storage(#[source] DbErr),
}

impl ServiceError {
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::InvalidId(_) => "Invalid order id".to_owned(),
            Self::InvalidStatus(message) => message.clone(),
            Self::ProductNotFound(id) => format!("No product with {} id was found", id),
            Self::OrderNotFound(id) => format!("No order with {} id was found", id),
            Self::Transaction(_) => "Failed to start transaction".to_owned(),
            Self::ItemInsert(_) => "Failed to add item to order".to_owned(),
            Self::Commit(_) => "Failed to finalize order".to_owned(),
            Self::Storage(_) => "Internal server error".to_owned(),
        }
    }

    /// Caller mistakes, as opposed to failures of the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidId(_)
                | Self::InvalidStatus(_)
                | Self::ProductNotFound(_)
                | Self::OrderNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_message_hides_database_details() {
        let err = ServiceError::Storage(DbErr::Custom("syntax error near SELECT".to_owned()));
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("syntax error near SELECT"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn not_found_messages_name_the_identifier() {
        assert_eq!(
            ServiceError::ProductNotFound(42).public_message(),
            "No product with 42 id was found"
        );
        assert!(ServiceError::OrderNotFound(7).is_client_error());
    }
}
