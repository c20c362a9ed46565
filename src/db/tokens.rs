//! Access token registration

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Access token granting entry to one collection, optionally time-boxed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    pub collection_id: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Register token request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterToken {
    pub token: Option<String>,
    pub collection: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RegisterToken {
    /// Validate the request into a token, generating an id when none is given
    pub fn validate(&self) -> Result<Token> {
        let collection_id = self
            .collection
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::BadRequest("Please provide a collection!".to_string()))?;

        let from = parse_date(self.from.as_deref())
            .map_err(|_| AppError::BadRequest("Please provide a valid from date!".to_string()))?;
        let to = parse_date(self.to.as_deref())
            .map_err(|_| AppError::BadRequest("Please provide a valid to date!".to_string()))?;

        if let (Some(from), Some(to)) = (from, to) {
            if from >= to {
                return Err(AppError::BadRequest(
                    "Please provide a valid date range!".to_string(),
                ));
            }
        }

        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Token {
            token,
            collection_id: collection_id.to_string(),
            from,
            to,
        })
    }
}

/// RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
fn parse_date(value: Option<&str>) -> std::result::Result<Option<DateTime<Utc>>, ()> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(datetime.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| Some(datetime.and_utc()))
        .ok_or(())
}

/// Token repository
pub struct TokenRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TokenRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and store a token, replacing an existing one with the same id
    pub async fn register(&self, request: &RegisterToken) -> Result<Token> {
        let token = request.validate()?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO tokens (token, collection_id, valid_from, valid_to)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&token.token)
        .bind(&token.collection_id)
        .bind(token.from.map(|d| d.to_rfc3339()))
        .bind(token.to.map(|d| d.to_rfc3339()))
        .execute(self.pool)
        .await?;

        tracing::info!("Registered token for collection {}", token.collection_id);

        Ok(token)
    }

    #[cfg(test)]
    pub async fn count_for_collection(&self, collection_id: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tokens WHERE collection_id = ?")
            .bind(collection_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    fn request(collection: Option<&str>, from: Option<&str>, to: Option<&str>) -> RegisterToken {
        RegisterToken {
            token: None,
            collection: collection.map(str::to_string),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    fn bad_request_message(result: Result<Token>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_collection_required() {
        let msg = bad_request_message(request(None, None, None).validate());
        assert_eq!(msg, "Please provide a collection!");

        let msg = bad_request_message(request(Some("  "), None, None).validate());
        assert_eq!(msg, "Please provide a collection!");
    }

    #[test]
    fn test_invalid_dates() {
        let msg = bad_request_message(request(Some("c"), Some("yesterday"), None).validate());
        assert_eq!(msg, "Please provide a valid from date!");

        let msg = bad_request_message(request(Some("c"), None, Some("2024-13-01")).validate());
        assert_eq!(msg, "Please provide a valid to date!");

        let msg = bad_request_message(
            request(Some("c"), Some("2024-05-01"), Some("2024-05-01")).validate(),
        );
        assert_eq!(msg, "Please provide a valid date range!");
    }

    #[test]
    fn test_generated_token_and_dates() {
        let token = request(Some("coll"), Some("2024-01-01"), Some("2024-02-01T12:00:00+02:00"))
            .validate()
            .unwrap();

        assert!(Uuid::parse_str(&token.token).is_ok());
        assert_eq!(token.collection_id, "coll");
        assert_eq!(token.from.unwrap().to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(token.to.unwrap().to_rfc3339(), "2024-02-01T10:00:00+00:00");
    }

    #[tokio::test]
    async fn test_register_stores_token() {
        let pool = memory_pool().await;
        let repo = TokenRepository::new(&pool);

        let mut req = request(Some("coll"), None, None);
        req.token = Some("secret".to_string());

        let token = repo.register(&req).await.unwrap();
        assert_eq!(token.token, "secret");

        repo.register(&req).await.unwrap();
        assert_eq!(repo.count_for_collection("coll").await.unwrap(), 1);
    }
}
