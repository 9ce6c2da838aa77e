pub mod queries;

use secrecy::{ExposeSecret, SecretString};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use sqlx::Error;

use crate::configuration::DatabaseSettings;

pub async fn establish_connection(
    url: &SecretString,
    max_connections: u32,
) -> Result<SqlitePool, Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(url.expose_secret())
        .await
}

pub async fn connect_with(settings: &DatabaseSettings) -> Result<SqlitePool, Error> {
    establish_connection(&settings.url, settings.max_connections).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_to_in_memory_database() {
        let url = SecretString::from("sqlite::memory:");
        let pool = establish_connection(&url, 1).await.unwrap();
        let (one,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one, 1);
    }
}
