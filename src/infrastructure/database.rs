use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    // each connection to an in-memory sqlite database sees its own database
    let max_connections = if config.database_url.contains(":memory:") {
        1
    } else {
        10
    };

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}
