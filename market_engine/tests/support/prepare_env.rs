use log::*;
use market_engine::SqliteDatabase;
use sqlx::{migrate::MigrateDatabase, Sqlite};

/// Creates a fresh, migrated SQLite database in the temp directory and returns a handle to it.
pub async fn prepare_test_db() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = random_db_url();
    if let Err(e) = Sqlite::drop_database(&url).await {
        trace!("Nothing to drop at {url}: {e:?}");
    }
    Sqlite::create_database(&url).await.expect("Error creating database");
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database");
    db.migrate().await.expect("Error running DB migrations");
    info!("🚀️ Test database ready at {url}");
    db
}

fn random_db_url() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/test_market_store_{}.db", dir.display(), rand::random::<u64>())
}
