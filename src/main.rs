use std::io;

use actix_web::{App, HttpServer, middleware, web};
use config::{Config, ConfigError, Environment, File};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use env_logger::Env;

use hive_management::db::establish_connection_pool;
use hive_management::models::config::ServerConfig;
use hive_management::repository::DieselRepository;
use hive_management::routes::{hive_sections, hives};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Read `config/default.yaml` (optional) and `APP__*` environment overrides.
fn load_config() -> Result<ServerConfig, ConfigError> {
    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let server_config = load_config().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        log::error!("Failed to open database {}: {e}", server_config.database_url);
        io::Error::other(e)
    })?;

    {
        let mut conn = pool.get().map_err(io::Error::other)?;
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            log::error!("Failed to run migrations: {e}");
            io::Error::other(e)
        })?;
    }

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting hive management server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .service(
                web::scope("/api/v1")
                    .configure(hives::configure)
                    .configure(hive_sections::configure),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
