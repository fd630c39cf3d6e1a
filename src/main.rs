#[macro_use]
extern crate diesel;

mod appointment;
mod appointment_type;
mod auth;
mod config;
mod database;
mod display;
mod models;
mod overlap;
mod palette;
mod protocol;
mod report;
mod schema;
mod sms_template;
mod utils;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, MysqlConnection};

use crate::config::ServerConfig;

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

pub struct AppState {
    pub pool: DbPool,
    pub config: ServerConfig,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let manager = ConnectionManager::<MysqlConnection>::new(config.database_url.clone());
    let pool = r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create pool")?;

    let bind = config.bind_addr.clone();
    tracing::info!(
        bind = %bind,
        language = config.display.language.as_str(),
        date_format = config.display.date_format.as_str(),
        "starting server"
    );

    HttpServer::new(move || {
        App::new()
            .data(AppState {
                pool: pool.clone(),
                config: config.clone(),
            })
            // driver session
            .service(web::scope("/auth").configure(auth::config))
            // appointments
            .service(web::scope("/appointment").configure(appointment::config))
            .service(web::scope("/appointment_type").configure(appointment_type::config))
            .service(web::scope("/sms_template").configure(sms_template::config))
    })
    .bind(&bind)?
    .run()
    .await?;

    Ok(())
}
