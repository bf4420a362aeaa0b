#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use leptos::logging::log;
    use std::io;
    use storefront::api::{not_found, routes};
    use storefront::config::ServerConfig;
    use storefront::db::Database;
    use storefront::flash::FlashStore;

    // Load configuration
    let config = ServerConfig::load().await.map_err(io::Error::other)?;

    // Initialize the database
    let db = Database::new(&config.database_path).map_err(io::Error::other)?;
    db.create_schema().await.map_err(io::Error::other)?; // Ensure the schema is created
    log!("[SERVER] Schema ready in {}", config.database_path);

    // Shared state, cloned into each worker
    let db = web::Data::new(db);
    let flash = web::Data::new(FlashStore::new());
    let assets_dir = config.assets_dir.clone();

    log!("[SERVER] listening on http://{}", &config.site_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(flash.clone())
            .configure(routes)
            // Serve the stylesheet and other static files
            .service(Files::new("/assets", &assets_dir))
            .default_service(web::to(not_found))
    })
    .bind(config.site_addr)?
    .run()
    .await
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // the storefront is rendered on the server only; build with the `ssr` feature
}
