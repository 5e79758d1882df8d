use actix_web::dev::Server;
use actix_web::{guard, web, App, HttpServer};
use std::net::TcpListener;

use crate::configuration::Settings;
use crate::database::Database;
use crate::logger::LoggerMiddleware;
use crate::middleware::JwtMiddleware;
use crate::routes::{
    create_chirp, create_user, delete_chirp, get_chirp, health_check, list_chirps, login,
    polka_webhook, refresh, reset, revoke, update_user,
};

pub fn run(
    listener: TcpListener,
    database: Database,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let database = web::Data::new(database);
    let jwt_config = settings.jwt.clone();
    let jwt_config_data = web::Data::new(settings.jwt);
    let application_data = web::Data::new(settings.application);
    let polka_data = web::Data::new(settings.polka);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(LoggerMiddleware)
            // Shared state
            .app_data(database.clone())
            .app_data(jwt_config_data.clone())
            .app_data(application_data.clone())
            .app_data(polka_data.clone())
            // Protected routes (require JWT authentication). The method guard lets
            // other methods on the same path fall through to the public routes below.
            .service(
                web::resource("/api/chirps")
                    .guard(guard::Post())
                    .route(web::post().to(create_chirp))
                    .wrap(JwtMiddleware::new(jwt_config.clone())),
            )
            .service(
                web::resource("/api/chirps/{chirp_id}")
                    .guard(guard::Delete())
                    .route(web::delete().to(delete_chirp))
                    .wrap(JwtMiddleware::new(jwt_config.clone())),
            )
            .service(
                web::resource("/api/users")
                    .guard(guard::Put())
                    .route(web::put().to(update_user))
                    .wrap(JwtMiddleware::new(jwt_config.clone())),
            )
            // Public routes
            .route("/api/healthz", web::get().to(health_check))
            .route("/api/chirps", web::get().to(list_chirps))
            .route("/api/chirps/{chirp_id}", web::get().to(get_chirp))
            .route("/api/users", web::post().to(create_user))
            .route("/api/login", web::post().to(login))
            .route("/api/refresh", web::post().to(refresh))
            .route("/api/revoke", web::post().to(revoke))
            .route("/api/polka/webhooks", web::post().to(polka_webhook))
            .route("/admin/reset", web::post().to(reset))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
