use actix_web::{self, middleware::Logger, web, App, HttpServer};

use crate::repository::TodoRepository;

use super::{errors::json_error_handler, todos_handler};

/// Registers the `/todos` routes; the collection answers with and
/// without the trailing slash
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/todos")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("", web::get().to(todos_handler::get_todos))
            .route("/", web::get().to(todos_handler::get_todos))
            .route("", web::post().to(todos_handler::create_todo))
            .route("/", web::post().to(todos_handler::create_todo))
            .route("", web::delete().to(todos_handler::delete_todos))
            .route("/", web::delete().to(todos_handler::delete_todos))
            .route("/{title}", web::get().to(todos_handler::get_todo))
            .route("/{title}", web::put().to(todos_handler::update_todo))
            .route("/{title}", web::delete().to(todos_handler::delete_todo)),
    );
}

pub async fn start_server(
    bind: &str,
    repository: TodoRepository,
    workers: Option<usize>,
) -> std::io::Result<()> {
    let repository = web::Data::new(repository);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repository.clone())
            .configure(configure)
    });

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    log::info!("Listening on {}", bind);

    server.bind(bind)?.run().await
}
