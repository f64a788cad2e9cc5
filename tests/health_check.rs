use std::net::TcpListener;

use fitgenius::auth::AuthService;
use fitgenius::configuration::get_configuration;
use fitgenius::startup::run;
use sqlx::postgres::PgPoolOptions;

#[tokio::test]
async fn health_check_works() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let configuration = get_configuration().expect("Failed to read configuration.");
    // The health check never touches the store; a lazy pool is enough.
    let pool = PgPoolOptions::new()
        .connect_lazy(&configuration.database.connection_string())
        .expect("Failed to build lazy pool");

    let auth_service = AuthService::new(pool, configuration.jwt.clone());
    let server = run(listener, auth_service, configuration.jwt.clone())
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    let client = reqwest::Client::new();
    let response = client
        .get(&format!("{}/health_check", &address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}
