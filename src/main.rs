use std::sync::Arc;
use tokio::signal;
use varanda::api;
use varanda::logger::*;
use varanda::server::*;
use varanda::settings::*;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    debug!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let address: std::net::SocketAddr = project_settings.http.address.parse()?;

    let server = Arc::new(Server::try_new(&project_settings).await?);

    let api_v1 = warp::path("api")
        .and(warp::path("v1"))
        .and(api::v1::routes(server.clone()))
        .recover(api::v1::recover_error)
        .with(warp::log("varanda::http"));

    let shutdown = async {
        signal::ctrl_c().await.expect("Could not register SIGINT");
    };

    if project_settings.http.tls_enabled() {
        for path in [&project_settings.http.cert_path, &project_settings.http.key_path] {
            if !std::fs::metadata(path)?.is_file() {
                return Err(anyhow::anyhow!("TLS file is not a regular file: {:?}", path));
            }
        }
        info!(%address, "serving https");
        warp::serve(api_v1)
            .tls()
            .cert_path(&project_settings.http.cert_path)
            .key_path(&project_settings.http.key_path)
            .bind_with_graceful_shutdown(address, shutdown)
            .1
            .await;
    } else {
        info!(%address, "serving http");
        let (_, serving) = warp::serve(api_v1).try_bind_with_graceful_shutdown(address, shutdown)?;
        serving.await;
    }

    let shutdown_timeout = std::time::Duration::from_secs(30);
    match tokio::time::timeout(shutdown_timeout, server.shutdown()).await {
        Ok(_) => info!("server shutdown successfully"),
        Err(_) => error!("server shutdown timed out"),
    }

    Ok(())
}
