use greedy_proxy::{app, bootstrap};

#[tokio::main]
async fn main() {
    let (config, governor) = bootstrap::app::setup();

    let jobs = app::start(&config, governor).await;

    // handle the signals
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Greedy proxy shutting down..");

            // Await for all jobs to shutdown
            futures::future::join_all(jobs).await;
            tracing::info!("Greedy proxy successfully shutdown.");
        }
    }
}
