use reforma_core::Config;

// mimalloc keeps fragmentation low with many short-lived multi-megabyte buffers,
// especially on musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (_state, router) = reforma_api::setup::initialize_app(config.clone())?;

    reforma_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
