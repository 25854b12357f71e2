use vidproxy_api::setup;
use vidproxy_core::Config;

// Use mimalloc as the global allocator for lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Validate, build storage and routes
    let (state, router) = setup::initialize_app(config).await?;

    setup::server::start_server(&state.config, router).await?;

    Ok(())
}
