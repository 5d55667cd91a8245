use nuan_colour::configuration::get_configuration;
use nuan_colour::startup::Application;
use nuan_colour::telemetry::{get_subscriber, init_subscriber};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        "nuan_colour".into(),
        "nuan_colour=info,tower_http=info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
