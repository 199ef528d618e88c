use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = nearcast_api::Args::parse();
	nearcast_api::run(args).await
}
