use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = kino_api::Args::parse();
	kino_api::run(args).await
}
