use clap::Parser;
use log::LevelFilter;
use rsan::cmd::RsanCli;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    RsanCli::parse().run()
}
