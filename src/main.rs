fn main() -> anyhow::Result<()> {
    foggo::cli::run_cli()
}
