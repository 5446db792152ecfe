fn main() -> anyhow::Result<()> {
    dualloc::cli::run_cli()
}
