fn main() -> anyhow::Result<()> {
    fibts_cli::run()
}
