fn main() -> anyhow::Result<()> {
    sd_cli::run()
}
