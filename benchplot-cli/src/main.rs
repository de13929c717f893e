fn main() -> anyhow::Result<()> {
    benchplot_cli::run()
}
