fn main() -> anyhow::Result<()> {
    xmltest::app::run()
}
