use claude_session_sync::cli::run;

fn main() -> anyhow::Result<()> {
    run()
}
