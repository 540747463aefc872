/*
 * Responsibility
 * - tokio runtime entry
 * - app::run() の呼び出し（ロジックは置かない）
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    casting_agency::app::run().await
}
