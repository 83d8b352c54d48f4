#[tokio::main]
async fn main() -> anyhow::Result<()> {
    note_refiner_lib::run().await
}
