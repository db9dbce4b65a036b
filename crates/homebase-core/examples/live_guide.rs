use homebase_core::{guide, HomebaseClient, NullProgress};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = HomebaseClient::new()?;

    println!("Fetching the first two guide windows...\n");
    let programs = guide::fetch_programs(&client, 0.25, &mut NullProgress).await?;

    println!("Found {} programs:", programs.len());
    for program in programs.iter().take(20) {
        println!("  {}", program);
        println!("    id: {}", program.id);
    }

    Ok(())
}
