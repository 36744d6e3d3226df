//! Embedding example using Amazon Titan on Bedrock.
//!
//! ```bash
//! export AWS_BEARER_TOKEN_BEDROCK=your-api-key
//! cargo run -p basalt --example embedding
//! ```

#![allow(clippy::print_stdout)]

use basalt::titan::{self, EmbeddingInput};
use basalt::{Result, RuntimeClient};

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (norm_a * norm_b)
}

#[tokio::main]
async fn main() -> Result<()> {
    let client = RuntimeClient::from_env();
    let model = client.embedding_model(titan::TITAN_EMBED_TEXT_V2);

    // Single text embedding
    let response = model
        .embed_request(&EmbeddingInput::text("Hello, world!"))
        .await?;
    println!("Single embedding:");
    println!("  Dimension: {}", response.embedding.len());
    println!("  Input tokens: {:?}", response.input_text_token_count);
    println!("  First 5 values: {:?}", &response.embedding[..5]);

    // Embeddings for similarity comparison
    let cat = model.embed_text("The cat sat on the mat.").await?;
    let feline = model.embed_text("A feline rested on the rug.").await?;
    let stocks = model.embed_text("The stock market crashed today.").await?;

    println!("\nCosine similarities:");
    println!(
        "  cat/feline sentences: {:.4}",
        cosine_similarity(&cat, &feline)
    );
    println!(
        "  cat/stock sentences:  {:.4}",
        cosine_similarity(&cat, &stocks)
    );

    Ok(())
}
