//! Chat and vision example using Claude on Bedrock.
//!
//! ```bash
//! export AWS_BEARER_TOKEN_BEDROCK=your-api-key
//! cargo run -p basalt --example chat_vision [image-path]
//! ```
//!
//! With an image path the model describes the picture; without one it
//! answers a plain text question.

#![allow(clippy::print_stdout)]

use basalt::anthropic::{self, ChatRequest};
use basalt::{Result, RuntimeClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = RuntimeClient::from_env();
    let model = client.completion_model(anthropic::CLAUDE_3_5_SONNET);

    let request = match std::env::args().nth(1) {
        Some(path) => {
            // Encode to base64 WEBP, shrinking to the default bounding box.
            let image = basalt::image::encode_image_base64_from_file(
                &path,
                basalt::image::DEFAULT_MAX_DIMENSIONS,
            )?;
            ChatRequest::text("Describe this image in detail.")
                .with_image(anthropic::ImageSource::webp(image))
                .with_system("You are an image describer.")
        }
        None => ChatRequest::text("In one sentence, what is the Bedrock runtime API?"),
    };

    let response = model.invoke(&request).await?;
    match response.text() {
        Some(text) => println!("{text}"),
        None => println!("(no text content in response)"),
    }

    if !response.usage.is_empty() {
        println!(
            "\n[{} input tokens, {} output tokens]",
            response.usage.input_tokens, response.usage.output_tokens
        );
    }

    Ok(())
}
