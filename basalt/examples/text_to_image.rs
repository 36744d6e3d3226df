//! Text-to-image example using Stable Diffusion XL on Bedrock.
//!
//! ```bash
//! export AWS_BEARER_TOKEN_BEDROCK=your-api-key
//! cargo run -p basalt --example text_to_image
//! ```
//!
//! The generated image is written to `output/` as a PNG.

#![allow(clippy::print_stdout)]

use basalt::stability::{self, ImageSize, StylePreset, TextToImageRequest};
use basalt::{Result, RuntimeClient, util};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = RuntimeClient::from_env();
    let model = client.image_generation_model(stability::SDXL_V1);

    let seed = util::random_seed();
    let request = TextToImageRequest::builder()
        .prompt("A lighthouse on a rocky shore at dusk, dramatic sky")
        .negative_prompt("blurry, low quality")
        .size(ImageSize::Landscape1152x896)
        .style_preset(StylePreset::Photographic)
        .seed(seed)
        .build()?;

    println!("Generating with seed {seed}...");
    let image = model.text_to_image(&request).await?;

    let path = format!("output/{}.png", util::format_timestamp("%y%m%d-%H%M%S"));
    basalt::image::save_image_base64(&image, &path)?;
    println!("Saved to {path}");

    Ok(())
}
