//! Validated request records for Stable Diffusion on Bedrock.
//!
//! The service rejects out-of-range parameters with opaque 4xx replies, so
//! every bound the API documents is enforced here at construction time.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum prompt length in characters.
pub const MAX_PROMPT_LENGTH: usize = 2000;

/// Required step size for image dimensions.
pub const DIMENSION_STEP: u32 = 64;

/// Smallest permitted image dimension.
pub const MIN_DIMENSION: u32 = 128;

/// A weighted prompt fragment.
///
/// Fragments with a negative weight act as negative prompts: they steer
/// generation away from their content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrompt {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f32>,
}

impl TextPrompt {
    /// Create a prompt with the service's default weight.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: None,
        }
    }

    /// Create a prompt with an explicit weight.
    #[must_use]
    pub fn weighted(text: impl Into<String>, weight: f32) -> Self {
        Self {
            text: text.into(),
            weight: Some(weight),
        }
    }

    /// Create a negative prompt (weight -1.0).
    #[must_use]
    pub fn negative(text: impl Into<String>) -> Self {
        Self::weighted(text, -1.0)
    }

    /// The prompt text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The prompt weight, if one was set.
    #[must_use]
    pub const fn weight(&self) -> Option<f32> {
        self.weight
    }
}

/// Diffusion sampler used for the generation process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sampler {
    /// `DDIM`
    #[serde(rename = "DDIM")]
    Ddim,
    /// `DDPM`
    #[serde(rename = "DDPM")]
    Ddpm,
    /// `K_DPMPP_2M`
    #[serde(rename = "K_DPMPP_2M")]
    KDpmpp2M,
    /// `K_DPMPP_2S_ANCESTRAL`
    #[serde(rename = "K_DPMPP_2S_ANCESTRAL")]
    KDpmpp2SAncestral,
    /// `K_DPM_2`
    #[serde(rename = "K_DPM_2")]
    KDpm2,
    /// `K_DPM_2_ANCESTRAL`
    #[serde(rename = "K_DPM_2_ANCESTRAL")]
    KDpm2Ancestral,
    /// `K_EULER`
    #[serde(rename = "K_EULER")]
    KEuler,
    /// `K_EULER_ANCESTRAL`
    #[serde(rename = "K_EULER_ANCESTRAL")]
    KEulerAncestral,
    /// `K_HEUN`
    #[serde(rename = "K_HEUN")]
    KHeun,
    /// `K_LMS`
    #[serde(rename = "K_LMS")]
    KLms,
}

/// CLIP guidance preset balancing quality against speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClipGuidancePreset {
    /// Fast preset biased towards blue tones.
    FastBlue,
    /// Fast preset biased towards green tones.
    FastGreen,
    /// No CLIP guidance (service default).
    #[default]
    None,
    /// Simple guidance.
    Simple,
    /// Slower, higher quality guidance.
    Slow,
    /// Even slower guidance.
    Slower,
    /// Slowest, highest quality guidance.
    Slowest,
}

/// Style preset steering the overall look of generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    /// `3d-model`
    #[serde(rename = "3d-model")]
    ThreeDModel,
    /// `analog-film`
    AnalogFilm,
    /// `anime`
    Anime,
    /// `cinematic`
    Cinematic,
    /// `comic-book`
    ComicBook,
    /// `digital-art`
    DigitalArt,
    /// `enhance`
    Enhance,
    /// `fantasy-art`
    FantasyArt,
    /// `isometric`
    Isometric,
    /// `line-art`
    LineArt,
    /// `low-poly`
    LowPoly,
    /// `modeling-compound`
    ModelingCompound,
    /// `neon-punk`
    NeonPunk,
    /// `origami`
    Origami,
    /// `photographic`
    Photographic,
    /// `pixel-art`
    PixelArt,
    /// `tile-texture`
    TileTexture,
}

/// Dimension pairs the SDXL service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 512 x 512
    Square512,
    /// 1024 x 1024
    Square1024,
    /// 1152 x 896
    Landscape1152x896,
    /// 896 x 1152
    Portrait896x1152,
    /// 1216 x 832
    Landscape1216x832,
    /// 1344 x 768
    Landscape1344x768,
    /// 768 x 1344
    Portrait768x1344,
    /// 1536 x 640
    Landscape1536x640,
}

impl ImageSize {
    /// Width and height in pixels.
    #[must_use]
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Square512 => (512, 512),
            Self::Square1024 => (1024, 1024),
            Self::Landscape1152x896 => (1152, 896),
            Self::Portrait896x1152 => (896, 1152),
            Self::Landscape1216x832 => (1216, 832),
            Self::Landscape1344x768 => (1344, 768),
            Self::Portrait768x1344 => (768, 1344),
            Self::Landscape1536x640 => (1536, 640),
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.dimensions();
        write!(f, "{width}x{height}")
    }
}

/// How the init image constrains an image-to-image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InitImageMode {
    /// Blend by image strength (service default).
    #[default]
    ImageStrength,
    /// Blend by diffusion step schedule.
    StepSchedule,
}

/// A validated text-to-image request.
///
/// Constructed through [`TextToImageRequest::builder`]; construction fails
/// rather than producing a record the service would reject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextToImageRequest {
    text_prompts: Vec<TextPrompt>,
    height: u32,
    width: u32,
    cfg_scale: f32,
    clip_guidance_preset: ClipGuidancePreset,
    #[serde(skip_serializing_if = "Option::is_none")]
    sampler: Option<Sampler>,
    samples: u32,
    seed: u32,
    steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_preset: Option<StylePreset>,
}

impl TextToImageRequest {
    /// Create a builder with the service defaults.
    #[must_use]
    pub fn builder() -> TextToImageRequestBuilder {
        TextToImageRequestBuilder::default()
    }

    /// The prompt list.
    #[must_use]
    pub fn text_prompts(&self) -> &[TextPrompt] {
        &self.text_prompts
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Guidance scale.
    #[must_use]
    pub const fn cfg_scale(&self) -> f32 {
        self.cfg_scale
    }

    /// Number of images to generate.
    #[must_use]
    pub const fn samples(&self) -> u32 {
        self.samples
    }

    /// Diffusion seed; 0 lets the service pick one.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Number of diffusion steps.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }
}

/// Builder for [`TextToImageRequest`].
#[derive(Debug, Clone)]
pub struct TextToImageRequestBuilder {
    text_prompts: Vec<TextPrompt>,
    height: u32,
    width: u32,
    cfg_scale: f32,
    clip_guidance_preset: ClipGuidancePreset,
    sampler: Option<Sampler>,
    samples: u32,
    seed: u32,
    steps: u32,
    style_preset: Option<StylePreset>,
}

impl Default for TextToImageRequestBuilder {
    fn default() -> Self {
        Self {
            text_prompts: Vec::new(),
            height: 512,
            width: 512,
            cfg_scale: 7.0,
            clip_guidance_preset: ClipGuidancePreset::None,
            sampler: None,
            samples: 1,
            seed: 0,
            steps: 30,
            style_preset: None,
        }
    }
}

impl TextToImageRequestBuilder {
    /// Append a prompt with the default weight.
    #[must_use]
    pub fn prompt(mut self, text: impl Into<String>) -> Self {
        self.text_prompts.push(TextPrompt::new(text));
        self
    }

    /// Append a negative prompt (weight -1.0).
    #[must_use]
    pub fn negative_prompt(mut self, text: impl Into<String>) -> Self {
        self.text_prompts.push(TextPrompt::negative(text));
        self
    }

    /// Append a prepared prompt, e.g. one with a custom weight.
    #[must_use]
    pub fn text_prompt(mut self, prompt: TextPrompt) -> Self {
        self.text_prompts.push(prompt);
        self
    }

    /// Set width and height from a supported dimension pair.
    #[must_use]
    pub const fn size(mut self, size: ImageSize) -> Self {
        let (width, height) = size.dimensions();
        self.width = width;
        self.height = height;
        self
    }

    /// Set the image height in pixels (multiple of 64, at least 128).
    #[must_use]
    pub const fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the image width in pixels (multiple of 64, at least 128).
    #[must_use]
    pub const fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the guidance scale (0 to 35).
    #[must_use]
    pub const fn cfg_scale(mut self, cfg_scale: f32) -> Self {
        self.cfg_scale = cfg_scale;
        self
    }

    /// Set the CLIP guidance preset.
    #[must_use]
    pub const fn clip_guidance_preset(mut self, preset: ClipGuidancePreset) -> Self {
        self.clip_guidance_preset = preset;
        self
    }

    /// Set the diffusion sampler. When unset, the service picks one.
    #[must_use]
    pub const fn sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = Some(sampler);
        self
    }

    /// Set the number of images to generate (1 to 10).
    #[must_use]
    pub const fn samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Set the diffusion seed; 0 lets the service pick one.
    #[must_use]
    pub const fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of diffusion steps (10 to 50).
    #[must_use]
    pub const fn steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Set the style preset.
    #[must_use]
    pub const fn style_preset(mut self, preset: StylePreset) -> Self {
        self.style_preset = Some(preset);
        self
    }

    /// Validate the parameters and build the request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the prompt list is empty, a
    /// prompt is longer than [`MAX_PROMPT_LENGTH`], a dimension is not a
    /// multiple of [`DIMENSION_STEP`] or below [`MIN_DIMENSION`], or a
    /// numeric parameter falls outside its documented range.
    pub fn build(self) -> Result<TextToImageRequest, ValidationError> {
        validate_prompts(&self.text_prompts)?;
        validate_dimension("height", self.height)?;
        validate_dimension("width", self.width)?;
        validate_range("cfg_scale", f64::from(self.cfg_scale), 0.0, 35.0)?;
        validate_range("steps", f64::from(self.steps), 10.0, 50.0)?;
        validate_range("samples", f64::from(self.samples), 1.0, 10.0)?;

        Ok(TextToImageRequest {
            text_prompts: self.text_prompts,
            height: self.height,
            width: self.width,
            cfg_scale: self.cfg_scale,
            clip_guidance_preset: self.clip_guidance_preset,
            sampler: self.sampler,
            samples: self.samples,
            seed: self.seed,
            steps: self.steps,
            style_preset: self.style_preset,
        })
    }
}

/// A validated image-to-image request.
///
/// Like [`TextToImageRequest`] but guided by an init image; width and
/// height are taken from that image by the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageToImageRequest {
    text_prompts: Vec<TextPrompt>,
    init_image: String,
    init_image_mode: InitImageMode,
    image_strength: f32,
    cfg_scale: f32,
    clip_guidance_preset: ClipGuidancePreset,
    #[serde(skip_serializing_if = "Option::is_none")]
    sampler: Option<Sampler>,
    samples: u32,
    seed: u32,
    steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_preset: Option<StylePreset>,
}

impl ImageToImageRequest {
    /// Create a builder around a base64-encoded init image.
    #[must_use]
    pub fn builder(init_image: impl Into<String>) -> ImageToImageRequestBuilder {
        ImageToImageRequestBuilder::new(init_image)
    }

    /// The prompt list.
    #[must_use]
    pub fn text_prompts(&self) -> &[TextPrompt] {
        &self.text_prompts
    }

    /// The base64-encoded init image.
    #[must_use]
    pub fn init_image(&self) -> &str {
        &self.init_image
    }

    /// How strongly the init image constrains the output.
    #[must_use]
    pub const fn image_strength(&self) -> f32 {
        self.image_strength
    }

    /// Number of images to generate.
    #[must_use]
    pub const fn samples(&self) -> u32 {
        self.samples
    }
}

/// Builder for [`ImageToImageRequest`].
#[derive(Debug, Clone)]
pub struct ImageToImageRequestBuilder {
    text_prompts: Vec<TextPrompt>,
    init_image: String,
    init_image_mode: InitImageMode,
    image_strength: f32,
    cfg_scale: f32,
    clip_guidance_preset: ClipGuidancePreset,
    sampler: Option<Sampler>,
    samples: u32,
    seed: u32,
    steps: u32,
    style_preset: Option<StylePreset>,
}

impl ImageToImageRequestBuilder {
    fn new(init_image: impl Into<String>) -> Self {
        Self {
            text_prompts: Vec::new(),
            init_image: init_image.into(),
            init_image_mode: InitImageMode::ImageStrength,
            image_strength: 0.35,
            cfg_scale: 7.0,
            clip_guidance_preset: ClipGuidancePreset::None,
            sampler: None,
            samples: 1,
            seed: 0,
            steps: 30,
            style_preset: None,
        }
    }

    /// Append a prompt with the default weight.
    #[must_use]
    pub fn prompt(mut self, text: impl Into<String>) -> Self {
        self.text_prompts.push(TextPrompt::new(text));
        self
    }

    /// Append a negative prompt (weight -1.0).
    #[must_use]
    pub fn negative_prompt(mut self, text: impl Into<String>) -> Self {
        self.text_prompts.push(TextPrompt::negative(text));
        self
    }

    /// Append a prepared prompt, e.g. one with a custom weight.
    #[must_use]
    pub fn text_prompt(mut self, prompt: TextPrompt) -> Self {
        self.text_prompts.push(prompt);
        self
    }

    /// Set how the init image constrains generation.
    #[must_use]
    pub const fn init_image_mode(mut self, mode: InitImageMode) -> Self {
        self.init_image_mode = mode;
        self
    }

    /// Set the init image strength (0 to 1).
    #[must_use]
    pub const fn image_strength(mut self, strength: f32) -> Self {
        self.image_strength = strength;
        self
    }

    /// Set the guidance scale (0 to 35).
    #[must_use]
    pub const fn cfg_scale(mut self, cfg_scale: f32) -> Self {
        self.cfg_scale = cfg_scale;
        self
    }

    /// Set the CLIP guidance preset.
    #[must_use]
    pub const fn clip_guidance_preset(mut self, preset: ClipGuidancePreset) -> Self {
        self.clip_guidance_preset = preset;
        self
    }

    /// Set the diffusion sampler. When unset, the service picks one.
    #[must_use]
    pub const fn sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = Some(sampler);
        self
    }

    /// Set the number of images to generate (1 to 10).
    #[must_use]
    pub const fn samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Set the diffusion seed; 0 lets the service pick one.
    #[must_use]
    pub const fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of diffusion steps (10 to 50).
    #[must_use]
    pub const fn steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Set the style preset.
    #[must_use]
    pub const fn style_preset(mut self, preset: StylePreset) -> Self {
        self.style_preset = Some(preset);
        self
    }

    /// Validate the parameters and build the request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the prompt list is empty or
    /// over-long, the init image is empty, or a numeric parameter falls
    /// outside its documented range.
    pub fn build(self) -> Result<ImageToImageRequest, ValidationError> {
        validate_prompts(&self.text_prompts)?;
        if self.init_image.is_empty() {
            return Err(ValidationError::EmptyInitImage);
        }
        validate_range("image_strength", f64::from(self.image_strength), 0.0, 1.0)?;
        validate_range("cfg_scale", f64::from(self.cfg_scale), 0.0, 35.0)?;
        validate_range("steps", f64::from(self.steps), 10.0, 50.0)?;
        validate_range("samples", f64::from(self.samples), 1.0, 10.0)?;

        Ok(ImageToImageRequest {
            text_prompts: self.text_prompts,
            init_image: self.init_image,
            init_image_mode: self.init_image_mode,
            image_strength: self.image_strength,
            cfg_scale: self.cfg_scale,
            clip_guidance_preset: self.clip_guidance_preset,
            sampler: self.sampler,
            samples: self.samples,
            seed: self.seed,
            steps: self.steps,
            style_preset: self.style_preset,
        })
    }
}

fn validate_prompts(prompts: &[TextPrompt]) -> Result<(), ValidationError> {
    if prompts.is_empty() {
        return Err(ValidationError::EmptyPromptList);
    }
    for prompt in prompts {
        let length = prompt.text.chars().count();
        if length > MAX_PROMPT_LENGTH {
            return Err(ValidationError::PromptTooLong {
                length,
                max: MAX_PROMPT_LENGTH,
            });
        }
    }
    Ok(())
}

fn validate_dimension(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value % DIMENSION_STEP != 0 {
        return Err(ValidationError::DimensionNotMultiple {
            field,
            value,
            step: DIMENSION_STEP,
        });
    }
    if value < MIN_DIMENSION {
        return Err(ValidationError::DimensionTooSmall {
            field,
            value,
            min: MIN_DIMENSION,
        });
    }
    Ok(())
}

fn validate_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::ValueOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        let request = TextToImageRequest::builder()
            .prompt("a lighthouse")
            .build()
            .unwrap();

        assert_eq!(request.height(), 512);
        assert_eq!(request.width(), 512);
        assert_eq!(request.cfg_scale(), 7.0);
        assert_eq!(request.samples(), 1);
        assert_eq!(request.seed(), 0);
        assert_eq!(request.steps(), 30);
    }

    #[test]
    fn test_default_wire_body() {
        let request = TextToImageRequest::builder()
            .prompt("a lighthouse")
            .build()
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["text_prompts"],
            serde_json::json!([{"text": "a lighthouse"}])
        );
        assert_eq!(body["height"], 512);
        assert_eq!(body["width"], 512);
        assert_eq!(body["cfg_scale"], 7.0);
        assert_eq!(body["clip_guidance_preset"], "NONE");
        assert_eq!(body["samples"], 1);
        assert_eq!(body["seed"], 0);
        assert_eq!(body["steps"], 30);
        assert!(body.get("sampler").is_none());
        assert!(body.get("style_preset").is_none());
    }

    #[test]
    fn test_enum_wire_spellings() {
        let request = TextToImageRequest::builder()
            .prompt("a lighthouse")
            .sampler(Sampler::KDpmpp2SAncestral)
            .clip_guidance_preset(ClipGuidancePreset::FastBlue)
            .style_preset(StylePreset::ThreeDModel)
            .build()
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["sampler"], "K_DPMPP_2S_ANCESTRAL");
        assert_eq!(body["clip_guidance_preset"], "FAST_BLUE");
        assert_eq!(body["style_preset"], "3d-model");
    }

    #[test]
    fn test_negative_prompt_weight() {
        let request = TextToImageRequest::builder()
            .prompt("a lighthouse")
            .negative_prompt("fog")
            .build()
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["text_prompts"][1]["text"], "fog");
        assert_eq!(body["text_prompts"][1]["weight"], -1.0);
    }

    #[test]
    fn test_empty_prompt_list_rejected() {
        let err = TextToImageRequest::builder().build().unwrap_err();
        assert_eq!(err, ValidationError::EmptyPromptList);
    }

    #[test]
    fn test_overlong_prompt_rejected() {
        let err = TextToImageRequest::builder()
            .prompt("x".repeat(MAX_PROMPT_LENGTH + 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::PromptTooLong { .. }));
    }

    #[test]
    fn test_non_multiple_dimension_rejected() {
        let err = TextToImageRequest::builder()
            .prompt("a lighthouse")
            .height(500)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DimensionNotMultiple {
                field: "height",
                value: 500,
                step: 64,
            }
        );

        let err = TextToImageRequest::builder()
            .prompt("a lighthouse")
            .width(900)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::DimensionNotMultiple { field: "width", .. }
        ));
    }

    #[test]
    fn test_too_small_dimension_rejected() {
        let err = TextToImageRequest::builder()
            .prompt("a lighthouse")
            .height(64)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DimensionTooSmall {
                field: "height",
                value: 64,
                min: 128,
            }
        );
    }

    #[test]
    fn test_ranges_enforced() {
        let base = || TextToImageRequest::builder().prompt("a lighthouse");

        assert!(matches!(
            base().cfg_scale(35.5).build().unwrap_err(),
            ValidationError::ValueOutOfRange {
                field: "cfg_scale",
                ..
            }
        ));
        assert!(matches!(
            base().steps(9).build().unwrap_err(),
            ValidationError::ValueOutOfRange { field: "steps", .. }
        ));
        assert!(matches!(
            base().steps(51).build().unwrap_err(),
            ValidationError::ValueOutOfRange { field: "steps", .. }
        ));
        assert!(matches!(
            base().samples(0).build().unwrap_err(),
            ValidationError::ValueOutOfRange {
                field: "samples",
                ..
            }
        ));
        assert!(matches!(
            base().samples(11).build().unwrap_err(),
            ValidationError::ValueOutOfRange {
                field: "samples",
                ..
            }
        ));
    }

    #[test]
    fn test_range_boundaries_accepted() {
        let base = || TextToImageRequest::builder().prompt("a lighthouse");

        assert!(base().cfg_scale(0.0).build().is_ok());
        assert!(base().cfg_scale(35.0).build().is_ok());
        assert!(base().steps(10).build().is_ok());
        assert!(base().steps(50).build().is_ok());
        assert!(base().samples(1).build().is_ok());
        assert!(base().samples(10).build().is_ok());
        assert!(base().height(128).width(128).build().is_ok());
    }

    #[test]
    fn test_all_supported_sizes_valid() {
        let sizes = [
            ImageSize::Square512,
            ImageSize::Square1024,
            ImageSize::Landscape1152x896,
            ImageSize::Portrait896x1152,
            ImageSize::Landscape1216x832,
            ImageSize::Landscape1344x768,
            ImageSize::Portrait768x1344,
            ImageSize::Landscape1536x640,
        ];
        for size in sizes {
            let request = TextToImageRequest::builder()
                .prompt("a lighthouse")
                .size(size)
                .build()
                .unwrap();
            let (width, height) = size.dimensions();
            assert_eq!(request.width(), width);
            assert_eq!(request.height(), height);
        }
    }

    #[test]
    fn test_image_size_display() {
        assert_eq!(ImageSize::Landscape1536x640.to_string(), "1536x640");
    }

    #[test]
    fn test_image_to_image_defaults() {
        let request = ImageToImageRequest::builder("QUJD")
            .prompt("make it night")
            .build()
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["init_image"], "QUJD");
        assert_eq!(body["init_image_mode"], "IMAGE_STRENGTH");
        assert!((body["image_strength"].as_f64().unwrap() - 0.35).abs() < 1e-6);
        assert!(body.get("height").is_none());
        assert!(body.get("width").is_none());
    }

    #[test]
    fn test_image_to_image_empty_init_rejected() {
        let err = ImageToImageRequest::builder("")
            .prompt("make it night")
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyInitImage);
    }

    #[test]
    fn test_image_to_image_strength_range() {
        let err = ImageToImageRequest::builder("QUJD")
            .prompt("make it night")
            .image_strength(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ValueOutOfRange {
                field: "image_strength",
                ..
            }
        ));
    }

    #[test]
    fn test_step_schedule_mode_serialized() {
        let request = ImageToImageRequest::builder("QUJD")
            .prompt("make it night")
            .init_image_mode(InitImageMode::StepSchedule)
            .build()
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["init_image_mode"], "STEP_SCHEDULE");
    }
}
