//! Instruction prompts for the synthesis pipeline.
//!
//! The baseline config travels inside the prompt as pretty-printed JSON;
//! images travel through the vendor adapter's multimodal encoding, so the
//! prompt only carries a short note of how many are attached.

use serde_json::Value;

/// System prompt for create-mode synthesis. Creation starts from zero
/// trust, so the contract (shape, field types) is spelled out up front.
pub(super) const CREATE_SYSTEM_PROMPT: &str = "\
You are an expert at writing JSON configurations for art/design generators.
Produce complete, creative, functional configurations.
ALWAYS return ONLY the valid JSON, with no explanations.
The JSON must include: dimensions, colors, features, form_fields, credits_per_use.
form_fields must be an array of objects with: name, type, label, required (optional), options (for select).
Valid field types: text, textarea, file, date, select, number, color, checkbox.";

/// Default system prompt for edit-mode synthesis, used when the provider
/// profile does not carry its own.
pub(super) const EDIT_SYSTEM_PROMPT: &str = "\
You modify JSON configurations of generators. Return ONLY the modified JSON.";

/// Default system prompt for plain text generation.
pub(super) const GENERATE_SYSTEM_PROMPT: &str = "You are a helpful and creative assistant.";

fn image_note(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        format!("\n\n[{count} image(s) attached for reference]")
    }
}

fn pretty(config: &Value) -> String {
    serde_json::to_string_pretty(config).unwrap_or_else(|_| config.to_string())
}

/// Instruction prompt for creating a new generator from a skeleton config.
pub(super) fn build_create_prompt(
    name: &str,
    generator_type: &str,
    baseline: &Value,
    user_prompt: &str,
    attached_images: usize,
) -> String {
    let width = baseline
        .pointer("/dimensions/width")
        .and_then(Value::as_u64)
        .unwrap_or(1080);
    let height = baseline
        .pointer("/dimensions/height")
        .and_then(Value::as_u64)
        .unwrap_or(1080);

    format!(
        "CREATE A NEW GENERATOR:\n\n\
         Name: {name}\n\
         Type: {generator_type}\n\
         Dimensions: {width}x{height}\n\n\
         BASE CONFIG (use as a starting point):\n{base}\n\n\
         USER INSTRUCTIONS:\n{user_prompt}{note}\n\n\
         Create a complete, creative configuration for this generator.\n\
         Include form_fields relevant to the instructions.\n\
         Return ONLY the complete JSON.",
        base = pretty(baseline),
        note = image_note(attached_images),
    )
}

/// Instruction prompt for editing an existing generator's config.
pub(super) fn build_edit_prompt(
    generator_name: &str,
    current_config: &Value,
    user_prompt: &str,
    attached_images: usize,
) -> String {
    format!(
        "GENERATOR: {generator_name}\n\n\
         CURRENT CONFIG:\n{config}\n\n\
         REQUESTED CHANGE:\n{user_prompt}{note}\n\n\
         Return ONLY the complete modified JSON.",
        config = pretty(current_config),
        note = image_note(attached_images),
    )
}
