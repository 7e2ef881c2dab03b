// Prompt templates for the two provider calls

/// Sampling temperature for the extraction call. Slightly higher than
/// translation so the model commits to a reading of low-contrast glyphs.
pub const OCR_TEMPERATURE: f32 = 0.4;

/// Sampling temperature for the translation call.
pub const TRANSLATION_TEMPERATURE: f32 = 0.2;

/// System role for the extraction call.
pub const OCR_SYSTEM_MESSAGE: &str =
    "You are a helpful assistant specialized in extracting text from Indian regional languages.";

/// System role for the translation call.
pub const TRANSLATION_SYSTEM_MESSAGE: &str = "You are a helpful translation assistant.";

/// Default extraction prompt, used when the request supplies none.
pub const DEFAULT_OCR_PROMPT: &str = "Extract all text from this image. The image may contain text \
    in Indian regional languages like Odia, Bengali, Tamil, Telugu, Malayalam, Kannada, Gujarati, \
    Marathi, or other languages. Please extract ALL text exactly as it appears in the image, \
    maintaining the original language. Return only the extracted text without any additional \
    commentary.";

/// Build the translation prompt for a target language and source text.
///
/// The template instructs the model to return only the translated text, and to
/// return the input unchanged when it is already in the target language.
pub fn translation_prompt(target_language: &str, text: &str) -> String {
    format!(
        "Translate the following text to {target_language}. Preserve the meaning and context \
         accurately. If the text is already in {target_language}, just return it as is. Only \
         return the translated text without any additional commentary or explanations.\n\n\
         Text to translate:\n{text}"
    )
}
