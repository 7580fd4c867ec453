//! Fixed prompt material for the voice assistant
//!
//! The instruction template, the refusal phrase for real-time topics, and
//! the canned sentences used when a provider fails. All of these are spoken
//! aloud after sanitization, so they avoid characters the sanitizer drops.

/// Instruction template sent as the system prompt on every turn.
///
/// The model refuses only the closed set of real-time categories and keeps
/// answers short enough to speak in 15-20 seconds.
pub const ASSISTANT_INSTRUCTIONS: &str = "\
You are Chatterbox, a helpful voice assistant.

RULES:
1. Answer general knowledge questions with basic facts (history, geography, culture, etc.)
2. ONLY say \"no real-time access\" for:
   - Weather forecasts
   - Breaking news
   - Stock prices
   - Live sports scores
   - Current events after 2023
3. For general topics like countries, people, science: give clear basic info
4. Keep responses short (15-20 seconds of speech)
5. Sound natural and conversational
6. No markdown formatting";

/// Fixed phrase the model uses to decline real-time topics.
pub const REALTIME_REFUSAL: &str = "no real-time access";

/// Spoken in place of the model's answer when generation fails.
/// The user always gets an assistant turn for accepted input.
pub const GENERATION_FALLBACK: &str =
    "Sorry, something went wrong while answering. Please try again in a moment.";

/// Substituted as the user's words when speech recognition fails.
pub const RECOGNITION_RETRY: &str = "I did not catch that, please say it again.";
