//! Instruction prompt sent with every analysis.

/// Attribution the model is told to use for AI-generated passages.
pub const AI_ATTRIBUTION: &str = "Content likely generated by AI";

const INSTRUCTIONS: &str = "\
SYSTEM: You are a meticulous text analysis tool. Analyze the text below and identify two kinds of content:
1. Sentences or passages copied verbatim from sources on the internet.
2. Sentences or passages that show signs of having been produced by an AI language model (e.g. GPT, Gemini, Copilot).

To spot AI-generated content, look for traits such as unnaturally smooth prose, no personal voice, generic examples, or unusually flawless grammar.

After the analysis you MUST answer ONLY with a JSON object inside a ```json markdown block. Do not add any text before or after the JSON block.

The JSON object must have this structure:
- `plagiarizedSentences`: an array of objects, each with:
  - `sentence`: the exact sentence or passage from the original text that is flagged.
  - `sourceType`: 'WEB' for internet sources or 'AI' for AI-generated content.
  - `source`: the URL of the most likely source when `sourceType` is 'WEB'. When `sourceType` is 'AI', write \"";

/// Build the prompt for `text`. The text is embedded verbatim.
pub fn build_prompt(text: &str) -> String {
    format!("\n{INSTRUCTIONS}{AI_ATTRIBUTION}\".\n\nText to analyze:\n```\n{text}\n```\n")
}
