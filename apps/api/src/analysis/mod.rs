// Resume analysis pipeline: upload gate → document delegate → response translator.
// All provider calls go through llm_client, never direct Gemini HTTP calls.

pub mod classifier;
pub mod delegate;
pub mod handlers;
pub mod prompts;
pub mod translator;

#[cfg(test)]
pub(crate) mod testing;
