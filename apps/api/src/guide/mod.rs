// Guide generation: prompt assembly and the single LLM round-trip behind /generate-guide.
// All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
