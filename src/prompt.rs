//! Per-model prompt templating.
//!
//! The inference endpoint takes raw prompt strings, so instruction formatting
//! is the client's job: a static lookup from model identifier to template.
//! Models without a known template get the question through unchanged, as
//! does a turn with no model picked at all.

const LLAMA2_SYSTEM: &str = "You are a helpful, respectful and honest assistant. \
Always answer as helpfully as possible, while being safe. Your answers should not \
include any harmful, unethical, racist, sexist, toxic, dangerous, or illegal \
content. Please ensure that your responses are socially unbiased and positive in \
nature.\n\nIf a question does not make any sense, or is not factually coherent, \
explain why instead of answering something not correct. If you don't know the \
answer to a question, please don't share false information.";

const NEURAL_CHAT_SYSTEM: &str = "Always assist with care, respect, and truth. \
Respond with utmost utility yet securely. Avoid harmful, unethical, prejudiced, \
or negative content. Ensure replies promote fairness and positivity.";

pub fn apply_template(model: Option<&str>, question: &str) -> String {
    match model {
        Some(
            "meta-llama/Llama-2-7b-chat-hf"
            | "meta-llama/Llama-2-13b-chat-hf"
            | "meta-llama/Llama-2-70b-chat-hf",
        ) => llama2_chat(question),
        Some("Intel/neural-chat-7b-v3-1") => neural_chat(question),
        Some("mistralai/Mistral-7B-Instruct-v0.1") => mistral_instruct(question),
        _ => question.to_string(),
    }
}

fn llama2_chat(question: &str) -> String {
    format!("<s>[INST] <<SYS>>\n{LLAMA2_SYSTEM}\n<</SYS>>\n\n{question} [/INST]")
}

fn neural_chat(question: &str) -> String {
    format!("### System:\n{{{NEURAL_CHAT_SYSTEM}}}\n### User:\n{question}\n### Assistant:")
}

/// The `{input:task_description}` placeholder is substituted server-side
/// with the configured task description before inference.
fn mistral_instruct(question: &str) -> String {
    format!("<s>[INST {{input:task_description}}{question} [/INST]")
}
