//! Tests for per-model prompt templating.

use ripple::prompt::apply_template;

#[test]
fn llama2_family_gets_chat_wrapper() {
    for model in [
        "meta-llama/Llama-2-7b-chat-hf",
        "meta-llama/Llama-2-13b-chat-hf",
        "meta-llama/Llama-2-70b-chat-hf",
    ] {
        let templated = apply_template(Some(model), "What is 2+2?");
        assert!(templated.starts_with("<s>[INST] <<SYS>>"), "{model}");
        assert!(templated.contains("<</SYS>>"), "{model}");
        assert!(templated.contains("What is 2+2?"), "{model}");
        assert!(templated.ends_with("What is 2+2? [/INST]"), "{model}");
    }
}

#[test]
fn neural_chat_gets_system_user_assistant_wrapper() {
    let templated = apply_template(Some("Intel/neural-chat-7b-v3-1"), "What is 2+2?");
    assert!(templated.starts_with("### System:"));
    assert!(templated.contains("### User:\nWhat is 2+2?"));
    assert!(templated.ends_with("### Assistant:"));
}

#[test]
fn mistral_gets_instruct_wrapper_with_task_placeholder() {
    let templated = apply_template(Some("mistralai/Mistral-7B-Instruct-v0.1"), "What is 2+2?");
    // The task-description placeholder is filled in server-side.
    assert_eq!(
        templated,
        "<s>[INST {input:task_description}What is 2+2? [/INST]"
    );
}

#[test]
fn unknown_model_passes_through() {
    let templated = apply_template(Some("hf-internal-testing/tiny-random-gpt2"), "What is 2+2?");
    assert_eq!(templated, "What is 2+2?");
}

#[test]
fn absent_model_passes_through() {
    assert_eq!(apply_template(None, "What is 2+2?"), "What is 2+2?");
}
