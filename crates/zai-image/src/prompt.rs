use zai_core::openai::ChatMessage;

/// Text of the first `user` message, or empty if there is none
///
/// Later user turns and other roles are ignored; this is a single-shot
/// generation, not a conversation.
pub fn extract_prompt(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .find(|message| message.role == "user")
        .map(ChatMessage::text)
        .unwrap_or_default()
}
