//! Two-chunk SSE reply emulating a streamed assistant message

use std::time::{SystemTime, UNIX_EPOCH};

use zai_core::openai::{ChatCompletionChunk, ChunkChoice, ChunkDelta};

use crate::types::InlinedImage;

/// Final frame marking the end of the stream
pub const DONE_SENTINEL: &str = "[DONE]";

const CHUNK_OBJECT: &str = "chat.completion.chunk";

/// Build the content chunk and the terminal chunk for one reply
///
/// Both chunks share an id and a creation timestamp taken once, here.
pub fn synthesize(model: &str, image: &InlinedImage) -> [ChatCompletionChunk; 2] {
    let id = completion_id();
    let created = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let chunk = |delta: ChunkDelta, finish_reason: Option<&str>| ChatCompletionChunk {
        id: id.clone(),
        object: CHUNK_OBJECT.to_owned(),
        created,
        model: model.to_owned(),
        choices: vec![ChunkChoice {
            index: 0,
            delta,
            finish_reason: finish_reason.map(str::to_owned),
        }],
    };

    let content = ChunkDelta {
        role: Some("assistant".to_owned()),
        content: Some(image.markdown()),
    };

    [chunk(content, None), chunk(ChunkDelta::default(), Some("stop"))]
}

fn completion_id() -> String {
    format!("chatcmpl-{}", uuid::Uuid::new_v4().simple())
}
