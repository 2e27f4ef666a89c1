//! Streaming sink for the final answer.

/// Consumer of answer chunks.
///
/// Chunks are delivered in order once the answer is known. Returning
/// `false` stops delivery; the pipeline itself is unaffected, and requests
/// already sent to providers are not aborted.
pub trait ResponseSink: Send + Sync {
    fn on_chunk(&self, chunk: &str) -> bool;
}

/// Split an answer into word-sized chunks that concatenate back to the
/// original text (each chunk carries its trailing whitespace).
pub fn word_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_space = false;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            in_space = true;
        } else if in_space {
            chunks.push(&text[start..i]);
            start = i;
            in_space = false;
        }
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Deliver `text` to the sink chunk by chunk; returns the number of chunks accepted.
pub fn stream_to(sink: &dyn ResponseSink, text: &str) -> usize {
    let mut delivered = 0;
    for chunk in word_chunks(text) {
        delivered += 1;
        if !sink.on_chunk(chunk) {
            break;
        }
    }
    delivered
}
