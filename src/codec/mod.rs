use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Encode failed: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("Decode failed at offset {offset}: {source}")]
    Decode {
        offset: u64,
        source: rmp_serde::decode::Error,
    },
}

/// One log record as handed over by the host pipeline: the stream tag, the
/// raw second-resolution timestamp, and the record payload. The payload is a
/// schema-agnostic value tree (null, bool, number, string, array, map).
///
/// Serializes as the MessagePack tuple `[tag, time, record]`, the format the
/// host buffers between record arrival and batch flush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub tag: String,
    pub time: u64,
    pub record: serde_json::Value,
}

impl EventRecord {
    pub fn new(tag: impl Into<String>, time: u64, record: serde_json::Value) -> Self {
        Self {
            tag: tag.into(),
            time,
            record,
        }
    }
}

/// Encodes a single record for the host's flush buffer.
pub fn encode(record: &EventRecord) -> Result<Bytes, CodecError> {
    Ok(Bytes::from(rmp_serde::to_vec(record)?))
}

/// Decodes a buffer of zero or more concatenated encoded records, in buffer
/// order. A truncated or corrupt trailing record fails the whole buffer; no
/// partial batch is produced.
pub fn decode_stream(buf: &[u8]) -> Result<Vec<EventRecord>, CodecError> {
    let mut cursor = Cursor::new(buf);
    let mut records = Vec::new();

    while (cursor.position() as usize) < buf.len() {
        let offset = cursor.position();
        let mut deserializer = rmp_serde::Deserializer::new(&mut cursor);
        let record = EventRecord::deserialize(&mut deserializer)
            .map_err(|source| CodecError::Decode { offset, source })?;
        records.push(record);
    }

    Ok(records)
}
